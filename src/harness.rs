use anyhow::{Context, Result};
use futures::future::join_all;
use tracing::debug;

use crate::counter::AnyCounter;
use crate::strategy::Strategy;

/// Fans out `rounds - 1` concurrent increments against `counter`, joins them
/// all at a single point, then reads the value exactly once.
///
/// Every task is spawned before any is awaited, so the increments really do
/// race; the join is the only suspension point the caller sees. With
/// `rounds <= 1` nothing is spawned and the result is 0.
pub async fn fan_out(counter: AnyCounter, rounds: usize) -> Result<u64> {
    let tasks: Vec<_> = (1..rounds)
        .map(|_| {
            let counter = counter.clone();
            tokio::spawn(async move { counter.increase().await })
        })
        .collect();

    for task in join_all(tasks).await {
        task.context("increment task panicked")?;
    }

    Ok(counter.value().await)
}

/// Runs one strategy end to end on a freshly built instance.
pub async fn run(strategy: Strategy, rounds: usize) -> Result<u64> {
    debug!(%strategy, rounds, "starting counter run");
    let value = fan_out(strategy.build(), rounds).await?;
    debug!(%strategy, value, "counter run finished");
    Ok(value)
}

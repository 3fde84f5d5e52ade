use std::env::args;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use strum::IntoEnumIterator;

use sync_counters::harness;
use sync_counters::strategy::Strategy;

const DEFAULT_ROUNDS: usize = 8;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let selector = args().nth(1).ok_or_else(|| {
        anyhow!(
            "no strategy supplied, use `all` or one of {}",
            Strategy::iter()
                .map(|s| s.to_string())
                .collect::<Vec<String>>()
                .join(",")
        )
    })?;
    let rounds = match args().nth(2) {
        Some(n) => n.parse()?,
        None => DEFAULT_ROUNDS,
    };
    let expected = rounds.saturating_sub(1);

    if selector == "all" {
        for strategy in Strategy::iter() {
            let value = harness::run(strategy, rounds).await?;
            println!("{strategy}: COUNT = {value} (expected = {expected})");
        }
    } else {
        let strategy = Strategy::from_str(&selector).map_err(|e| anyhow!("{selector}: {e}"))?;
        let value = harness::run(strategy, rounds).await?;
        println!("{strategy}: COUNT = {value} (expected = {expected})");
    }

    Ok(())
}

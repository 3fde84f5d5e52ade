use std::sync::{Arc, Mutex};

use futures::future::{join_all, BoxFuture, FutureExt};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::counter::AsyncCounter;

/// Chain bookkeeping. `last` is the completion signal of the most recently
/// submitted increment; every new task takes it as a dependency and installs
/// its own. Updating this pointer happens under `chain`'s lock, which is
/// deliberately separate from the task scheduling itself: two callers racing
/// to append would otherwise both chain onto the same predecessor.
struct Chain {
    last: Option<oneshot::Receiver<()>>,
    outstanding: Vec<JoinHandle<()>>,
}

/// Increment tasks run on a concurrent scheduler but are forced into a total
/// order by an explicit dependency chain: task k awaits task k-1's completion
/// signal before applying its +1.
pub struct DependencyChainCounter {
    chain: Mutex<Chain>,
    value: Arc<Mutex<u64>>,
}

impl AsyncCounter for DependencyChainCounter {
    fn new() -> Self {
        Self {
            chain: Mutex::new(Chain {
                last: None,
                outstanding: Vec::new(),
            }),
            value: Arc::new(Mutex::new(0)),
        }
    }

    /// Registers the increment in the chain and returns once it is
    /// scheduled; `value` is what waits for the chain to drain.
    fn increase(&self) -> BoxFuture<'_, ()> {
        async move {
            let (done, dependency) = oneshot::channel();
            let mut chain = self.chain.lock().unwrap();
            let previous = chain.last.replace(dependency);
            let value = self.value.clone();
            let task = tokio::spawn(async move {
                if let Some(previous) = previous {
                    let _ = previous.await;
                }
                *value.lock().unwrap() += 1;
                let _ = done.send(());
            });
            chain.outstanding.push(task);
        }
        .boxed()
    }

    fn value(&self) -> BoxFuture<'_, u64> {
        async move {
            // Drain everything submitted so far, then snapshot.
            let outstanding: Vec<_> = {
                let mut chain = self.chain.lock().unwrap();
                chain.outstanding.drain(..).collect()
            };
            for result in join_all(outstanding).await {
                result.unwrap();
            }
            *self.value.lock().unwrap()
        }
        .boxed()
    }
}

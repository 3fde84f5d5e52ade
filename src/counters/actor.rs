use futures::future::{BoxFuture, FutureExt};
use tokio::sync::{mpsc, oneshot};

use crate::counter::AsyncCounter;

enum Request {
    Increase(oneshot::Sender<()>),
    Value(oneshot::Sender<u64>),
}

/// Single-owner exclusion: one task owns the value and drains a request
/// channel strictly one message at a time. No lock exists anywhere; mutual
/// exclusion falls out of there being exactly one owner.
///
/// The owner task ends on its own once the counter (and with it the sender)
/// is dropped.
pub struct ActorCounter {
    requests: mpsc::Sender<Request>,
}

impl AsyncCounter for ActorCounter {
    fn new() -> Self {
        let (requests, mut inbox) = mpsc::channel(64);

        tokio::spawn(async move {
            let mut value = 0u64;
            while let Some(request) = inbox.recv().await {
                match request {
                    Request::Increase(done) => {
                        value += 1;
                        let _ = done.send(());
                    }
                    Request::Value(reply) => {
                        let _ = reply.send(value);
                    }
                }
            }
            tracing::trace!("actor counter owner task finished");
        });

        Self { requests }
    }

    fn increase(&self) -> BoxFuture<'_, ()> {
        async move {
            let (done, applied) = oneshot::channel();
            self.requests.send(Request::Increase(done)).await.unwrap();
            applied.await.unwrap();
        }
        .boxed()
    }

    fn value(&self) -> BoxFuture<'_, u64> {
        async move {
            let (reply, current) = oneshot::channel();
            self.requests.send(Request::Value(reply)).await.unwrap();
            current.await.unwrap()
        }
        .boxed()
    }
}

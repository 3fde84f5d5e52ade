use std::sync::Arc;

use futures::future::BoxFuture;

/// Contract shared by every blocking counter variant.
///
/// `increase` must not return before the +1 is applied, and `value` must
/// never observe a partially applied increment, no matter how many threads
/// call into the same instance at once.
pub trait SyncCounter: Send + Sync + 'static {
    fn new() -> Self
    where
        Self: Sized;

    fn increase(&self);

    fn value(&self) -> u64;
}

/// Suspending flavor of the contract for variants that live on the async
/// runtime (actor task, async semaphore, dependency chain).
pub trait AsyncCounter: Send + Sync + 'static {
    fn new() -> Self
    where
        Self: Sized;

    fn increase(&self) -> BoxFuture<'_, ()>;

    fn value(&self) -> BoxFuture<'_, u64>;
}

/// Type-erasing adapter over both contract flavors.
///
/// Purely an interface shim: it forwards every call to the wrapped variant
/// and adds no synchronization of its own. Clones share the same underlying
/// instance, which is what lets the harness hand one counter to many tasks.
#[derive(Clone)]
pub struct AnyCounter {
    inner: Inner,
}

#[derive(Clone)]
enum Inner {
    Sync(Arc<dyn SyncCounter>),
    Async(Arc<dyn AsyncCounter>),
}

impl AnyCounter {
    pub fn from_sync<C: SyncCounter>(counter: C) -> Self {
        Self {
            inner: Inner::Sync(Arc::new(counter)),
        }
    }

    pub fn from_async<C: AsyncCounter>(counter: C) -> Self {
        Self {
            inner: Inner::Async(Arc::new(counter)),
        }
    }

    pub async fn increase(&self) {
        match &self.inner {
            Inner::Sync(counter) => counter.increase(),
            Inner::Async(counter) => counter.increase().await,
        }
    }

    pub async fn value(&self) -> u64 {
        match &self.inner {
            Inner::Sync(counter) => counter.value(),
            Inner::Async(counter) => counter.value().await,
        }
    }
}

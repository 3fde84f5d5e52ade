use std::cell::UnsafeCell;

use futures::future::{BoxFuture, FutureExt};
use tokio::sync::Semaphore;

use crate::counter::AsyncCounter;

/// Counting semaphore with a single permit: acquire before touching the
/// value, release (permit drop) after. One acquire/release pair per
/// operation, for reads as well as writes.
pub struct SemaphoreCounter {
    permit: Semaphore,
    value: UnsafeCell<u64>,
}

// Only the permit holder touches `value`, and there is exactly one permit.
unsafe impl Send for SemaphoreCounter {}
unsafe impl Sync for SemaphoreCounter {}

impl AsyncCounter for SemaphoreCounter {
    fn new() -> Self {
        Self {
            permit: Semaphore::new(1),
            value: UnsafeCell::new(0),
        }
    }

    fn increase(&self) -> BoxFuture<'_, ()> {
        async move {
            let _permit = self.permit.acquire().await.unwrap();
            unsafe { *self.value.get() += 1 };
        }
        .boxed()
    }

    fn value(&self) -> BoxFuture<'_, u64> {
        async move {
            let _permit = self.permit.acquire().await.unwrap();
            unsafe { *self.value.get() }
        }
        .boxed()
    }
}

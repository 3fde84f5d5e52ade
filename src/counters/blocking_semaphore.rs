use std::cell::UnsafeCell;
use std::sync::{Condvar, Mutex};

use crate::counter::SyncCounter;

/// Blocking counting semaphore built on a mutex and a condition variable;
/// the standard library ships no blocking semaphore of its own.
pub struct Semaphore {
    permits: Mutex<usize>,
    available: Condvar,
}

impl Semaphore {
    pub fn new(permits: usize) -> Self {
        Self {
            permits: Mutex::new(permits),
            available: Condvar::new(),
        }
    }

    pub fn acquire(&self) {
        let mut permits = self.permits.lock().unwrap();
        while *permits == 0 {
            permits = self.available.wait(permits).unwrap();
        }
        *permits -= 1;
    }

    pub fn release(&self) {
        *self.permits.lock().unwrap() += 1;
        self.available.notify_one();
    }
}

/// Semaphore-gated counter: callers block on the single permit around both
/// mutation and read. Exactly one acquire is paired with exactly one release
/// per operation, so permits can neither leak nor multiply.
pub struct BlockingSemaphoreCounter {
    permit: Semaphore,
    value: UnsafeCell<u64>,
}

// One permit exists and every access to `value` holds it.
unsafe impl Send for BlockingSemaphoreCounter {}
unsafe impl Sync for BlockingSemaphoreCounter {}

impl SyncCounter for BlockingSemaphoreCounter {
    fn new() -> Self {
        Self {
            permit: Semaphore::new(1),
            value: UnsafeCell::new(0),
        }
    }

    fn increase(&self) {
        self.permit.acquire();
        unsafe { *self.value.get() += 1 };
        self.permit.release();
    }

    fn value(&self) -> u64 {
        self.permit.acquire();
        let current = unsafe { *self.value.get() };
        self.permit.release();
        current
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;
    use std::time::Duration;

    use super::Semaphore;

    #[test]
    fn permits_are_conserved_under_contention() {
        let sem = Arc::new(Semaphore::new(1));
        let busy = Arc::new(std::sync::atomic::AtomicUsize::new(0));

        let v: Vec<_> = (0..8)
            .map(|_| {
                let sem0 = sem.clone();
                let busy0 = busy.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        sem0.acquire();
                        let inside = busy0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                        assert_eq!(inside, 0, "two holders of a single permit");
                        busy0.fetch_sub(1, std::sync::atomic::Ordering::SeqCst);
                        sem0.release();
                    }
                })
            })
            .collect();

        for t in v {
            t.join().unwrap();
        }
    }

    #[test]
    fn acquire_blocks_until_release() {
        let sem = Arc::new(Semaphore::new(0));
        let sem0 = sem.clone();
        let waiter = std::thread::spawn(move || sem0.acquire());

        std::thread::sleep(Duration::from_millis(50));
        assert!(!waiter.is_finished());

        sem.release();
        waiter.join().unwrap();
    }
}

use std::cell::UnsafeCell;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU32, Ordering};

use atomic_wait::{wait, wake_one};

use crate::counter::SyncCounter;

/// Minimal futex-backed mutex. Unfair: whichever waiter the kernel wakes (or
/// whichever thread arrives between unlock and wake) wins the lock.
///
/// state is 0 when unlocked and 1 when locked.
pub struct FutexLock<T> {
    state: AtomicU32,
    data: UnsafeCell<T>,
}

pub struct FutexLockGuard<'a, T> {
    lock: &'a FutexLock<T>,
}

impl<T> FutexLock<T> {
    pub const fn new(v: T) -> Self {
        Self {
            state: AtomicU32::new(0),
            data: UnsafeCell::new(v),
        }
    }

    pub fn lock(&self) -> FutexLockGuard<T> {
        while self.state.swap(1, Ordering::Acquire) == 1 {
            wait(&self.state, 1);
        }
        FutexLockGuard { lock: self }
    }
}

unsafe impl<T: Send> Sync for FutexLock<T> {}
unsafe impl<T: Send> Send for FutexLock<T> {}

impl<'a, T> Drop for FutexLockGuard<'a, T> {
    fn drop(&mut self) {
        self.lock.state.store(0, Ordering::Release);
        wake_one(&self.lock.state);
    }
}

impl<'a, T> Deref for FutexLockGuard<'a, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        unsafe { &*self.lock.data.get() }
    }
}

impl<'a, T> DerefMut for FutexLockGuard<'a, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        unsafe { &mut *self.lock.data.get() }
    }
}

/// Counter guarded by the low-overhead futex lock above.
pub struct FutexLockCounter {
    value: FutexLock<u64>,
}

impl SyncCounter for FutexLockCounter {
    fn new() -> Self {
        Self {
            value: FutexLock::new(0),
        }
    }

    fn increase(&self) {
        *self.value.lock() += 1;
    }

    fn value(&self) -> u64 {
        *self.value.lock()
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use super::FutexLock;

    const NUM_LOOP: usize = 10_000;
    const NUM_THREADS: usize = 4;

    #[test]
    fn contended_increments_are_not_lost() {
        let lock = Arc::new(FutexLock::new(0usize));
        let v: Vec<_> = (0..NUM_THREADS)
            .map(|_| {
                let lock0 = lock.clone();
                std::thread::spawn(move || {
                    for _ in 0..NUM_LOOP {
                        let mut data = lock0.lock();
                        *data += 1;
                    }
                })
            })
            .collect();

        for t in v {
            t.join().unwrap();
        }

        assert_eq!(*lock.lock(), NUM_LOOP * NUM_THREADS);
    }
}

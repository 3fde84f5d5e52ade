use std::cell::UnsafeCell;

use crate::counter::SyncCounter;

/// Counter guarded by a native POSIX mutex.
///
/// The handle has an explicit lifecycle: `pthread_mutex_init` runs once at
/// construction and `pthread_mutex_destroy` runs exactly once on drop.
/// The mutex lives in a `Box` because pthread types must not move once
/// initialized.
pub struct PthreadMutexCounter {
    mutex: Box<UnsafeCell<libc::pthread_mutex_t>>,
    value: UnsafeCell<u64>,
}

// The pthread mutex serializes every access to `value`.
unsafe impl Send for PthreadMutexCounter {}
unsafe impl Sync for PthreadMutexCounter {}

impl PthreadMutexCounter {
    fn with_lock<R>(&self, f: impl FnOnce(*mut u64) -> R) -> R {
        unsafe {
            let rc = libc::pthread_mutex_lock(self.mutex.get());
            assert_eq!(rc, 0, "pthread_mutex_lock failed: {rc}");
            let out = f(self.value.get());
            let rc = libc::pthread_mutex_unlock(self.mutex.get());
            assert_eq!(rc, 0, "pthread_mutex_unlock failed: {rc}");
            out
        }
    }
}

impl SyncCounter for PthreadMutexCounter {
    fn new() -> Self {
        let mutex = Box::new(UnsafeCell::new(libc::PTHREAD_MUTEX_INITIALIZER));
        unsafe {
            let rc = libc::pthread_mutex_init(mutex.get(), std::ptr::null());
            assert_eq!(rc, 0, "pthread_mutex_init failed: {rc}");
        }
        Self {
            mutex,
            value: UnsafeCell::new(0),
        }
    }

    fn increase(&self) {
        self.with_lock(|value| unsafe { *value += 1 });
    }

    fn value(&self) -> u64 {
        self.with_lock(|value| unsafe { *value })
    }
}

impl Drop for PthreadMutexCounter {
    fn drop(&mut self) {
        // Drop takes &mut self, so no guard is outstanding and destroying is
        // safe. Runs exactly once.
        unsafe {
            libc::pthread_mutex_destroy(self.mutex.get());
        }
    }
}

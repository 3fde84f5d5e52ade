use std::cell::Cell;

use parking_lot::ReentrantMutex;

use crate::counter::SyncCounter;

/// Re-entrant exclusive lock: the same thread may nest acquisitions without
/// deadlocking, so `increase` can read the current value through a second
/// acquisition while already holding the lock.
pub struct RecursiveLockCounter {
    value: ReentrantMutex<Cell<u64>>,
}

impl RecursiveLockCounter {
    fn current(&self) -> u64 {
        // Nested acquisition; would deadlock on a non-recursive lock.
        self.value.lock().get()
    }
}

impl SyncCounter for RecursiveLockCounter {
    fn new() -> Self {
        Self {
            value: ReentrantMutex::new(Cell::new(0)),
        }
    }

    fn increase(&self) {
        let guard = self.value.lock();
        guard.set(self.current() + 1);
    }

    fn value(&self) -> u64 {
        self.value.lock().get()
    }
}

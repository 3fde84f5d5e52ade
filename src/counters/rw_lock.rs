use std::sync::RwLock;

use crate::counter::SyncCounter;

/// Readers-writer discipline: a write takes the exclusive barrier (no read or
/// write overlaps it), reads run concurrently with each other.
pub struct RwLockCounter {
    value: RwLock<u64>,
}

impl SyncCounter for RwLockCounter {
    fn new() -> Self {
        Self {
            value: RwLock::new(0),
        }
    }

    fn increase(&self) {
        *self.value.write().unwrap() += 1;
    }

    fn value(&self) -> u64 {
        *self.value.read().unwrap()
    }
}

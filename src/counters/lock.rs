use std::sync::Mutex;

use crate::counter::SyncCounter;

/// Plain exclusive lock: one holder at a time for both mutation and read.
pub struct LockCounter {
    value: Mutex<u64>,
}

impl SyncCounter for LockCounter {
    fn new() -> Self {
        Self {
            value: Mutex::new(0),
        }
    }

    fn increase(&self) {
        *self.value.lock().unwrap() += 1;
    }

    fn value(&self) -> u64 {
        *self.value.lock().unwrap()
    }
}

use std::cell::UnsafeCell;
use std::sync::Mutex;

use crate::counter::SyncCounter;

/// Monitor style: a dedicated lock object guards the value, which lives
/// outside the lock itself. Entering the monitor is acquiring that object's
/// lock; every mutation and read happens inside the monitor.
pub struct MonitorCounter {
    monitor: Mutex<()>,
    value: UnsafeCell<u64>,
}

// `value` is only touched while the monitor is held.
unsafe impl Send for MonitorCounter {}
unsafe impl Sync for MonitorCounter {}

impl SyncCounter for MonitorCounter {
    fn new() -> Self {
        Self {
            monitor: Mutex::new(()),
            value: UnsafeCell::new(0),
        }
    }

    fn increase(&self) {
        let _entered = self.monitor.lock().unwrap();
        unsafe { *self.value.get() += 1 };
    }

    fn value(&self) -> u64 {
        let _entered = self.monitor.lock().unwrap();
        unsafe { *self.value.get() }
    }
}

use parking_lot::Mutex;

use crate::counter::SyncCounter;

/// Wrapper that presents a plain value with atomic-looking get/set/mutate
/// operations. The lock that makes it so is internal; call sites never see
/// it, they just read and write what looks like an ordinary field.
pub struct Atomic<T> {
    inner: Mutex<T>,
}

impl<T: Copy> Atomic<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(value),
        }
    }

    pub fn get(&self) -> T {
        *self.inner.lock()
    }

    pub fn set(&self, value: T) {
        *self.inner.lock() = value;
    }

    /// Read-modify-write under the hidden lock, so no update is lost between
    /// a separate `get` and `set`.
    pub fn mutate(&self, mutation: impl FnOnce(&mut T)) {
        mutation(&mut self.inner.lock());
    }
}

pub struct AtomicCounter {
    value: Atomic<u64>,
}

impl SyncCounter for AtomicCounter {
    fn new() -> Self {
        Self {
            value: Atomic::new(0),
        }
    }

    fn increase(&self) {
        self.value.mutate(|value| *value += 1);
    }

    fn value(&self) -> u64 {
        self.value.get()
    }
}

#[cfg(test)]
mod test {
    use super::Atomic;

    #[test]
    fn mutate_is_a_single_read_modify_write() {
        let a = Atomic::new(41);
        a.mutate(|v| *v += 1);
        assert_eq!(a.get(), 42);
        a.set(7);
        assert_eq!(a.get(), 7);
    }
}

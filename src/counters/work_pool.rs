use std::cell::UnsafeCell;
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::counter::SyncCounter;

type WorkItem = Box<dyn FnOnce() + Send>;

/// Small work-scheduling abstraction: a fixed set of workers pulls submitted
/// items off a shared channel. With `max_concurrency` workers, at most that
/// many items execute at once.
pub struct WorkPool {
    items: Option<flume::Sender<WorkItem>>,
    workers: Vec<JoinHandle<()>>,
}

/// Handle to one submitted item; `wait` blocks until the item has run.
pub struct Completion {
    finished: flume::Receiver<()>,
}

impl Completion {
    pub fn wait(self) {
        let _ = self.finished.recv();
    }
}

impl WorkPool {
    pub fn new(max_concurrency: usize) -> Self {
        assert!(max_concurrency > 0);
        let (items, queue) = flume::unbounded::<WorkItem>();
        let workers = (0..max_concurrency)
            .map(|_| {
                let queue = queue.clone();
                std::thread::spawn(move || {
                    while let Ok(item) = queue.recv() {
                        item();
                    }
                })
            })
            .collect();

        Self {
            items: Some(items),
            workers,
        }
    }

    pub fn submit(&self, item: impl FnOnce() + Send + 'static) -> Completion {
        let (done, finished) = flume::bounded(1);
        self.items
            .as_ref()
            .unwrap()
            .send(Box::new(move || {
                item();
                let _ = done.send(());
            }))
            .unwrap();
        Completion { finished }
    }
}

impl Drop for WorkPool {
    fn drop(&mut self) {
        drop(self.items.take());
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}

struct ValueCell(UnsafeCell<u64>);

// Safety invariant: the cell is only ever touched from items running on a
// pool with max concurrency 1, so accesses never overlap.
unsafe impl Send for ValueCell {}
unsafe impl Sync for ValueCell {}

/// Counter whose every operation is a work item on a pool limited to one
/// concurrent item. Equivalent in effect to the serial queue, but exclusion
/// comes from the scheduler's concurrency cap rather than a FIFO owner loop.
pub struct WorkPoolCounter {
    pool: WorkPool,
    value: Arc<ValueCell>,
}

impl SyncCounter for WorkPoolCounter {
    fn new() -> Self {
        Self {
            pool: WorkPool::new(1),
            value: Arc::new(ValueCell(UnsafeCell::new(0))),
        }
    }

    fn increase(&self) {
        let value = self.value.clone();
        self.pool
            .submit(move || unsafe { *value.0.get() += 1 })
            .wait();
    }

    fn value(&self) -> u64 {
        let value = self.value.clone();
        let (reply, current) = flume::bounded(1);
        let read = self.pool.submit(move || {
            let _ = reply.send(unsafe { *value.0.get() });
        });
        read.wait();
        current.recv().unwrap()
    }
}

#[cfg(test)]
mod test {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::WorkPool;

    #[test]
    fn single_worker_pool_never_overlaps_items() {
        let pool = WorkPool::new(1);
        let busy = Arc::new(AtomicUsize::new(0));

        let completions: Vec<_> = (0..64)
            .map(|_| {
                let busy = busy.clone();
                pool.submit(move || {
                    let inside = busy.fetch_add(1, Ordering::SeqCst);
                    assert_eq!(inside, 0, "two items ran at once on a 1-wide pool");
                    busy.fetch_sub(1, Ordering::SeqCst);
                })
            })
            .collect();

        for c in completions {
            c.wait();
        }
    }

    #[test]
    fn wait_returns_after_item_ran() {
        let pool = WorkPool::new(2);
        let ran = Arc::new(AtomicUsize::new(0));
        let ran0 = ran.clone();
        pool.submit(move || {
            ran0.fetch_add(1, Ordering::SeqCst);
        })
        .wait();
        assert_eq!(ran.load(Ordering::SeqCst), 1);
    }
}

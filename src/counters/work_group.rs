use std::sync::mpsc::{sync_channel, SyncSender};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::JoinHandle;

use crate::counter::SyncCounter;

/// Tracks outstanding work items and lets a caller wait until none remain.
/// Callers must `enter` before the item is scheduled; entering after would
/// open a window where `wait` sees zero while work is still in flight.
pub struct CompletionGroup {
    outstanding: Mutex<usize>,
    drained: Condvar,
}

impl CompletionGroup {
    pub fn new() -> Self {
        Self {
            outstanding: Mutex::new(0),
            drained: Condvar::new(),
        }
    }

    pub fn enter(&self) {
        *self.outstanding.lock().unwrap() += 1;
    }

    pub fn leave(&self) {
        let mut outstanding = self.outstanding.lock().unwrap();
        assert!(*outstanding > 0, "completion group count went negative");
        *outstanding -= 1;
        if *outstanding == 0 {
            self.drained.notify_all();
        }
    }

    pub fn wait(&self) {
        let mut outstanding = self.outstanding.lock().unwrap();
        while *outstanding > 0 {
            outstanding = self.drained.wait(outstanding).unwrap();
        }
    }
}

impl Default for CompletionGroup {
    fn default() -> Self {
        Self::new()
    }
}

type Work = Box<dyn FnOnce(&mut u64) + Send>;

/// Each increment becomes a trackable work item: registered with the group,
/// scheduled on a serial worker, deregistered when it finishes. A read waits
/// for the group to hit zero outstanding items and then reads through the
/// same worker.
pub struct WorkGroupCounter {
    group: Arc<CompletionGroup>,
    queue: Option<SyncSender<Work>>,
    worker: Option<JoinHandle<()>>,
}

impl SyncCounter for WorkGroupCounter {
    fn new() -> Self {
        let (queue, items) = sync_channel::<Work>(1024);
        let worker = std::thread::spawn(move || {
            let mut value = 0u64;
            while let Ok(item) = items.recv() {
                item(&mut value);
            }
        });

        Self {
            group: Arc::new(CompletionGroup::new()),
            queue: Some(queue),
            worker: Some(worker),
        }
    }

    fn increase(&self) {
        // Register before scheduling; the worker deregisters on completion.
        self.group.enter();
        let group = self.group.clone();
        self.queue
            .as_ref()
            .unwrap()
            .send(Box::new(move |value| {
                *value += 1;
                group.leave();
            }))
            .unwrap();
    }

    fn value(&self) -> u64 {
        self.group.wait();
        let (reply, current) = sync_channel(1);
        self.queue
            .as_ref()
            .unwrap()
            .send(Box::new(move |value| {
                let _ = reply.send(*value);
            }))
            .unwrap();
        current.recv().unwrap()
    }
}

impl Drop for WorkGroupCounter {
    fn drop(&mut self) {
        drop(self.queue.take());
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;
    use std::time::Duration;

    use super::CompletionGroup;

    #[test]
    fn wait_returns_once_all_items_left() {
        let group = Arc::new(CompletionGroup::new());
        for _ in 0..4 {
            group.enter();
        }

        let group0 = group.clone();
        let worker = std::thread::spawn(move || {
            for _ in 0..4 {
                std::thread::sleep(Duration::from_millis(10));
                group0.leave();
            }
        });

        group.wait();
        worker.join().unwrap();
    }

    #[test]
    fn wait_with_nothing_outstanding_is_immediate() {
        CompletionGroup::new().wait();
    }

    #[test]
    #[should_panic(expected = "completion group count went negative")]
    fn leaving_more_than_entered_is_a_defect() {
        let group = CompletionGroup::new();
        group.enter();
        group.leave();
        group.leave();
    }
}

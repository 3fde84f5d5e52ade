use std::sync::mpsc::{sync_channel, SyncSender};
use std::thread::JoinHandle;

use crate::counter::SyncCounter;

type Job = Box<dyn FnOnce(&mut u64) + Send>;

/// All operations funnel through one FIFO worker thread that owns the value
/// outright. Submission order is the total order: an increment enqueued
/// before a read is applied before that read executes.
///
/// Callers block on a reply channel until their job has run, so `increase`
/// does not return before the +1 is applied.
pub struct SerialQueueCounter {
    queue: Option<SyncSender<Job>>,
    worker: Option<JoinHandle<()>>,
}

impl SerialQueueCounter {
    fn submit<R: Send + 'static>(&self, job: impl FnOnce(&mut u64) -> R + Send + 'static) -> R {
        let (reply, done) = sync_channel(1);
        let queue = self.queue.as_ref().unwrap();
        queue
            .send(Box::new(move |value| {
                let _ = reply.send(job(value));
            }))
            .unwrap();
        done.recv().unwrap()
    }
}

impl SyncCounter for SerialQueueCounter {
    fn new() -> Self {
        let (queue, jobs) = sync_channel::<Job>(1024);
        let worker = std::thread::spawn(move || {
            let mut value = 0u64;
            while let Ok(job) = jobs.recv() {
                job(&mut value);
            }
        });

        Self {
            queue: Some(queue),
            worker: Some(worker),
        }
    }

    fn increase(&self) {
        self.submit(|value| *value += 1);
    }

    fn value(&self) -> u64 {
        self.submit(|value| *value)
    }
}

impl Drop for SerialQueueCounter {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop.
        drop(self.queue.take());
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

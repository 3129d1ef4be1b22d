//! Worker Pool
//!
//! Fixed set of threads pulling jobs off a shared crossbeam channel.

use std::panic::{self, AssertUnwindSafe};
use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, Receiver, Sender};

use crate::error::{Result, RosterError};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// A thread pool with a shared job queue
///
/// A panicking job is caught and logged; the worker keeps serving.
/// Dropping the pool closes the queue and joins every worker once the
/// queued jobs have drained.
pub struct WorkerPool {
    /// Sending half of the job queue, `None` once closed
    tx: Option<Sender<Job>>,

    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Start `threads` workers
    pub fn new(threads: usize) -> Result<Self> {
        if threads == 0 {
            return Err(RosterError::Config(
                "worker pool needs at least one thread".to_string(),
            ));
        }

        let (tx, rx) = channel::unbounded::<Job>();
        let mut workers = Vec::with_capacity(threads);
        for id in 0..threads {
            let rx = rx.clone();
            let handle = thread::Builder::new()
                .name(format!("rosterdb-worker-{}", id))
                .spawn(move || run_jobs(rx))?;
            workers.push(handle);
        }

        tracing::debug!("Started worker pool with {} threads", threads);
        Ok(Self {
            tx: Some(tx),
            workers,
        })
    }

    /// Queue a job for the next free worker
    pub fn spawn<F>(&self, job: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let tx = self
            .tx
            .as_ref()
            .ok_or_else(|| RosterError::Network("worker pool is closed".to_string()))?;
        tx.send(Box::new(job))
            .map_err(|_| RosterError::Network("all workers have exited".to_string()))
    }

    /// Number of worker threads
    pub fn size(&self) -> usize {
        self.workers.len()
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        // closing the queue ends each worker's recv loop
        self.tx.take();
        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
    }
}

fn run_jobs(rx: Receiver<Job>) {
    for job in rx.iter() {
        if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
            tracing::error!("Worker job panicked");
        }
    }
    tracing::debug!("Worker exiting, pool closed");
}

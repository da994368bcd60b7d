//! Work dispatcher - serial and parallel assimilation
//!
//! Farms a fixed list of valid paths out to a pool of worker threads.
//! Paths are pulled from a single shared queue rather than statically
//! pre-sliced, so uneven per-path cost cannot strand work on one
//! worker.
//!
//! ```text
//! Path Queue (crossbeam channel, preloaded)
//! │
//! ├── Worker 0: recv path → assimilate → append record → count
//! ├── Worker 1: recv path → assimilate → append record → count
//! └── Worker N: recv path → assimilate → append record → count
//! │
//! └── Shared Aggregator: records + (completed, total) counter
//! ```
//!
//! With one worker the dispatcher degenerates to a strict in-order
//! sequential loop, which doubles as the ordering ground truth.
//!
//! The first assimilation fault aborts the run: a shutdown flag stops
//! the remaining workers from claiming new paths, and the fault is
//! surfaced to the caller once the pool has drained.

pub mod aggregator;

pub use aggregator::Aggregator;

use crate::drone::Drone;
use crate::error::{AssimilationError, Result, WorkerError};
use crate::progress::ProgressObserver;
use crossbeam_channel::{unbounded, Receiver};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use tracing::debug;

/// Process every path, appending produced records to `aggregator`.
///
/// Serial when `worker_count` is 1, otherwise a fixed pool of exactly
/// `worker_count` threads. Each processed path increments the shared
/// counter exactly once, record or not, and triggers one observer
/// notification.
pub fn run<D: Drone>(
    drone: &D,
    paths: Vec<PathBuf>,
    worker_count: usize,
    aggregator: &Aggregator<D::Record>,
    observer: &dyn ProgressObserver,
) -> Result<()> {
    if worker_count <= 1 {
        run_serial(drone, paths, aggregator, observer)
    } else {
        run_parallel(drone, paths, worker_count, aggregator, observer)
    }
}

/// Strict input-order processing on the calling thread
fn run_serial<D: Drone>(
    drone: &D,
    paths: Vec<PathBuf>,
    aggregator: &Aggregator<D::Record>,
    observer: &dyn ProgressObserver,
) -> Result<()> {
    for path in paths {
        if let Some(record) = drone.assimilate(&path)? {
            aggregator.append(record);
        }
        let (completed, total) = aggregator.increment_and_get();
        observer.on_progress(completed, total);
    }
    Ok(())
}

/// Fixed pool of workers pulling from one shared queue
fn run_parallel<D: Drone>(
    drone: &D,
    paths: Vec<PathBuf>,
    worker_count: usize,
    aggregator: &Aggregator<D::Record>,
    observer: &dyn ProgressObserver,
) -> Result<()> {
    let (work_tx, work_rx) = unbounded();
    for path in paths {
        work_tx.send(path).expect("work queue disconnected");
    }
    // Workers drain until the queue is empty and disconnected.
    drop(work_tx);

    let shutdown = AtomicBool::new(false);

    thread::scope(|scope| -> Result<()> {
        let mut handles = Vec::with_capacity(worker_count);

        for id in 0..worker_count {
            let work_rx = work_rx.clone();
            let shutdown = &shutdown;
            let handle = thread::Builder::new()
                .name(format!("drone-{id}"))
                .spawn_scoped(scope, move || {
                    worker_loop(id, drone, work_rx, aggregator, observer, shutdown)
                })?;
            handles.push(handle);
        }

        let mut first_fault: Option<AssimilationError> = None;
        let mut panicked: Option<usize> = None;

        for (id, handle) in handles.into_iter().enumerate() {
            match handle.join() {
                Ok(Ok(())) => {}
                Ok(Err(fault)) => {
                    if first_fault.is_none() {
                        first_fault = Some(fault);
                    }
                }
                Err(_) => {
                    if panicked.is_none() {
                        panicked = Some(id);
                    }
                }
            }
        }

        if let Some(fault) = first_fault {
            return Err(fault.into());
        }
        if let Some(id) = panicked {
            return Err(WorkerError::Panicked { id }.into());
        }
        Ok(())
    })
}

/// Worker thread - claims paths until the queue drains or a fault stops
/// the run
fn worker_loop<D: Drone>(
    id: usize,
    drone: &D,
    work_rx: Receiver<PathBuf>,
    aggregator: &Aggregator<D::Record>,
    observer: &dyn ProgressObserver,
    shutdown: &AtomicBool,
) -> std::result::Result<(), AssimilationError> {
    debug!(worker = id, "worker started");

    while let Ok(path) = work_rx.recv() {
        if shutdown.load(Ordering::Relaxed) {
            break;
        }

        match drone.assimilate(&path) {
            Ok(Some(record)) => aggregator.append(record),
            Ok(None) => {}
            Err(fault) => {
                shutdown.store(true, Ordering::SeqCst);
                return Err(fault);
            }
        }

        // The faulting arm returns above, so a faulted path is never
        // counted as completed.
        let (completed, total) = aggregator.increment_and_get();
        observer.on_progress(completed, total);
    }

    debug!(worker = id, "worker finished");
    Ok(())
}

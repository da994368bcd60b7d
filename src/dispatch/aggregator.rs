//! Concurrency-safe result aggregation
//!
//! Workers share a single [`Aggregator`]: an append-only record sink
//! plus the (completed, total) progress counter. Workers never hold
//! references to each other's state; completed records and progress
//! increments flow only through this one structure.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Append-only record collector with a shared progress counter
///
/// `total` is fixed at construction, once scanning has determined the
/// number of valid paths. `completed` only increases, up to `total`.
#[derive(Debug)]
pub struct Aggregator<R> {
    records: Mutex<Vec<R>>,
    completed: AtomicUsize,
    total: usize,
}

impl<R> Aggregator<R> {
    /// Create an aggregator for a run over `total` paths
    pub fn new(total: usize) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            completed: AtomicUsize::new(0),
            total,
        }
    }

    /// Append a record produced by a worker
    pub fn append(&self, record: R) {
        self.records
            .lock()
            .expect("aggregator lock poisoned")
            .push(record);
    }

    /// Count one completed path and return the updated counter state
    pub fn increment_and_get(&self) -> (usize, usize) {
        let completed = self.completed.fetch_add(1, Ordering::SeqCst) + 1;
        (completed, self.total)
    }

    /// Current (completed, total) counter state
    pub fn progress(&self) -> (usize, usize) {
        (self.completed.load(Ordering::SeqCst), self.total)
    }

    /// Number of records aggregated so far
    pub fn len(&self) -> usize {
        self.records.lock().expect("aggregator lock poisoned").len()
    }

    /// True if no records have been aggregated
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consume the aggregator, yielding the accumulated records
    pub fn into_records(self) -> Vec<R> {
        self.records
            .into_inner()
            .expect("aggregator lock poisoned")
    }
}

impl<R: Clone> Aggregator<R> {
    /// Copy of the records aggregated so far
    pub fn snapshot(&self) -> Vec<R> {
        self.records
            .lock()
            .expect("aggregator lock poisoned")
            .clone()
    }
}

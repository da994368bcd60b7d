//! Engine facade
//!
//! [`Harvester`] ties the pieces together: scan the tree for valid
//! paths, dispatch them across the configured worker pool, accumulate
//! the produced records, and persist or restore the result set.
//!
//! Construction performs no I/O; a harvest only happens when
//! [`Harvester::scan_and_assimilate`] is called.

use crate::config::MAX_WORKERS;
use crate::dispatch::{self, Aggregator};
use crate::drone::Drone;
use crate::error::{ConfigError, Result};
use crate::progress::{LogObserver, ProgressObserver};
use crate::{scanner, store};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Drives assimilation of an entire directory tree through a capability
///
/// Successive [`scan_and_assimilate`](Self::scan_and_assimilate) calls
/// accumulate into the same result set; [`load`](Self::load) replaces
/// it wholesale.
pub struct Harvester<D: Drone> {
    drone: D,
    worker_count: usize,
    observer: Arc<dyn ProgressObserver>,
    data: Vec<D::Record>,
}

impl<D: Drone> std::fmt::Debug for Harvester<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Harvester")
            .field("worker_count", &self.worker_count)
            .field("records", &self.data.len())
            .finish_non_exhaustive()
    }
}

impl<D: Drone> Harvester<D> {
    /// Create an engine over `drone` with a fixed worker pool size.
    ///
    /// `worker_count` of 1 selects the strict in-order serial mode.
    pub fn new(drone: D, worker_count: usize) -> std::result::Result<Self, ConfigError> {
        if worker_count == 0 || worker_count > MAX_WORKERS {
            return Err(ConfigError::InvalidWorkerCount {
                count: worker_count,
                max: MAX_WORKERS,
            });
        }

        Ok(Self {
            drone,
            worker_count,
            observer: Arc::new(LogObserver),
            data: Vec::new(),
        })
    }

    /// Replace the default logging observer
    pub fn with_observer(mut self, observer: impl ProgressObserver + 'static) -> Self {
        self.observer = Arc::new(observer);
        self
    }

    /// Configured worker pool size
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// The injected capability
    pub fn drone(&self) -> &D {
        &self.drone
    }

    /// Scan `root` for valid paths and assimilate every one of them.
    ///
    /// Records produced by this run are appended to the result set.
    /// On an assimilation fault the error is returned and the records
    /// aggregated before the fault remain in the result set.
    pub fn scan_and_assimilate(&mut self, root: impl AsRef<Path>) -> Result<()> {
        let root = root.as_ref();
        info!(root = %root.display(), "scanning for valid paths");
        let paths = scanner::scan(root, &self.drone)?;
        self.observer.on_scan_complete(paths.len());

        let aggregator = Aggregator::new(paths.len());
        let outcome = dispatch::run(
            &self.drone,
            paths,
            self.worker_count,
            &aggregator,
            self.observer.as_ref(),
        );

        // Partial results from a faulted run stay visible.
        self.data.extend(aggregator.into_records());
        outcome
    }

    /// The assimilated records
    pub fn data(&self) -> &[D::Record] {
        &self.data
    }
}

impl<D: Drone> Harvester<D>
where
    D::Record: Serialize,
{
    /// Save the result set to `path`, compressing per its extension
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        store::save(&self.data, path.as_ref())?;
        Ok(())
    }
}

impl<D: Drone> Harvester<D>
where
    D::Record: DeserializeOwned,
{
    /// Replace the result set with the contents of `path`.
    ///
    /// On failure the current result set is left unchanged.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.data = store::load(path.as_ref())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DroneResult;
    use std::path::PathBuf;

    struct NoopDrone;

    impl Drone for NoopDrone {
        type Record = String;

        fn valid_paths(&self, _dir: &Path, _subdirs: &[String], _files: &[String]) -> Vec<PathBuf> {
            Vec::new()
        }

        fn assimilate(&self, _path: &Path) -> DroneResult<Option<String>> {
            Ok(None)
        }
    }

    #[test]
    fn test_new_rejects_zero_workers() {
        let err = Harvester::new(NoopDrone, 0).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWorkerCount { .. }));
    }

    #[test]
    fn test_new_rejects_excessive_workers() {
        let err = Harvester::new(NoopDrone, MAX_WORKERS + 1).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWorkerCount { .. }));
    }

    #[test]
    fn test_new_engine_is_empty() {
        let engine = Harvester::new(NoopDrone, 2).unwrap();
        assert!(engine.data().is_empty());
        assert_eq!(engine.worker_count(), 2);
    }
}

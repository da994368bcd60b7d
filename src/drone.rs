//! Assimilation capability interface
//!
//! A drone is the pluggable extraction logic supplied by the caller:
//! it decides which paths under a directory qualify for assimilation,
//! and turns a single qualifying path into a record (or nothing).
//!
//! Callers implement [`Drone`] and hand a concrete instance to
//! [`Harvester::new`](crate::Harvester::new). When the engine runs with
//! more than one worker, `assimilate` is invoked concurrently for
//! distinct paths, so implementations must be `Send + Sync`.

use crate::error::DroneResult;
use std::path::{Path, PathBuf};

/// Pluggable per-path extraction capability
pub trait Drone: Send + Sync {
    /// The record type produced by assimilation
    type Record: Send + 'static;

    /// Select the paths under a visited directory that qualify for
    /// assimilation.
    ///
    /// Invoked once per directory during the scan with the directory
    /// itself plus the names of its immediate subdirectories and files.
    /// Returned paths may point at files or directories; each will be
    /// assimilated exactly once.
    fn valid_paths(&self, dir: &Path, subdirs: &[String], files: &[String]) -> Vec<PathBuf>;

    /// Extract a record from a single path.
    ///
    /// Returns `Ok(None)` when the path yields no record; the path
    /// still counts toward progress. An `Err` aborts the entire run.
    fn assimilate(&self, path: &Path) -> DroneResult<Option<Self::Record>>;
}

//! Error types for harvester
//!
//! This module defines the error hierarchy that covers:
//! - Path scanning errors (bad root)
//! - Assimilation faults raised by a capability
//! - Session store errors (I/O and codec)
//! - Configuration and worker errors
//!
//! Design philosophy:
//! - Use thiserror for structured error types in library code
//! - Errors surface to the caller; nothing is logged-and-swallowed
//! - Preserve error chains for debugging

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the harvester engine
#[derive(Error, Debug)]
pub enum HarvestError {
    /// Path scanning errors
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),

    /// Fault raised by the assimilation capability
    #[error("assimilation error: {0}")]
    Assimilation(#[from] AssimilationError),

    /// Session store errors
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Worker/concurrency errors
    #[error("worker error: {0}")]
    Worker(#[from] WorkerError),

    /// I/O errors (thread spawning, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while scanning for valid paths
///
/// All variants are fatal: a bad root produces no partial scan.
/// Unreadable subdirectories are skipped during the walk and never
/// surface here.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Root path does not exist
    #[error("root path not found: '{}'", path.display())]
    RootNotFound { path: PathBuf },

    /// Root path exists but is not a directory
    #[error("root path is not a directory: '{}'", path.display())]
    NotADirectory { path: PathBuf },

    /// Root directory could not be read
    #[error("failed to read root directory '{}': {source}", path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Fault raised by an assimilation capability for a single path
///
/// A fault aborts the entire run; there is no per-path isolation or
/// retry.
#[derive(Error, Debug)]
#[error("failed to assimilate '{}': {reason}", path.display())]
pub struct AssimilationError {
    /// Path being assimilated when the fault occurred
    pub path: PathBuf,

    /// Capability-supplied description of the fault
    pub reason: String,
}

impl AssimilationError {
    /// Create a new fault for the given path
    pub fn new(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Session store errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to create or write the session file
    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to open or read the session file
    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to encode records
    #[error("failed to encode records for '{}': {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Decoded content does not match the expected record schema
    #[error("failed to decode records from '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid worker count
    #[error("invalid worker count {count}: must be between 1 and {max}")]
    InvalidWorkerCount { count: usize, max: usize },

    /// Invalid exclude pattern
    #[error("invalid exclude pattern '{pattern}': {reason}")]
    InvalidExcludePattern { pattern: String, reason: String },

    /// Output path error
    #[error("invalid output path '{}': {reason}", path.display())]
    InvalidOutputPath { path: PathBuf, reason: String },
}

/// Worker thread errors
#[derive(Error, Debug)]
pub enum WorkerError {
    /// Worker panicked while processing
    #[error("worker {id} panicked")]
    Panicked { id: usize },
}

/// Result type alias for HarvestError
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for ScanError
pub type ScanResult<T> = std::result::Result<T, ScanError>;

/// Result type alias for StoreError
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Result type alias for AssimilationError, used by capability methods
pub type DroneResult<T> = std::result::Result<T, AssimilationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let scan_err = ScanError::RootNotFound {
            path: "/missing".into(),
        };
        let harvest_err: HarvestError = scan_err.into();
        assert!(matches!(harvest_err, HarvestError::Scan(_)));

        let fault = AssimilationError::new("/data/x.txt", "parse failure");
        let harvest_err: HarvestError = fault.into();
        assert!(matches!(harvest_err, HarvestError::Assimilation(_)));
    }

    #[test]
    fn test_assimilation_error_display() {
        let fault = AssimilationError::new("/data/x.txt", "parse failure");
        let msg = fault.to_string();
        assert!(msg.contains("/data/x.txt"));
        assert!(msg.contains("parse failure"));
    }
}

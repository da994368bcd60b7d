//! harvester - Parallel Directory-Tree Assimilation Engine
//!
//! Walks a directory tree, applies a pluggable per-path extraction
//! capability (a [`Drone`]) to each qualifying path, and collects the
//! extracted records into an in-memory result set that can be saved to
//! and restored from a serialized session file.
//!
//! # Features
//!
//! - **Pluggable extraction**: callers implement [`Drone`] to decide
//!   which paths qualify and what record each one yields.
//!
//! - **Parallel assimilation**: a fixed pool of worker threads pulls
//!   paths from one shared queue, so uneven per-path cost balances
//!   itself. One worker gives strict input-order processing.
//!
//! - **Session persistence**: the result set round-trips through JSON,
//!   with gzip or bzip2 compression selected by the output file's
//!   extension.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Directory Tree                              │
//! └─────────────────────────────┬───────────────────────────────────┘
//!                               │
//!                               │ scan (top-down, valid_paths)
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Worker Threads                              │
//! │  ┌─────────┐  ┌─────────┐  ┌─────────┐         ┌─────────┐     │
//! │  │Worker 1 │  │Worker 2 │  │Worker 3 │  ...    │Worker N │     │
//! │  │assimilate│ │assimilate│ │assimilate│        │assimilate│    │
//! │  └────┬────┘  └────┬────┘  └────┬────┘         └────┬────┘     │
//! │       │            │            │                    │          │
//! │       └────────────┴─────┬──────┴────────────────────┘          │
//! │                          ▼                                      │
//! │            ┌──────────────────────────┐                         │
//! │            │    Shared Aggregator     │                         │
//! │            │  - record sink           │                         │
//! │            │  - (completed, total)    │                         │
//! │            └──────────────────────────┘                         │
//! └─────────────────────────────┬───────────────────────────────────┘
//!                               │
//!                               ▼
//!                    ┌──────────────────┐
//!                    │  Session File    │
//!                    │ (.json[.gz|.bz2])│
//!                    └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use harvester::error::DroneResult;
//! use harvester::{Drone, Harvester};
//! use std::path::{Path, PathBuf};
//!
//! struct TxtDrone;
//!
//! impl Drone for TxtDrone {
//!     type Record = String;
//!
//!     fn valid_paths(&self, dir: &Path, _subdirs: &[String], files: &[String]) -> Vec<PathBuf> {
//!         files
//!             .iter()
//!             .filter(|name| name.ends_with(".txt"))
//!             .map(|name| dir.join(name))
//!             .collect()
//!     }
//!
//!     fn assimilate(&self, path: &Path) -> DroneResult<Option<String>> {
//!         Ok(Some(path.display().to_string()))
//!     }
//! }
//!
//! fn main() -> harvester::Result<()> {
//!     let mut engine = Harvester::new(TxtDrone, 4)?;
//!     engine.scan_and_assimilate("/data")?;
//!     println!("{} records", engine.data().len());
//!     engine.save("session.json.gz")?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dispatch;
pub mod drone;
pub mod drones;
pub mod engine;
pub mod error;
pub mod progress;
pub mod scanner;
pub mod store;

pub use dispatch::Aggregator;
pub use drone::Drone;
pub use engine::Harvester;
pub use error::{AssimilationError, HarvestError, Result, ScanError, StoreError};
pub use progress::{LogObserver, NullObserver, ProgressObserver};

//! Built-in assimilation capabilities
//!
//! The engine is capability-agnostic; this module ships the concrete
//! drone the CLI binary uses.

pub mod fs_meta;

pub use fs_meta::{FileMeta, FileMetaDrone};

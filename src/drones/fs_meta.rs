//! File-metadata capability
//!
//! Harvests one [`FileMeta`] record per qualifying file: path, name,
//! size, and modification time. Qualification is an optional extension
//! whitelist plus optional exclude patterns over the full path.

use crate::drone::Drone;
use crate::error::{AssimilationError, DroneResult};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Record describing a single harvested file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMeta {
    /// Full path of the file
    pub path: String,

    /// File name component
    pub name: String,

    /// Size in bytes
    pub size: u64,

    /// Modification time, when the filesystem reports one
    pub modified: Option<DateTime<Utc>>,
}

/// Drone that assimilates basic metadata for every qualifying file
#[derive(Debug, Default)]
pub struct FileMetaDrone {
    extensions: Vec<String>,
    exclude: Vec<Regex>,
}

impl FileMetaDrone {
    /// Capability accepting every file
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to files with one of the given extensions
    /// (case-insensitive, leading dots ignored)
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }

    /// Skip paths matching any of the given patterns
    pub fn with_exclude(mut self, exclude: Vec<Regex>) -> Self {
        self.exclude = exclude;
        self
    }

    fn wants(&self, name: &str) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }

    fn is_excluded(&self, path: &str) -> bool {
        self.exclude.iter().any(|re| re.is_match(path))
    }
}

impl Drone for FileMetaDrone {
    type Record = FileMeta;

    fn valid_paths(&self, dir: &Path, _subdirs: &[String], files: &[String]) -> Vec<PathBuf> {
        files
            .iter()
            .filter(|name| self.wants(name))
            .map(|name| dir.join(name))
            .filter(|path| !self.is_excluded(&path.to_string_lossy()))
            .collect()
    }

    fn assimilate(&self, path: &Path) -> DroneResult<Option<FileMeta>> {
        let meta =
            fs::metadata(path).map_err(|e| AssimilationError::new(path, e.to_string()))?;
        if !meta.is_file() {
            return Ok(None);
        }

        Ok(Some(FileMeta {
            path: path.to_string_lossy().into_owned(),
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            size: meta.len(),
            modified: meta.modified().ok().map(DateTime::<Utc>::from),
        }))
    }
}

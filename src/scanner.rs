//! Valid-path discovery
//!
//! Walks a directory tree top-down and asks the capability, at each
//! visited directory, which paths under it qualify for assimilation.
//! The walk is depth-first in the natural order the filesystem returns
//! entries; no sorting is imposed.
//!
//! A missing or unreadable root is fatal. Unreadable subdirectories
//! only prune that branch of the walk.

use crate::drone::Drone;
use crate::error::{ScanError, ScanResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Scan the tree rooted at `root` and collect every valid path.
///
/// At each directory the capability receives the triple (directory,
/// subdirectory names, file names) and its returned paths are appended
/// in traversal order.
pub fn scan<D: Drone>(root: &Path, drone: &D) -> ScanResult<Vec<PathBuf>> {
    let meta = fs::metadata(root).map_err(|_| ScanError::RootNotFound {
        path: root.to_path_buf(),
    })?;
    if !meta.is_dir() {
        return Err(ScanError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut valid = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    let mut at_root = true;

    while let Some(dir) = pending.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(source) if at_root => {
                return Err(ScanError::RootUnreadable { path: dir, source });
            }
            Err(e) => {
                warn!(path = %dir.display(), error = %e, "skipping unreadable directory");
                continue;
            }
        };
        at_root = false;

        let mut subdirs = Vec::new();
        let mut files = Vec::new();

        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().into_owned();
            match entry.file_type() {
                Ok(file_type) if file_type.is_dir() => subdirs.push(name),
                Ok(_) => files.push(name),
                Err(e) => {
                    warn!(path = %dir.display(), entry = %name, error = %e, "skipping unreadable entry");
                }
            }
        }

        valid.extend(drone.valid_paths(&dir, &subdirs, &files));

        // Reverse push keeps subdirectories in listing order under the
        // stack-based depth-first walk.
        for name in subdirs.iter().rev() {
            pending.push(dir.join(name));
        }
    }

    debug!(count = valid.len(), "scan complete");
    Ok(valid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DroneResult;
    use tempfile::tempdir;

    /// Selects every file, sorted by name within each directory.
    struct AllFilesDrone;

    impl Drone for AllFilesDrone {
        type Record = ();

        fn valid_paths(&self, dir: &Path, _subdirs: &[String], files: &[String]) -> Vec<PathBuf> {
            let mut names: Vec<_> = files.to_vec();
            names.sort();
            names.iter().map(|name| dir.join(name)).collect()
        }

        fn assimilate(&self, _path: &Path) -> DroneResult<Option<()>> {
            Ok(None)
        }
    }

    /// Selects subdirectories whose name ends with "_pack".
    struct PackDirDrone;

    impl Drone for PackDirDrone {
        type Record = ();

        fn valid_paths(&self, dir: &Path, subdirs: &[String], _files: &[String]) -> Vec<PathBuf> {
            subdirs
                .iter()
                .filter(|name| name.ends_with("_pack"))
                .map(|name| dir.join(name))
                .collect()
        }

        fn assimilate(&self, _path: &Path) -> DroneResult<Option<()>> {
            Ok(None)
        }
    }

    #[test]
    fn test_scan_collects_all_files() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("a.txt"), "a").unwrap();
        fs::create_dir(root.join("sub1")).unwrap();
        fs::write(root.join("sub1/b.txt"), "b").unwrap();
        fs::create_dir(root.join("sub1/nested")).unwrap();
        fs::write(root.join("sub1/nested/c.txt"), "c").unwrap();
        fs::create_dir(root.join("sub2")).unwrap();
        fs::write(root.join("sub2/d.txt"), "d").unwrap();

        let paths = scan(root, &AllFilesDrone).unwrap();
        assert_eq!(paths.len(), 4);

        // Root is visited first, so its files lead the sequence.
        assert_eq!(paths[0], root.join("a.txt"));

        // Parent directories are visited before their children.
        let pos = |p: PathBuf| paths.iter().position(|x| *x == p).unwrap();
        assert!(pos(root.join("sub1/b.txt")) < pos(root.join("sub1/nested/c.txt")));
    }

    #[test]
    fn test_scan_selects_directories() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("data_pack")).unwrap();
        fs::create_dir(root.join("other")).unwrap();
        fs::create_dir(root.join("other/inner_pack")).unwrap();

        let mut paths = scan(root, &PackDirDrone).unwrap();
        paths.sort();
        assert_eq!(
            paths,
            vec![root.join("data_pack"), root.join("other/inner_pack")]
        );
    }

    #[test]
    fn test_scan_empty_root() {
        let dir = tempdir().unwrap();
        let paths = scan(dir.path(), &AllFilesDrone).unwrap();
        assert!(paths.is_empty());
    }

    #[test]
    fn test_scan_missing_root() {
        let err = scan(Path::new("/nonexistent/harvest/root"), &AllFilesDrone).unwrap_err();
        assert!(matches!(err, ScanError::RootNotFound { .. }));
    }

    #[test]
    fn test_scan_root_is_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, "x").unwrap();

        let err = scan(&file, &AllFilesDrone).unwrap_err();
        assert!(matches!(err, ScanError::NotADirectory { .. }));
    }
}

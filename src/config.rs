//! Configuration types for harvester
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Runtime configuration with validation

use crate::error::ConfigError;
use clap::Parser;
use regex::Regex;
use std::path::PathBuf;

/// Maximum reasonable worker count
pub const MAX_WORKERS: usize = 512;

/// Parallel directory-tree harvester with pluggable extraction
#[derive(Parser, Debug, Clone)]
#[command(
    name = "harvester",
    version,
    about = "Parallel directory-tree harvester with pluggable extraction",
    long_about = "Walks a directory tree, extracts a metadata record per qualifying file, and\n\
                  saves the collected records to a JSON file. A .gz or .bz2 output suffix\n\
                  selects the matching compression.",
    after_help = "EXAMPLES:\n    \
        harvester /data -o harvest.json\n    \
        harvester /data -w 8 -o harvest.json.gz\n    \
        harvester /data --ext log --ext txt --exclude '\\.cache'"
)]
pub struct CliArgs {
    /// Root directory to harvest
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// Output file (.json, .json.gz, or .json.bz2)
    #[arg(short, long, default_value = "harvest.json", value_name = "FILE")]
    pub output: PathBuf,

    /// Number of worker threads
    #[arg(short = 'w', long, default_value_t = default_workers(), value_name = "NUM")]
    pub workers: usize,

    /// Only harvest files with this extension (can be repeated; all files if unset)
    #[arg(long = "ext", value_name = "EXT", action = clap::ArgAction::Append)]
    pub extensions: Vec<String>,

    /// Exclude paths matching pattern (can be repeated)
    #[arg(long = "exclude", value_name = "PATTERN", action = clap::ArgAction::Append)]
    pub exclude_patterns: Vec<String>,

    /// Quiet mode - suppress progress output
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose output (show per-path progress and warnings)
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

fn default_workers() -> usize {
    num_cpus::get()
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    /// Root directory to harvest
    pub root: PathBuf,

    /// Output file path
    pub output_path: PathBuf,

    /// Number of worker threads
    pub worker_count: usize,

    /// Extension filter (lowercased, no leading dot; empty = all files)
    pub extensions: Vec<String>,

    /// Compiled exclude patterns
    pub exclude_patterns: Vec<Regex>,

    /// Show progress indicator
    pub show_progress: bool,

    /// Verbose logging
    pub verbose: bool,
}

impl HarvestConfig {
    /// Create and validate configuration from CLI arguments
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        if args.workers == 0 || args.workers > MAX_WORKERS {
            return Err(ConfigError::InvalidWorkerCount {
                count: args.workers,
                max: MAX_WORKERS,
            });
        }

        let exclude_patterns = args
            .exclude_patterns
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|e| ConfigError::InvalidExcludePattern {
                    pattern: p.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(parent) = args.output.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(ConfigError::InvalidOutputPath {
                    path: args.output.clone(),
                    reason: format!("Parent directory '{}' does not exist", parent.display()),
                });
            }
        }

        let extensions = args
            .extensions
            .iter()
            .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
            .collect();

        Ok(Self {
            root: args.root,
            output_path: args.output,
            worker_count: args.workers,
            extensions,
            exclude_patterns,
            show_progress: !args.quiet,
            verbose: args.verbose,
        })
    }

    /// Check if a path should be excluded
    pub fn is_excluded(&self, path: &str) -> bool {
        self.exclude_patterns.iter().any(|re| re.is_match(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> CliArgs {
        CliArgs {
            root: PathBuf::from("/data"),
            output: PathBuf::from("harvest.json"),
            workers: 4,
            extensions: Vec::new(),
            exclude_patterns: Vec::new(),
            quiet: false,
            verbose: false,
        }
    }

    #[test]
    fn test_valid_config() {
        let config = HarvestConfig::from_args(base_args()).unwrap();
        assert_eq!(config.worker_count, 4);
        assert!(config.show_progress);
        assert!(config.extensions.is_empty());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let mut args = base_args();
        args.workers = 0;
        let err = HarvestConfig::from_args(args).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWorkerCount { count: 0, .. }));
    }

    #[test]
    fn test_excessive_workers_rejected() {
        let mut args = base_args();
        args.workers = MAX_WORKERS + 1;
        let err = HarvestConfig::from_args(args).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWorkerCount { .. }));
    }

    #[test]
    fn test_bad_exclude_pattern_rejected() {
        let mut args = base_args();
        args.exclude_patterns = vec!["[unclosed".to_string()];
        let err = HarvestConfig::from_args(args).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidExcludePattern { .. }));
    }

    #[test]
    fn test_extension_normalization() {
        let mut args = base_args();
        args.extensions = vec![".TXT".to_string(), "Log".to_string()];
        let config = HarvestConfig::from_args(args).unwrap();
        assert_eq!(config.extensions, vec!["txt", "log"]);
    }

    #[test]
    fn test_exclude_matching() {
        let mut args = base_args();
        args.exclude_patterns = vec![r"\.snapshot".to_string()];
        let config = HarvestConfig::from_args(args).unwrap();
        assert!(config.is_excluded("/data/.snapshot/hourly.0"));
        assert!(!config.is_excluded("/data/myfile.txt"));
    }

    #[test]
    fn test_cli_parsing() {
        let args = CliArgs::try_parse_from([
            "harvester",
            "/data",
            "-w",
            "8",
            "--ext",
            "txt",
            "--exclude",
            "tmp",
            "-q",
        ])
        .unwrap();
        assert_eq!(args.root, PathBuf::from("/data"));
        assert_eq!(args.workers, 8);
        assert_eq!(args.extensions, vec!["txt"]);
        assert!(args.quiet);
    }
}

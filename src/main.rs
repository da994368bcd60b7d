//! harvester - Parallel Directory-Tree Harvester
//!
//! Entry point for the CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use harvester::config::{CliArgs, HarvestConfig};
use harvester::drones::FileMetaDrone;
use harvester::progress::{print_header, print_summary, NullObserver, ProgressReporter};
use harvester::Harvester;
use std::process::ExitCode;
use std::time::Instant;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse();

    setup_logging(args.verbose)?;

    let config = HarvestConfig::from_args(args).context("Invalid configuration")?;

    if config.show_progress {
        print_header(
            &config.root.display().to_string(),
            config.worker_count,
            &config.output_path.display().to_string(),
        );
    }

    let drone = FileMetaDrone::new()
        .with_extensions(config.extensions.clone())
        .with_exclude(config.exclude_patterns.clone());

    let mut engine =
        Harvester::new(drone, config.worker_count).context("Invalid worker count")?;

    let reporter = if config.show_progress {
        Some(ProgressReporter::new())
    } else {
        None
    };

    engine = match reporter {
        Some(ref r) => {
            r.set_status("scanning for valid paths");
            engine.with_observer(r.clone())
        }
        None => engine.with_observer(NullObserver),
    };

    let start = Instant::now();
    let result = engine.scan_and_assimilate(&config.root);

    if let Some(ref r) = reporter {
        if result.is_ok() {
            r.finish("harvest complete");
        } else {
            r.finish_and_clear();
        }
    }

    result.context("Harvest failed")?;

    let records = engine.data();
    let total_bytes: u64 = records.iter().map(|r| r.size).sum();
    let record_count = records.len() as u64;

    engine
        .save(&config.output_path)
        .context("Failed to save session")?;

    if config.show_progress {
        print_summary(
            record_count,
            total_bytes,
            start.elapsed(),
            &config.output_path.display().to_string(),
        );
    }

    Ok(())
}

fn setup_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))
}

//! Progress observation and display
//!
//! The dispatcher reports progress through an injected
//! [`ProgressObserver`] rather than a process-wide logger: one callback
//! per completed path, plus one when scanning finishes and the work
//! total becomes known.
//!
//! Ships three implementations: [`NullObserver`] (silent),
//! [`LogObserver`] (tracing, the engine default), and
//! [`ProgressReporter`] (indicatif bar for the CLI).

use console::style;
use humansize::{format_size, BINARY};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::info;

/// Callback interface invoked by the dispatcher
///
/// Implementations must be safe to call concurrently from multiple
/// workers.
pub trait ProgressObserver: Send + Sync {
    /// Called once scanning finishes and the work total is known
    fn on_scan_complete(&self, total: usize) {
        let _ = total;
    }

    /// Called after each completed path with the shared counter state
    fn on_progress(&self, completed: usize, total: usize) {
        let _ = (completed, total);
    }
}

/// Observer that reports nothing
pub struct NullObserver;

impl ProgressObserver for NullObserver {}

/// Observer that logs one line per completed path through tracing
pub struct LogObserver;

impl ProgressObserver for LogObserver {
    fn on_scan_complete(&self, total: usize) {
        info!("{} valid paths found", total);
    }

    fn on_progress(&self, completed: usize, total: usize) {
        let percent = if total > 0 {
            completed as f64 / total as f64 * 100.0
        } else {
            100.0
        };
        info!("{}/{} ({:.1}%) done", completed, total, percent);
    }
}

/// Progress reporter that displays harvest status as a terminal bar
#[derive(Clone)]
pub struct ProgressReporter {
    /// Progress bar
    bar: ProgressBar,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();

        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .expect("Invalid progress template")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Set a status message
    pub fn set_status(&self, status: &str) {
        self.bar.set_message(status.to_string());
    }

    /// Finish the progress display with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    /// Finish and clear the progress display
    pub fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressObserver for ProgressReporter {
    fn on_scan_complete(&self, total: usize) {
        self.bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress template")
                .progress_chars("#>-"),
        );
        self.bar.set_length(total as u64);
        self.bar.set_message("assimilating");
    }

    fn on_progress(&self, _completed: usize, _total: usize) {
        self.bar.inc(1);
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number with thousands separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let bytes: Vec<_> = s.bytes().rev().collect();

    let chunks: Vec<String> = bytes
        .chunks(3)
        .map(|chunk| {
            chunk
                .iter()
                .rev()
                .map(|&b| b as char)
                .collect::<String>()
        })
        .collect();

    chunks.into_iter().rev().collect::<Vec<_>>().join(",")
}

/// Print a summary of the harvest results
pub fn print_summary(records: u64, bytes: u64, duration: Duration, output: &str) {
    let duration_secs = duration.as_secs_f64();
    let rate = if duration_secs > 0.0 {
        records as f64 / duration_secs
    } else {
        0.0
    };

    println!();
    println!("{}", style("Harvest Complete").green().bold());
    println!("{}", style("─".repeat(50)).dim());
    println!("  {} {}", style("Records:").bold(), format_number(records));
    println!(
        "  {} {}",
        style("Total Size:").bold(),
        format_size(bytes, BINARY)
    );
    println!(
        "  {} {:.1}s ({:.0} records/sec)",
        style("Duration:").bold(),
        duration_secs,
        rate
    );
    println!("  {} {}", style("Output:").bold(), output);
    println!();
}

/// Print a header at the start of the harvest
pub fn print_header(root: &str, workers: usize, output: &str) {
    println!();
    println!(
        "{} {}",
        style("harvester").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("{}", style("─".repeat(50)).dim());
    println!("  {} {}", style("Root:").bold(), root);
    println!("  {} {}", style("Workers:").bold(), workers);
    println!("  {} {}", style("Output:").bold(), output);
    println!();
}

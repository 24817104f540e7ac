//! CLI presenter for output formatting

use std::io::{self, Write};

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Presenter for CLI output formatting
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a prompt without a trailing newline
    pub fn prompt(&self, message: &str) {
        eprint!("{} ", message);
        let _ = io::stderr().flush();
    }

    /// Create a progress bar for a capture of `total_secs` seconds
    pub fn recording_bar(&self, total_secs: u64) -> ProgressBar {
        let bar = ProgressBar::new(total_secs);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{prefix:.cyan} [{bar:20.cyan}] {pos:>4}s / {len}s")
                .unwrap()
                .progress_chars("█░░"),
        );
        bar.set_prefix("Recording");
        bar
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

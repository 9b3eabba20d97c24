//! Structured logger with summary collection.
use std::path::PathBuf;
use std::sync::Mutex;

use super::subscriber::STAGE_TARGET;
use super::types::{CheckEntry, CheckStatus};
use super::utils::log_file_path;

/// Structured logger that also records per-reference check results.
///
/// Messages are emitted as [`tracing`] events; the subscriber installed by
/// [`init_subscriber`](super::subscriber::init_subscriber) renders them on
/// the console and appends them to `$XDG_CACHE_HOME/lintrc/<command>.log`.
#[derive(Debug)]
pub struct Logger {
    entries: Mutex<Vec<CheckEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a logger for `command`.
    ///
    /// Stores the log file path for display in the summary; the file itself
    /// is written by the subscriber's file layer.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self::with_log_file(log_file_path(command))
    }

    /// Create a logger reporting `log_file` as its log location.
    #[must_use]
    pub const fn with_log_file(log_file: Option<PathBuf>) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            log_file,
        }
    }

    /// Return the log file path, if available.
    #[must_use]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose; always
    /// written to the log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Record a check result for the summary.
    pub fn record(&self, name: &str, status: CheckStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.entries.lock() {
            guard.push(CheckEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Return a clone of all recorded entries.
    #[must_use]
    pub fn entries(&self) -> Vec<CheckEntry> {
        self.entries.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Count the number of failed checks.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.entries.lock().map_or(0, |guard| {
            guard
                .iter()
                .filter(|e| e.status == CheckStatus::Failed)
                .count()
        })
    }

    /// Log the summary of all recorded checks.
    pub fn print_summary(&self) {
        let entries = self.entries();
        if entries.is_empty() {
            return;
        }

        self.stage("Summary");

        let mut ok = 0u32;
        let mut warnings = 0u32;
        let mut failed = 0u32;

        for entry in &entries {
            let (icon, color) = match entry.status {
                CheckStatus::Ok => {
                    ok += 1;
                    ("✓", "\x1b[32m")
                }
                CheckStatus::Warning => {
                    warnings += 1;
                    ("○", "\x1b[33m")
                }
                CheckStatus::Failed => {
                    failed += 1;
                    ("✗", "\x1b[31m")
                }
            };

            let suffix = entry
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));

            self.info(&format!("{color}{icon} {}{suffix}\x1b[0m", entry.name));
        }

        let total = ok + warnings + failed;
        self.info(&format!(
            "{total} references: \x1b[32m{ok} ok\x1b[0m, \x1b[33m{warnings} redundant\x1b[0m, \x1b[31m{failed} failed\x1b[0m"
        ));

        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}

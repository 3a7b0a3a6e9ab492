//! Logging helpers for file I/O and per-day outcomes
//!
//! Keeps the wording of recurring log lines consistent between the loader,
//! the report builder and the exporter.

use chrono::NaiveDate;
use std::path::Path;
use std::time::Duration;

/// Log the start of reading or writing a file or directory
pub fn log_file_start(action: &str, path: &Path) {
    log::info!("{} {}", action, path.display());
}

/// Log a finished file operation
///
/// # Arguments
/// * `action` - Past-tense verb, e.g. `loaded`
/// * `path` - File or directory operated on
/// * `count` - Number of items handled
/// * `unit` - What the items are (`cases`, `files`, ...)
/// * `elapsed` - Optional elapsed time
pub fn log_file_complete(
    action: &str,
    path: &Path,
    count: usize,
    unit: &str,
    elapsed: Option<Duration>,
) {
    match elapsed {
        Some(duration) => log::info!(
            "Successfully {action} {count} {unit} ({}) in {duration:?}",
            path.display()
        ),
        None => log::info!("Successfully {action} {count} {unit} ({})", path.display()),
    }
}

/// Log a warning, optionally tied to a path
pub fn log_warning(message: &str, path: Option<&Path>) {
    match path {
        Some(path) => log::warn!("{message}: {}", path.display()),
        None => log::warn!("{message}"),
    }
}

/// Log a day left out of the report
pub fn log_skipped_day(date: NaiveDate, case_count: usize, error: &dyn std::fmt::Display) {
    log::warn!("Skipping {date} ({case_count} cases): {error}");
}

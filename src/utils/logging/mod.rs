//! Logging utilities for output and progress tracking
//!
//! Consistent log lines for file I/O and skipped days, plus indicatif
//! progress bars for batch runs.

pub mod log;
pub mod progress;

// Re-export commonly used functions for convenience
pub use self::log::{log_file_complete, log_file_start, log_skipped_day, log_warning};
pub use progress::{create_main_progress_bar, finish_progress_bar};

//! Error handling for the site analysis engine.

pub mod util;

use std::io;
use std::path::{Path, PathBuf};

/// Specialized error type for site analysis
#[derive(Debug, thiserror::Error)]
pub enum SiteAnalysisError {
    /// Malformed input for the partitioning engine (bad interval, mixed
    /// dates, duplicate case ids, negative buffers, invalid capacity)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error opening or reading a file
    #[error("IO error: {message}{}", path_suffix(.path))]
    IoError {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<io::Error>,
    },

    /// Error decoding or encoding JSON
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A field in an input record could not be parsed
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid analysis configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" ({})", p.display()))
        .unwrap_or_default()
}

impl From<io::Error> for SiteAnalysisError {
    fn from(error: io::Error) -> Self {
        Self::IoError {
            message: error.to_string(),
            path: None,
            source: Some(error),
        }
    }
}

impl SiteAnalysisError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    /// Create an IO error without an underlying source
    pub fn io_error(message: impl Into<String>) -> Self {
        Self::IoError {
            message: message.into(),
            path: None,
            source: None,
        }
    }

    /// Create an IO error wrapping the original `io::Error`
    pub fn io_error_with_source(message: impl Into<String>, source: io::Error) -> Self {
        Self::IoError {
            message: message.into(),
            path: None,
            source: Some(source),
        }
    }

    /// Attach a path to an IO error. Other variants are returned unchanged.
    #[must_use]
    pub fn with_path(self, path: &Path) -> Self {
        match self {
            Self::IoError {
                message, source, ..
            } => Self::IoError {
                message,
                path: Some(path.to_path_buf()),
                source,
            },
            other => other,
        }
    }

    /// Whether this error came from input validation
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }
}

/// Result type for site analysis operations
pub type Result<T> = std::result::Result<T, SiteAnalysisError>;

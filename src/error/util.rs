//! Utility functions for error handling
//!
//! Opening and reading input files with path context attached to failures.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Result, SiteAnalysisError};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(SiteAnalysisError::io_error(format!(
            "File not found, needed for: {purpose}"
        ))
        .with_path(path));
    }

    if !path.is_file() {
        return Err(SiteAnalysisError::io_error(format!(
            "Path is not a file, expected a file for: {purpose}"
        ))
        .with_path(path));
    }

    fs::File::open(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => {
                "Permission denied - check file permissions".to_string()
            }
            _ => format!("Failed to open file for: {purpose}"),
        };
        SiteAnalysisError::io_error_with_source(context, e).with_path(path)
    })
}

/// Check that a directory exists, creating it when `create` is set
pub fn validate_directory(path: &Path, purpose: &str, create: bool) -> Result<()> {
    if !path.exists() {
        if create {
            return fs::create_dir_all(path).map_err(|e| {
                SiteAnalysisError::io_error_with_source(
                    format!("Failed to create directory for: {purpose}"),
                    e,
                )
                .with_path(path)
            });
        }
        return Err(SiteAnalysisError::io_error(format!(
            "Directory not found, needed for: {purpose}"
        ))
        .with_path(path));
    }

    if !path.is_dir() {
        return Err(SiteAnalysisError::io_error(format!(
            "Path is not a directory, expected a directory for: {purpose}"
        ))
        .with_path(path));
    }

    Ok(())
}

/// Safely read a file to string with rich error information
pub fn safe_read_to_string(path: &Path, purpose: &str) -> Result<String> {
    let mut file = safe_open_file(path, purpose)?;

    let mut content = String::new();
    match io::Read::read_to_string(&mut file, &mut content) {
        Ok(_) => Ok(content),
        Err(e) => {
            let context = match e.kind() {
                io::ErrorKind::InvalidData => {
                    "File contains invalid UTF-8 data - cannot read as text".to_string()
                }
                _ => format!("Failed to read file content for: {purpose}"),
            };
            Err(SiteAnalysisError::io_error_with_source(context, e).with_path(path))
        }
    }
}

/// Write a string to a file, attaching the path to any failure
pub fn safe_write(path: &Path, content: &str, purpose: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| {
        SiteAnalysisError::io_error_with_source(format!("Failed to write {purpose}"), e)
            .with_path(path)
    })
}

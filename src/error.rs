//! Global error handling for filemerge
//!
//! This module provides a centralized error type that can represent errors
//! from all modules in the project.

use std::io;
use thiserror::Error;

/// Global error type for filemerge operations
#[derive(Error, Debug)]
pub enum MergeError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Merge configuration validation failures
    #[error("Invalid merge configuration: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// Merge requested with no files resolved from the selection
    #[error("No files selected for merging")]
    EmptySelection,

    /// Output serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Scanner errors
    #[error("Scanner error: {0}")]
    Scanner(String),

    /// Path not found
    #[error("Path not found: {0}")]
    PathNotFound(String),

    /// Unexpected error
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Specialized Result type for filemerge operations
pub type Result<T> = std::result::Result<T, MergeError>;

/// Creates a MergeError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::MergeError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

/// A non-fatal, per-file content acquisition failure.
///
/// Acquisition failures never abort a build: the affected file keeps an
/// unset content and the warning is handed back to the caller.
#[derive(Debug, Clone)]
pub struct AcquisitionWarning {
    /// Relative path of the file that could not be read
    pub path: String,
    /// Human-readable failure description
    pub reason: String,
}

impl std::fmt::Display for AcquisitionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

/// Extension trait for adding context to errors
pub trait ResultExt<T, E> {
    /// Add additional context to an error
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display;
}

impl<T, E: std::error::Error + 'static> ResultExt<T, E> for std::result::Result<T, E> {
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display,
    {
        self.map_err(|e| {
            let context = f();
            MergeError::Unexpected(format!("{}: {}", context, e))
        })
    }
}

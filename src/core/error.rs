//! Error types for FastRsid
//!
//! Loading can fail (unreadable input) or be cancelled. A lookup that
//! finds nothing is an ordinary `None`, not an error.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for FastRsid operations
#[derive(Debug, Error)]
pub enum FastRsidError {
    /// Record file parsing errors
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Thread pool construction failed
    #[error("Failed to create thread pool: {0}")]
    ThreadPool(String),
}

/// Errors that can occur while parsing a record file
///
/// Content problems (wrong field count, bad position) are never errors;
/// the parser recovers from them line by line.
#[derive(Debug, Error)]
pub enum ParseError {
    /// File not found
    #[error("Record file not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error during reading
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The load was abandoned before it finished
    #[error("Parsing cancelled after {0} line(s)")]
    Cancelled(usize),
}

impl ParseError {
    /// Map an open error for `path`, turning `NotFound` into `FileNotFound`
    pub fn from_open(err: std::io::Error, path: &std::path::Path) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            ParseError::FileNotFound(path.to_path_buf())
        } else {
            ParseError::Io(err)
        }
    }
}

/// Result type alias for parsing operations
pub type ParseResult<T> = std::result::Result<T, ParseError>;

//! Error types for output generation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while writing artifacts or handing off accepted records.
///
/// All of them are fatal to a run.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Failed to create an output file or its parent directory.
    #[error("failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write bytes to an output file.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to remove an artifact left by an earlier run.
    #[error("failed to remove stale {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to encode rejection rows as CSV.
    #[error("failed to encode rejection rows: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    /// Failed to serialize a record or report as JSON.
    #[error("failed to serialize {what}: {source}")]
    Json {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The accepted-record destination refused a write.
    #[error("failed to hand off accepted record: {source}")]
    Sink {
        #[source]
        source: std::io::Error,
    },
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;

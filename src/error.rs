//! Error types for grid computation, event loading and the command line.

use thiserror::Error;

/// Failure of a grid computation.
///
/// The calculator is total over every month/year the date type can hold; the
/// only failure is an argument it cannot represent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

#[derive(Error, Debug)]
pub enum EventError {
    #[error("Cannot read events file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed events data: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Invalid timestamp {value:?} in event {id}")]
    Timestamp { id: String, value: String },
}

/// Top-level error reported by the binary.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Events(#[from] EventError),

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Usage(String),
}

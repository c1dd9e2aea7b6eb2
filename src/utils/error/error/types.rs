//! Fatal error types

use thiserror::Error;

/// Result type alias for the synchronizer
pub type Result<T> = std::result::Result<T, SyncError>;

/// Errors that end the process with a non-zero status
///
/// Setup and loading raise them before the first remote call. Writing the
/// report can still raise `Io` or `Serialization` after the run. Per-item
/// failures never become a `SyncError`; they are recorded in the report.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Missing or invalid configuration values
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input source missing, unreadable or malformed
    #[error("Record source error: {0}")]
    Source(String),

    /// CSV decoding errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client construction errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

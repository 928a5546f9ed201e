// Rust guideline compliant 2026-02-06

//! Error types for the relman core library.

use thiserror::Error;

/// Result type alias for relman core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for relman core operations.
///
/// The hierarchy builder is total and never produces one of these; they come
/// from configuration loading and issue (de)serialization.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file or environment value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Tracker credentials are not configured.
    #[error("Tracker credentials are not configured: missing {}", .0.join(", "))]
    MissingCredentials(Vec<String>),
}

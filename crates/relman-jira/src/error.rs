// Rust guideline compliant 2026-02-09

//! Error handling for the Jira issue source.

use relman_core::Error as CoreError;
use thiserror::Error;

/// Result type alias for issue source operations.
pub type Result<T> = std::result::Result<T, JiraError>;

/// Longest response body kept in a [`JiraError::Status`] message.
const MAX_BODY_LEN: usize = 500;

/// Errors raised while talking to the tracker.
#[derive(Debug, Error)]
pub enum JiraError {
    /// Error from core library operations (configuration, credentials).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The HTTP request could not be sent or its body not read.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The tracker answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Response status code.
        status: u16,
        /// Response body, truncated.
        body: String,
    },

    /// The response body is not the expected JSON.
    #[error("Unexpected response from {endpoint}: {source}")]
    Decode {
        /// Endpoint that returned the body.
        endpoint: String,
        /// Parse error.
        source: serde_json::Error,
    },

    /// The project has no version with the requested name.
    #[error("Version '{version}' not found in project {project}")]
    VersionNotFound {
        /// Project key.
        project: String,
        /// Requested version name.
        version: String,
    },

    /// The project has no versions at all.
    #[error("No versions found for project {0}")]
    NoVersions(String),

    /// The project has no unreleased, unarchived version.
    #[error("No unreleased version found for project {0}")]
    NoUnreleasedVersion(String),
}

impl JiraError {
    /// Builds a status error, keeping at most the first 500 characters of the body.
    pub fn status(status: u16, body: &str) -> Self {
        let body = body.trim();
        let body = match body.char_indices().nth(MAX_BODY_LEN) {
            Some((end, _)) => format!("{}...", &body[..end]),
            None => body.to_string(),
        };
        JiraError::Status { status, body }
    }
}

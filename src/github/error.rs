//! Fetch-layer error types

use thiserror::Error;

/// Error types for GitHub, npm and local repository operations
#[derive(Debug, Error)]
pub enum FetchError {
    /// Octocrab library error
    #[error("Octocrab error: {0}")]
    Octocrab(#[from] octocrab::Error),

    /// HTTP error talking to the npm registry
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not have the expected shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem error in a working tree
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic GitHub API error
    #[error("GitHub API error: {0}")]
    Api(String),

    /// GraphQL request answered with errors
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    /// Invalid input parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Cloning the repository failed or timed out
    #[error("Clone failed: {0}")]
    Clone(String),

    /// Request did not complete in time
    #[error("Operation timed out: {operation} after {duration:?}")]
    Timeout {
        operation: String,
        duration: std::time::Duration,
    },

    /// Worker task ended without a result
    #[error("Task dropped before completing")]
    TaskDropped,
}

/// Convenience result alias for fetch operations
pub type FetchResult<T> = Result<T, FetchError>;

impl From<tokio::sync::oneshot::error::RecvError> for FetchError {
    fn from(_: tokio::sync::oneshot::error::RecvError) -> Self {
        FetchError::TaskDropped
    }
}

/// Map an octocrab 404 to `NotFound`, anything else through unchanged.
pub(crate) fn not_found_as(what: impl Into<String>, e: octocrab::Error) -> FetchError {
    match &e {
        octocrab::Error::GitHub { source, .. } if source.status_code.as_u16() == 404 => {
            FetchError::NotFound(what.into())
        }
        _ => FetchError::Octocrab(e),
    }
}

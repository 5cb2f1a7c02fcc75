//! Error types for the research client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the research backend
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure: the backend could not be reached at all
    #[error("request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Backend returned a non-success status with a structured error body
    #[error("backend error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message extracted from the response body
        message: String,
    },

    /// Success status but the body could not be deserialized
    #[error("failed to parse response: {0}")]
    Parse(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}

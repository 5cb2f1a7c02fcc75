//! Error types for job orchestration

use moleculab_client::ClientError;
use thiserror::Error;

/// Failures surfaced to whoever observes the orchestrator.
///
/// Always reported explicitly through the job view or a `Result`; never
/// swallowed.
#[derive(Debug, Clone, Error)]
pub enum OrchestrationError {
    /// The backend could not be reached at the transport level
    #[error("could not reach the research backend: {0}")]
    Network(String),

    /// The backend answered with a non-success response
    #[error("{message}")]
    Backend {
        /// Message from the backend's structured error body, or a generic
        /// fallback when the body was unreadable
        message: String,
    },

    /// The backend ran the job and reported a terminal error state
    #[error("research job failed: {message}")]
    JobFailed { message: String },

    /// The job was superseded or cancelled by the user. Expected, silent;
    /// never presented as an error.
    #[error("research job was cancelled")]
    Cancelled,

    /// Local rejection of a blank molecule name; no network call was made
    #[error("molecule name must not be empty")]
    EmptyMoleculeName,
}

impl From<ClientError> for OrchestrationError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::RequestFailed(e) => Self::Network(e.to_string()),
            ClientError::Api { message, .. } => Self::Backend { message },
            // A success status with an unreadable body counts as a backend
            // fault, reported with a generic message
            ClientError::Parse(_) => Self::Backend {
                message: "backend returned an unreadable response".to_string(),
            },
        }
    }
}

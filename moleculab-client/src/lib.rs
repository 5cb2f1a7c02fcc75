//! Moleculab HTTP Client
//!
//! A simple, type-safe HTTP client for the pharmaceutical research backend.
//!
//! This crate wraps the backend's REST contract (start a research job, poll
//! its status, fetch the finished report, health check) in typed methods.
//! It is deliberately stateless and retry-free: retry and give-up policy
//! lives in the tracker's poller so those decisions stay in one place.
//!
//! # Example
//!
//! ```no_run
//! use moleculab_client::ResearchClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), moleculab_client::ClientError> {
//!     let client = ResearchClient::new("http://localhost:5000");
//!
//!     let started = client.start_research("Aspirin").await?;
//!     println!("Started research job {}", started.job_id);
//!     Ok(())
//! }
//! ```

pub mod error;
mod research;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use moleculab_core::dto::research::{ResultArtifact, StartResearch, StatusSnapshot};

use moleculab_core::dto::research::ApiErrorBody;
use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the research backend API
///
/// Provides one method per backend endpoint:
/// - Job submission (`start_research`)
/// - Status polling (`research_status`)
/// - Result retrieval (`research_result`)
/// - Health pre-flight (`check_health`)
#[derive(Debug, Clone)]
pub struct ResearchClient {
    /// Base URL of the backend (e.g., "http://localhost:5000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl ResearchClient {
    /// Create a new research client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the backend API (e.g., "http://localhost:5000")
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Create a new research client with a custom HTTP client
    ///
    /// This allows configuring timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the backend
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Handle an API response and deserialize JSON
    ///
    /// Non-success statuses carry a `{"error": "..."}` body; the message is
    /// extracted when possible and replaced with a generic fallback when the
    /// body cannot be parsed.
    pub(crate) async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let message = match response.json::<ApiErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => "Unknown backend error".to_string(),
            };
            return Err(ClientError::api_error(status.as_u16(), message));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Parse(format!("Failed to parse JSON response: {}", e)))
    }
}

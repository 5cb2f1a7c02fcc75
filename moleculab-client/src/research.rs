//! Research job endpoints

use tracing::debug;

use crate::ResearchClient;
use crate::error::Result;
use moleculab_core::dto::research::{
    ResultArtifact, StartResearch, StartResearchRequest, StatusSnapshot,
};

impl ResearchClient {
    /// Start a new research job for a molecule
    ///
    /// # Arguments
    /// * `molecule_name` - The compound to analyze (non-empty, pre-trimmed)
    ///
    /// # Returns
    /// The backend-assigned job id and a confirmation message
    pub async fn start_research(&self, molecule_name: &str) -> Result<StartResearch> {
        let url = format!("{}/api/research/start", self.base_url());
        let response = self
            .client
            .post(&url)
            .json(&StartResearchRequest {
                molecule_name: molecule_name.to_string(),
            })
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get the current status of a research job
    ///
    /// Must not be called with an empty job id; that is a programming error
    /// in the caller, not a recoverable failure.
    ///
    /// # Arguments
    /// * `job_id` - The backend-assigned job id
    pub async fn research_status(&self, job_id: &str) -> Result<StatusSnapshot> {
        debug_assert!(!job_id.is_empty(), "research_status requires a job id");

        let url = format!("{}/api/research/status/{}", self.base_url(), job_id);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Fetch the final report of a completed research job
    ///
    /// Only meaningful after a status snapshot reported `complete`; callers
    /// gate on that state.
    pub async fn research_result(&self, job_id: &str) -> Result<ResultArtifact> {
        debug_assert!(!job_id.is_empty(), "research_result requires a job id");

        let url = format!("{}/api/research/result/{}", self.base_url(), job_id);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Check whether the backend is reachable and healthy
    ///
    /// Never fails: transport and protocol errors are swallowed and reported
    /// as `false`. Used as an optional pre-flight only.
    pub async fn check_health(&self) -> bool {
        let url = format!("{}/api/health", self.base_url());

        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("Health check failed: {}", e);
                false
            }
        }
    }
}

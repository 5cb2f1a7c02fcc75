//! Backend API seam
//!
//! The orchestrator and poller talk to the backend through this trait rather
//! than the concrete HTTP client, so the whole state machine can be driven
//! by a scripted fake in tests.

use async_trait::async_trait;
use moleculab_client::{ClientError, ResearchClient};
use moleculab_core::dto::research::{ResultArtifact, StartResearch, StatusSnapshot};

/// The three backend operations the tracker needs.
///
/// Health checking is deliberately absent: it is a presentation-layer
/// pre-flight, not part of the job state machine.
#[async_trait]
pub trait ResearchApi: Send + Sync {
    /// Submit a research job for a molecule
    async fn start_research(&self, molecule_name: &str) -> Result<StartResearch, ClientError>;

    /// Poll the current status of a job
    async fn research_status(&self, job_id: &str) -> Result<StatusSnapshot, ClientError>;

    /// Fetch the final report of a completed job
    async fn research_result(&self, job_id: &str) -> Result<ResultArtifact, ClientError>;
}

#[async_trait]
impl ResearchApi for ResearchClient {
    async fn start_research(&self, molecule_name: &str) -> Result<StartResearch, ClientError> {
        ResearchClient::start_research(self, molecule_name).await
    }

    async fn research_status(&self, job_id: &str) -> Result<StatusSnapshot, ClientError> {
        ResearchClient::research_status(self, job_id).await
    }

    async fn research_result(&self, job_id: &str) -> Result<ResultArtifact, ClientError> {
        ResearchClient::research_result(self, job_id).await
    }
}

/// Scripted fake backend for poller/orchestrator tests
#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use moleculab_core::domain::job::JobStatus;

    /// Replays a pre-programmed sequence of responses per endpoint.
    ///
    /// Exhausted scripts answer with a 410 API error so a test that polls
    /// more than it scripted fails loudly instead of hanging.
    #[derive(Default)]
    pub struct ScriptedApi {
        pub start_responses: Mutex<VecDeque<Result<StartResearch, ClientError>>>,
        pub status_responses: Mutex<VecDeque<Result<StatusSnapshot, ClientError>>>,
        pub result_responses: Mutex<VecDeque<Result<ResultArtifact, ClientError>>>,
        pub start_calls: AtomicUsize,
        pub status_calls: AtomicUsize,
        pub result_calls: AtomicUsize,
    }

    impl ScriptedApi {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn push_start_ok(&self, job_id: &str) {
            self.start_responses
                .lock()
                .unwrap()
                .push_back(Ok(StartResearch {
                    job_id: job_id.to_string(),
                    message: format!("Research started ({job_id})"),
                }));
        }

        pub fn push_status_ok(&self, job_id: &str, status: JobStatus, elapsed_seconds: u64) {
            self.status_responses
                .lock()
                .unwrap()
                .push_back(Ok(StatusSnapshot {
                    job_id: job_id.to_string(),
                    molecule_name: "Testol".to_string(),
                    status,
                    elapsed_seconds,
                    result: None,
                    error: None,
                }));
        }

        pub fn push_status_failed(&self, job_id: &str, elapsed_seconds: u64, error: &str) {
            self.status_responses
                .lock()
                .unwrap()
                .push_back(Ok(StatusSnapshot {
                    job_id: job_id.to_string(),
                    molecule_name: "Testol".to_string(),
                    status: JobStatus::Error,
                    elapsed_seconds,
                    result: None,
                    error: Some(error.to_string()),
                }));
        }

        pub fn push_status_err(&self, err: ClientError) {
            self.status_responses.lock().unwrap().push_back(Err(err));
        }

        pub fn push_result_ok(&self, job_id: &str, molecule_name: &str, result: &str) {
            self.result_responses
                .lock()
                .unwrap()
                .push_back(Ok(ResultArtifact {
                    job_id: job_id.to_string(),
                    molecule_name: molecule_name.to_string(),
                    result: result.to_string(),
                }));
        }

        fn exhausted() -> ClientError {
            ClientError::api_error(410, "scripted responses exhausted")
        }
    }

    #[async_trait]
    impl ResearchApi for ScriptedApi {
        async fn start_research(&self, _molecule_name: &str) -> Result<StartResearch, ClientError> {
            self.start_calls.fetch_add(1, Ordering::SeqCst);
            self.start_responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(Self::exhausted()))
        }

        async fn research_status(&self, _job_id: &str) -> Result<StatusSnapshot, ClientError> {
            self.status_calls.fetch_add(1, Ordering::SeqCst);
            self.status_responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(Self::exhausted()))
        }

        async fn research_result(&self, _job_id: &str) -> Result<ResultArtifact, ClientError> {
            self.result_calls.fetch_add(1, Ordering::SeqCst);
            self.result_responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(Self::exhausted()))
        }
    }
}

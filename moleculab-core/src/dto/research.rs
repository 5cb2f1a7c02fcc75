//! Research job DTOs
//!
//! Request/response bodies for the backend's research endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::job::JobStatus;

/// Body for `POST /api/research/start`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartResearchRequest {
    pub molecule_name: String,
}

/// Successful response from `POST /api/research/start`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartResearch {
    pub job_id: String,
    pub message: String,
}

/// One poll response from `GET /api/research/status/{job_id}`.
///
/// Immutable; every poll produces a fresh snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub job_id: String,
    pub molecule_name: String,
    pub status: JobStatus,
    pub elapsed_seconds: u64,
    /// Present once `status` is `complete`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    /// Present once `status` is `error`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Final report payload from `GET /api/research/result/{job_id}`.
///
/// Produced exactly once per completed job; the content is opaque to the
/// tracker and only ever handed through to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultArtifact {
    pub job_id: String,
    pub molecule_name: String,
    pub result: String,
}

/// Error body the backend attaches to any non-success response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_parses_without_optional_fields() {
        let json = r#"{
            "job_id": "j-1",
            "molecule_name": "Aspirin",
            "status": "running",
            "elapsed_seconds": 42
        }"#;
        let snapshot: StatusSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.status, JobStatus::Running);
        assert_eq!(snapshot.elapsed_seconds, 42);
        assert!(snapshot.result.is_none());
        assert!(snapshot.error.is_none());
    }

    #[test]
    fn test_snapshot_parses_terminal_error() {
        let json = r#"{
            "job_id": "j-1",
            "molecule_name": "Aspirin",
            "status": "error",
            "elapsed_seconds": 120,
            "error": "Research timed out after 30 minutes"
        }"#;
        let snapshot: StatusSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.status, JobStatus::Error);
        assert_eq!(
            snapshot.error.as_deref(),
            Some("Research timed out after 30 minutes")
        );
    }

    #[test]
    fn test_start_request_serializes_snake_case() {
        let req = StartResearchRequest {
            molecule_name: "Metformin".to_string(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["molecule_name"], "Metformin");
    }
}

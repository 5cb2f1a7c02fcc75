//! Job domain types

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::progress::ProgressView;
use crate::dto::research::ResultArtifact;

/// Backend-reported status of a research job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Running,
    Complete,
    Error,
}

impl JobStatus {
    /// Whether this status ends the polling loop
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Complete | JobStatus::Error)
    }
}

/// One submitted research request, tracked from submission to a terminal
/// state.
///
/// Owned exclusively by the orchestrator; superseded (and its polling loop
/// cancelled) when a new submission arrives.
#[derive(Debug, Clone)]
pub struct ResearchJob {
    /// Backend-assigned identifier, opaque and immutable once set
    pub job_id: String,
    /// User-supplied compound name, trimmed and non-empty
    pub molecule_name: String,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    /// Client-side estimate of how long the backend analysis takes
    pub expected_duration: Duration,
}

impl ResearchJob {
    pub fn new(
        job_id: impl Into<String>,
        molecule_name: impl Into<String>,
        expected_duration: Duration,
    ) -> Self {
        Self {
            job_id: job_id.into(),
            molecule_name: molecule_name.into(),
            submitted_at: chrono::Utc::now(),
            expected_duration,
        }
    }
}

/// Client-side lifecycle of the tracked job, as presented to observers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackStatus {
    /// No job submitted, or the last one was cancelled
    Idle,
    /// Accepted by the backend, no status snapshot observed yet
    Starting,
    /// Backend reports pending/running
    Running,
    /// Terminal: report fetched and available
    Complete,
    /// Terminal: job failed, start failed, or the result was unfetchable
    Failed,
}

/// The single observable value merged from backend snapshots and the
/// progress estimate.
///
/// Readers only ever see immutable copies; all mutation happens inside the
/// orchestrator.
#[derive(Debug, Clone)]
pub struct JobView {
    pub status: TrackStatus,
    pub molecule_name: Option<String>,
    pub progress: ProgressView,
    pub result: Option<ResultArtifact>,
    pub error_message: Option<String>,
}

impl JobView {
    /// View before any submission (and after cancellation)
    pub fn idle() -> Self {
        Self {
            status: TrackStatus::Idle,
            molecule_name: None,
            progress: ProgressView::zero(),
            result: None,
            error_message: None,
        }
    }

    /// View right after the backend accepted the job
    pub fn starting(molecule_name: &str) -> Self {
        Self {
            status: TrackStatus::Starting,
            molecule_name: Some(molecule_name.to_string()),
            progress: ProgressView::zero(),
            result: None,
            error_message: None,
        }
    }

    /// View for an in-flight job with a fresh progress estimate
    pub fn running(molecule_name: &str, progress: ProgressView) -> Self {
        Self {
            status: TrackStatus::Running,
            molecule_name: Some(molecule_name.to_string()),
            progress,
            result: None,
            error_message: None,
        }
    }

    /// Terminal view carrying the fetched report
    pub fn complete(artifact: ResultArtifact, progress: ProgressView) -> Self {
        Self {
            status: TrackStatus::Complete,
            molecule_name: Some(artifact.molecule_name.clone()),
            progress,
            result: Some(artifact),
            error_message: None,
        }
    }

    /// Terminal failure view; progress stays frozen at its last value
    pub fn failed(
        molecule_name: Option<String>,
        message: impl Into<String>,
        progress: ProgressView,
    ) -> Self {
        Self {
            status: TrackStatus::Failed,
            molecule_name,
            progress,
            result: None,
            error_message: Some(message.into()),
        }
    }
}

//! Moleculab Tracker
//!
//! Job orchestration and progress reconciliation for the research backend.
//!
//! Architecture:
//! - Configuration: poll cadence, retry bound, expected-duration calibration
//! - Api: trait seam over the HTTP client so the tracker is testable offline
//! - Poller: fixed-cadence status polling with transient-failure tolerance
//! - Progress: monotonic time-based progress estimate, reconciled with the
//!   backend's real terminal state
//! - Orchestrator: owns the single active job, supersession/cancellation via
//!   a generation counter, and the one observable `JobView`
//!
//! The presentation layer only ever calls `submit`/`cancel` and reads the
//! watch channel returned by `observe`.

pub mod api;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod poller;
pub mod progress;

pub use api::ResearchApi;
pub use config::Config;
pub use error::OrchestrationError;
pub use orchestrator::JobOrchestrator;
pub use poller::{Gate, PollOutcome, Poller};
pub use progress::ProgressEstimator;

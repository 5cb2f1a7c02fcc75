//! Progress presentation types
//!
//! The backend exposes no fine-grained progress, so the client synthesizes a
//! percentage from elapsed time against a calibrated expected duration. The
//! phase messages rotate with that percentage purely for perceived progress;
//! they carry no information about actual job state.

use std::time::Duration;

/// Rotating status lines shown while a job runs. Decorative only.
pub const PHASE_MESSAGES: [&str; 14] = [
    "Initializing multi-agent system...",
    "Deploying IQVIA Market Intelligence Analyst...",
    "Activating Export-Import Trade Analyst...",
    "Loading Patent Landscape Agent...",
    "Initiating Clinical Research Specialist...",
    "Connecting Regulatory Intelligence Expert...",
    "Syncing Competitive Intelligence Analyst...",
    "Processing molecular data structures...",
    "Analyzing market dynamics...",
    "Scanning patent databases...",
    "Evaluating clinical trial data...",
    "Compiling regulatory requirements...",
    "Generating comprehensive research report...",
    "Finalizing analysis results...",
];

/// Derived, recomputed progress value; never persisted.
///
/// `percent` is non-decreasing over one job's lifetime (enforced by the
/// estimator's high-water mark) and only reaches 100 once the backend has
/// confirmed completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressView {
    pub percent: f64,
    pub phase_index: usize,
    pub phase_message: &'static str,
    pub eta_minutes: u64,
}

impl ProgressView {
    /// Build a view at the given percentage for a job with the given
    /// expected total duration.
    pub fn at(percent: f64, expected_duration: Duration) -> Self {
        let percent = percent.clamp(0.0, 100.0);
        let phase_index = phase_index_for(percent);
        let expected_minutes = expected_duration.as_millis() as f64 / 60_000.0;
        let eta_minutes = (((100.0 - percent) / 100.0) * expected_minutes).ceil().max(0.0) as u64;
        Self {
            percent,
            phase_index,
            phase_message: PHASE_MESSAGES[phase_index],
            eta_minutes,
        }
    }

    /// Zero progress, no ETA. Used for idle/starting views.
    pub fn zero() -> Self {
        Self {
            percent: 0.0,
            phase_index: 0,
            phase_message: PHASE_MESSAGES[0],
            eta_minutes: 0,
        }
    }
}

/// Map a percentage onto the phase message table
fn phase_index_for(percent: f64) -> usize {
    let last = PHASE_MESSAGES.len() - 1;
    (((percent / 100.0) * last as f64).floor() as usize).min(last)
}

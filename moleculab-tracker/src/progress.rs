//! Progress estimation
//!
//! The backend exposes no per-stage progress, so the tracker estimates a
//! percentage from elapsed time against the configured expected duration.
//! The estimate defers to real terminal state: a confirmed completion forces
//! 100, a reported failure freezes the bar where it was.

use std::time::Duration;

use moleculab_core::domain::job::JobStatus;
use moleculab_core::domain::progress::ProgressView;

/// Highest percentage the time-based estimate may reach on its own. Only a
/// confirmed `complete` snapshot shows 100.
const ESTIMATE_CEILING: f64 = 99.9;

/// Converts elapsed time into a monotonically non-decreasing progress view.
///
/// Pure apart from the high-water mark, which guarantees the percentage
/// never regresses even if the elapsed-time source resets (backend restart,
/// wall-clock fallback after a transient failure).
#[derive(Debug)]
pub struct ProgressEstimator {
    expected_duration: Duration,
    high_water: f64,
}

impl ProgressEstimator {
    pub fn new(expected_duration: Duration) -> Self {
        Self {
            expected_duration,
            high_water: 0.0,
        }
    }

    /// Advance the estimate for a fresh snapshot and return the merged view.
    ///
    /// - `pending`/`running`: elapsed-vs-expected, capped at 99.9,
    ///   never below the previous value
    /// - `complete`: exactly 100, regardless of elapsed time
    /// - `error`: frozen at the last value
    pub fn estimate(&mut self, elapsed: Duration, status: JobStatus) -> ProgressView {
        match status {
            JobStatus::Complete => {
                self.high_water = 100.0;
            }
            JobStatus::Error => {}
            JobStatus::Pending | JobStatus::Running => {
                let expected_ms = self.expected_duration.as_millis().max(1) as f64;
                let raw = (elapsed.as_millis() as f64 / expected_ms) * 100.0;
                self.high_water = self.high_water.max(raw.min(ESTIMATE_CEILING));
            }
        }
        self.view()
    }

    /// Current view without advancing the estimate
    pub fn view(&self) -> ProgressView {
        ProgressView::at(self.high_water, self.expected_duration)
    }

    pub fn percent(&self) -> f64 {
        self.high_water
    }
}

//! Status poller
//!
//! Polls the backend for one job's status at a fixed cadence until a
//! terminal state is reached, the transient-failure budget is exhausted, or
//! the job is superseded. Emission is gated on the job's generation so a
//! late response for a cancelled job is never observed.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::api::ResearchApi;
use crate::config::Config;
use crate::error::OrchestrationError;
use moleculab_core::domain::job::JobStatus;
use moleculab_core::dto::research::StatusSnapshot;

/// Generation gate for one job.
///
/// The orchestrator bumps the shared counter on every new submission or
/// cancellation; a gate whose epoch no longer matches is dead, and anything
/// it guards must be dropped silently.
#[derive(Debug, Clone)]
pub struct Gate {
    generation: Arc<AtomicU64>,
    epoch: u64,
}

impl Gate {
    pub fn new(generation: Arc<AtomicU64>, epoch: u64) -> Self {
        Self { generation, epoch }
    }

    /// Whether this gate's job is still the active one
    pub fn is_live(&self) -> bool {
        self.generation.load(Ordering::SeqCst) == self.epoch
    }
}

/// Terminal outcome of one polling loop
#[derive(Debug)]
pub enum PollOutcome {
    /// Backend confirmed completion; carries the final snapshot
    Succeeded(StatusSnapshot),
    /// Backend reported a failed job, or the transient-failure budget ran out
    Failed(OrchestrationError),
    /// The job was superseded or cancelled; nothing more will be emitted
    Cancelled,
}

/// Fixed-cadence poller for a single job.
///
/// Holds no retry state between jobs; consecutive-failure counting restarts
/// with every `run`.
pub struct Poller {
    api: Arc<dyn ResearchApi>,
    config: Config,
}

impl Poller {
    pub fn new(api: Arc<dyn ResearchApi>, config: Config) -> Self {
        Self { api, config }
    }

    /// Polls `job_id` until a terminal state.
    ///
    /// Every non-terminal snapshot is handed to `on_snapshot` in arrival
    /// order, plus the final `complete` snapshot. The gate is checked before
    /// every emission and on every tick; once it dies the loop stops without
    /// emitting anything further.
    pub async fn run(
        &self,
        job_id: &str,
        gate: &Gate,
        mut on_snapshot: impl FnMut(&StatusSnapshot),
    ) -> PollOutcome {
        debug!(
            "Polling job {} every {:?} (transient budget: {})",
            job_id, self.config.poll_interval, self.config.max_transient_failures
        );

        let mut interval = time::interval(self.config.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut consecutive_failures: u32 = 0;

        loop {
            interval.tick().await;

            if !gate.is_live() {
                debug!("Job {} superseded, stopping poll loop", job_id);
                return PollOutcome::Cancelled;
            }

            match self.api.research_status(job_id).await {
                Ok(snapshot) => {
                    consecutive_failures = 0;

                    // The response may have raced a cancellation
                    if !gate.is_live() {
                        debug!("Dropping late snapshot for superseded job {}", job_id);
                        return PollOutcome::Cancelled;
                    }

                    match snapshot.status {
                        JobStatus::Pending | JobStatus::Running => {
                            debug!(
                                "Job {} {:?} ({}s elapsed)",
                                job_id, snapshot.status, snapshot.elapsed_seconds
                            );
                            on_snapshot(&snapshot);
                        }
                        JobStatus::Complete => {
                            info!(
                                "Job {} complete after {}s",
                                job_id, snapshot.elapsed_seconds
                            );
                            on_snapshot(&snapshot);
                            return PollOutcome::Succeeded(snapshot);
                        }
                        JobStatus::Error => {
                            let message = snapshot
                                .error
                                .clone()
                                .unwrap_or_else(|| "Research job failed".to_string());
                            warn!("Job {} failed on the backend: {}", job_id, message);
                            return PollOutcome::Failed(OrchestrationError::JobFailed { message });
                        }
                    }
                }
                Err(e) => {
                    consecutive_failures += 1;

                    if consecutive_failures > self.config.max_transient_failures {
                        error!(
                            "Giving up on job {} after {} consecutive poll failures: {}",
                            job_id, consecutive_failures, e
                        );
                        return PollOutcome::Failed(e.into());
                    }

                    warn!(
                        "Poll for job {} failed ({}/{} consecutive), retrying: {}",
                        job_id, consecutive_failures, self.config.max_transient_failures, e
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::ScriptedApi;
    use moleculab_client::ClientError;
    use std::time::Duration;

    fn fast_config() -> Config {
        Config::default().with_poll_interval(Duration::from_secs(1))
    }

    fn live_gate() -> (Arc<AtomicU64>, Gate) {
        let generation = Arc::new(AtomicU64::new(1));
        let gate = Gate::new(Arc::clone(&generation), 1);
        (generation, gate)
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_on_complete_and_emits_in_order() {
        let api = Arc::new(ScriptedApi::new());
        api.push_status_ok("J1", JobStatus::Pending, 0);
        api.push_status_ok("J1", JobStatus::Running, 10);
        api.push_status_ok("J1", JobStatus::Running, 20);
        api.push_status_ok("J1", JobStatus::Complete, 30);

        let (_generation, gate) = live_gate();
        let poller = Poller::new(api.clone(), fast_config());

        let mut elapsed_seen = Vec::new();
        let outcome = poller
            .run("J1", &gate, |snap| elapsed_seen.push(snap.elapsed_seconds))
            .await;

        assert!(matches!(outcome, PollOutcome::Succeeded(_)));
        assert_eq!(elapsed_seen, vec![0, 10, 20, 30]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tolerates_transient_failures_within_budget() {
        let api = Arc::new(ScriptedApi::new());
        api.push_status_err(ClientError::api_error(502, "bad gateway"));
        api.push_status_err(ClientError::api_error(502, "bad gateway"));
        api.push_status_ok("J1", JobStatus::Running, 10);
        api.push_status_ok("J1", JobStatus::Complete, 20);

        let (_generation, gate) = live_gate();
        let poller = Poller::new(api.clone(), fast_config());

        let mut emitted = 0;
        let outcome = poller.run("J1", &gate, |_| emitted += 1).await;

        assert!(matches!(outcome, PollOutcome::Succeeded(_)));
        assert_eq!(emitted, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fails_after_exhausting_transient_budget() {
        let api = Arc::new(ScriptedApi::new());
        for _ in 0..3 {
            api.push_status_err(ClientError::api_error(502, "bad gateway"));
        }
        api.push_status_err(ClientError::api_error(502, "backend exploded"));

        let (_generation, gate) = live_gate();
        let poller = Poller::new(api.clone(), fast_config());

        let outcome = poller.run("J1", &gate, |_| {}).await;

        match outcome {
            PollOutcome::Failed(OrchestrationError::Backend { message }) => {
                // Carries the last observed error
                assert_eq!(message, "backend exploded");
            }
            other => panic!("expected Failed with backend message, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_counter_resets_on_success() {
        let api = Arc::new(ScriptedApi::new());
        // Two failure bursts, each within the budget of 3
        api.push_status_err(ClientError::api_error(502, "blip"));
        api.push_status_err(ClientError::api_error(502, "blip"));
        api.push_status_ok("J1", JobStatus::Running, 10);
        api.push_status_err(ClientError::api_error(502, "blip"));
        api.push_status_err(ClientError::api_error(502, "blip"));
        api.push_status_ok("J1", JobStatus::Complete, 30);

        let (_generation, gate) = live_gate();
        let poller = Poller::new(api.clone(), fast_config());

        let outcome = poller.run("J1", &gate, |_| {}).await;
        assert!(matches!(outcome, PollOutcome::Succeeded(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_backend_error_state_carries_message() {
        let api = Arc::new(ScriptedApi::new());
        api.push_status_ok("J1", JobStatus::Running, 10);
        api.push_status_failed("J1", 20, "Research timed out after 30 minutes");

        let (_generation, gate) = live_gate();
        let poller = Poller::new(api.clone(), fast_config());

        let outcome = poller.run("J1", &gate, |_| {}).await;

        match outcome {
            PollOutcome::Failed(OrchestrationError::JobFailed { message }) => {
                assert_eq!(message, "Research timed out after 30 minutes");
            }
            other => panic!("expected JobFailed, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_dead_gate_stops_before_any_call() {
        let api = Arc::new(ScriptedApi::new());
        api.push_status_ok("J1", JobStatus::Running, 10);

        let generation = Arc::new(AtomicU64::new(2));
        let stale = Gate::new(Arc::clone(&generation), 1);
        let poller = Poller::new(api.clone(), fast_config());

        let mut emitted = 0;
        let outcome = poller.run("J1", &stale, |_| emitted += 1).await;

        assert!(matches!(outcome, PollOutcome::Cancelled));
        assert_eq!(emitted, 0);
        assert_eq!(api.status_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_emission_after_mid_run_cancellation() {
        let api = Arc::new(ScriptedApi::new());
        api.push_status_ok("J1", JobStatus::Running, 10);
        api.push_status_ok("J1", JobStatus::Running, 20);

        let (generation, gate) = live_gate();
        let poller = Poller::new(api.clone(), fast_config());

        let mut emitted = 0;
        let outcome = poller
            .run("J1", &gate, |_| {
                emitted += 1;
                // Simulate the user cancelling right after the first update
                generation.fetch_add(1, Ordering::SeqCst);
            })
            .await;

        assert!(matches!(outcome, PollOutcome::Cancelled));
        assert_eq!(emitted, 1);
    }
}

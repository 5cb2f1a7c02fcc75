//! Job orchestrator
//!
//! Owns the single active research job: submits it, runs the poller in a
//! background task, merges backend snapshots with the progress estimate, and
//! publishes the one observable `JobView`. Supersession and cancellation go
//! through a generation counter; anything tagged with a stale generation is
//! dropped before it can be observed.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::{Mutex, watch};
use tokio::time::Instant;
use tracing::{info, warn};

use crate::api::ResearchApi;
use crate::config::Config;
use crate::error::OrchestrationError;
use crate::poller::{Gate, PollOutcome, Poller};
use crate::progress::ProgressEstimator;
use moleculab_core::domain::job::{JobView, ResearchJob};
use moleculab_core::domain::progress::ProgressView;

/// Orchestrates one research job at a time.
///
/// The current-job slot is single-writer (the orchestrator itself); readers
/// only ever see immutable `JobView` copies through [`observe`].
///
/// [`observe`]: JobOrchestrator::observe
pub struct JobOrchestrator {
    api: Arc<dyn ResearchApi>,
    config: Config,
    /// Bumped on every submit/cancel; stale generations are discarded
    generation: Arc<AtomicU64>,
    active: Arc<Mutex<Option<ResearchJob>>>,
    view_tx: Arc<watch::Sender<JobView>>,
}

impl JobOrchestrator {
    pub fn new(api: Arc<dyn ResearchApi>, config: Config) -> Self {
        let (view_tx, _view_rx) = watch::channel(JobView::idle());
        Self {
            api,
            config,
            generation: Arc::new(AtomicU64::new(0)),
            active: Arc::new(Mutex::new(None)),
            view_tx: Arc::new(view_tx),
        }
    }

    /// The continuously updated job view; the only read surface.
    pub fn observe(&self) -> watch::Receiver<JobView> {
        self.view_tx.subscribe()
    }

    /// Currently tracked job, if any
    pub async fn active_job(&self) -> Option<ResearchJob> {
        self.active.lock().await.clone()
    }

    /// Submit a research job for a molecule.
    ///
    /// Blank input is rejected locally without touching the network or the
    /// current state. Any previously active job is superseded: its polling
    /// loop stops and its late responses are discarded.
    pub async fn submit(&self, molecule_name: &str) -> Result<(), OrchestrationError> {
        let name = molecule_name.trim().to_string();
        if name.is_empty() {
            return Err(OrchestrationError::EmptyMoleculeName);
        }

        // Supersede whatever was running
        let epoch = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let gate = Gate::new(Arc::clone(&self.generation), epoch);
        *self.active.lock().await = None;

        self.emit(&gate, JobView::starting(&name));

        let started = match self.api.start_research(&name).await {
            Ok(started) => started,
            Err(e) => {
                let err = OrchestrationError::from(e);
                warn!("Failed to start research for {}: {}", name, err);
                self.emit(
                    &gate,
                    JobView::failed(Some(name), err.to_string(), ProgressView::zero()),
                );
                return Err(err);
            }
        };

        info!("Research started for {} (job {})", name, started.job_id);

        let job = ResearchJob::new(
            started.job_id.clone(),
            name.clone(),
            self.config.expected_duration,
        );

        {
            // The start call may have raced a newer submit or a cancel; a
            // superseded job must not overwrite the live slot. Checked under
            // the lock so the write and the check cannot interleave with a
            // competing submit.
            let mut active = self.active.lock().await;
            if !gate.is_live() {
                info!("Job {} superseded before polling began", started.job_id);
                return Err(OrchestrationError::Cancelled);
            }
            *active = Some(job);
        }

        self.spawn_poll_task(started.job_id, name, gate);

        Ok(())
    }

    /// Cancel the active job, if any.
    ///
    /// Expected and silent: the view resets to idle, the polling loop stops
    /// scheduling ticks, and any in-flight response is ignored.
    pub async fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let previous = self.active.lock().await.take();
        if let Some(job) = previous {
            info!("Cancelled research job {} ({})", job.job_id, job.molecule_name);
        }
        self.view_tx.send_replace(JobView::idle());
    }

    fn emit(&self, gate: &Gate, view: JobView) {
        if gate.is_live() {
            self.view_tx.send_replace(view);
        }
    }

    /// Runs the poll loop for one job and publishes merged views until a
    /// terminal state.
    fn spawn_poll_task(&self, job_id: String, molecule_name: String, gate: Gate) {
        let api = Arc::clone(&self.api);
        let active = Arc::clone(&self.active);
        let view_tx = Arc::clone(&self.view_tx);
        let poller = Poller::new(Arc::clone(&self.api), self.config.clone());
        let expected_duration = self.config.expected_duration;

        tokio::spawn(async move {
            let submitted_at = Instant::now();
            let mut estimator = ProgressEstimator::new(expected_duration);

            let outcome = poller
                .run(&job_id, &gate, |snapshot| {
                    // Backend elapsed time when it has any, wall clock since
                    // submission otherwise; the high-water mark absorbs
                    // disagreements between the two.
                    let elapsed = if snapshot.elapsed_seconds > 0 {
                        Duration::from_secs(snapshot.elapsed_seconds)
                    } else {
                        submitted_at.elapsed()
                    };
                    let progress = estimator.estimate(elapsed, snapshot.status);
                    if gate.is_live() {
                        view_tx.send_replace(JobView::running(&molecule_name, progress));
                    }
                })
                .await;

            if matches!(outcome, PollOutcome::Cancelled) {
                return;
            }

            resolve_outcome(
                &api,
                &view_tx,
                &gate,
                &estimator,
                &job_id,
                &molecule_name,
                outcome,
            )
            .await;

            if gate.is_live() {
                *active.lock().await = None;
            }
        });
    }
}

/// Terminal-state handling once the poll loop ends: fetch the report on
/// success, publish the failure otherwise. Everything stays behind the
/// generation gate, so a job cancelled while its final snapshot was in
/// flight causes no result fetch and no further view updates.
async fn resolve_outcome(
    api: &Arc<dyn ResearchApi>,
    view_tx: &watch::Sender<JobView>,
    gate: &Gate,
    estimator: &ProgressEstimator,
    job_id: &str,
    molecule_name: &str,
    outcome: PollOutcome,
) {
    match outcome {
        PollOutcome::Succeeded(_) => {
            if !gate.is_live() {
                return;
            }
            match api.research_result(job_id).await {
                Ok(artifact) => {
                    info!(
                        "Fetched research report for {} ({} bytes)",
                        molecule_name,
                        artifact.result.len()
                    );
                    if gate.is_live() {
                        view_tx.send_replace(JobView::complete(artifact, estimator.view()));
                    }
                }
                Err(e) => {
                    // Completed but unfetchable is still a failure for
                    // whoever is watching
                    let err = OrchestrationError::from(e);
                    warn!("Result fetch for job {} failed: {}", job_id, err);
                    if gate.is_live() {
                        view_tx.send_replace(JobView::failed(
                            Some(molecule_name.to_string()),
                            err.to_string(),
                            estimator.view(),
                        ));
                    }
                }
            }
        }
        PollOutcome::Failed(err) => {
            if gate.is_live() {
                view_tx.send_replace(JobView::failed(
                    Some(molecule_name.to_string()),
                    err.to_string(),
                    estimator.view(),
                ));
            }
        }
        PollOutcome::Cancelled => {}
    }
}

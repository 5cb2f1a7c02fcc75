//! Research command handler
//!
//! Submits a molecule, renders the live job view (percent, phase message,
//! ETA) until a terminal state, and writes the final report to disk.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use colored::*;
use moleculab_client::ResearchClient;
use moleculab_core::domain::job::TrackStatus;
use moleculab_tracker::{Config, JobOrchestrator};

/// Run one research job end to end
pub async fn run_research(
    backend_url: &str,
    molecule: &str,
    output: Option<PathBuf>,
    duration_mins: Option<u64>,
    no_preflight: bool,
) -> Result<()> {
    let client = ResearchClient::new(backend_url);

    if !no_preflight {
        if client.check_health().await {
            println!("{}", "Backend is healthy.".green());
        } else {
            println!(
                "{}",
                format!("Warning: backend at {} did not answer the health check", backend_url)
                    .yellow()
            );
        }
    }

    let config = build_config(Config::from_env(), backend_url, duration_mins);
    config.validate()?;

    let orchestrator = JobOrchestrator::new(Arc::new(client), config);
    let mut rx = orchestrator.observe();

    orchestrator.submit(molecule).await?;
    println!("{}", format!("Research started for {}", molecule).bold());

    let final_view = loop {
        tokio::select! {
            changed = rx.changed() => {
                changed.context("orchestrator stopped unexpectedly")?;
                let view = rx.borrow_and_update().clone();
                match view.status {
                    TrackStatus::Running => {
                        println!(
                            "{}  {}  {}",
                            format!("{:>5.1}%", view.progress.percent).cyan().bold(),
                            view.progress.phase_message,
                            format!("~{} min remaining", view.progress.eta_minutes).dimmed()
                        );
                    }
                    TrackStatus::Complete | TrackStatus::Failed => break view,
                    _ => {}
                }
            }
            _ = tokio::signal::ctrl_c() => {
                orchestrator.cancel().await;
                println!("{}", "Research cancelled.".yellow());
                return Ok(());
            }
        }
    };

    match final_view.status {
        TrackStatus::Complete => {
            let artifact = final_view
                .result
                .context("completed job carried no report")?;
            let path = output.unwrap_or_else(|| default_report_path(molecule));
            std::fs::write(&path, &artifact.result)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!(
                "{} {}",
                "Research complete. Report saved to".green().bold(),
                path.display()
            );
            Ok(())
        }
        _ => {
            let message = final_view
                .error_message
                .unwrap_or_else(|| "research job failed".to_string());
            anyhow::bail!("{}", message)
        }
    }
}

/// Environment-derived configuration with the CLI flags layered on top;
/// plain defaults when no environment is set. The URL flag always wins
/// (clap already resolved MOLECULAB_BACKEND_URL into it).
fn build_config(
    base: anyhow::Result<Config>,
    backend_url: &str,
    duration_mins: Option<u64>,
) -> Config {
    let mut config = base.unwrap_or_else(|_| Config::new(backend_url));
    config.backend_url = backend_url.to_string();
    if let Some(mins) = duration_mins {
        config = config.with_expected_duration(Duration::from_secs(mins * 60));
    }
    config
}

fn default_report_path(molecule: &str) -> PathBuf {
    let slug = molecule.to_lowercase().replace(char::is_whitespace, "_");
    PathBuf::from(format!("{}_research_report.txt", slug))
}

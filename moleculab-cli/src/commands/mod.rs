//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod health;
mod research;

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run a research job for a molecule and track it to completion
    Research {
        /// Name of the compound to analyze
        molecule: String,

        /// Where to write the final report (default: <molecule>_research_report.txt)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Expected analysis duration in minutes; calibrates the progress
        /// estimate (default: 10, or MOLECULAB_EXPECTED_DURATION_MINS)
        #[arg(long)]
        duration_mins: Option<u64>,

        /// Skip the backend health pre-flight
        #[arg(long)]
        no_preflight: bool,
    },
    /// Check that the research backend is up
    Health,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, backend_url: &str) -> Result<()> {
    match command {
        Commands::Research {
            molecule,
            output,
            duration_mins,
            no_preflight,
        } => research::run_research(backend_url, &molecule, output, duration_mins, no_preflight).await,
        Commands::Health => health::run_health(backend_url).await,
    }
}

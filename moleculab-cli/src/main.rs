//! Moleculab CLI
//!
//! Command-line front end for the pharmaceutical research backend: submits a
//! molecule for analysis, tracks the job with a live progress readout, and
//! saves the final report.

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "moleculab")]
#[command(about = "Pharmaceutical research job tracker", long_about = None)]
struct Cli {
    /// Research backend URL
    #[arg(
        long,
        env = "MOLECULAB_BACKEND_URL",
        default_value = "http://localhost:5000"
    )]
    backend_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moleculab=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    handle_command(cli.command, &cli.backend_url).await
}

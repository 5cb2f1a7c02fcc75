//! Health command handler

use anyhow::Result;
use colored::*;
use moleculab_client::ResearchClient;

/// Check backend health and report it
pub async fn run_health(backend_url: &str) -> Result<()> {
    let client = ResearchClient::new(backend_url);

    if client.check_health().await {
        println!("{} {}", "Backend is healthy:".green(), backend_url);
        Ok(())
    } else {
        anyhow::bail!("Backend at {} is not responding", backend_url)
    }
}

//! Tollgate Agent
//!
//! Collects prices and generates signals for every tracked token on a fixed
//! schedule. Runs one cycle immediately on startup.

use dotenvy::dotenv;
use std::sync::Arc;
use tokio::signal;
use tollgate::config::{get_environment, AgentConfig};
use tollgate::core::runtime::{AgentRuntime, RuntimeConfig};
use tollgate::core::scheduler::JobScheduler;
use tollgate::db::JsonStore;
use tollgate::jobs::context::JobContext;
use tollgate::logging;
use tollgate::services::{ChatAnalyst, CoinGeckoProvider};
use tollgate::signals::SignalEngine;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = AgentConfig::from_env();
    info!(environment = %get_environment(), "Starting Tollgate Agent");
    info!(tokens = ?config.tokens, interval_minutes = config.interval_minutes, lookback = ?config.lookback.mode, "Agent configuration");

    if config.analyst.api_key.is_none() {
        warn!("ANALYST_API_KEY is not set - every token will fail at the analyst step");
    }

    let store = Arc::new(JsonStore::new(config.data_dir.clone()));
    let health = store.health_check().await?;
    info!(files = ?health.files, "Storage health: OK");

    match store.last_run().await? {
        Some(run) => {
            let minutes_ago = (chrono::Utc::now() - run.timestamp).num_minutes();
            info!(
                status = ?run.status,
                signals = run.signals_generated,
                "Last run {} minutes ago",
                minutes_ago
            );
        }
        None => info!("No previous runs found - fresh start"),
    }

    let job_context = Arc::new(JobContext::new(
        Arc::new(CoinGeckoProvider::new(config.price_api_url.clone())),
        Arc::new(ChatAnalyst::new(config.analyst.clone())),
        store,
        SignalEngine::new(config.lookback),
    ));
    let runtime = Arc::new(AgentRuntime::new(RuntimeConfig::from(&config), job_context));

    let scheduler = JobScheduler::new(runtime, config.interval_minutes)
        .map_err(|e| format!("Failed to create scheduler: {}", e))?;
    scheduler.start().await;

    info!("Agent started, waiting for shutdown signal...");
    signal::ctrl_c().await?;
    info!("Shutting down agent...");
    scheduler.stop().await;
    info!("Agent stopped");

    Ok(())
}

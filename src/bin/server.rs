//! Tollgate combined server
//!
//! Runs the scheduled agent and the read API in one process.

use dotenvy::dotenv;
use std::sync::Arc;
use tokio::signal;
use tollgate::config::{get_environment, AgentConfig};
use tollgate::core::http::{start_server, AppState};
use tollgate::core::runtime::{AgentRuntime, RuntimeConfig};
use tollgate::core::scheduler::JobScheduler;
use tollgate::db::JsonStore;
use tollgate::jobs::context::JobContext;
use tollgate::logging;
use tollgate::services::{ChatAnalyst, CoinGeckoProvider};
use tollgate::signals::SignalEngine;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = Arc::new(AgentConfig::from_env());
    info!(environment = %get_environment(), "Starting Tollgate Server");
    info!(port = config.port, tokens = ?config.tokens, "HTTP Server: http://0.0.0.0:{}", config.port);

    let store = Arc::new(JsonStore::new(config.data_dir.clone()));
    store.health_check().await?;

    let job_context = Arc::new(JobContext::new(
        Arc::new(CoinGeckoProvider::new(config.price_api_url.clone())),
        Arc::new(ChatAnalyst::new(config.analyst.clone())),
        store.clone(),
        SignalEngine::new(config.lookback),
    ));
    let runtime = Arc::new(AgentRuntime::new(RuntimeConfig::from(config.as_ref()), job_context));
    let scheduler = JobScheduler::new(runtime, config.interval_minutes)
        .map_err(|e| format!("Failed to create scheduler: {}", e))?;

    let port = config.port;
    let state = AppState::new(config, store);
    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(state, port).await {
            error!(error = %e, "HTTP server error");
        }
    });

    scheduler.start().await;

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down...");
            scheduler.stop().await;
            info!("Server stopped");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
            scheduler.stop().await;
        }
    }

    Ok(())
}

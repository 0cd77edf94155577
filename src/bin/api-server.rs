//! Tollgate API Server
//!
//! Read-only HTTP API over the persisted signals. Run it behind the payment
//! gate; the agent process writes the data it serves.

use dotenvy::dotenv;
use std::sync::Arc;
use tokio::signal;
use tollgate::config::{get_environment, AgentConfig};
use tollgate::core::http::{start_server, AppState};
use tollgate::db::JsonStore;
use tollgate::logging;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = Arc::new(AgentConfig::from_env());
    let port = config.port;

    info!(environment = %get_environment(), "Starting Tollgate API Server");
    info!(port = port, data_dir = %config.data_dir.display(), "HTTP Server: http://0.0.0.0:{}", port);

    let store = Arc::new(JsonStore::new(config.data_dir.clone()));
    let health = store.health_check().await?;
    info!(files = ?health.files, "Storage ready");

    let state = AppState::new(config, store);
    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(state, port).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}

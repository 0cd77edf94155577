//! Cron-based scheduler for analysis cycles

use crate::core::runtime::AgentRuntime;
use cron::Schedule;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

/// Cron expression (with seconds field) firing every `interval_minutes`.
///
/// Sub-hour intervals fire on minute boundaries, whole-hour intervals on
/// hour boundaries.
pub fn cron_expression(interval_minutes: u64) -> Result<String, String> {
    match interval_minutes {
        0 => Err("scheduler disabled: interval_minutes is 0".to_string()),
        1..=59 => Ok(format!("0 */{} * * * *", interval_minutes)),
        m if m % 60 == 0 && m / 60 <= 24 => Ok(format!("0 0 */{} * * *", m / 60)),
        m => Err(format!(
            "interval of {} minutes cannot be expressed as a cron schedule",
            m
        )),
    }
}

/// Scheduler that periodically runs an analysis cycle
pub struct JobScheduler {
    runtime: Arc<AgentRuntime>,
    schedule: Schedule,
    cron_expr: String,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl JobScheduler {
    /// Create a new scheduler
    ///
    /// # Arguments
    /// * `runtime` - Runtime executing the cycles
    /// * `interval_minutes` - Minutes between cycles (0 = disabled)
    pub fn new(
        runtime: Arc<AgentRuntime>,
        interval_minutes: u64,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let cron_expr = cron_expression(interval_minutes)?;
        let schedule = Schedule::from_str(&cron_expr)
            .map_err(|e| format!("invalid cron expression '{}': {}", cron_expr, e))?;

        info!(
            interval_minutes = interval_minutes,
            cron = %cron_expr,
            "JobScheduler: created with interval {}m (cron: {})",
            interval_minutes,
            cron_expr
        );

        Ok(Self {
            runtime,
            schedule,
            cron_expr,
            handle: Arc::new(RwLock::new(None)),
        })
    }

    pub fn cron_expr(&self) -> &str {
        &self.cron_expr
    }

    /// Start the scheduler. The first cycle runs immediately, then one per tick.
    pub async fn start(&self) {
        let runtime = self.runtime.clone();
        let schedule = self.schedule.clone();

        let handle = tokio::spawn(async move {
            info!("JobScheduler: running initial analysis on startup");
            run_once(&runtime).await;

            loop {
                let next_tick = schedule.upcoming(chrono::Utc).next();
                match next_tick {
                    Some(next_tick) => {
                        let now = chrono::Utc::now();
                        if next_tick > now {
                            let duration = (next_tick - now).to_std().unwrap_or_default();
                            tokio::time::sleep(duration).await;
                        }
                    }
                    None => {
                        tokio::time::sleep(tokio::time::Duration::from_secs(60)).await;
                        continue;
                    }
                }

                info!("JobScheduler: scheduled run triggered");
                run_once(&runtime).await;
            }
        });

        let mut h = self.handle.write().await;
        if let Some(previous) = h.replace(handle) {
            previous.abort();
        }
        info!("JobScheduler: started successfully");
    }

    /// Stop the scheduler
    pub async fn stop(&self) {
        let mut handle = self.handle.write().await;
        if let Some(h) = handle.take() {
            h.abort();
            info!("JobScheduler: stopped");
        }
    }

    /// Check if the scheduler is running
    pub async fn is_running(&self) -> bool {
        let handle = self.handle.read().await;
        handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

async fn run_once(runtime: &AgentRuntime) {
    if let Err(e) = runtime.run_cycle().await {
        error!(error = %e, "JobScheduler: analysis run failed, will retry on next tick");
    }
}

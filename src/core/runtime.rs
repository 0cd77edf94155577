//! One analysis cycle over every tracked token.
//!
//! Tokens are processed strictly one after another with a pause in between
//! to stay under upstream rate limits.

use chrono::Utc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info};
use uuid::Uuid;

use crate::config::AgentConfig;
use crate::error::StoreError;
use crate::jobs::context::JobContext;
use crate::jobs::handlers::analyze_token;
use crate::models::{AgentRun, RunStatus};

/// Configuration for the analysis runtime
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub tokens: Vec<String>,
    pub token_delay: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        let config = AgentConfig::default();
        Self::from(&config)
    }
}

impl From<&AgentConfig> for RuntimeConfig {
    fn from(config: &AgentConfig) -> Self {
        Self {
            tokens: config.tokens.clone(),
            token_delay: config.token_delay,
        }
    }
}

pub struct AgentRuntime {
    config: RuntimeConfig,
    job_context: Arc<JobContext>,
}

impl AgentRuntime {
    pub fn new(config: RuntimeConfig, job_context: Arc<JobContext>) -> Self {
        Self {
            config,
            job_context,
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Analyze every token once and persist the run summary.
    ///
    /// Individual token failures are logged and counted, never propagated.
    pub async fn run_cycle(&self) -> Result<AgentRun, StoreError> {
        let start = Instant::now();
        let tokens = &self.config.tokens;
        info!(tokens = ?tokens, "AgentRuntime: starting analysis run for {}", tokens.join(", "));

        let mut processed = Vec::new();
        let mut failures = 0;

        for (i, token) in tokens.iter().enumerate() {
            match analyze_token(&self.job_context, token).await {
                Ok(analysis) => processed.push(analysis.record.token),
                Err(e) => {
                    failures += 1;
                    error!(token = %token, error = %e, "AgentRuntime: failed to analyze {}", token);
                }
            }

            if i + 1 < tokens.len() && !self.config.token_delay.is_zero() {
                info!(
                    delay_ms = self.config.token_delay.as_millis() as u64,
                    "AgentRuntime: waiting before next token"
                );
                tokio::time::sleep(self.config.token_delay).await;
            }
        }

        // every token attempts a price fetch; only completed tokens count an AI call
        let status = RunStatus::from_counts(processed.len(), tokens.len());
        let run = AgentRun {
            id: Uuid::new_v4(),
            status,
            signals_generated: processed.len(),
            ai_calls_made: processed.len(),
            tokens_processed: processed,
            prices_fetched: tokens.len(),
            duration_ms: start.elapsed().as_millis() as u64,
            error: (failures > 0).then(|| format!("{} token(s) failed to analyze", failures)),
            timestamp: Utc::now(),
        };

        self.job_context.store.record_run(run.clone()).await?;

        info!(
            status = ?run.status,
            signals = run.signals_generated,
            total = tokens.len(),
            duration_ms = run.duration_ms,
            "AgentRuntime: run complete, {}/{} signals in {}ms",
            run.signals_generated,
            tokens.len(),
            run.duration_ms
        );

        Ok(run)
    }
}

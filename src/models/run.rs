use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Success,
    Partial,
    Failed,
}

impl RunStatus {
    /// Classify a cycle from how many of its tokens produced a signal.
    pub fn from_counts(succeeded: usize, total: usize) -> Self {
        if succeeded == total {
            RunStatus::Success
        } else if succeeded > 0 {
            RunStatus::Partial
        } else {
            RunStatus::Failed
        }
    }
}

/// Summary of one analysis cycle over all tracked tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRun {
    pub id: Uuid,
    pub status: RunStatus,
    pub tokens_processed: Vec<String>,
    pub signals_generated: usize,
    /// Tokens attempted, each starting with a price fetch.
    pub prices_fetched: usize,
    /// Tokens whose analysis completed, AI opinion included.
    pub ai_calls_made: usize,
    pub duration_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

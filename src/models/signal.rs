use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::price::PriceChangeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalClass {
    Buy,
    Hold,
    Sell,
}

impl SignalClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalClass::Buy => "BUY",
            SignalClass::Hold => "HOLD",
            SignalClass::Sell => "SELL",
        }
    }
}

impl fmt::Display for SignalClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignalClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Ok(SignalClass::Buy),
            "HOLD" => Ok(SignalClass::Hold),
            "SELL" => Ok(SignalClass::Sell),
            other => Err(format!("unknown signal class: {}", other)),
        }
    }
}

/// Output of the scorer, optionally adjusted by reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalDecision {
    pub signal_class: SignalClass,
    /// Always within 0..=100.
    pub confidence: u8,
    pub rationale: String,
    pub factors: Vec<String>,
}

/// Opinion returned by the AI collaborator for the same token and window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiOpinion {
    pub signal_class: SignalClass,
    pub confidence: u8,
}

/// AI opinion plus the narrative it came with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiAnalysis {
    pub opinion: AiOpinion,
    pub report: String,
}

/// The per-(token, run) record persisted and served to paying consumers.
///
/// Field names are part of the external JSON contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalRecord {
    pub id: Uuid,
    pub token: String,
    pub signal: SignalClass,
    pub confidence: u8,
    pub price_at_signal: f64,
    pub change_1h: f64,
    pub change_6h: f64,
    pub change_24h: f64,
    #[serde(default)]
    pub rationale: String,
    pub ai_report: String,
    pub timestamp: DateTime<Utc>,
}

impl SignalRecord {
    pub fn new(
        token: impl Into<String>,
        price_at_signal: f64,
        changes: &PriceChangeSet,
        decision: &SignalDecision,
        ai_report: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            token: token.into(),
            signal: decision.signal_class,
            confidence: decision.confidence,
            price_at_signal,
            change_1h: changes.change_1h,
            change_6h: changes.change_6h,
            change_24h: changes.change_24h,
            rationale: decision.rationale.clone(),
            ai_report: ai_report.into(),
            timestamp: Utc::now(),
        }
    }
}

//! Pipeline result types

use crate::models::{AiOpinion, SignalDecision, SignalRecord};

/// Everything produced while analyzing one token.
#[derive(Debug, Clone)]
pub struct TokenAnalysis {
    /// The persisted, reconciled record.
    pub record: SignalRecord,
    /// Scorer output before reconciliation.
    pub mechanical: SignalDecision,
    pub ai_opinion: AiOpinion,
}

impl TokenAnalysis {
    pub fn agreed(&self) -> bool {
        self.mechanical.signal_class == self.ai_opinion.signal_class
    }
}

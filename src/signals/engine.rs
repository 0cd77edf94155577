//! Signal engine: price changes plus scoring for one history snapshot.

use crate::error::SignalError;
use crate::indicators::momentum::{calculate_price_changes_with, LookbackConfig};
use crate::models::{PriceChangeSet, PriceObservation, SignalDecision};
use crate::signals::scoring::SignalScorer;

#[derive(Debug, Clone, Copy, Default)]
pub struct SignalEngine {
    lookback: LookbackConfig,
}

impl SignalEngine {
    pub fn new(lookback: LookbackConfig) -> Self {
        Self { lookback }
    }

    pub fn lookback(&self) -> &LookbackConfig {
        &self.lookback
    }

    /// Compute the change set and the mechanical decision for `history`.
    pub fn evaluate(
        &self,
        history: &[PriceObservation],
    ) -> Result<(PriceChangeSet, SignalDecision), SignalError> {
        let changes = calculate_price_changes_with(history, &self.lookback)?;
        let decision = SignalScorer::generate_signal(history, &changes);
        Ok((changes, decision))
    }
}

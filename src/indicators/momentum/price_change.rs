//! Percentage price change over the 1h / 6h / 24h lookback windows

use chrono::{DateTime, Duration, Utc};

use crate::common::math::{percent_change, round_to_cents};
use crate::error::SignalError;
use crate::models::{PriceChangeSet, PriceObservation};

/// Observations needed before a history is considered usable (about 1.5 sampling intervals).
pub const MIN_OBSERVATIONS: usize = 3;

/// How a lookback window is mapped onto a history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookbackMode {
    /// Fixed index offsets assuming perfectly uniform sampling. Matches
    /// historically published numbers.
    #[default]
    IndexOffset,
    /// Nearest observation to `newest.observed_at - window`.
    Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookbackConfig {
    pub mode: LookbackMode,
    /// Expected spacing between samples; drives the index offsets.
    pub sample_interval: Duration,
}

impl Default for LookbackConfig {
    fn default() -> Self {
        Self {
            mode: LookbackMode::IndexOffset,
            sample_interval: Duration::minutes(30),
        }
    }
}

impl LookbackConfig {
    pub fn timestamp() -> Self {
        Self {
            mode: LookbackMode::Timestamp,
            ..Self::default()
        }
    }

    /// Number of samples spanning `window`. With 30 minute sampling: 1h = 2, 6h = 12, 24h = 48.
    pub fn index_offset(&self, window: Duration) -> usize {
        let step = self.sample_interval.num_seconds().max(1);
        (window.num_seconds() / step).max(0) as usize
    }
}

/// The three lookback windows, shortest first.
pub fn lookback_windows() -> [Duration; 3] {
    [Duration::hours(1), Duration::hours(6), Duration::hours(24)]
}

/// Calculate price changes with index-offset lookback.
///
/// An empty history yields all-zero changes with `has_enough_data = false`.
pub fn calculate_price_changes(history: &[PriceObservation]) -> Result<PriceChangeSet, SignalError> {
    calculate_price_changes_with(history, &LookbackConfig::default())
}

/// Calculate price changes using the given lookback configuration.
///
/// When a history is shorter than a window, the oldest observation stands in
/// for the missing one. A zero or non-finite reference price is an error.
pub fn calculate_price_changes_with(
    history: &[PriceObservation],
    config: &LookbackConfig,
) -> Result<PriceChangeSet, SignalError> {
    let Some(newest) = history.first() else {
        return Ok(PriceChangeSet::default());
    };

    let current = newest.price_usd;
    if !current.is_finite() {
        return Err(SignalError::NonFinitePrice { index: 0 });
    }

    let [w1h, w6h, w24h] = lookback_windows();
    let change = |window: Duration| -> Result<f64, SignalError> {
        let index = reference_index(history, window, config);
        let past = history[index].price_usd;
        if !past.is_finite() {
            return Err(SignalError::NonFinitePrice { index });
        }
        if past == 0.0 {
            return Err(SignalError::ZeroReferencePrice { index });
        }
        Ok(round_to_cents(percent_change(current, past)))
    };

    Ok(PriceChangeSet {
        change_1h: change(w1h)?,
        change_6h: change(w6h)?,
        change_24h: change(w24h)?,
        has_enough_data: history.len() >= MIN_OBSERVATIONS,
    })
}

/// Index of the observation standing in for "`window` ago". `history` must be non-empty.
fn reference_index(history: &[PriceObservation], window: Duration, config: &LookbackConfig) -> usize {
    let oldest = history.len() - 1;
    match config.mode {
        LookbackMode::IndexOffset => config.index_offset(window).min(oldest),
        LookbackMode::Timestamp => nearest_to(history, history[0].observed_at - window),
    }
}

/// Nearest observation to `target`; ties go to the newer one. When the history
/// does not reach back to `target` this is the oldest observation.
fn nearest_to(history: &[PriceObservation], target: DateTime<Utc>) -> usize {
    history
        .iter()
        .enumerate()
        .min_by_key(|(_, obs)| (obs.observed_at - target).num_milliseconds().abs())
        .map(|(index, _)| index)
        .unwrap_or(0)
}

/// The newest `count` prices, returned oldest first.
pub fn extract_price_history(history: &[PriceObservation], count: usize) -> Vec<f64> {
    history
        .iter()
        .take(count)
        .map(|obs| obs.price_usd)
        .rev()
        .collect()
}

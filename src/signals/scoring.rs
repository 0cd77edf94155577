//! Weighted scoring of price changes, trend and volatility into BUY / HOLD / SELL.
//!
//! Score adjustments are applied in a fixed order and rounded after every
//! multiplicative step (divergence, then volatility) before the score is mapped
//! to a class. Reordering them changes published numbers.

use crate::common::math::round_half_up;
use crate::indicators::momentum::MIN_OBSERVATIONS;
use crate::indicators::trend::{detect_trend, Trend, LONG_TREND_WINDOW, SHORT_TREND_WINDOW};
use crate::indicators::volatility::calculate_volatility;
use crate::models::{PriceChangeSet, PriceObservation, SignalClass, SignalDecision};

pub const INSUFFICIENT_HISTORY_CONFIDENCE: u8 = 30;
pub const DIVERGENCE_PENALTY: f64 = 0.8;
pub const HIGH_VOLATILITY_PENALTY: f64 = 0.7;
pub const MODERATE_VOLATILITY_PENALTY: f64 = 0.85;

/// Volatility (percent) above which the high penalty applies.
pub const HIGH_VOLATILITY: f64 = 2.0;
pub const MODERATE_VOLATILITY: f64 = 1.0;

/// Deterministic scorer over a newest-first history.
pub struct SignalScorer;

impl SignalScorer {
    /// Score `history` given its precomputed `changes`.
    ///
    /// Thin histories short-circuit to HOLD at 30% confidence.
    pub fn generate_signal(history: &[PriceObservation], changes: &PriceChangeSet) -> SignalDecision {
        if !changes.has_enough_data || history.len() < 2 {
            return SignalDecision {
                signal_class: SignalClass::Hold,
                confidence: INSUFFICIENT_HISTORY_CONFIDENCE,
                rationale: format!(
                    "insufficient history: at least {} observations (about 1.5 hours) are needed",
                    MIN_OBSERVATIONS
                ),
                factors: Vec::new(),
            };
        }

        let trend = detect_trend(history, SHORT_TREND_WINDOW);
        let long_trend = detect_trend(history, LONG_TREND_WINDOW);
        let volatility = calculate_volatility(history);
        let current = history[0].price_usd;

        let mut score: i32 = 0;
        let mut factors = Vec::new();

        score += score_1h(changes.change_1h, &mut factors);
        score += score_6h(changes.change_6h, &mut factors);
        score += score_24h(changes.change_24h, &mut factors);

        match trend {
            Trend::Up => {
                score += 2;
                factors.push("consistent upward price action in recent candles".to_string());
            }
            Trend::Down => {
                score -= 2;
                factors.push("consistent downward price action in recent candles".to_string());
            }
            Trend::Sideways => {
                factors.push("sideways price action, no clear direction".to_string());
            }
        }

        if long_trend == Trend::Up && trend == Trend::Up {
            score += 1;
            factors.push("short and long term trends aligned bullish".to_string());
        } else if long_trend == Trend::Down && trend == Trend::Down {
            score -= 1;
            factors.push("short and long term trends aligned bearish".to_string());
        } else if long_trend != trend && trend != Trend::Sideways {
            score = scale(score, DIVERGENCE_PENALTY);
            factors.push("short and long term trends diverging, reduced confidence".to_string());
        }

        if volatility > HIGH_VOLATILITY {
            score = scale(score, HIGH_VOLATILITY_PENALTY);
            factors.push(format!("high volatility ({}%) reducing confidence", volatility));
        } else if volatility > MODERATE_VOLATILITY {
            score = scale(score, MODERATE_VOLATILITY_PENALTY);
            factors.push(format!("moderate volatility ({}%)", volatility));
        }

        let (signal_class, confidence) = classify_score(score);

        let mut lines = vec![
            format!("Current price: ${:.2}", current),
            format!("Score: {} (positive=bullish, negative=bearish)", score),
            format!("Short-term trend: {}, Long-term trend: {}", trend, long_trend),
            format!("Volatility: {}%", volatility),
            "Key factors:".to_string(),
        ];
        lines.extend(factors.iter().map(|f| format!("  - {}", f)));

        SignalDecision {
            signal_class,
            confidence,
            rationale: lines.join("\n"),
            factors,
        }
    }
}

/// Convenience wrapper around [`SignalScorer::generate_signal`].
pub fn generate_signal(history: &[PriceObservation], changes: &PriceChangeSet) -> SignalDecision {
    SignalScorer::generate_signal(history, changes)
}

/// Map a final score to its class and confidence (0..=100).
pub fn classify_score(score: i32) -> (SignalClass, u8) {
    let magnitude = score.abs();
    let (class, base) = if score >= 5 {
        (SignalClass::Buy, (60 + 4 * magnitude).min(90))
    } else if score >= 2 {
        (SignalClass::Buy, (50 + 5 * magnitude).min(75))
    } else if score <= -5 {
        (SignalClass::Sell, (60 + 4 * magnitude).min(90))
    } else if score <= -2 {
        (SignalClass::Sell, (50 + 5 * magnitude).min(75))
    } else {
        (SignalClass::Hold, (60 - 5 * magnitude).max(40))
    };
    (class, base.clamp(0, 100) as u8)
}

fn scale(score: i32, factor: f64) -> i32 {
    round_half_up(score as f64 * factor) as i32
}

fn score_1h(change: f64, factors: &mut Vec<String>) -> i32 {
    if change > 0.5 {
        factors.push(format!("strong 1h upward momentum (+{}%)", change));
        3
    } else if change > 0.1 {
        factors.push(format!("mild 1h upward movement (+{}%)", change));
        1
    } else if change < -0.5 {
        factors.push(format!("strong 1h downward pressure ({}%)", change));
        -3
    } else if change < -0.1 {
        factors.push(format!("mild 1h decline ({}%)", change));
        -1
    } else {
        factors.push(format!("flat 1h movement ({}%)", change));
        0
    }
}

fn score_6h(change: f64, factors: &mut Vec<String>) -> i32 {
    if change > 2.0 {
        factors.push(format!("positive 6h trend (+{}%)", change));
        2
    } else if change > 0.5 {
        factors.push(format!("slight 6h uptrend (+{}%)", change));
        1
    } else if change < -2.0 {
        factors.push(format!("negative 6h trend ({}%)", change));
        -2
    } else if change < -0.5 {
        factors.push(format!("slight 6h downtrend ({}%)", change));
        -1
    } else {
        0
    }
}

fn score_24h(change: f64, factors: &mut Vec<String>) -> i32 {
    if change > 5.0 {
        factors.push(format!("bullish 24h context (+{}%)", change));
        1
    } else if change < -5.0 {
        factors.push(format!("bearish 24h context ({}%)", change));
        -1
    } else {
        0
    }
}

//! Up / down / sideways classification from consecutive price moves

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::PriceObservation;

pub const SHORT_TREND_WINDOW: usize = 6;
pub const LONG_TREND_WINDOW: usize = 24;

/// Share of moves in one direction needed to call a trend.
pub const TREND_RATIO: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Sideways,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Sideways => "sideways",
        };
        f.write_str(name)
    }
}

/// Classify the newest `window` observations.
///
/// Moves are counted oldest to newest; unchanged prices count towards neither
/// side. Fewer than two points is always sideways.
pub fn detect_trend(history: &[PriceObservation], window: usize) -> Trend {
    let slice = &history[..window.min(history.len())];
    if slice.len() < 2 {
        return Trend::Sideways;
    }

    let prices: Vec<f64> = slice.iter().rev().map(|obs| obs.price_usd).collect();
    let (up_moves, down_moves) = prices
        .windows(2)
        .fold((0usize, 0usize), |(up, down), pair| {
            if pair[1] > pair[0] {
                (up + 1, down)
            } else if pair[1] < pair[0] {
                (up, down + 1)
            } else {
                (up, down)
            }
        });

    let total = (prices.len() - 1) as f64;
    if up_moves as f64 / total >= TREND_RATIO {
        Trend::Up
    } else if down_moves as f64 / total >= TREND_RATIO {
        Trend::Down
    } else {
        Trend::Sideways
    }
}

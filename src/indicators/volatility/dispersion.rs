//! Recent price dispersion as a percentage of the mean

use crate::common::math;
use crate::models::PriceObservation;

pub const VOLATILITY_WINDOW: usize = 12;

/// Population standard deviation of the newest 12 prices over their mean,
/// in percent, rounded to 2 decimals. Fewer than two points gives 0.
pub fn calculate_volatility(history: &[PriceObservation]) -> f64 {
    let prices: Vec<f64> = history
        .iter()
        .take(VOLATILITY_WINDOW)
        .map(|obs| obs.price_usd)
        .collect();
    if prices.len() < 2 {
        return 0.0;
    }

    match (math::mean(&prices), math::population_std_dev(&prices)) {
        (Some(mean), Some(std_dev)) if mean != 0.0 && mean.is_finite() => {
            math::round_to_cents(std_dev / mean * 100.0)
        }
        _ => 0.0,
    }
}

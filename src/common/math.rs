//! Small numeric helpers shared by the indicators and the scorer.

/// Round to 2 decimal places (percentages and volatility are reported this way).
///
/// Values that round to zero come back as `+0.0`, never `-0.0`.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0 + 0.0
}

/// Round to the nearest integer with ties going towards positive infinity.
///
/// `f64::round` sends `-3.5` to `-4`; historical scores were produced with
/// ties rounding up (`-3.5` -> `-3`), so score adjustments go through here.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divides by N, not N-1).
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let avg = mean(values)?;
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// Percentage change from `past` to `current`.
///
/// Callers must rule out a zero `past` first.
pub fn percent_change(current: f64, past: f64) -> f64 {
    (current - past) / past * 100.0
}

/// Round to `places` decimal places.
pub fn round_to_places(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale + 0.0
}

//! Unit tests for volatility

use chrono::{Duration, Utc};
use tollgate::indicators::volatility::calculate_volatility;
use tollgate::models::PriceObservation;

fn history(prices: &[f64]) -> Vec<PriceObservation> {
    let now = Utc::now();
    prices
        .iter()
        .enumerate()
        .map(|(i, p)| PriceObservation::new("ETH", *p, now - Duration::minutes(30 * i as i64)))
        .collect()
}

#[test]
fn test_needs_two_points() {
    assert_eq!(calculate_volatility(&[]), 0.0);
    assert_eq!(calculate_volatility(&history(&[100.0])), 0.0);
}

#[test]
fn test_constant_prices_have_no_volatility() {
    assert_eq!(calculate_volatility(&history(&[100.0, 100.0, 100.0])), 0.0);
}

#[test]
fn test_relative_population_std_dev() {
    assert_eq!(calculate_volatility(&history(&[101.0, 99.0])), 1.0);
    assert_eq!(calculate_volatility(&history(&[110.0, 90.0, 110.0, 90.0])), 10.0);
}

#[test]
fn test_only_newest_twelve_prices_count() {
    let mut prices = vec![100.0; 12];
    prices.push(1000.0);
    assert_eq!(calculate_volatility(&history(&prices)), 0.0);
}

//! Unit tests for trend detection

use chrono::{Duration, Utc};
use tollgate::indicators::trend::{detect_trend, Trend, LONG_TREND_WINDOW, SHORT_TREND_WINDOW};
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
fn test_fewer_than_two_points_is_sideways() {
    assert_eq!(detect_trend(&[], SHORT_TREND_WINDOW), Trend::Sideways);
    assert_eq!(detect_trend(&history(&[100.0]), SHORT_TREND_WINDOW), Trend::Sideways);
}

#[test]
fn test_rising_and_falling() {
    let rising = history(&[106.0, 105.0, 104.0, 103.0, 102.0, 101.0]);
    assert_eq!(detect_trend(&rising, SHORT_TREND_WINDOW), Trend::Up);

    let falling = history(&[101.0, 102.0, 103.0, 104.0, 105.0, 106.0]);
    assert_eq!(detect_trend(&falling, SHORT_TREND_WINDOW), Trend::Down);
}

#[test]
fn test_flat_prices_are_sideways() {
    let flat = history(&[100.0; 8]);
    assert_eq!(detect_trend(&flat, SHORT_TREND_WINDOW), Trend::Sideways);
}

#[test]
fn test_sixty_percent_of_moves_is_enough() {
    // oldest to newest: up, down, up, down, up
    let choppy = history(&[101.0, 100.0, 101.0, 100.0, 101.0, 100.0]);
    assert_eq!(detect_trend(&choppy, SHORT_TREND_WINDOW), Trend::Up);
}

#[test]
fn test_unchanged_moves_count_for_neither_side() {
    // oldest to newest: up, up, flat, down, down
    let mixed = history(&[100.0, 101.0, 102.0, 102.0, 101.0, 100.0]);
    assert_eq!(detect_trend(&mixed, SHORT_TREND_WINDOW), Trend::Sideways);
}

#[test]
fn test_only_newest_window_is_considered() {
    let mut prices = vec![100.0, 101.0, 102.0, 103.0, 104.0, 105.0];
    prices.extend((0..20).map(|i| 50.0 - i as f64));
    let h = history(&prices);
    assert_eq!(detect_trend(&h, SHORT_TREND_WINDOW), Trend::Down);
    assert_eq!(detect_trend(&h, LONG_TREND_WINDOW), Trend::Up);
}

#[test]
fn test_trend_display() {
    assert_eq!(Trend::Up.to_string(), "up");
    assert_eq!(Trend::Sideways.to_string(), "sideways");
}

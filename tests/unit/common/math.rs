//! Unit tests for numeric helpers

use tollgate::common::math::{mean, percent_change, population_std_dev, round_half_up, round_to_cents};

#[test]
fn test_round_to_cents() {
    assert_eq!(round_to_cents(1.134_34), 1.13);
    assert_eq!(round_to_cents(-2.016), -2.02);
    assert_eq!(round_to_cents(0.0), 0.0);
}

#[test]
fn test_round_to_cents_never_returns_negative_zero() {
    let rounded = round_to_cents(-0.004);
    assert_eq!(rounded, 0.0);
    assert!(rounded.is_sign_positive());
    assert_eq!(format!("{}", rounded), "0");
}

#[test]
fn test_round_half_up_sends_ties_upwards() {
    assert_eq!(round_half_up(2.5), 3.0);
    assert_eq!(round_half_up(-3.5), -3.0);
    assert_eq!(round_half_up(-1.6), -2.0);
    assert_eq!(round_half_up(6.3), 6.0);
}

#[test]
fn test_mean_and_std_dev() {
    assert_eq!(mean(&[]), None);
    assert_eq!(mean(&[2.0, 4.0]), Some(3.0));
    assert_eq!(population_std_dev(&[101.0, 99.0]), Some(1.0));
    assert_eq!(population_std_dev(&[5.0, 5.0, 5.0]), Some(0.0));
    assert_eq!(population_std_dev(&[]), None);
}

#[test]
fn test_percent_change() {
    assert!((percent_change(110.0, 100.0) - 10.0).abs() < 1e-9);
    assert!((percent_change(90.0, 100.0) + 10.0).abs() < 1e-9);
}

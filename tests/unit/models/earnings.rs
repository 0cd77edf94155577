//! Unit tests for the earnings ledger

use chrono::{DateTime, Duration, TimeZone, Utc};
use tollgate::models::{EarningEntry, EarningsSummary};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 10, 15, 30, 0).unwrap()
}

fn entry(amount: f64, at: DateTime<Utc>) -> EarningEntry {
    EarningEntry::new("/signal/ETH", amount, "0xabc", at)
}

#[test]
fn test_record_updates_lifetime_and_window_totals() {
    let mut summary = EarningsSummary::default();
    summary.record(entry(0.10, now() - Duration::days(9)), 200, now());
    summary.record(entry(0.05, now() - Duration::days(3)), 200, now());
    summary.record(entry(0.03, now() - Duration::hours(2)), 200, now());

    assert_eq!(summary.total_earned, 0.18);
    assert_eq!(summary.total_calls, 3);
    assert_eq!(summary.earned_today, 0.03);
    assert_eq!(summary.calls_today, 1);
    assert_eq!(summary.earned_this_week, 0.08);
    assert_eq!(summary.entries[0].amount_usdc, 0.03);
}

#[test]
fn test_today_starts_at_utc_midnight() {
    let mut summary = EarningsSummary::default();
    let midnight = Utc.with_ymd_and_hms(2024, 5, 10, 0, 0, 0).unwrap();
    summary.record(entry(0.05, midnight - Duration::seconds(1)), 200, now());
    summary.record(entry(0.05, midnight), 200, now());

    assert_eq!(summary.calls_today, 1);
    assert_eq!(summary.earned_today, 0.05);
    assert_eq!(summary.earned_this_week, 0.1);
}

#[test]
fn test_entries_are_capped_but_lifetime_totals_are_not() {
    let mut summary = EarningsSummary::default();
    for _ in 0..5 {
        summary.record(entry(0.05, now()), 3, now());
    }
    assert_eq!(summary.entries.len(), 3);
    assert_eq!(summary.total_calls, 5);
    assert_eq!(summary.total_earned, 0.25);
    assert_eq!(summary.calls_today, 3);
    assert_eq!(summary.earned_today, 0.15);
}

#[test]
fn test_refresh_windows_ages_out_old_entries() {
    let mut summary = EarningsSummary::default();
    summary.record(entry(0.10, now()), 200, now());
    summary.refresh_windows(now() + Duration::days(2));
    assert_eq!(summary.earned_today, 0.0);
    assert_eq!(summary.calls_today, 0);
    assert_eq!(summary.earned_this_week, 0.1);
}

#[test]
fn test_ledger_json_field_names() {
    let mut summary = EarningsSummary::default();
    summary.record(entry(0.05, now()), 200, now());
    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["totalEarned"], 0.05);
    assert_eq!(json["earnedThisWeek"], 0.05);
    assert_eq!(json["callsToday"], 1);
    assert_eq!(json["entries"][0]["amountUSDC"], 0.05);
    assert_eq!(json["entries"][0]["callerAddress"], "0xabc");
}

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::math::round_to_places;

/// USDC amounts are kept to 4 decimals.
const USDC_PLACES: i32 = 4;

/// One paid call served by the read API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningEntry {
    pub id: Uuid,
    /// Concrete path served, e.g. `/signal/ETH`.
    pub endpoint: String,
    #[serde(rename = "amountUSDC")]
    pub amount_usdc: f64,
    pub caller_address: String,
    pub timestamp: DateTime<Utc>,
}

impl EarningEntry {
    pub fn new(
        endpoint: impl Into<String>,
        amount_usdc: f64,
        caller_address: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            endpoint: endpoint.into(),
            amount_usdc,
            caller_address: caller_address.into(),
            timestamp,
        }
    }
}

/// Earnings ledger: lifetime totals plus the most recent entries.
///
/// `total_earned` and `total_calls` cover every call ever logged. The day and
/// week figures are derived from the retained entries only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EarningsSummary {
    pub total_earned: f64,
    pub earned_today: f64,
    pub earned_this_week: f64,
    pub total_calls: u64,
    pub calls_today: u64,
    /// Newest first.
    pub entries: Vec<EarningEntry>,
}

impl EarningsSummary {
    /// Prepend `entry`, keep the newest `max_entries` and refresh the totals.
    pub fn record(&mut self, entry: EarningEntry, max_entries: usize, now: DateTime<Utc>) {
        self.total_earned = round_to_places(self.total_earned + entry.amount_usdc, USDC_PLACES);
        self.total_calls += 1;
        self.entries.insert(0, entry);
        self.entries.truncate(max_entries);
        self.refresh_windows(now);
    }

    /// Recompute the today (since UTC midnight) and this-week (today plus the
    /// six days before it) figures relative to `now`.
    pub fn refresh_windows(&mut self, now: DateTime<Utc>) {
        let today_start = now
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .map(|midnight| Utc.from_utc_datetime(&midnight))
            .unwrap_or(now);
        let week_start = today_start - Duration::days(6);

        let entries = &self.entries;
        let since = |start: DateTime<Utc>| entries.iter().filter(move |e| e.timestamp >= start);

        let earned_today: f64 = since(today_start).map(|e| e.amount_usdc).sum();
        let earned_this_week: f64 = since(week_start).map(|e| e.amount_usdc).sum();
        let calls_today = since(today_start).count() as u64;

        self.earned_today = round_to_places(earned_today, USDC_PLACES);
        self.earned_this_week = round_to_places(earned_this_week, USDC_PLACES);
        self.calls_today = calls_today;
    }
}

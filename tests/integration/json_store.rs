//! Integration tests for the JSON file store

use chrono::{Duration, Utc};
use tollgate::db::json_store::{
    MAX_EARNING_ENTRIES, MAX_PRICE_ENTRIES, MAX_RUN_ENTRIES, MAX_SIGNAL_ENTRIES,
};
use tollgate::db::JsonStore;
use tollgate::models::{
    AgentRun, PriceChangeSet, PriceObservation, RunStatus, SignalClass, SignalDecision, SignalRecord,
};
use uuid::Uuid;

use crate::test_utils::temp_data_dir;

fn record(token: &str, confidence: u8) -> SignalRecord {
    let decision = SignalDecision {
        signal_class: SignalClass::Buy,
        confidence,
        rationale: "Score: 3".to_string(),
        factors: Vec::new(),
    };
    SignalRecord::new(token, 100.0, &PriceChangeSet::default(), &decision, "report")
}

fn run(status: RunStatus) -> AgentRun {
    AgentRun {
        id: Uuid::new_v4(),
        status,
        tokens_processed: vec!["ETH".to_string()],
        signals_generated: 1,
        prices_fetched: 1,
        ai_calls_made: 1,
        duration_ms: 12,
        error: None,
        timestamp: Utc::now(),
    }
}

#[tokio::test]
async fn missing_files_read_as_empty() {
    let store = JsonStore::new(temp_data_dir());
    assert!(store.price_history("ETH").await.unwrap().is_empty());
    assert!(store.latest_signal("ETH").await.unwrap().is_none());
    assert!(store.latest_signals().await.unwrap().is_empty());
    assert!(store.last_run().await.unwrap().is_none());
}

#[tokio::test]
async fn price_history_is_newest_first_and_capped() {
    let store = JsonStore::new(temp_data_dir());
    let start = Utc::now() - Duration::days(2);
    for i in 0..(MAX_PRICE_ENTRIES + 5) {
        let obs = PriceObservation::new("ETH", 100.0 + i as f64, start + Duration::minutes(30 * i as i64));
        store.append_price(obs).await.unwrap();
    }
    store
        .append_price(PriceObservation::new("WETH", 99.0, Utc::now()))
        .await
        .unwrap();

    let history = store.price_history("ETH").await.unwrap();
    assert_eq!(history.len(), MAX_PRICE_ENTRIES);
    assert_eq!(history[0].price_usd, 100.0 + (MAX_PRICE_ENTRIES + 4) as f64);
    assert!(history.windows(2).all(|w| w[0].observed_at > w[1].observed_at));

    let latest = store.latest_price("WETH").await.unwrap().unwrap();
    assert_eq!(latest.price_usd, 99.0);
}

#[tokio::test]
async fn signals_are_capped_per_token() {
    let store = JsonStore::new(temp_data_dir());
    for i in 0..(MAX_SIGNAL_ENTRIES + 3) {
        store.append_signal(record("ETH", (i % 100) as u8)).await.unwrap();
    }
    store.append_signal(record("CBETH", 77)).await.unwrap();

    let history = store.signal_history("ETH").await.unwrap();
    assert_eq!(history.len(), MAX_SIGNAL_ENTRIES);
    assert_eq!(history[0].confidence, ((MAX_SIGNAL_ENTRIES + 2) % 100) as u8);

    let latest = store.latest_signals().await.unwrap();
    let tokens: Vec<&str> = latest.iter().map(|r| r.token.as_str()).collect();
    assert_eq!(tokens, vec!["ETH", "CBETH"]);
}

#[tokio::test]
async fn runs_are_capped() {
    let store = JsonStore::new(temp_data_dir());
    for _ in 0..MAX_RUN_ENTRIES {
        store.record_run(run(RunStatus::Success)).await.unwrap();
    }
    store.record_run(run(RunStatus::Partial)).await.unwrap();

    let runs = store.runs().await.unwrap();
    assert_eq!(runs.len(), MAX_RUN_ENTRIES);
    assert_eq!(store.last_run().await.unwrap().unwrap().status, RunStatus::Partial);
}

#[tokio::test]
async fn health_check_creates_missing_files() {
    let store = JsonStore::new(temp_data_dir());
    let first = tokio_test::assert_ok!(store.health_check().await);
    assert!(first.ok);
    assert_eq!(first.files.get("prices"), Some(&false));

    assert_eq!(first.files.get("earnings"), Some(&false));

    let second = store.health_check().await.unwrap();
    assert_eq!(second.files.len(), 4);
    assert!(second.files.values().all(|exists| *exists));
    assert!(store.dir().join("signals.json").exists());

    // the created ledger is a readable, empty summary
    let earnings = store.earnings().await.unwrap();
    assert_eq!(earnings.total_calls, 0);
    assert!(earnings.entries.is_empty());
}

#[tokio::test]
async fn earnings_ledger_accumulates_calls() {
    let store = JsonStore::new(temp_data_dir());
    store.record_earning("/signal/ETH", 0.05, "0xaaa").await.unwrap();
    store.record_earning("/report/ETH", 0.10, "0xbbb").await.unwrap();
    let last = store.record_earning("/watchlist", 0.03, "unknown").await.unwrap();

    let earnings = store.earnings().await.unwrap();
    assert_eq!(earnings.total_earned, 0.18);
    assert_eq!(earnings.total_calls, 3);
    assert_eq!(earnings.calls_today, 3);
    assert_eq!(earnings.earned_today, 0.18);
    assert_eq!(earnings.earned_this_week, 0.18);
    assert_eq!(earnings.entries[0].id, last.id);
    assert_eq!(earnings.entries[2].caller_address, "0xaaa");

    let raw = std::fs::read_to_string(store.dir().join("earnings.json")).unwrap();
    assert!(raw.contains("\"amountUSDC\""));
    assert!(raw.contains("\"totalEarned\""));
}

#[tokio::test]
async fn earnings_entries_are_capped() {
    let store = JsonStore::new(temp_data_dir());
    for _ in 0..(MAX_EARNING_ENTRIES + 5) {
        store.record_earning("/watchlist", 0.03, "0xccc").await.unwrap();
    }

    let earnings = store.earnings().await.unwrap();
    assert_eq!(earnings.entries.len(), MAX_EARNING_ENTRIES);
    assert_eq!(earnings.total_calls, (MAX_EARNING_ENTRIES + 5) as u64);
    assert_eq!(earnings.calls_today, MAX_EARNING_ENTRIES as u64);
}

#[tokio::test]
async fn signal_records_use_camel_case_fields() {
    let store = JsonStore::new(temp_data_dir());
    store.append_signal(record("ETH", 70)).await.unwrap();

    let raw = std::fs::read_to_string(store.dir().join("signals.json")).unwrap();
    assert!(raw.contains("\"priceAtSignal\""));
    assert!(raw.contains("\"aiReport\""));
    assert!(raw.contains("\"change1h\""));
    assert!(raw.contains("\"BUY\""));
}

#[tokio::test]
async fn corrupt_file_is_an_error() {
    let dir = temp_data_dir();
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("runs.json"), "{ not json").unwrap();

    let store = JsonStore::new(dir);
    tokio_test::assert_err!(store.runs().await);
}

//! JSON file store.
//!
//! Four files live under the data directory: `prices.json`, `signals.json`,
//! `runs.json` and the `earnings.json` ledger. Every list is kept newest first
//! and truncated to its cap on write. Writes go through a temp file and a rename so readers never see a
//! half-written file.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::models::{AgentRun, EarningEntry, EarningsSummary, PriceObservation, SignalRecord};

/// 24 hours at 30 minute sampling.
pub const MAX_PRICE_ENTRIES: usize = 48;
pub const MAX_SIGNAL_ENTRIES: usize = 100;
pub const MAX_RUN_ENTRIES: usize = 50;
pub const MAX_EARNING_ENTRIES: usize = 200;

const PRICES_FILE: &str = "prices.json";
const SIGNALS_FILE: &str = "signals.json";
const RUNS_FILE: &str = "runs.json";
const EARNINGS_FILE: &str = "earnings.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TokenPrices {
    token: String,
    entries: Vec<PriceObservation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TokenSignals {
    token: String,
    signals: Vec<SignalRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StorageHealth {
    pub ok: bool,
    /// Which files existed before the check created missing ones.
    pub files: BTreeMap<String, bool>,
}

pub struct JsonStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    async fn read_json<T: DeserializeOwned + Default>(&self, file: &str) -> Result<T, StoreError> {
        let raw = match fs::read_to_string(self.path(file)).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(T::default());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    async fn write_json<T: Serialize>(&self, file: &str, value: &T) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).await?;
        let target = self.path(file);
        let tmp = self.path(&format!("{}.tmp", file));
        fs::write(&tmp, serde_json::to_vec_pretty(value)?).await?;
        fs::rename(&tmp, &target).await?;
        Ok(())
    }

    /// Prepend an observation to its token's history.
    pub async fn append_price(&self, observation: PriceObservation) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut all: Vec<TokenPrices> = self.read_json(PRICES_FILE).await?;

        let token = observation.token.clone();
        let price = observation.price_usd;
        let index = match all.iter().position(|h| h.token == token) {
            Some(index) => index,
            None => {
                all.push(TokenPrices {
                    token: token.clone(),
                    entries: Vec::new(),
                });
                all.len() - 1
            }
        };
        let entries = &mut all[index].entries;
        entries.insert(0, observation);
        entries.truncate(MAX_PRICE_ENTRIES);

        self.write_json(PRICES_FILE, &all).await?;
        debug!(token = %token, price = price, "JsonStore: price saved for {}", token);
        Ok(())
    }

    /// Newest-first history for a token, empty if none.
    pub async fn price_history(&self, token: &str) -> Result<Vec<PriceObservation>, StoreError> {
        let all: Vec<TokenPrices> = self.read_json(PRICES_FILE).await?;
        Ok(all
            .into_iter()
            .find(|h| h.token == token)
            .map(|h| h.entries)
            .unwrap_or_default())
    }

    pub async fn latest_price(&self, token: &str) -> Result<Option<PriceObservation>, StoreError> {
        Ok(self.price_history(token).await?.into_iter().next())
    }

    pub async fn append_signal(&self, record: SignalRecord) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut all: Vec<TokenSignals> = self.read_json(SIGNALS_FILE).await?;

        let token = record.token.clone();
        let (signal, confidence) = (record.signal, record.confidence);
        let index = match all.iter().position(|h| h.token == token) {
            Some(index) => index,
            None => {
                all.push(TokenSignals {
                    token: token.clone(),
                    signals: Vec::new(),
                });
                all.len() - 1
            }
        };
        let signals = &mut all[index].signals;
        signals.insert(0, record);
        signals.truncate(MAX_SIGNAL_ENTRIES);

        self.write_json(SIGNALS_FILE, &all).await?;
        debug!(
            token = %token,
            signal = %signal,
            confidence = confidence,
            "JsonStore: signal saved for {}: {} ({}%)",
            token,
            signal,
            confidence
        );
        Ok(())
    }

    pub async fn signal_history(&self, token: &str) -> Result<Vec<SignalRecord>, StoreError> {
        let all: Vec<TokenSignals> = self.read_json(SIGNALS_FILE).await?;
        Ok(all
            .into_iter()
            .find(|h| h.token == token)
            .map(|h| h.signals)
            .unwrap_or_default())
    }

    pub async fn latest_signal(&self, token: &str) -> Result<Option<SignalRecord>, StoreError> {
        Ok(self.signal_history(token).await?.into_iter().next())
    }

    /// Latest signal of every token that has one, in first-seen token order.
    pub async fn latest_signals(&self) -> Result<Vec<SignalRecord>, StoreError> {
        let all: Vec<TokenSignals> = self.read_json(SIGNALS_FILE).await?;
        Ok(all
            .into_iter()
            .filter_map(|h| h.signals.into_iter().next())
            .collect())
    }

    pub async fn record_run(&self, run: AgentRun) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut runs: Vec<AgentRun> = self.read_json(RUNS_FILE).await?;
        runs.insert(0, run);
        runs.truncate(MAX_RUN_ENTRIES);
        self.write_json(RUNS_FILE, &runs).await
    }

    pub async fn runs(&self) -> Result<Vec<AgentRun>, StoreError> {
        self.read_json(RUNS_FILE).await
    }

    pub async fn last_run(&self) -> Result<Option<AgentRun>, StoreError> {
        Ok(self.runs().await?.into_iter().next())
    }

    /// Log one paid call and return the stored entry.
    pub async fn record_earning(
        &self,
        endpoint: &str,
        amount_usdc: f64,
        caller_address: &str,
    ) -> Result<EarningEntry, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut summary: EarningsSummary = self.read_json(EARNINGS_FILE).await?;

        let now = Utc::now();
        let entry = EarningEntry::new(endpoint, amount_usdc, caller_address, now);
        summary.record(entry.clone(), MAX_EARNING_ENTRIES, now);
        self.write_json(EARNINGS_FILE, &summary).await?;

        info!(
            endpoint = %endpoint,
            amount_usdc = amount_usdc,
            total_earned = summary.total_earned,
            "JsonStore: earning logged for {} (+{} USDC, total {})",
            endpoint,
            amount_usdc,
            summary.total_earned
        );
        Ok(entry)
    }

    /// Earnings ledger with the day and week figures as of now.
    pub async fn earnings(&self) -> Result<EarningsSummary, StoreError> {
        let mut summary: EarningsSummary = self.read_json(EARNINGS_FILE).await?;
        summary.refresh_windows(Utc::now());
        Ok(summary)
    }

    /// Report which data files exist, creating any that are missing.
    pub async fn health_check(&self) -> Result<StorageHealth, StoreError> {
        let _guard = self.write_lock.lock().await;
        fs::create_dir_all(&self.dir).await?;

        let empty_list = serde_json::Value::Array(Vec::new());
        let empty_ledger = serde_json::to_value(EarningsSummary::default())?;
        let expected = [
            ("prices", PRICES_FILE, &empty_list),
            ("signals", SIGNALS_FILE, &empty_list),
            ("runs", RUNS_FILE, &empty_list),
            ("earnings", EARNINGS_FILE, &empty_ledger),
        ];

        let mut files = BTreeMap::new();
        for (name, file, initial) in expected {
            let exists = fs::try_exists(self.path(file)).await?;
            if !exists {
                self.write_json(file, initial).await?;
                info!(file = file, "JsonStore: created missing {}", file);
            }
            files.insert(name.to_string(), exists);
        }

        Ok(StorageHealth { ok: true, files })
    }
}

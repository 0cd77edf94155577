use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One sampled price for a token.
///
/// Histories are held newest first and capped by the store; the engine only
/// ever reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    pub token: String,
    #[serde(rename = "priceUSD")]
    pub price_usd: f64,
    pub source: String,
    #[serde(rename = "timestamp")]
    pub observed_at: DateTime<Utc>,
    /// 24h change as reported by the provider, if it reports one.
    #[serde(rename = "change24h", default, skip_serializing_if = "Option::is_none")]
    pub provider_change_24h: Option<f64>,
}

impl PriceObservation {
    pub fn new(token: impl Into<String>, price_usd: f64, observed_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            price_usd,
            source: "manual".to_string(),
            observed_at,
            provider_change_24h: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }
}

/// A fresh quote returned by a price provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub token: String,
    pub price_usd: f64,
    pub change_24h: Option<f64>,
    pub source: String,
}

impl PriceQuote {
    pub fn into_observation(self, observed_at: DateTime<Utc>) -> PriceObservation {
        PriceObservation {
            token: self.token,
            price_usd: self.price_usd,
            source: self.source,
            observed_at,
            provider_change_24h: self.change_24h,
        }
    }
}

/// Percentage deltas over the three lookback windows, rounded to 2 decimals.
///
/// Always derived from a history snapshot, never stored on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceChangeSet {
    pub change_1h: f64,
    pub change_6h: f64,
    pub change_24h: f64,
    pub has_enough_data: bool,
}

/// Market context handed to the AI analyst for one token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    pub token: String,
    pub current_price: f64,
    pub change_1h: f64,
    pub change_6h: f64,
    pub change_24h: f64,
    /// Recent prices, oldest first.
    pub price_history: Vec<f64>,
}

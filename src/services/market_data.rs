//! Market data provider interface and the CoinGecko implementation.

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::ProviderError;
use crate::models::PriceQuote;

#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Get the current USD price for a token symbol.
    async fn fetch_price(&self, token: &str) -> Result<PriceQuote, ProviderError>;
}

/// CoinGecko coin id for a token symbol.
pub fn coingecko_id(token: &str) -> Option<&'static str> {
    match token {
        "ETH" => Some("ethereum"),
        "WETH" => Some("weth"),
        "CBETH" => Some("coinbase-wrapped-staked-eth"),
        "USDC" => Some("usd-coin"),
        "DAI" => Some("dai"),
        "USDT" => Some("tether"),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
struct SimplePrice {
    usd: Option<f64>,
    usd_24h_change: Option<f64>,
}

pub struct CoinGeckoProvider {
    client: reqwest::Client,
    base_url: String,
    max_retries: usize,
    retry_delay: Duration,
}

impl CoinGeckoProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_retries: 3,
            retry_delay: Duration::from_millis(500),
        }
    }

    pub fn with_retry(mut self, max_retries: usize, retry_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_delay = retry_delay;
        self
    }

    async fn fetch_once(&self, token: &str, coin_id: &str) -> Result<PriceQuote, ProviderError> {
        let response = self
            .client
            .get(format!("{}/simple/price", self.base_url))
            .query(&[
                ("ids", coin_id),
                ("vs_currencies", "usd"),
                ("include_24hr_change", "true"),
            ])
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, "tollgate/0.1")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let body: HashMap<String, SimplePrice> = response.json().await?;
        let entry = body
            .get(coin_id)
            .ok_or_else(|| ProviderError::MissingData(token.to_string()))?;
        let price = entry
            .usd
            .filter(|p| p.is_finite() && *p > 0.0)
            .ok_or_else(|| ProviderError::MissingData(token.to_string()))?;

        Ok(PriceQuote {
            token: token.to_string(),
            price_usd: price,
            change_24h: entry.usd_24h_change.map(|c| (c * 100.0).round() / 100.0),
            source: "coingecko".to_string(),
        })
    }
}

#[async_trait]
impl PriceProvider for CoinGeckoProvider {
    async fn fetch_price(&self, token: &str) -> Result<PriceQuote, ProviderError> {
        let coin_id =
            coingecko_id(token).ok_or_else(|| ProviderError::UnsupportedToken(token.to_string()))?;

        let backoff = ExponentialBuilder::default()
            .with_min_delay(self.retry_delay)
            .with_max_times(self.max_retries);

        let quote = (|| self.fetch_once(token, coin_id))
            .retry(backoff)
            .when(|e| matches!(e, ProviderError::Http(_) | ProviderError::Status(429 | 500..=599)))
            .notify(|e, delay| {
                warn!(
                    token = %token,
                    error = %e,
                    retry_in_ms = delay.as_millis() as u64,
                    "CoinGecko: price fetch failed for {}, retrying",
                    token
                );
            })
            .await?;

        debug!(token = %token, price = quote.price_usd, "CoinGecko: fetched {} at ${:.2}", token, quote.price_usd);
        Ok(quote)
    }
}

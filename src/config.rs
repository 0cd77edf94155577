//! Runtime configuration loaded from the environment.
//!
//! The tracked token list and run interval are plain values on [`AgentConfig`]
//! and are handed to the runtime, scheduler and router at startup.

use crate::indicators::momentum::{LookbackConfig, LookbackMode};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_TOKENS: [&str; 3] = ["ETH", "WETH", "CBETH"];
pub const DEFAULT_ANALYST_URL: &str = "https://api.mistral.ai/v1/chat/completions";
pub const DEFAULT_ANALYST_MODEL: &str = "mistral-tiny";
pub const DEFAULT_PRICE_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Deployment environment name (`APP_ENV`), `sandbox` when unset.
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

/// Settings for the chat-completions analyst.
#[derive(Debug, Clone)]
pub struct AnalystConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
}

impl Default for AnalystConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_ANALYST_URL.to_string(),
            model: DEFAULT_ANALYST_MODEL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Upper-case token symbols analyzed each cycle, in order.
    pub tokens: Vec<String>,
    pub interval_minutes: u64,
    /// Pause between consecutive tokens within one cycle.
    pub token_delay: Duration,
    pub data_dir: PathBuf,
    pub port: u16,
    pub lookback: LookbackConfig,
    pub analyst: AnalystConfig,
    pub price_api_url: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            tokens: DEFAULT_TOKENS.iter().map(|t| t.to_string()).collect(),
            interval_minutes: 30,
            token_delay: Duration::from_millis(3000),
            data_dir: PathBuf::from("data"),
            port: 4020,
            lookback: LookbackConfig::default(),
            analyst: AnalystConfig::default(),
            price_api_url: DEFAULT_PRICE_API_URL.to_string(),
        }
    }
}

impl AgentConfig {
    /// Build the configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let tokens = env::var("TRACKED_TOKENS")
            .ok()
            .map(|raw| parse_tokens(&raw))
            .filter(|tokens| !tokens.is_empty())
            .unwrap_or(defaults.tokens);

        let sample_minutes: i64 = env_or("SAMPLE_INTERVAL_MINUTES", 30);
        let mode = match env::var("LOOKBACK_MODE").as_deref() {
            Ok("timestamp") => LookbackMode::Timestamp,
            _ => LookbackMode::IndexOffset,
        };

        Self {
            tokens,
            interval_minutes: env_or("AGENT_INTERVAL_MINUTES", defaults.interval_minutes),
            token_delay: Duration::from_millis(env_or("TOKEN_DELAY_MS", 3000)),
            data_dir: env::var("DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
            port: env_or("PORT", defaults.port),
            lookback: LookbackConfig {
                mode,
                sample_interval: chrono::Duration::minutes(sample_minutes.max(1)),
            },
            analyst: AnalystConfig {
                api_key: env::var("ANALYST_API_KEY").ok().filter(|k| !k.is_empty()),
                api_url: env::var("ANALYST_API_URL").unwrap_or(defaults.analyst.api_url),
                model: env::var("ANALYST_MODEL").unwrap_or(defaults.analyst.model),
            },
            price_api_url: env::var("PRICE_API_URL").unwrap_or(defaults.price_api_url),
        }
    }

    /// Whether `token` (already normalized) is one of the tracked tokens.
    pub fn is_tracked(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }
}

/// Split a comma separated token list, upper-casing and dropping blanks.
pub fn parse_tokens(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| t.trim().to_uppercase())
        .filter(|t| !t.is_empty())
        .collect()
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

//! Unit tests for configuration helpers

use tollgate::config::{parse_tokens, AgentConfig};
use tollgate::indicators::momentum::LookbackMode;

#[test]
fn test_parse_tokens_normalizes_and_skips_blanks() {
    assert_eq!(parse_tokens(" eth, wbtc ,,cbEth "), vec!["ETH", "WBTC", "CBETH"]);
    assert!(parse_tokens(" , ").is_empty());
}

#[test]
fn test_default_config() {
    let config = AgentConfig::default();
    assert_eq!(config.tokens, vec!["ETH", "WETH", "CBETH"]);
    assert_eq!(config.interval_minutes, 30);
    assert_eq!(config.token_delay.as_millis(), 3000);
    assert_eq!(config.port, 4020);
    assert_eq!(config.lookback.mode, LookbackMode::IndexOffset);
    assert!(config.analyst.api_key.is_none());
}

#[test]
fn test_is_tracked_expects_normalized_symbols() {
    let config = AgentConfig::default();
    assert!(config.is_tracked("WETH"));
    assert!(!config.is_tracked("weth"));
    assert!(!config.is_tracked("DOGE"));
}

#[test]
fn test_log_format_follows_environment() {
    use tollgate::logging::{init_with, LogFormat};

    assert_eq!(LogFormat::for_environment("production"), LogFormat::Json);
    assert_eq!(LogFormat::for_environment("prod"), LogFormat::Json);
    assert_eq!(LogFormat::for_environment("sandbox"), LogFormat::Pretty);

    init_with(LogFormat::Pretty);
    // a second install is refused rather than panicking
    assert!(!init_with(LogFormat::Json));
}

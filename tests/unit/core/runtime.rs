//! Unit tests for runtime configuration and run classification

use std::time::Duration;
use tollgate::config::AgentConfig;
use tollgate::core::runtime::RuntimeConfig;
use tollgate::models::RunStatus;

#[test]
fn test_runtime_config_default() {
    let config = RuntimeConfig::default();
    assert_eq!(config.tokens, vec!["ETH", "WETH", "CBETH"]);
    assert_eq!(config.token_delay, Duration::from_millis(3000));
}

#[test]
fn test_runtime_config_from_agent_config() {
    let agent = AgentConfig {
        tokens: vec!["DAI".to_string()],
        token_delay: Duration::ZERO,
        ..AgentConfig::default()
    };
    let config = RuntimeConfig::from(&agent);
    assert_eq!(config.tokens, vec!["DAI"]);
    assert!(config.token_delay.is_zero());
}

#[test]
fn test_run_status_from_counts() {
    assert_eq!(RunStatus::from_counts(3, 3), RunStatus::Success);
    assert_eq!(RunStatus::from_counts(1, 3), RunStatus::Partial);
    assert_eq!(RunStatus::from_counts(0, 3), RunStatus::Failed);
    assert_eq!(RunStatus::from_counts(0, 0), RunStatus::Success);
}

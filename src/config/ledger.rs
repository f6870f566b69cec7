use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use crate::constants::DEFAULT_END_BLOCK;
use crate::constants::DEFAULT_FETCH_DELAY_MS;
use crate::constants::DEFAULT_START_BLOCK;
use crate::constants::ETHERSCAN_API_KEY_ENV;
use crate::constants::ETHERSCAN_API_URL;
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ThrottleKind {
    #[default]
    FixedDelay, // Sleep a fixed gap before each child fetch
    Window,     // At most `requests_per_second` fetches per second
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrottleConfig {
    pub kind: ThrottleKind,
    pub delay_ms: u64,
    pub requests_per_second: usize,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            kind: ThrottleKind::FixedDelay,
            delay_ms: DEFAULT_FETCH_DELAY_MS,
            requests_per_second: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub start_block: u64,
    pub end_block: u64,
    pub sort: String,
    pub timeout_ms: u64,
    pub max_retries: usize,
    pub base_retry_delay_ms: u64,
    pub max_retry_delay_ms: u64,
    pub throttle: ThrottleConfig,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            base_url: ETHERSCAN_API_URL.to_string(),
            api_key: None,
            start_block: DEFAULT_START_BLOCK,
            end_block: DEFAULT_END_BLOCK,
            sort: "asc".to_string(),
            timeout_ms: 30_000,
            max_retries: 3,
            base_retry_delay_ms: 500,
            max_retry_delay_ms: 30_000,
            throttle: ThrottleConfig::default(),
        }
    }
}

impl LedgerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Configured key, else `ETHERSCAN_API_KEY` (a `.env` file is honoured). Blank keys count as absent.
    pub fn resolve_api_key(&self) -> Option<String> {
        let configured = self.api_key.as_deref().map(str::trim).filter(|key| !key.is_empty());
        if let Some(key) = configured {
            return Some(key.to_string());
        }

        let _ = dotenvy::dotenv();
        std::env::var(ETHERSCAN_API_KEY_ENV)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start_block > self.end_block {
            return Err(ConfigError::InvalidValue {
                field: "ledger.start_block",
                reason: format!("{} is after end_block {}", self.start_block, self.end_block),
            });
        }
        if self.sort != "asc" && self.sort != "desc" {
            return Err(ConfigError::InvalidValue {
                field: "ledger.sort",
                reason: format!("expected \"asc\" or \"desc\", got {:?}", self.sort),
            });
        }
        if self.throttle.kind == ThrottleKind::Window && self.throttle.requests_per_second == 0 {
            return Err(ConfigError::InvalidValue {
                field: "ledger.throttle.requests_per_second",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn configured_key_wins_over_environment() {
        temp_env::with_var(ETHERSCAN_API_KEY_ENV, Some("FROM_ENV"), || {
            let config = LedgerConfig {
                api_key: Some("FROM_CONFIG".to_string()),
                ..Default::default()
            };
            assert_eq!(config.resolve_api_key().as_deref(), Some("FROM_CONFIG"));
        });
    }

    #[test]
    #[serial]
    fn blank_key_falls_back_to_environment() {
        temp_env::with_var(ETHERSCAN_API_KEY_ENV, Some("FROM_ENV"), || {
            let config = LedgerConfig {
                api_key: Some("   ".to_string()),
                ..Default::default()
            };
            assert_eq!(config.resolve_api_key().as_deref(), Some("FROM_ENV"));
        });
    }

    #[test]
    #[serial]
    fn blank_environment_key_is_absent() {
        temp_env::with_var(ETHERSCAN_API_KEY_ENV, Some(""), || {
            assert_eq!(LedgerConfig::default().resolve_api_key(), None);
        });
    }

    #[test]
    fn inverted_block_range_is_rejected() {
        let config = LedgerConfig {
            start_block: 10,
            end_block: 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}

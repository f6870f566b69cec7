pub mod ledger;
pub mod log;
pub mod tracer;

use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

pub use ledger::LedgerConfig;
pub use ledger::ThrottleConfig;
pub use ledger::ThrottleKind;
pub use log::LoggingConfig;
pub use tracer::TracerConfig;

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ledger: LedgerConfig,
    pub tracer: TracerConfig,
    pub logging: LoggingConfig,
}

impl Config {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ledger.validate()?;
        self.tracer.validate()?;
        Ok(())
    }
}

pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let config_str = std::fs::read_to_string(path)?;
    Config::from_toml_str(&config_str)
}

/// Like [`load_config`], but a missing file yields the defaults
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::debug!("config_not_found::{}::using_defaults", path.display());
        return Ok(Config::default());
    }
    load_config(path)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.tracer.max_depth, 3);
        assert!(!config.tracer.auto_depth);
        assert_eq!(config.ledger.throttle.delay_ms, 200);
        assert_eq!(config.logging.directory, std::path::PathBuf::from(".logs"));
        assert_eq!(config.logging.error_dir(), std::path::PathBuf::from(".logs/error"));
    }

    #[test]
    fn sections_override_defaults() {
        let raw = r#"
            [ledger]
            base_url = "http://localhost:9000/api"
            api_key = "KEY"

            [ledger.throttle]
            kind = "window"
            requests_per_second = 4

            [tracer]
            max_depth = 1
            auto_depth = true
            days_limit = 7.5
            display_timezone = "Europe/Berlin"
        "#;

        let config = Config::from_toml_str(raw).unwrap();
        assert_eq!(config.ledger.base_url, "http://localhost:9000/api");
        assert_eq!(config.ledger.api_key.as_deref(), Some("KEY"));
        assert_eq!(config.ledger.throttle.kind, ThrottleKind::Window);
        assert_eq!(config.ledger.throttle.requests_per_second, 4);
        assert_eq!(config.tracer.max_depth, 1);
        assert!(config.tracer.auto_depth);
        assert_eq!(config.tracer.days_limit, Some(7.5));
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        let raw = r#"
            [tracer]
            display_timezone = "Mars/Olympus"
        "#;
        assert!(matches!(Config::from_toml_str(raw), Err(ConfigError::InvalidTimezone(_))));
    }

    #[test]
    fn non_positive_days_limit_is_rejected() {
        let raw = r#"
            [tracer]
            days_limit = 0
        "#;
        assert!(matches!(Config::from_toml_str(raw), Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load_config_or_default("definitely/not/here/Config.toml").unwrap();
        assert_eq!(config.tracer.max_addresses, Some(2_000));
    }

    #[test]
    fn shipped_config_loads() {
        let config = load_config(concat!(env!("CARGO_MANIFEST_DIR"), "/Config.toml")).unwrap();
        assert_eq!(config.tracer.days_limit, Some(30.0));
        assert_eq!(config.ledger.throttle.kind, ThrottleKind::FixedDelay);
    }
}

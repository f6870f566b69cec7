use serde::Deserialize;
use serde::Serialize;

use crate::constants::DEFAULT_MAX_ADDRESSES;
use crate::constants::DEFAULT_MAX_DEPTH;
use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TracerConfig {
    pub max_depth: usize,
    // Ignore `max_depth`; the time window and visited set bound the walk
    pub auto_depth: bool,
    // Absent means no time window
    pub days_limit: Option<f64>,
    pub max_addresses: Option<usize>,
    // Key graph nodes by lowercase address instead of the exact string
    pub merge_case_variants: bool,
    pub display_timezone: String,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            auto_depth: false,
            days_limit: None,
            max_addresses: Some(DEFAULT_MAX_ADDRESSES),
            merge_case_variants: false,
            display_timezone: "UTC".to_string(),
        }
    }
}

impl TracerConfig {
    pub fn timezone(&self) -> Result<chrono_tz::Tz, ConfigError> {
        self.display_timezone
            .parse::<chrono_tz::Tz>()
            .map_err(|_| ConfigError::InvalidTimezone(self.display_timezone.clone()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(days) = self.days_limit {
            if !days.is_finite() || days <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: "tracer.days_limit",
                    reason: format!("expected a positive number of days, got {}", days),
                });
            }
        }
        if self.max_addresses == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "tracer.max_addresses",
                reason: "must be at least 1".to_string(),
            });
        }
        self.timezone()?;
        Ok(())
    }
}

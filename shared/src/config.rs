//! Filter configuration

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::host::LogLevel;

pub const ENV_ANNOUNCE_EMPTY: &str = "POKE_BLOCKER_ANNOUNCE_EMPTY";
pub const ENV_LOG_LEVEL: &str = "POKE_BLOCKER_LOG_LEVEL";
pub const ENV_LOG_CHANNEL: &str = "POKE_BLOCKER_LOG_CHANNEL";

/// How the filter reports blocked pokes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Also announce blocked pokes that carry no message
    pub announce_empty_pokes: bool,

    /// Severity of the client log entry
    pub log_level: LogLevel,

    /// Channel name of the client log entry
    pub log_channel: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            announce_empty_pokes: false,
            log_level: LogLevel::Info,
            log_channel: "Plugin".to_string(),
        }
    }
}

impl FilterConfig {
    /// Defaults with `POKE_BLOCKER_*` environment overrides applied
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides taken from `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_ANNOUNCE_EMPTY) {
            config.announce_empty_pokes = parse_bool(&value).ok_or(ConfigError::InvalidValue {
                key: ENV_ANNOUNCE_EMPTY,
                value: value.clone(),
            })?;
        }

        if let Some(value) = lookup(ENV_LOG_LEVEL) {
            config.log_level = value.parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_LOG_LEVEL,
                value: value.clone(),
            })?;
        }

        if let Some(value) = lookup(ENV_LOG_CHANNEL) {
            config.log_channel = value;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_channel.trim().is_empty() {
            return Err(ConfigError::EmptyLogChannel);
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

//! Controller configuration.
//!
//! Loaded once at startup from a JSON settings file. Only the `profile`
//! ladder is required; everything else has a default:
//!
//! ```json
//! {
//!   "profile": { "0": 40, "1": 50, "2": 60, "3": 70, "4": 75, "5": 80, "6": 85, "7": 90 },
//!   "command_timeout_ms": 5000,
//!   "log_level": "info",
//!   "commands": { "sysinfo": "getsysinfo", "fan_mode": "hal_app" }
//! }
//! ```
//!
//! Threshold values may be written as integers or as strings holding an
//! integer. Any malformed threshold is a fatal [`ConfigError`].

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::adapters::hal_fans::DEFAULT_FAN_MODE_PROGRAM;
use crate::adapters::sysinfo::DEFAULT_SYSINFO_PROGRAM;
use crate::control::profile::{LEVEL_COUNT, ProfileTable, parse_thresholds};
use crate::error::ConfigError;

/// Default per-command timeout.
pub const DEFAULT_COMMAND_TIMEOUT_MS: u64 = 5_000;

/// One raw threshold as written in the settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThresholdValue {
    Int(i64),
    Text(String),
}

impl ThresholdValue {
    fn to_text(&self) -> String {
        match self {
            Self::Int(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

/// Names of the vendor programs to invoke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommandSet {
    pub sysinfo: String,
    pub fan_mode: String,
}

impl Default for CommandSet {
    fn default() -> Self {
        Self {
            sysinfo: DEFAULT_SYSINFO_PROGRAM.to_string(),
            fan_mode: DEFAULT_FAN_MODE_PROGRAM.to_string(),
        }
    }
}

/// Top-level settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ControllerConfig {
    /// Threshold ladder keyed "0".."7".
    pub profile: BTreeMap<String, ThresholdValue>,
    /// Upper bound on every external command (milliseconds).
    #[serde(default = "default_timeout_ms")]
    pub command_timeout_ms: u64,
    /// Log filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub commands: CommandSet,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_COMMAND_TIMEOUT_MS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ControllerConfig {
    /// Read, parse and validate a settings file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject anything that would make the controller misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_thresholds(&self.threshold_texts()?)?;
        if self.command_timeout_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "command_timeout_ms must be greater than 0",
            ));
        }
        if self.commands.sysinfo.trim().is_empty() {
            return Err(ConfigError::ValidationFailed("commands.sysinfo must not be empty"));
        }
        if self.commands.fan_mode.trim().is_empty() {
            return Err(ConfigError::ValidationFailed("commands.fan_mode must not be empty"));
        }
        Ok(())
    }

    /// Build the immutable threshold ladder.
    pub fn profile_table(&self) -> Result<ProfileTable, ConfigError> {
        ProfileTable::parse(&self.threshold_texts()?)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }

    /// Thresholds in level order, as text, with key checks applied.
    fn threshold_texts(&self) -> Result<Vec<String>, ConfigError> {
        if let Some(key) = self.profile.keys().find(|k| !is_level_key(k)) {
            return Err(ConfigError::UnknownKey(key.clone()));
        }
        (0..LEVEL_COUNT)
            .map(|i| {
                let key = i.to_string();
                self.profile
                    .get(&key)
                    .map(ThresholdValue::to_text)
                    .ok_or(ConfigError::MissingThreshold(key))
            })
            .collect()
    }
}

fn is_level_key(key: &str) -> bool {
    key.parse::<usize>()
        .is_ok_and(|i| i < LEVEL_COUNT && key == i.to_string())
}

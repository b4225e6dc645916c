use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// How a [`SharedStore`](crate::SharedStore) treats a `begin` while another
/// transaction is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionPolicy {
    /// Reject the second `begin` immediately with `TransactionConflict`
    #[default]
    FailFast,

    /// Wait until the open transaction commits or rolls back
    Serialize,
}

/// How the interactive driver turns raw input into a [`Value`](crate::Value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueMode {
    /// Values must parse as integers
    #[default]
    IntegerOnly,

    /// Integers when they parse, text otherwise
    Typed,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Store configuration
///
/// Every field has a default, so a config file only needs to name what it
/// changes:
///
/// ```
/// # use txkv::{StoreConfig, ValueMode};
/// let config = StoreConfig::from_json_str(r#"{ "value_mode": "typed" }"#).unwrap();
/// assert_eq!(config.value_mode, ValueMode::Typed);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Writer exclusion for the shared store
    pub exclusion: ExclusionPolicy,

    /// Input conversion used by the driver
    pub value_mode: ValueMode,

    /// Number of committed keys to reserve space for up front
    pub initial_capacity: usize,
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the writer exclusion policy
    pub fn exclusion(mut self, policy: ExclusionPolicy) -> Self {
        self.exclusion = policy;
        self
    }

    /// Set the input value mode
    pub fn value_mode(mut self, mode: ValueMode) -> Self {
        self.value_mode = mode;
        self
    }

    /// Set the initial committed-map capacity
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

//! Error types for the trade engine
//!
//! Searches that find nothing are not errors; they return an empty list. The
//! variants here cover bad configuration, bad valuation input and the
//! operational guards (pool size, cancellation, deadline).

use crate::types::PlayerId;
use thiserror::Error;

/// Errors that abort a search
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{side} pool has {size} players, limit is {limit}")]
    PoolTooLarge { side: &'static str, size: usize, limit: usize },

    #[error("Search cancelled")]
    Cancelled,

    #[error("Search exceeded its {limit_ms}ms deadline")]
    DeadlineExceeded { limit_ms: u64 },
}

/// Invalid search configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Fairness threshold must be finite and non-negative, got {0}")]
    InvalidThreshold(f64),

    #[error("{field} must be at least 1")]
    ZeroLimit { field: &'static str },

    #[error("Invalid value for {key}: {value}")]
    InvalidEnvValue { key: String, value: String },

    #[error("Failed to read config file {path}: {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),
}

/// Invalid entry in a valuation table
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValuationError {
    #[error("Player {player_id} has negative value {value}")]
    Negative { player_id: PlayerId, value: f64 },

    #[error("Player {player_id} has non-finite value {value}")]
    NonFinite { player_id: PlayerId, value: f64 },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

//! Configuration for trade searches

use crate::error::ConfigError;
use crate::{
    DEFAULT_BUY_LOW_LIMIT, DEFAULT_BUY_LOW_MAX_PLAYERS, DEFAULT_CONSOLIDATION_LIMIT,
    DEFAULT_FAIRNESS_THRESHOLD, DEFAULT_IMPROVEMENT_LIMIT, DEFAULT_MAX_PLAYERS_PER_SIDE,
    DEFAULT_MAX_POOL_SIZE, DEFAULT_TARGET_DISPLAY_LIMIT,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Parameters for every trade search
///
/// Passed explicitly into [`TradeFinder`](crate::TradeFinder); nothing in the
/// engine reads process-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Largest accepted relative value difference (0.15 = 15%)
    pub fairness_threshold: f64,

    /// Largest subset drawn from either roster
    pub max_players_per_side: usize,

    /// Largest subset drawn from either roster in buy-low searches
    pub buy_low_max_players: usize,

    /// Result caps per strategy
    pub limits: ResultLimits,

    /// Largest roster a search will enumerate
    pub max_pool_size: usize,

    /// Abort searches running longer than this (milliseconds)
    pub deadline_ms: Option<u64>,

    /// Spread the outer enumeration loop over the rayon pool
    pub parallel: bool,
}

/// Result caps per strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultLimits {
    /// Target trades shown to the user (generation itself is uncapped)
    pub target_display: usize,

    pub value_improvement: usize,

    pub consolidation: usize,

    pub buy_low: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fairness_threshold: DEFAULT_FAIRNESS_THRESHOLD,
            max_players_per_side: DEFAULT_MAX_PLAYERS_PER_SIDE,
            buy_low_max_players: DEFAULT_BUY_LOW_MAX_PLAYERS,
            limits: ResultLimits::default(),
            max_pool_size: DEFAULT_MAX_POOL_SIZE,
            deadline_ms: None,
            parallel: false,
        }
    }
}

impl Default for ResultLimits {
    fn default() -> Self {
        Self {
            target_display: DEFAULT_TARGET_DISPLAY_LIMIT,
            value_improvement: DEFAULT_IMPROVEMENT_LIMIT,
            consolidation: DEFAULT_CONSOLIDATION_LIMIT,
            buy_low: DEFAULT_BUY_LOW_LIMIT,
        }
    }
}

impl SearchConfig {
    /// Defaults with a different fairness threshold
    pub fn with_threshold(fairness_threshold: f64) -> Self {
        Self { fairness_threshold, ..Self::default() }
    }

    /// Deadline as Duration
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_ms.map(Duration::from_millis)
    }

    /// Check that every field is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.fairness_threshold.is_finite() || self.fairness_threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold(self.fairness_threshold));
        }
        let non_zero = [
            ("max_players_per_side", self.max_players_per_side),
            ("buy_low_max_players", self.buy_low_max_players),
            ("max_pool_size", self.max_pool_size),
            ("limits.target_display", self.limits.target_display),
            ("limits.value_improvement", self.limits.value_improvement),
            ("limits.consolidation", self.limits.consolidation),
            ("limits.buy_low", self.limits.buy_low),
        ];
        for (field, value) in non_zero {
            if value == 0 {
                return Err(ConfigError::ZeroLimit { field });
            }
        }
        Ok(())
    }

    /// Defaults overridden by `TRADE_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(v) = env_parse("TRADE_FAIRNESS_THRESHOLD")? {
            config.fairness_threshold = v;
        }
        if let Some(v) = env_parse("TRADE_MAX_PLAYERS_PER_SIDE")? {
            config.max_players_per_side = v;
        }
        if let Some(v) = env_parse("TRADE_BUY_LOW_MAX_PLAYERS")? {
            config.buy_low_max_players = v;
        }
        if let Some(v) = env_parse("TRADE_MAX_POOL_SIZE")? {
            config.max_pool_size = v;
        }
        if let Some(v) = env_parse("TRADE_DEADLINE_MS")? {
            config.deadline_ms = Some(v);
        }
        if let Some(v) = env_parse("TRADE_PARALLEL")? {
            config.parallel = v;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file; missing fields take defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config: SearchConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

fn env_parse<T: FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnvValue { key: key.to_string(), value: raw }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_config_default() {
        let config = SearchConfig::default();
        assert_eq!(config.fairness_threshold, 0.15);
        assert_eq!(config.max_players_per_side, 3);
        assert_eq!(config.buy_low_max_players, 2);
        assert_eq!(config.limits.target_display, 10);
        assert_eq!(config.limits.value_improvement, 20);
        assert_eq!(config.limits.consolidation, 25);
        assert_eq!(config.limits.buy_low, 15);
        assert_eq!(config.deadline(), None);
        assert!(!config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = SearchConfig::with_threshold(-0.1);
        assert_eq!(config.validate(), Err(ConfigError::InvalidThreshold(-0.1)));

        let config = SearchConfig::with_threshold(f64::INFINITY);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidThreshold(_))));

        let config = SearchConfig { max_players_per_side: 0, ..Default::default() };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroLimit { field: "max_players_per_side" })
        );

        let mut config = SearchConfig::default();
        config.limits.buy_low = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroLimit { field: "limits.buy_low" }));
    }

    #[test]
    fn test_partial_toml_takes_defaults() {
        let config: SearchConfig = toml::from_str(
            r#"
            fairness_threshold = 0.1
            parallel = true

            [limits]
            consolidation = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.fairness_threshold, 0.1);
        assert!(config.parallel);
        assert_eq!(config.limits.consolidation, 5);
        assert_eq!(config.limits.value_improvement, 20);
        assert_eq!(config.max_players_per_side, 3);
    }

    #[test]
    fn test_config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("search.toml");

        let config = SearchConfig { deadline_ms: Some(250), ..SearchConfig::with_threshold(0.2) };
        config.to_file(&path).unwrap();

        let loaded = SearchConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.deadline(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_missing_config_file() {
        let err = SearchConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}

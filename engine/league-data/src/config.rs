//! Configuration for league data loading

use crate::LeagueDataError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// API endpoints and HTTP settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueDataConfig {
    pub sleeper_api_base_url: String,
    pub fantasycalc_api_base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for LeagueDataConfig {
    fn default() -> Self {
        Self {
            sleeper_api_base_url: "https://api.sleeper.app/v1".to_string(),
            fantasycalc_api_base_url: "https://api.fantasycalc.com".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl LeagueDataConfig {
    /// Create config from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, LeagueDataError> {
        let defaults = Self::default();

        let sleeper_api_base_url =
            std::env::var("SLEEPER_API_BASE_URL").unwrap_or(defaults.sleeper_api_base_url);

        let fantasycalc_api_base_url =
            std::env::var("FANTASYCALC_API_BASE_URL").unwrap_or(defaults.fantasycalc_api_base_url);

        let request_timeout_secs = match std::env::var("LEAGUE_DATA_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| LeagueDataError::InvalidConfig {
                message: format!("Invalid LEAGUE_DATA_TIMEOUT_SECS: {raw}"),
            })?,
            Err(_) => defaults.request_timeout_secs,
        };

        Ok(Self { sleeper_api_base_url, fantasycalc_api_base_url, request_timeout_secs })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Shared HTTP client with the configured timeout
    pub fn http_client(&self) -> Result<reqwest::Client, LeagueDataError> {
        Ok(reqwest::Client::builder().timeout(self.request_timeout()).build()?)
    }
}

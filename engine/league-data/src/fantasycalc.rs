//! FantasyCalc trade values

use crate::config::LeagueDataConfig;
use crate::format::LeagueFormat;
use crate::LeagueDataError;
use serde::Deserialize;
use tracing::{debug, info, warn};
use trade_engine::{PlayerId, ValuationTable};

/// One row of `values/current`
#[derive(Debug, Clone, Deserialize)]
pub struct FantasyCalcEntry {
    pub player: FantasyCalcPlayer,
    pub value: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FantasyCalcPlayer {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    /// Absent for players Sleeper doesn't track
    #[serde(default)]
    pub sleeper_id: Option<String>,
}

/// FantasyCalc API client
#[derive(Debug, Clone)]
pub struct FantasyCalcClient {
    base_url: String,
    client: reqwest::Client,
}

impl FantasyCalcClient {
    pub fn new(config: &LeagueDataConfig) -> Result<Self, LeagueDataError> {
        Ok(Self {
            base_url: config.fantasycalc_api_base_url.trim_end_matches('/').to_string(),
            client: config.http_client()?,
        })
    }

    pub fn values_url(&self, format: &LeagueFormat) -> String {
        format!("{}/values/current?{}", self.base_url, format.query())
    }

    /// Fetch current trade values keyed by Sleeper player ID
    pub async fn get_values(&self, format: &LeagueFormat) -> Result<ValuationTable, LeagueDataError> {
        let url = self.values_url(format);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(LeagueDataError::FantasyCalcApi {
                message: format!("GET {url} failed: {status} - {error_text}"),
            });
        }

        let body = response.text().await?;
        let entries: Vec<FantasyCalcEntry> =
            serde_json::from_str(&body).map_err(|e| LeagueDataError::FantasyCalcApi {
                message: format!("Failed to parse values: {e}"),
            })?;

        let values = entries_to_valuations(entries);
        info!("Loaded {} {} player values from FantasyCalc", values.len(), format.label());
        Ok(values)
    }
}

/// Build a valuation table from FantasyCalc rows
///
/// Rows without a Sleeper ID are skipped. Rows with a negative or
/// non-finite value are skipped with a warning.
pub fn entries_to_valuations(entries: impl IntoIterator<Item = FantasyCalcEntry>) -> ValuationTable {
    let mut values = ValuationTable::new();
    for entry in entries {
        let Some(sleeper_id) = entry.player.sleeper_id.filter(|id| !id.is_empty()) else {
            continue;
        };
        if let Err(e) = values.insert(PlayerId::from(sleeper_id), entry.value) {
            warn!("Skipping FantasyCalc value: {}", e);
        }
    }
    values
}

//! Sleeper API integration

use crate::config::LeagueDataConfig;
use crate::LeagueDataError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use trade_engine::{PlayerId, Roster};
use tracing::{debug, info};

/// Sleeper API client
#[derive(Debug, Clone)]
pub struct SleeperClient {
    base_url: String,
    client: reqwest::Client,
}

/// Sleeper user response
#[derive(Debug, Clone, Deserialize)]
pub struct SleeperUser {
    pub user_id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Sleeper league response (fields the trade finder reads)
#[derive(Debug, Clone, Deserialize)]
pub struct SleeperLeague {
    pub league_id: String,
    pub name: String,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub total_rosters: Option<u32>,
    #[serde(default)]
    pub roster_positions: Vec<String>,
    #[serde(default)]
    pub settings: serde_json::Value,
    #[serde(default)]
    pub scoring_settings: serde_json::Value,
}

/// Sleeper roster response
#[derive(Debug, Clone, Deserialize)]
pub struct SleeperRoster {
    pub roster_id: u32,
    /// Null for orphaned teams
    #[serde(default)]
    pub owner_id: Option<String>,
    /// Null for empty rosters
    #[serde(default)]
    pub players: Option<Vec<String>>,
}

impl SleeperRoster {
    /// Convert into the engine's roster snapshot
    pub fn into_roster(self) -> Roster {
        Roster::new(
            self.roster_id,
            self.owner_id.unwrap_or_default(),
            self.players.unwrap_or_default().into_iter().map(PlayerId::from),
        )
    }
}

/// Sleeper player metadata (one entry of `players/nfl`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SleeperPlayer {
    #[serde(default)]
    pub player_id: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
}

impl SleeperPlayer {
    /// Full name, or "First Last" for entries like team defenses
    pub fn name(&self) -> Option<String> {
        if let Some(full_name) = self.full_name.as_ref().filter(|n| !n.is_empty()) {
            return Some(full_name.clone());
        }
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(only), None) | (None, Some(only)) => Some(only.clone()),
            (None, None) => None,
        }
    }
}

impl SleeperClient {
    /// Create a new Sleeper API client
    pub fn new(config: &LeagueDataConfig) -> Result<Self, LeagueDataError> {
        Ok(Self {
            base_url: config.sleeper_api_base_url.trim_end_matches('/').to_string(),
            client: config.http_client()?,
        })
    }

    /// Look up a user by username or user ID
    pub async fn get_user(&self, username: &str) -> Result<SleeperUser, LeagueDataError> {
        let url = format!("{}/user/{}", self.base_url, username);
        // Sleeper answers 200 with a null body for unknown users
        let user: Option<SleeperUser> = self.get_json(&url).await?;
        user.ok_or_else(|| LeagueDataError::UserNotFound { username: username.to_string() })
    }

    /// Get league information
    pub async fn get_league(&self, league_id: &str) -> Result<SleeperLeague, LeagueDataError> {
        let url = format!("{}/league/{}", self.base_url, league_id);
        let league: Option<SleeperLeague> = self.get_json(&url).await?;
        league.ok_or_else(|| LeagueDataError::LeagueNotFound { league_id: league_id.to_string() })
    }

    /// Get all rosters in the league
    pub async fn get_rosters(&self, league_id: &str) -> Result<Vec<SleeperRoster>, LeagueDataError> {
        let url = format!("{}/league/{}/rosters", self.base_url, league_id);
        let rosters: Option<Vec<SleeperRoster>> = self.get_json(&url).await?;
        Ok(rosters.unwrap_or_default())
    }

    /// Get all users in the league
    pub async fn get_users(&self, league_id: &str) -> Result<Vec<SleeperUser>, LeagueDataError> {
        let url = format!("{}/league/{}/users", self.base_url, league_id);
        let users: Option<Vec<SleeperUser>> = self.get_json(&url).await?;
        Ok(users.unwrap_or_default())
    }

    /// Get metadata for every NFL player, keyed by player ID
    pub async fn get_players(&self) -> Result<HashMap<String, SleeperPlayer>, LeagueDataError> {
        let url = format!("{}/players/nfl", self.base_url);
        let players: HashMap<String, SleeperPlayer> = self.get_json(&url).await?;
        info!("Loaded {} players from Sleeper", players.len());
        Ok(players)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, LeagueDataError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(LeagueDataError::SleeperApi {
                message: format!("GET {url} failed: {status} - {error_text}"),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| LeagueDataError::SleeperApi {
            message: format!("Failed to parse response from {url}: {e}"),
        })
    }
}

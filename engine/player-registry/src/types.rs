use league_data::SleeperPlayer;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use trade_engine::{PlayerId, TradeKind};

/// Display metadata for one player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub player_id: PlayerId,

    /// Player name (e.g., "Lamar Jackson")
    pub name: String,

    /// Position (e.g., "QB", "RB", "WR", "TE")
    pub position: Option<String>,

    /// Team abbreviation, None for free agents
    pub team: Option<String>,
}

impl PlayerInfo {
    /// Build from a Sleeper `players/nfl` entry, None when it has no usable name
    pub fn from_sleeper(player_id: impl Into<PlayerId>, player: &SleeperPlayer) -> Option<Self> {
        Some(Self {
            player_id: player_id.into(),
            name: player.name()?,
            position: player.position.clone(),
            team: player.team.clone(),
        })
    }
}

/// A player with its current trade value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub player_id: PlayerId,
    pub name: String,
    pub position: Option<String>,
    pub team: Option<String>,
    pub value: f64,
}

impl PlayerView {
    /// "Name (POS, TEAM)" with whichever parts are known
    pub fn headline(&self) -> String {
        match (&self.position, &self.team) {
            (Some(pos), Some(team)) => format!("{} ({}, {})", self.name, pos, team),
            (Some(pos), None) => format!("{} ({})", self.name, pos),
            (None, Some(team)) => format!("{} ({})", self.name, team),
            (None, None) => self.name.clone(),
        }
    }
}

/// A trade candidate with both sides spelled out
#[derive(Debug, Clone, Serialize)]
pub struct LabeledTrade {
    #[serde(flatten)]
    pub kind: TradeKind,
    pub give: Vec<PlayerView>,
    pub receive: Vec<PlayerView>,
    pub give_value: f64,
    pub receive_value: f64,
    pub net_value: f64,
}

/// Errors that can occur during player lookup and loading
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Player '{0}' not found in registry")]
    PlayerNotFound(String),

    #[error("'{query}' matches several players: {}", .matches.join(", "))]
    Ambiguous { query: String, matches: Vec<String> },

    #[error("Failed to access player file {path}: {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse player file: {0}")]
    Parse(String),
}

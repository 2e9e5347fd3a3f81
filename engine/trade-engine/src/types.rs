use crate::error::ValuationError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Roster identifier within a league (Sleeper's `roster_id`)
pub type RosterId = u32;

/// Opaque player key (e.g. Sleeper id "4046", or "DET" for a team defense)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The players one team currently holds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    /// Roster ID within the league
    pub roster_id: RosterId,

    /// Owning user ID
    pub owner_id: String,

    /// Player IDs in roster order, no duplicates
    players: Vec<PlayerId>,
}

impl Roster {
    /// Create a roster, dropping repeated player IDs (first occurrence wins)
    pub fn new(
        roster_id: RosterId,
        owner_id: impl Into<String>,
        players: impl IntoIterator<Item = PlayerId>,
    ) -> Self {
        let mut seen = HashSet::new();
        let players = players.into_iter().filter(|p| seen.insert(p.clone())).collect();
        Self { roster_id, owner_id: owner_id.into(), players }
    }

    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    pub fn contains(&self, player_id: &PlayerId) -> bool {
        self.players.contains(player_id)
    }

    /// True when every player in `wanted` is on this roster
    pub fn holds_all<'a>(&self, wanted: impl IntoIterator<Item = &'a PlayerId>) -> bool {
        wanted.into_iter().all(|p| self.contains(p))
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

/// Player trade values for one league format
///
/// Values are finite and non-negative. Players missing from the table are
/// worth 0, which keeps them out of every fair trade.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HashMap<PlayerId, f64>", into = "HashMap<PlayerId, f64>")]
pub struct ValuationTable {
    values: HashMap<PlayerId, f64>,
}

impl ValuationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table, rejecting negative or non-finite values
    pub fn try_from_values(
        values: impl IntoIterator<Item = (PlayerId, f64)>,
    ) -> Result<Self, ValuationError> {
        let mut table = Self::new();
        for (player_id, value) in values {
            table.insert(player_id, value)?;
        }
        Ok(table)
    }

    /// Set a player's value, returning the previous one
    pub fn insert(&mut self, player_id: PlayerId, value: f64) -> Result<Option<f64>, ValuationError> {
        if !value.is_finite() {
            return Err(ValuationError::NonFinite { player_id, value });
        }
        if value < 0.0 {
            return Err(ValuationError::Negative { player_id, value });
        }
        Ok(self.values.insert(player_id, value))
    }

    /// Value of a player, 0 when unvalued
    pub fn value_of(&self, player_id: &PlayerId) -> f64 {
        self.values.get(player_id).copied().unwrap_or(0.0)
    }

    /// Sum of values over a set of players
    pub fn total<'a>(&self, players: impl IntoIterator<Item = &'a PlayerId>) -> f64 {
        players.into_iter().map(|p| self.value_of(p)).sum()
    }

    pub fn contains(&self, player_id: &PlayerId) -> bool {
        self.values.contains_key(player_id)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl TryFrom<HashMap<PlayerId, f64>> for ValuationTable {
    type Error = ValuationError;

    fn try_from(values: HashMap<PlayerId, f64>) -> Result<Self, Self::Error> {
        Self::try_from_values(values)
    }
}

impl From<ValuationTable> for HashMap<PlayerId, f64> {
    fn from(table: ValuationTable) -> Self {
        table.values
    }
}

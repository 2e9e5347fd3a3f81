use crate::types::{LabeledTrade, PlayerInfo, PlayerView, RegistryError};
use league_data::SleeperPlayer;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};
use trade_engine::{PlayerId, Roster, TradeCandidate, ValuationTable};

/// Player Directory - Sleeper player ID to name/position/team
///
/// Built from the Sleeper `players/nfl` map, either fetched live or read from
/// a saved JSON copy of that response.
#[derive(Debug, Clone, Default)]
pub struct PlayerDirectory {
    players: HashMap<PlayerId, PlayerInfo>,
}

impl PlayerDirectory {
    /// Create a new empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from Sleeper player metadata, skipping entries without a name
    pub fn from_sleeper(players: &HashMap<String, SleeperPlayer>) -> Self {
        let mut directory = Self::new();
        let mut skipped = 0usize;
        for (id, player) in players {
            match PlayerInfo::from_sleeper(id.as_str(), player) {
                Some(info) => directory.insert(info),
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            debug!("Skipped {} Sleeper entries without a name", skipped);
        }
        directory
    }

    /// Load a saved `players/nfl` response
    pub async fn load_from_file<P: AsRef<Path>>(file_path: P) -> Result<Self, RegistryError> {
        let path = file_path.as_ref();
        info!("Loading player data from: {:?}", path);

        let json_content = tokio::fs::read_to_string(path).await.map_err(|e| {
            RegistryError::Io { path: path.display().to_string(), message: e.to_string() }
        })?;
        let players: HashMap<String, SleeperPlayer> = serde_json::from_str(&json_content)
            .map_err(|e| RegistryError::Parse(e.to_string()))?;

        let directory = Self::from_sleeper(&players);
        info!("Loaded {} players from file", directory.len());
        Ok(directory)
    }

    /// Save Sleeper player metadata for later `load_from_file` calls
    pub async fn save_to_file<P: AsRef<Path>>(
        players: &HashMap<String, SleeperPlayer>,
        file_path: P,
    ) -> Result<(), RegistryError> {
        let path = file_path.as_ref();
        let json = serde_json::to_string(players).map_err(|e| RegistryError::Parse(e.to_string()))?;
        tokio::fs::write(path, json).await.map_err(|e| RegistryError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        info!("Saved {} players to {:?}", players.len(), path);
        Ok(())
    }

    pub fn insert(&mut self, info: PlayerInfo) {
        self.players.insert(info.player_id.clone(), info);
    }

    pub fn get(&self, player_id: &PlayerId) -> Option<&PlayerInfo> {
        self.players.get(player_id)
    }

    /// Player name, or the raw ID when the player is unknown
    pub fn display_name(&self, player_id: &PlayerId) -> String {
        self.get(player_id).map(|p| p.name.clone()).unwrap_or_else(|| player_id.to_string())
    }

    /// Metadata plus current value (0 when unvalued)
    pub fn describe(&self, player_id: &PlayerId, values: &ValuationTable) -> PlayerView {
        let info = self.get(player_id);
        PlayerView {
            player_id: player_id.clone(),
            name: self.display_name(player_id),
            position: info.and_then(|p| p.position.clone()),
            team: info.and_then(|p| p.team.clone()),
            value: values.value_of(player_id),
        }
    }

    pub fn label(&self, candidate: &TradeCandidate, values: &ValuationTable) -> LabeledTrade {
        LabeledTrade {
            kind: candidate.kind().clone(),
            give: candidate.give().iter().map(|id| self.describe(id, values)).collect(),
            receive: candidate.receive().iter().map(|id| self.describe(id, values)).collect(),
            give_value: candidate.give_value(),
            receive_value: candidate.receive_value(),
            net_value: candidate.net_value(),
        }
    }

    /// Known players on the given rosters, highest value first
    ///
    /// IDs with no directory entry are left out; a picker cannot name them.
    pub fn tradeable_players<'a>(
        &self,
        rosters: impl IntoIterator<Item = &'a Roster>,
        values: &ValuationTable,
    ) -> Vec<PlayerView> {
        let mut views: Vec<PlayerView> = rosters
            .into_iter()
            .flat_map(|r| r.players().iter())
            .filter(|id| self.get(id).is_some())
            .map(|id| self.describe(id, values))
            .collect();
        views.sort_by(|a, b| b.value.total_cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
        views
    }

    /// Case-insensitive partial name match, sorted by name
    pub fn search_players(&self, query: &str) -> Vec<&PlayerInfo> {
        let query_lower = query.trim().to_lowercase();
        let mut matches: Vec<&PlayerInfo> = self
            .players
            .values()
            .filter(|p| p.name.to_lowercase().contains(&query_lower))
            .collect();
        matches.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.player_id.cmp(&b.player_id)));
        matches
    }

    /// Turn user input into a player ID
    ///
    /// Tries an exact ID, then an exact name (case-insensitive), then a
    /// partial name that matches exactly one player.
    pub fn resolve(&self, query: &str) -> Result<PlayerId, RegistryError> {
        let query = query.trim();
        let as_id = PlayerId::from(query);
        if self.players.contains_key(&as_id) {
            return Ok(as_id);
        }

        let exact: Vec<&PlayerInfo> =
            self.players.values().filter(|p| p.name.eq_ignore_ascii_case(query)).collect();
        match exact.as_slice() {
            [only] => return Ok(only.player_id.clone()),
            [] => {}
            several => return Err(ambiguous(query, several)),
        }

        let partial = self.search_players(query);
        match partial.as_slice() {
            [only] => Ok(only.player_id.clone()),
            [] => Err(RegistryError::PlayerNotFound(query.to_string())),
            several => {
                warn!("'{}' matched {} players", query, several.len());
                Err(ambiguous(query, several))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

fn ambiguous(query: &str, matches: &[&PlayerInfo]) -> RegistryError {
    let mut names: Vec<String> =
        matches.iter().map(|p| format!("{} [{}]", p.name, p.player_id)).collect();
    names.sort();
    RegistryError::Ambiguous { query: query.to_string(), matches: names }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trade_engine::{TradeKind, TradeValue};

    fn create_test_players() -> HashMap<String, SleeperPlayer> {
        serde_json::from_str(
            r#"{
                "4881": {"player_id": "4881", "full_name": "Lamar Jackson", "position": "QB", "team": "BAL"},
                "4984": {"player_id": "4984", "full_name": "Josh Allen", "position": "QB", "team": "BUF"},
                "1234": {"player_id": "1234", "full_name": "Josh Allen", "position": "LB", "team": null},
                "6794": {"player_id": "6794", "full_name": "Justin Jefferson", "position": "WR", "team": "MIN"},
                "BAL": {"player_id": "BAL", "first_name": "Baltimore", "last_name": "Ravens", "position": "DEF"},
                "9999": {"player_id": "9999"}
            }"#,
        )
        .unwrap()
    }

    fn values() -> ValuationTable {
        ValuationTable::try_from_values(vec![
            (PlayerId::from("4881"), 7000.0),
            (PlayerId::from("4984"), 8000.0),
            (PlayerId::from("6794"), 10000.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_directory_creation() {
        let directory = PlayerDirectory::from_sleeper(&create_test_players());
        assert_eq!(directory.len(), 5);
        assert!(!directory.is_empty());
        assert_eq!(directory.display_name(&PlayerId::from("BAL")), "Baltimore Ravens");
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let directory = PlayerDirectory::from_sleeper(&create_test_players());
        assert_eq!(directory.display_name(&PlayerId::from("4881")), "Lamar Jackson");
        assert_eq!(directory.display_name(&PlayerId::from("777")), "777");
    }

    #[test]
    fn test_describe() {
        let directory = PlayerDirectory::from_sleeper(&create_test_players());
        let values = values();

        let lamar = directory.describe(&PlayerId::from("4881"), &values);
        assert_eq!(lamar.value, 7000.0);
        assert_eq!(lamar.headline(), "Lamar Jackson (QB, BAL)");

        let unknown = directory.describe(&PlayerId::from("777"), &values);
        assert_eq!(unknown.value, 0.0);
        assert_eq!(unknown.headline(), "777");
    }

    #[test]
    fn test_search_players() {
        let directory = PlayerDirectory::from_sleeper(&create_test_players());

        let results = directory.search_players("Lamar");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Lamar Jackson");

        let results = directory.search_players("josh");
        let ids: Vec<&str> = results.iter().map(|p| p.player_id.as_str()).collect();
        assert_eq!(ids, vec!["1234", "4984"]);
    }

    #[test]
    fn test_resolve() {
        let directory = PlayerDirectory::from_sleeper(&create_test_players());

        assert_eq!(directory.resolve("6794").unwrap(), PlayerId::from("6794"));
        assert_eq!(directory.resolve("lamar jackson").unwrap(), PlayerId::from("4881"));
        assert_eq!(directory.resolve("jefferson").unwrap(), PlayerId::from("6794"));

        assert!(matches!(
            directory.resolve("Josh Allen"),
            Err(RegistryError::Ambiguous { ref matches, .. }) if matches.len() == 2
        ));
        assert_eq!(
            directory.resolve("Mahomes"),
            Err(RegistryError::PlayerNotFound("Mahomes".to_string()))
        );
    }

    #[test]
    fn test_tradeable_players_sorted_by_value() {
        let directory = PlayerDirectory::from_sleeper(&create_test_players());
        let rosters = vec![
            Roster::new(2, "u2", vec![PlayerId::from("4881"), PlayerId::from("BAL")]),
            Roster::new(3, "u3", vec![PlayerId::from("6794"), PlayerId::from("4984")]),
        ];

        let players = directory.tradeable_players(&rosters, &values());
        let names: Vec<&str> = players.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Justin Jefferson", "Josh Allen", "Lamar Jackson", "Baltimore Ravens"]);
    }

    #[test]
    fn test_tradeable_players_skip_unknown_ids() {
        let directory = PlayerDirectory::from_sleeper(&create_test_players());
        let values = ValuationTable::try_from_values(vec![
            (PlayerId::from("777"), 9000.0),
            (PlayerId::from("4881"), 7000.0),
        ])
        .unwrap();
        let rosters = vec![Roster::new(2, "u2", vec![PlayerId::from("777"), PlayerId::from("4881")])];

        let players = directory.tradeable_players(&rosters, &values);
        let ids: Vec<&str> = players.iter().map(|p| p.player_id.as_str()).collect();
        assert_eq!(ids, vec!["4881"]);
    }

    #[test]
    fn test_label() {
        let directory = PlayerDirectory::from_sleeper(&create_test_players());
        let candidate = TradeCandidate::new(
            vec![PlayerId::from("4881")],
            vec![PlayerId::from("4984")],
            TradeValue { give_value: 7000.0, receive_value: 8000.0 },
            TradeKind::ValueImprovement,
        );

        let labeled = directory.label(&candidate, &values());
        assert_eq!(labeled.give[0].name, "Lamar Jackson");
        assert_eq!(labeled.receive[0].name, "Josh Allen");
        assert_eq!(labeled.net_value, 1000.0);

        let json = serde_json::to_value(&labeled).unwrap();
        assert_eq!(json["kind"], "value_improvement");
        assert_eq!(json["receive"][0]["value"], 8000.0);
    }

    #[tokio::test]
    async fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("players.json");

        PlayerDirectory::save_to_file(&create_test_players(), &path).await.unwrap();
        let directory = PlayerDirectory::load_from_file(&path).await.unwrap();
        assert_eq!(directory.len(), 5);
        assert_eq!(directory.display_name(&PlayerId::from("6794")), "Justin Jefferson");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let result = PlayerDirectory::load_from_file("/nonexistent/players.json").await;
        assert!(matches!(result, Err(RegistryError::Io { .. })));
    }
}

//! One-shot view of a league as the trade finder sees it

use crate::sleeper::{SleeperClient, SleeperLeague, SleeperRoster, SleeperUser};
use crate::LeagueDataError;
use serde::Serialize;
use std::collections::HashMap;
use tracing::info;
use trade_engine::{PlayerId, Roster, RosterId};

const UNKNOWN_OWNER: &str = "Unknown";

/// League rosters plus the operator's own roster
#[derive(Debug, Clone, Serialize)]
pub struct LeagueSnapshot {
    pub league_id: String,
    pub league_name: String,
    my_roster_id: RosterId,
    #[serde(skip)]
    my_index: usize,
    rosters: Vec<Roster>,
    /// owner_id -> display name
    owner_names: HashMap<String, String>,
}

impl LeagueSnapshot {
    /// Fetch the league, then the rest of the snapshot
    pub async fn load(
        client: &SleeperClient,
        username: &str,
        league_id: &str,
    ) -> Result<Self, LeagueDataError> {
        let league = client.get_league(league_id).await?;
        Self::load_for_league(client, username, league).await
    }

    /// Fetch user, rosters and users for a league that is already loaded
    pub async fn load_for_league(
        client: &SleeperClient,
        username: &str,
        league: SleeperLeague,
    ) -> Result<Self, LeagueDataError> {
        let user = client.get_user(username).await?;
        let rosters = client.get_rosters(&league.league_id).await?;
        let users = client.get_users(&league.league_id).await?;

        let snapshot = Self::from_parts(&user.user_id, &league.league_id, league.name, rosters, users)?;
        info!(
            "Loaded league '{}' with {} rosters (my roster: {})",
            snapshot.league_name,
            snapshot.rosters.len(),
            snapshot.my_roster_id
        );
        Ok(snapshot)
    }

    /// Assemble a snapshot from already-fetched API responses
    pub fn from_parts(
        my_user_id: &str,
        league_id: &str,
        league_name: String,
        rosters: Vec<SleeperRoster>,
        users: Vec<SleeperUser>,
    ) -> Result<Self, LeagueDataError> {
        let rosters: Vec<Roster> = rosters.into_iter().map(SleeperRoster::into_roster).collect();

        let my_index = rosters
            .iter()
            .position(|r| r.owner_id == my_user_id)
            .ok_or_else(|| LeagueDataError::RosterNotFound {
                user_id: my_user_id.to_string(),
                league_id: league_id.to_string(),
            })?;
        let my_roster_id = rosters[my_index].roster_id;

        let owner_names = users
            .into_iter()
            .filter_map(|u| {
                let name = u.display_name.or(u.username)?;
                Some((u.user_id, name))
            })
            .collect();

        Ok(Self {
            league_id: league_id.to_string(),
            league_name,
            my_roster_id,
            my_index,
            rosters,
            owner_names,
        })
    }

    pub fn my_roster_id(&self) -> RosterId {
        self.my_roster_id
    }

    pub fn my_roster(&self) -> &Roster {
        &self.rosters[self.my_index]
    }

    pub fn rosters(&self) -> &[Roster] {
        &self.rosters
    }

    /// Every roster except mine, in league order
    pub fn other_rosters(&self) -> impl Iterator<Item = &Roster> {
        self.rosters.iter().filter(move |r| r.roster_id != self.my_roster_id)
    }

    pub fn roster(&self, roster_id: RosterId) -> Option<&Roster> {
        self.rosters.iter().find(|r| r.roster_id == roster_id)
    }

    /// Owner display name for a roster, "Unknown" for orphans
    pub fn owner_name(&self, roster_id: RosterId) -> &str {
        self.roster(roster_id)
            .and_then(|r| self.owner_names.get(&r.owner_id))
            .map(String::as_str)
            .unwrap_or(UNKNOWN_OWNER)
    }

    /// Find a roster by owner display name (case-insensitive) or roster id
    pub fn roster_by_owner_name(&self, name: &str) -> Option<&Roster> {
        let wanted = name.trim();
        self.rosters
            .iter()
            .find(|r| {
                self.owner_names
                    .get(&r.owner_id)
                    .is_some_and(|owner| owner.eq_ignore_ascii_case(wanted))
            })
            .or_else(|| wanted.parse::<RosterId>().ok().and_then(|id| self.roster(id)))
    }

    /// The roster currently holding a player
    pub fn roster_holding(&self, player_id: &PlayerId) -> Option<&Roster> {
        self.rosters.iter().find(|r| r.contains(player_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts() -> (Vec<SleeperRoster>, Vec<SleeperUser>) {
        let rosters = serde_json::from_str(
            r#"[
                {"roster_id": 1, "owner_id": "u1", "players": ["p1", "p2"]},
                {"roster_id": 2, "owner_id": "u2", "players": ["p3"]},
                {"roster_id": 3, "owner_id": null, "players": null}
            ]"#,
        )
        .unwrap();
        let users = serde_json::from_str(
            r#"[
                {"user_id": "u1", "display_name": "Me"},
                {"user_id": "u2", "display_name": "Rival", "username": "rival99"}
            ]"#,
        )
        .unwrap();
        (rosters, users)
    }

    #[test]
    fn test_from_parts() {
        let (rosters, users) = parts();
        let snapshot =
            LeagueSnapshot::from_parts("u1", "L1", "Test League".to_string(), rosters, users)
                .unwrap();

        assert_eq!(snapshot.my_roster_id(), 1);
        assert_eq!(snapshot.my_roster().len(), 2);
        let others: Vec<RosterId> = snapshot.other_rosters().map(|r| r.roster_id).collect();
        assert_eq!(others, vec![2, 3]);

        assert_eq!(snapshot.owner_name(2), "Rival");
        assert_eq!(snapshot.owner_name(3), "Unknown");
        assert_eq!(snapshot.owner_name(99), "Unknown");
    }

    #[test]
    fn test_lookups() {
        let (rosters, users) = parts();
        let snapshot =
            LeagueSnapshot::from_parts("u1", "L1", "Test League".to_string(), rosters, users)
                .unwrap();

        assert_eq!(snapshot.roster_by_owner_name("rival").map(|r| r.roster_id), Some(2));
        assert_eq!(snapshot.roster_by_owner_name("3").map(|r| r.roster_id), Some(3));
        assert!(snapshot.roster_by_owner_name("nobody").is_none());

        assert_eq!(snapshot.roster_holding(&PlayerId::from("p3")).map(|r| r.roster_id), Some(2));
        assert!(snapshot.roster_holding(&PlayerId::from("p9")).is_none());
    }

    #[test]
    fn test_user_without_roster() {
        let (rosters, users) = parts();
        let result = LeagueSnapshot::from_parts("u9", "L1", "Test".to_string(), rosters, users);
        assert!(matches!(result, Err(LeagueDataError::RosterNotFound { .. })));
    }

    #[test]
    fn test_load_for_league_starts_with_user() {
        let config = crate::LeagueDataConfig {
            sleeper_api_base_url: "http://127.0.0.1:9".to_string(),
            request_timeout_secs: 2,
            ..Default::default()
        };
        let client = SleeperClient::new(&config).unwrap();
        let league: SleeperLeague =
            serde_json::from_str(r#"{"league_id": "L1", "name": "Test League"}"#).unwrap();

        let result = tokio_test::block_on(LeagueSnapshot::load_for_league(&client, "me", league));
        assert!(matches!(result, Err(LeagueDataError::Http(_))));
    }
}

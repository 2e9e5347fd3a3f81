use crate::sleeper::SleeperLeague;
use crate::LeagueDataError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Sleeper's `settings.type` value for dynasty leagues
const SLEEPER_DYNASTY_TYPE: u64 = 2;

/// Scoring and roster parameters that select a valuation table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeagueFormat {
    pub dynasty: bool,
    pub num_qbs: u32,
    pub num_teams: u32,
    /// Points per reception
    pub ppr: f64,
}

impl LeagueFormat {
    /// 12-team, 1-QB, full-PPR dynasty league
    pub fn dynasty() -> Self {
        Self { dynasty: true, num_qbs: 1, num_teams: 12, ppr: 1.0 }
    }

    /// 12-team, 1-QB, full-PPR redraft league
    pub fn redraft() -> Self {
        Self { dynasty: false, ..Self::dynasty() }
    }

    pub fn label(&self) -> &'static str {
        if self.dynasty {
            "Dynasty"
        } else {
            "Redraft"
        }
    }

    /// Query string for FantasyCalc's `values/current`
    pub fn query(&self) -> String {
        format!(
            "isDynasty={}&numQbs={}&numTeams={}&ppr={}",
            self.dynasty, self.num_qbs, self.num_teams, self.ppr
        )
    }

    /// Read the format from a league's own settings
    ///
    /// Superflex or multiple QB slots count as 2 QBs; a missing reception
    /// score means standard (0 PPR).
    pub fn infer_from(league: &SleeperLeague) -> Self {
        let dynasty = league.settings.get("type").and_then(|v| v.as_u64())
            == Some(SLEEPER_DYNASTY_TYPE);

        let qb_slots =
            league.roster_positions.iter().filter(|p| p.as_str() == "QB").count() as u32;
        let superflex = league.roster_positions.iter().any(|p| p.as_str() == "SUPER_FLEX");
        let num_qbs = if superflex || qb_slots >= 2 { 2 } else { 1 };

        let num_teams = league
            .total_rosters
            .or_else(|| {
                league.settings.get("num_teams").and_then(|v| v.as_u64()).map(|n| n as u32)
            })
            .unwrap_or(12);

        let ppr = league.scoring_settings.get("rec").and_then(|v| v.as_f64()).unwrap_or(0.0);

        Self { dynasty, num_qbs, num_teams, ppr }
    }
}

impl Default for LeagueFormat {
    fn default() -> Self {
        Self::dynasty()
    }
}

impl FromStr for LeagueFormat {
    type Err = LeagueDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dynasty" => Ok(Self::dynasty()),
            "redraft" => Ok(Self::redraft()),
            other => Err(LeagueDataError::UnknownFormat(other.to_string())),
        }
    }
}

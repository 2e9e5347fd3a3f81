//! League Data - Sleeper and FantasyCalc loading
//!
//! Fetches the read-only snapshots the trade engine searches over: league
//! rosters and owners from Sleeper, player metadata from Sleeper, and trade
//! values from FantasyCalc for a given league format. No retries or caching.

pub mod config;
pub mod error;
pub mod fantasycalc;
pub mod format;
pub mod sleeper;
pub mod snapshot;

pub use config::LeagueDataConfig;
pub use error::LeagueDataError;
pub use fantasycalc::FantasyCalcClient;
pub use format::LeagueFormat;
pub use sleeper::{SleeperClient, SleeperLeague, SleeperPlayer, SleeperRoster, SleeperUser};
pub use snapshot::LeagueSnapshot;

//! Error types for league data loading

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LeagueDataError {
    #[error("Sleeper API error: {message}")]
    SleeperApi { message: String },

    #[error("FantasyCalc API error: {message}")]
    FantasyCalcApi { message: String },

    #[error("Sleeper user not found: {username}")]
    UserNotFound { username: String },

    #[error("League not found: {league_id}")]
    LeagueNotFound { league_id: String },

    #[error("User {user_id} has no roster in league {league_id}")]
    RosterNotFound { user_id: String, league_id: String },

    #[error("Unknown league format: {0} (expected dynasty or redraft)")]
    UnknownFormat(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

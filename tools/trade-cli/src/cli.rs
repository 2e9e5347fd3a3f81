//! Command-line arguments

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use trade_engine::ConsolidationShape;

/// Fair trade finder for Sleeper fantasy football leagues
#[derive(Parser, Debug)]
#[command(name = "trade-cli")]
#[command(about = "Find fair fantasy football trades in a Sleeper league")]
#[command(version)]
pub struct Cli {
    /// Sleeper username (or user ID)
    #[arg(long, env = "SLEEPER_USERNAME", default_value = "")]
    pub username: String,

    /// Sleeper league ID (the number after /leagues/ in the league URL)
    #[arg(long, env = "SLEEPER_LEAGUE_ID", default_value = "")]
    pub league_id: String,

    /// Valuation format
    #[arg(long, value_enum, default_value_t = FormatArg::Dynasty)]
    pub format: FormatArg,

    /// Read QB count, team count and PPR from the league's settings
    #[arg(long)]
    pub infer_format: bool,

    /// Starting QBs (2 for superflex)
    #[arg(long)]
    pub num_qbs: Option<u32>,

    /// Teams in the league
    #[arg(long)]
    pub num_teams: Option<u32>,

    /// Points per reception
    #[arg(long)]
    pub ppr: Option<f64>,

    /// Fairness threshold, e.g. 0.15 for 15%
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Search config TOML (otherwise TRADE_* environment variables)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Cached Sleeper player dump; fetched and written when missing
    #[arg(long)]
    pub players_file: Option<PathBuf>,

    /// Spread searches across threads
    #[arg(long)]
    pub parallel: bool,

    /// Print trades as JSON
    #[arg(long)]
    pub json: bool,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Log format: text, pretty or json
    #[arg(long, default_value = "text")]
    pub log_format: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fair trades for one player on another roster
    Target {
        /// Player name or Sleeper ID
        player: String,
    },

    /// Fair trades that gain value against one team
    Improve {
        /// Owner display name or roster ID
        opponent: String,
    },

    /// Fair trades giving more players than received
    Consolidate {
        /// Owner display name or roster ID
        opponent: String,

        /// Only show one shape
        #[arg(long, value_enum)]
        shape: Option<ShapeArg>,
    },

    /// Fair gains receiving no more players than given
    BuyLow {
        /// Owner display name or roster ID
        opponent: String,
    },

    /// Teams that can take a hand-picked trade
    Custom {
        /// My players to give (names or IDs, comma separated)
        #[arg(long, value_delimiter = ',')]
        give: Vec<String>,

        /// Players to receive (names or IDs, comma separated)
        #[arg(long, value_delimiter = ',', required = true)]
        receive: Vec<String>,
    },

    /// Value and fairness of a hand-picked trade
    Check {
        #[arg(long, value_delimiter = ',')]
        give: Vec<String>,

        #[arg(long, value_delimiter = ',')]
        receive: Vec<String>,
    },

    /// Players on other rosters, highest value first
    Players {
        /// Filter by partial name
        #[arg(long)]
        query: Option<String>,

        #[arg(long, default_value = "25")]
        limit: usize,
    },

    /// Write the default search config to a TOML file
    InitConfig {
        path: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Dynasty,
    Redraft,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ShapeArg {
    #[value(name = "2-for-1")]
    TwoForOne,
    #[value(name = "3-for-2")]
    ThreeForTwo,
}

impl From<ShapeArg> for ConsolidationShape {
    fn from(shape: ShapeArg) -> Self {
        match shape {
            ShapeArg::TwoForOne => ConsolidationShape::TwoForOne,
            ShapeArg::ThreeForTwo => ConsolidationShape::ThreeForTwo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_custom() {
        let cli = Cli::try_parse_from([
            "trade-cli",
            "--username",
            "me",
            "--league-id",
            "123",
            "--threshold",
            "0.2",
            "custom",
            "--give",
            "4046,6794",
            "--receive",
            "Bijan Robinson",
        ])
        .unwrap();

        assert_eq!(cli.threshold, Some(0.2));
        match cli.command {
            Commands::Custom { give, receive } => {
                assert_eq!(give, vec!["4046", "6794"]);
                assert_eq!(receive, vec!["Bijan Robinson"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_consolidate_shape() {
        let cli = Cli::try_parse_from([
            "trade-cli",
            "--format",
            "redraft",
            "consolidate",
            "Rival",
            "--shape",
            "3-for-2",
        ])
        .unwrap();

        assert_eq!(cli.format, FormatArg::Redraft);
        match cli.command {
            Commands::Consolidate { opponent, shape } => {
                assert_eq!(opponent, "Rival");
                assert_eq!(shape.map(ConsolidationShape::from), Some(ConsolidationShape::ThreeForTwo));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_custom_requires_receive() {
        assert!(Cli::try_parse_from(["trade-cli", "custom", "--give", "4046"]).is_err());
    }
}

//! # Trade Engine
//!
//! Finds fantasy trades that are fair under a value-ratio rule.
//!
//! Every search follows the same pipeline: enumerate bounded subsets of each
//! roster, price them against a [`ValuationTable`], keep the pairs that pass the
//! [`FairnessRule`] plus any strategy-specific [`KeepRule`]s, then rank and cap
//! the survivors. The engine does no I/O; rosters and valuations are read-only
//! snapshots handed in by the caller.

pub mod candidate;
pub mod combinations;
pub mod config;
pub mod error;
pub mod fairness;
pub mod filter;
pub mod pricer;
pub mod ranking;
pub mod search;
pub mod types;


pub use candidate::{ConsolidationShape, TradeCandidate, TradeKind};
pub use combinations::{Combinations, SubsetSpace, Subsets};
pub use config::SearchConfig;
pub use error::{ConfigError, SearchError, ValuationError};
pub use fairness::FairnessRule;
pub use filter::{KeepRule, KeepRules, Proposal};
pub use pricer::{price, TradeValue};
pub use ranking::{filter_shape, rank_and_truncate};
pub use search::{Assessment, CancelToken, TradeFinder};
pub use types::{PlayerId, Roster, RosterId, ValuationTable};

/// Current version of the trade engine
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default fairness threshold (15% relative difference)
pub const DEFAULT_FAIRNESS_THRESHOLD: f64 = 0.15;

/// Default maximum number of players on one side of a trade
pub const DEFAULT_MAX_PLAYERS_PER_SIDE: usize = 3;

/// Default maximum number of players per side for buy-low searches
pub const DEFAULT_BUY_LOW_MAX_PLAYERS: usize = 2;

/// Default number of target-acquisition trades shown to the user
pub const DEFAULT_TARGET_DISPLAY_LIMIT: usize = 10;

/// Default cap for value-improvement results
pub const DEFAULT_IMPROVEMENT_LIMIT: usize = 20;

/// Default cap for consolidation results
pub const DEFAULT_CONSOLIDATION_LIMIT: usize = 25;

/// Default cap for buy-low results
pub const DEFAULT_BUY_LOW_LIMIT: usize = 15;

/// Default largest roster a search will enumerate
pub const DEFAULT_MAX_POOL_SIZE: usize = 64;

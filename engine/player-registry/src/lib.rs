//! Player Registry - Maps Sleeper player IDs to readable players
//!
//! The trade engine only knows opaque player IDs. This crate holds the
//! Sleeper player metadata needed to show names, positions and values next
//! to those IDs, and to turn a typed name back into an ID.

pub mod registry;
pub mod types;

pub use registry::PlayerDirectory;
pub use types::{LabeledTrade, PlayerInfo, PlayerView, RegistryError};

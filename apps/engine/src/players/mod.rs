//! Seat strategies: the `Player` contract and the built-in implementations.
//!
//! - RandomPlayer: random legal moves (seedable for tests)
//! - RuleBasedPlayer: deterministic hand-strength heuristics
//! - a static registry to build either by name

pub mod config;
mod random;
pub mod registry;
mod rule_based;
mod trait_def;

pub use config::PlayerConfig;
pub use random::RandomPlayer;
pub use registry::{by_name, registered_players, PlayerFactory};
pub use rule_based::RuleBasedPlayer;
pub use trait_def::{Player, PlayerError};

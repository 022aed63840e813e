//! How to register a strategy
//!
//! 1) Implement `Player` for your type in its module.
//! 2) Add a `PlayerFactory` entry to the static list with a stable `name` and `version`.
//! 3) Keep ordering stable; avoid side effects in constructors.
//! 4) Same config (seed included) ⇒ same behavior.

use super::config::PlayerConfig;
use super::{Player, RandomPlayer, RuleBasedPlayer};

/// Factory definition for constructing strategies.
pub struct PlayerFactory {
    pub name: &'static str,
    pub version: &'static str,
    pub make: fn(config: &PlayerConfig) -> Box<dyn Player>,
}

static PLAYER_FACTORIES: &[PlayerFactory] = &[
    PlayerFactory {
        name: RandomPlayer::NAME,
        version: RandomPlayer::VERSION,
        make: make_random_player,
    },
    PlayerFactory {
        name: RuleBasedPlayer::NAME,
        version: RuleBasedPlayer::VERSION,
        make: make_rule_based,
    },
];

/// Returns the statically registered strategies.
pub fn registered_players() -> &'static [PlayerFactory] {
    PLAYER_FACTORIES
}

/// Finds a registered strategy by its name.
pub fn by_name(name: &str) -> Option<&'static PlayerFactory> {
    registered_players()
        .iter()
        .find(|factory| factory.name == name)
}

fn make_random_player(config: &PlayerConfig) -> Box<dyn Player> {
    Box::new(RandomPlayer::new(config.seed()))
}

fn make_rule_based(config: &PlayerConfig) -> Box<dyn Player> {
    Box::new(RuleBasedPlayer::from_config(config))
}

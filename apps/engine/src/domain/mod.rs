//! Domain layer: pure game logic types and helpers.

pub mod actions;
pub mod bidding;
pub mod cards_logic;
pub mod cards_serde;
pub mod cards_types;
pub mod dealing;
pub mod deck;
pub mod hakem;
pub mod history;
pub mod player_view;
pub mod round;
pub mod rules;
pub mod scoring;
pub mod seed_derivation;
pub mod snapshot;
pub mod state;
pub mod tricks;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_player_view;
#[cfg(test)]
mod tests_props_bidding;
#[cfg(test)]
mod tests_props_consistency;
#[cfg(test)]
mod tests_props_legality;
#[cfg(test)]
mod tests_scoring;
#[cfg(test)]
mod tests_tricks;

// Re-exports for ergonomics
pub use actions::{apply_action, legal_actions, Action, ActionEffect, ActionId, NUM_ACTIONS};
pub use bidding::{Bet, BidOutcome};
pub use cards_logic::{card_beats, compare, hand_has_suit, CardOrdering, TrickContext};
pub use cards_types::{Card, GameMode, Rank, Suit, Trump};
pub use dealing::shuffle_and_deal;
pub use deck::{Deck, Hand};
pub use history::{MatchHistory, RoundSummary};
pub use player_view::{observe, CardMask, Observation};
pub use scoring::{round_payoff, PayoffKind, RoundPayoff};
pub use seed_derivation::{derive_dealing_seed, derive_match_seed, derive_player_seed};
pub use state::{CompletedTrick, GameState, Phase, RoundState, Seat, Team};

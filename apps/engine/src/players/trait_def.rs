//! Seat strategy trait definition.

use std::fmt;

use crate::domain::history::RoundSummary;
use crate::domain::player_view::Observation;
use crate::domain::rules::WIDOW_SIZE;
use crate::domain::{Card, CompletedTrick, GameMode, Suit};

/// Errors that can occur while a strategy decides.
#[derive(Debug)]
pub enum PlayerError {
    /// Strategy encountered an internal error
    Internal(String),
    /// Strategy could not produce a move for this observation
    InvalidMove(String),
}

impl fmt::Display for PlayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerError::Internal(msg) => write!(f, "player internal error: {msg}"),
            PlayerError::InvalidMove(msg) => write!(f, "player invalid move: {msg}"),
        }
    }
}

impl std::error::Error for PlayerError {}

/// Trait for seat strategies.
///
/// Implementations receive the observation of their own seat and must
/// choose a legal action. The table asks each method only in the matching
/// phase and only of the seat on turn; anything illegal is rejected by the
/// engine and the seat is asked again.
pub trait Player: Send + Sync {
    /// Choose a bid: `0` to pass, otherwise a rung above the high bid.
    ///
    /// `obs.bids` holds the auction so far and `obs.legal_bids()` the options.
    fn make_bet(&self, obs: &Observation) -> Result<u16, PlayerError>;

    /// Hakem only. `obs.widow` carries the four widow cards.
    fn decide_game_mode(&self, obs: &Observation) -> Result<GameMode, PlayerError>;

    /// Hakem only, Normal mode only. Must name a concrete suit.
    fn decide_trump(&self, obs: &Observation) -> Result<Suit, PlayerError>;

    /// Hakem only. Four distinct cards out of the sixteen now held.
    fn discard_widow(&self, obs: &Observation) -> Result<[Card; WIDOW_SIZE], PlayerError>;

    /// Card for the current trick; `obs.legal_plays()` honours follow-suit.
    fn play_card(&self, obs: &Observation) -> Result<Card, PlayerError>;

    fn notify_trick_complete(&self, _trick: &CompletedTrick) {}

    fn notify_round_complete(&self, _summary: &RoundSummary) {}
}

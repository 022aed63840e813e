//! Random player - makes random legal moves.
//!
//! [`RandomPlayer`] is the baseline implementation of [`Player`](super::Player).
//! It is also what the table falls back to when another strategy keeps
//! proposing illegal actions.

use std::sync::Mutex;

use rand::prelude::*;

use super::trait_def::{Player, PlayerError};
use crate::domain::player_view::Observation;
use crate::domain::rules::WIDOW_SIZE;
use crate::domain::{Card, GameMode, Hand, Suit};

/// Player that chooses uniformly among legal moves.
///
/// Thread-safe through `Mutex<StdRng>`; seeded instances are reproducible.
pub struct RandomPlayer {
    /// `Player` methods take `&self`, the RNG needs `&mut`.
    rng: Mutex<StdRng>,
}

impl RandomPlayer {
    pub const NAME: &'static str = "RandomPlayer";
    pub const VERSION: &'static str = "1.0.0";

    pub const fn name() -> &'static str {
        Self::NAME
    }

    pub const fn version() -> &'static str {
        Self::VERSION
    }

    /// `Some(seed)` for reproducible play, `None` for OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = if let Some(s) = seed {
            StdRng::seed_from_u64(s)
        } else {
            StdRng::from_os_rng()
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    fn lock_rng(&self) -> Result<std::sync::MutexGuard<'_, StdRng>, PlayerError> {
        self.rng
            .lock()
            .map_err(|e| PlayerError::Internal(format!("RNG lock poisoned: {e}")))
    }

    fn pick<T: Copy>(&self, options: &[T], what: &str) -> Result<T, PlayerError> {
        if options.is_empty() {
            return Err(PlayerError::InvalidMove(format!(
                "No legal {what} available"
            )));
        }
        let mut rng = self.lock_rng()?;
        options
            .choose(&mut *rng)
            .copied()
            .ok_or_else(|| PlayerError::Internal(format!("Failed to choose random {what}")))
    }
}

impl Player for RandomPlayer {
    fn make_bet(&self, obs: &Observation) -> Result<u16, PlayerError> {
        self.pick(&obs.legal_bids(), "bids")
    }

    fn decide_game_mode(&self, _obs: &Observation) -> Result<GameMode, PlayerError> {
        self.pick(&GameMode::ALL, "modes")
    }

    fn decide_trump(&self, _obs: &Observation) -> Result<Suit, PlayerError> {
        self.pick(&Suit::ALL, "suits")
    }

    /// Four random cards, drawn one suit at a time.
    fn discard_widow(&self, obs: &Observation) -> Result<[Card; WIDOW_SIZE], PlayerError> {
        let mut hand: Hand = obs.hand.iter().copied().collect();
        if hand.len() < WIDOW_SIZE {
            return Err(PlayerError::InvalidMove(format!(
                "Hand of {} cannot spare {WIDOW_SIZE} discards",
                hand.len()
            )));
        }
        let mut rng = self.lock_rng()?;
        let mut picked = Vec::with_capacity(WIDOW_SIZE);
        while picked.len() < WIDOW_SIZE {
            let held: Vec<Suit> = Suit::ALL
                .into_iter()
                .filter(|&s| hand.has_suit(s))
                .collect();
            let suit = held
                .choose(&mut *rng)
                .copied()
                .ok_or_else(|| PlayerError::Internal("Hand ran out while discarding".into()))?;
            if let Some(card) = hand.pop_random_from_suit(suit, &mut *rng) {
                picked.push(card);
            }
        }
        picked
            .try_into()
            .map_err(|_| PlayerError::Internal("Discard selection has the wrong size".into()))
    }

    fn play_card(&self, obs: &Observation) -> Result<Card, PlayerError> {
        self.pick(&obs.legal_plays(), "plays")
    }
}

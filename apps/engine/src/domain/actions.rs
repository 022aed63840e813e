//! Typed actions, their flat ids, and the single dispatch point that applies
//! an action to the game state.
//!
//! Flat id layout (75 ids):
//!
//! | ids      | meaning                                   |
//! |----------|-------------------------------------------|
//! | `0..52`  | card id: widow discard or play, by phase  |
//! | `52..67` | bid: pass, then 100, 105, .., 165         |
//! | `67..71` | game mode: Normal, Saras, Naras, AceNaras |
//! | `71..75` | trump suit: Diamonds, Clubs, Hearts, Spades |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::bidding::{legal_bids, place_bid, BidOutcome};
use crate::domain::cards_types::DECK_SIZE;
use crate::domain::hakem::{choose_game_mode, choose_trump, discard_card};
use crate::domain::rules::{is_ladder_bid, BID_STEP, MIN_BID, PASS};
use crate::domain::state::{GameState, Phase, Seat};
use crate::domain::tricks::{legal_moves, play_card, PlayCardResult};
use crate::domain::{Card, GameMode, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

pub const NUM_ACTIONS: u8 = 75;
const BID_BASE: u8 = DECK_SIZE as u8;
const MODE_BASE: u8 = BID_BASE + 15;
const TRUMP_BASE: u8 = MODE_BASE + 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(pub u8);

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Action {
    /// `0` passes.
    Bid(u16),
    ChooseMode(GameMode),
    ChooseTrump(Suit),
    Discard(Card),
    Play(Card),
}

impl Action {
    pub fn id(self) -> Result<ActionId, DomainError> {
        let raw = match self {
            Action::Bid(PASS) => BID_BASE,
            Action::Bid(score) if is_ladder_bid(score) => {
                BID_BASE + 1 + ((score - MIN_BID) / BID_STEP) as u8
            }
            Action::Bid(score) => {
                return Err(DomainError::validation(
                    ValidationKind::InvalidBid,
                    format!("Bid {score} has no action id"),
                ));
            }
            Action::ChooseMode(mode) => MODE_BASE + mode.index(),
            Action::ChooseTrump(suit) => TRUMP_BASE + suit.index(),
            Action::Discard(card) | Action::Play(card) => card.id(),
        };
        Ok(ActionId(raw))
    }

    /// Read a flat id in the context of `phase`; card ids mean a discard
    /// while widowing and a play otherwise.
    pub fn decode(id: ActionId, phase: Phase) -> Result<Action, DomainError> {
        let raw = id.0;
        let bad = |why: &str| {
            DomainError::validation(ValidationKind::InvalidActionId, format!("{id}: {why}"))
        };
        match raw {
            r if r < BID_BASE => {
                let card = Card::from_id(r)?;
                match phase {
                    Phase::Widowing => Ok(Action::Discard(card)),
                    _ => Ok(Action::Play(card)),
                }
            }
            BID_BASE => Ok(Action::Bid(PASS)),
            r if r < MODE_BASE => Ok(Action::Bid(MIN_BID + (r - BID_BASE - 1) as u16 * BID_STEP)),
            r if r < TRUMP_BASE => GameMode::from_index(r - MODE_BASE)
                .map(Action::ChooseMode)
                .ok_or_else(|| bad("no such mode")),
            r if r < NUM_ACTIONS => Suit::from_index(r - TRUMP_BASE)
                .map(Action::ChooseTrump)
                .ok_or_else(|| bad("no such suit")),
            _ => Err(bad("outside the action space")),
        }
    }
}

/// What applying an action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionEffect {
    Bid(BidOutcome),
    ModeChosen,
    TrumpChosen,
    Discarded,
    Played(PlayCardResult),
}

/// Seat expected to act next, `None` when only the engine can move.
pub fn acting_seat(state: &GameState) -> Option<Seat> {
    match state.phase {
        Phase::Bidding => state.round.auction.to_act(),
        Phase::ChoosingMode | Phase::ChoosingTrump | Phase::Widowing => state.round.hakem,
        Phase::Playing { .. } => state.turn,
        Phase::Ready | Phase::RoundDone | Phase::GameOver => None,
    }
}

/// Every action `who` may take now. Empty for seats not on turn.
pub fn legal_actions(state: &GameState, who: Seat) -> Vec<Action> {
    if acting_seat(state) != Some(who) {
        return Vec::new();
    }
    match state.phase {
        Phase::Bidding => legal_bids(state, who)
            .into_iter()
            .map(Action::Bid)
            .collect(),
        Phase::ChoosingMode => GameMode::ALL.into_iter().map(Action::ChooseMode).collect(),
        Phase::ChoosingTrump => Suit::ALL.into_iter().map(Action::ChooseTrump).collect(),
        Phase::Widowing => {
            let hand = &state.hands[who as usize];
            hand.iter().map(Action::Discard).collect()
        }
        Phase::Playing { .. } => legal_moves(state, who)
            .into_iter()
            .map(Action::Play)
            .collect(),
        Phase::Ready | Phase::RoundDone | Phase::GameOver => Vec::new(),
    }
}

/// Flat ids of [`legal_actions`], ascending.
pub fn legal_action_ids(state: &GameState, who: Seat) -> Vec<ActionId> {
    let mut ids: Vec<ActionId> = legal_actions(state, who)
        .into_iter()
        .filter_map(|a| a.id().ok())
        .collect();
    ids.sort();
    ids
}

/// Apply `action` for `who`. Rejections leave the state untouched.
pub fn apply_action(
    state: &mut GameState,
    who: Seat,
    action: Action,
) -> Result<ActionEffect, DomainError> {
    match action {
        Action::Bid(score) => place_bid(state, who, score).map(ActionEffect::Bid),
        Action::ChooseMode(mode) => {
            choose_game_mode(state, who, mode).map(|_| ActionEffect::ModeChosen)
        }
        Action::ChooseTrump(suit) => {
            choose_trump(state, who, suit).map(|_| ActionEffect::TrumpChosen)
        }
        Action::Discard(card) => discard_card(state, who, card).map(|_| ActionEffect::Discarded),
        Action::Play(card) => play_card(state, who, card).map(ActionEffect::Played),
    }
}

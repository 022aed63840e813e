//! The hakem's decisions between the auction and the first trick: ranking
//! mode, trump, and the four-card discard.

use tracing::debug;

use crate::domain::rules::{HAND_SIZE, WIDOW_SIZE};
use crate::domain::state::{check_card_conservation, require_hakem, GameState, Phase, Seat, Team};
use crate::domain::{Card, GameMode, Suit, Trump};
use crate::errors::domain::{DomainError, ValidationKind};

fn require_phase(state: &GameState, phase: Phase) -> Result<(), DomainError> {
    if state.phase != phase {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("Expected {phase:?}, in {:?}", state.phase),
        ));
    }
    Ok(())
}

fn require_is_hakem(state: &GameState, who: Seat, ctx: &'static str) -> Result<Seat, DomainError> {
    let hakem = require_hakem(state, ctx)?;
    if hakem != who {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("Only the hakem (seat {hakem}) may act"),
        ));
    }
    Ok(hakem)
}

/// Set the round's mode and hand the widow to the hakem.
///
/// Normal mode moves on to trump selection; every other mode has no trump
/// and goes straight to the discard.
pub fn choose_game_mode(
    state: &mut GameState,
    who: Seat,
    mode: GameMode,
) -> Result<(), DomainError> {
    require_phase(state, Phase::ChoosingMode)?;
    let hakem = require_is_hakem(state, who, "choose_game_mode")?;
    if state.round.widow.len() != WIDOW_SIZE {
        return Err(DomainError::invariant(format!(
            "widow holds {} cards",
            state.round.widow.len()
        )));
    }

    let widow: Vec<Card> = state.round.widow.drain(..).collect();
    state.hands[hakem as usize].extend(widow);
    state.round.mode = Some(mode);

    if mode.has_trump() {
        state.phase = Phase::ChoosingTrump;
    } else {
        state.round.trump = Trump::NoTrump;
        state.phase = Phase::Widowing;
    }
    debug!(hakem, ?mode, "game mode chosen");
    Ok(())
}

pub fn choose_trump(state: &mut GameState, who: Seat, suit: Suit) -> Result<(), DomainError> {
    require_phase(state, Phase::ChoosingTrump)?;
    let hakem = require_is_hakem(state, who, "choose_trump")?;
    state.round.trump = Trump::from(suit);
    state.phase = Phase::Widowing;
    debug!(hakem, ?suit, "trump chosen");
    Ok(())
}

/// Discard one card from the hakem's hand onto the hakem team's pile.
/// The fourth discard opens play with the hakem leading.
pub fn discard_card(state: &mut GameState, who: Seat, card: Card) -> Result<(), DomainError> {
    require_phase(state, Phase::Widowing)?;
    let hakem = require_is_hakem(state, who, "discard_card")?;

    let expected_len = HAND_SIZE + WIDOW_SIZE - state.round.discards.len();
    if state.hands[hakem as usize].len() != expected_len {
        return Err(DomainError::invariant(format!(
            "hakem holds {} cards while discarding, expected {expected_len}",
            state.hands[hakem as usize].len()
        )));
    }

    let card = state.hands[hakem as usize].pop_card(card)?;
    state.round.piles[Team::of(hakem).index()].push(card);
    state.round.discards.push(card);
    debug!(hakem, %card, "discarded");

    if state.round.discards.len() == WIDOW_SIZE {
        state.phase = Phase::Playing { trick_no: 1 };
        state.turn = Some(hakem);
        state.leader = Some(hakem);
        check_card_conservation(state)?;
    }
    Ok(())
}

/// Discard all four cards at once. The set is validated up front so a bad
/// selection changes nothing.
pub fn discard_widow(
    state: &mut GameState,
    who: Seat,
    cards: [Card; WIDOW_SIZE],
) -> Result<(), DomainError> {
    require_phase(state, Phase::Widowing)?;
    let hakem = require_is_hakem(state, who, "discard_widow")?;
    if !state.round.discards.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::InvalidDiscard,
            "Discarding has already started",
        ));
    }
    for (i, card) in cards.iter().enumerate() {
        if cards[..i].contains(card) {
            return Err(DomainError::validation(
                ValidationKind::InvalidDiscard,
                format!("{card} discarded twice"),
            ));
        }
        if !state.hands[hakem as usize].contains(*card) {
            return Err(DomainError::validation(
                ValidationKind::CardNotInHand,
                format!("{card} not in hand"),
            ));
        }
    }
    for card in cards {
        discard_card(state, who, card)?;
    }
    Ok(())
}

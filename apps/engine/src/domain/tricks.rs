use tracing::debug;

use crate::domain::cards_logic::{compare, CardOrdering, TrickContext};
use crate::domain::rules::{PLAYERS, TRICKS_PER_ROUND};
use crate::domain::state::{
    check_card_conservation, next_player, require_mode, require_turn, CompletedTrick, GameState,
    Phase, RoundState, Seat, Team,
};
use crate::domain::Card;
use crate::errors::domain::{DomainError, ValidationKind};

/// Result of playing a card, describing what state changes occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayCardResult {
    /// The finished trick, when this card was the fourth.
    pub completed: Option<CompletedTrick>,
    /// Trick number after this play (may have incremented if trick completed).
    pub trick_no_after: u8,
    /// Phase transitioned to, if any (None means still playing).
    pub phase_transitioned: Option<Phase>,
}

/// Compute legal cards the player may play, independent of turn enforcement.
pub fn legal_moves(state: &GameState, who: Seat) -> Vec<Card> {
    let Phase::Playing { .. } = state.phase else {
        return Vec::new();
    };

    let hand = &state.hands[who as usize];
    if let Some(lead) = state.round.trick_lead {
        if hand.has_suit(lead) {
            return hand.suit_cards(lead).to_vec();
        }
    }
    hand.to_vec()
}

/// Play a card into the current trick, enforcing turn, suit-following, and phase.
pub fn play_card(
    state: &mut GameState,
    who: Seat,
    card: Card,
) -> Result<PlayCardResult, DomainError> {
    let Phase::Playing {
        trick_no: trick_no_before,
    } = state.phase
    else {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Phase mismatch",
        ));
    };

    let turn = require_turn(state, "play_card")?;
    if turn != who {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("Seat {turn} is to play, not {who}"),
        ));
    }

    if !state.hands[who as usize].contains(card) {
        return Err(DomainError::validation(
            ValidationKind::CardNotInHand,
            format!("{card} not in hand"),
        ));
    }

    if !legal_moves(state, who).contains(&card) {
        return Err(DomainError::validation(
            ValidationKind::MustFollowSuit,
            "Must follow suit",
        ));
    }

    // On first play, set lead + leader
    if state.round.trick_plays.is_empty() {
        state.round.trick_lead = Some(card.suit);
        state.leader = Some(who);
    }

    let played = state.hands[who as usize].pop_card(card)?;
    state.round.trick_plays.push((who, played));
    state.turn = Some(next_player(who));
    debug!(seat = who, %played, trick_no = trick_no_before, "card played");

    let mut result = PlayCardResult {
        completed: None,
        trick_no_after: trick_no_before,
        phase_transitioned: None,
    };

    if state.round.trick_plays.len() < PLAYERS {
        return Ok(result);
    }

    let winner = resolve_current_trick(&state.round)?
        .ok_or_else(|| DomainError::invariant("complete trick without a winner"))?;
    let leader = state
        .leader
        .ok_or_else(|| DomainError::invariant("leader must be set (play_card)"))?;
    let plays = std::mem::take(&mut state.round.trick_plays);
    let pile = &mut state.round.piles[Team::of(winner).index()];
    pile.extend(plays.iter().map(|&(_, c)| c));

    let completed = CompletedTrick {
        trick_no: trick_no_before,
        leader,
        plays,
        winner,
    };
    state.round.tricks.push(completed.clone());
    state.round.trick_lead = None;
    state.leader = Some(winner);
    state.turn = Some(winner);
    result.completed = Some(completed);

    if state.round.tricks.len() > TRICKS_PER_ROUND as usize {
        return Err(DomainError::invariant(format!(
            "{} tricks recorded in one round",
            state.round.tricks.len()
        )));
    }

    let next_trick_no = trick_no_before.saturating_add(1);
    result.trick_no_after = next_trick_no;

    if next_trick_no > TRICKS_PER_ROUND {
        if state.hands.iter().any(|h| !h.is_empty()) {
            return Err(DomainError::invariant(
                "cards left in hand after the last trick",
            ));
        }
        state.phase = Phase::RoundDone;
        state.turn = None;
        state.leader = None;
        result.phase_transitioned = Some(Phase::RoundDone);
        check_card_conservation(state)?;
        return Ok(result);
    }

    state.phase = Phase::Playing {
        trick_no: next_trick_no,
    };
    Ok(result)
}

/// Resolve the current trick winner if complete.
///
/// The best card so far is challenged by each later card in play order and
/// only replaced when the challenger compares strictly greater, so an
/// off-suit, non-trump card can never take the trick.
pub fn resolve_current_trick(round: &RoundState) -> Result<Option<Seat>, DomainError> {
    if round.trick_plays.len() < PLAYERS {
        return Ok(None);
    }
    if round.trick_plays.len() > PLAYERS {
        return Err(DomainError::invariant(format!(
            "trick holds {} cards",
            round.trick_plays.len()
        )));
    }
    let mode = round
        .mode
        .ok_or_else(|| DomainError::invariant("game mode must be set (resolve_current_trick)"))?;
    let ctx = TrickContext::new(mode, round.trump, round.trick_lead);
    winning_play(&round.trick_plays, ctx).map(Some)
}

/// Seat holding the best of `plays` under `ctx`.
pub fn winning_play(plays: &[(Seat, Card)], ctx: TrickContext) -> Result<Seat, DomainError> {
    let Some(&(first_seat, first_card)) = plays.first() else {
        return Err(DomainError::invariant("empty trick"));
    };
    let mut best = (first_seat, first_card);
    for &(seat, card) in &plays[1..] {
        if compare(card, best.1, ctx)? == CardOrdering::Greater {
            best = (seat, card);
        }
    }
    Ok(best.0)
}

/// Seat currently holding the trick, `None` before the first card.
pub fn current_trick_winner(state: &GameState) -> Result<Option<Seat>, DomainError> {
    if state.round.trick_plays.is_empty() {
        return Ok(None);
    }
    let mode = require_mode(state, "current_trick_winner")?;
    let ctx = TrickContext::new(mode, state.round.trump, state.round.trick_lead);
    winning_play(&state.round.trick_plays, ctx).map(Some)
}

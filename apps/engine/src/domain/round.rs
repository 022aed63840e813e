//! Round lifecycle: dealing into a fresh round, throwing in a deal after an
//! aborted auction, and gathering the cards back once a round is scored.

use tracing::debug;

use crate::domain::bidding::Auction;
use crate::domain::dealing::shuffle_and_deal;
use crate::domain::seed_derivation::derive_dealing_seed;
use crate::domain::state::{check_card_conservation, next_player, GameState, Phase, RoundState};
use crate::errors::domain::{DomainError, ValidationKind};

/// Deal the current round and open the auction. Only valid in `Ready`.
pub fn start_round(state: &mut GameState) -> Result<(), DomainError> {
    if state.phase != Phase::Ready {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Round can only start from Ready",
        ));
    }
    deal_current_round(state)
}

fn deal_current_round(state: &mut GameState) -> Result<(), DomainError> {
    let round = &state.round;
    let seed = derive_dealing_seed(state.match_seed, round.round_no, round.deal_attempt);
    let first_hand = round.first_hand;

    let deal = shuffle_and_deal(&mut state.deck, first_hand, seed)?;
    state.hands = deal.hands;
    state.round.widow = deal.widow;
    state.round.auction = Auction::new(first_hand);
    state.phase = Phase::Bidding;
    state.turn = Some(first_hand);
    state.leader = None;

    debug!(
        round_no = state.round.round_no,
        attempt = state.round.deal_attempt,
        first_hand,
        "dealt"
    );
    check_card_conservation(state)
}

/// Throw the hands in after three opening passes and deal again with the
/// first hand moved one seat clockwise. The round number is kept.
pub fn redeal_after_restart(state: &mut GameState) -> Result<(), DomainError> {
    for hand in state.hands.iter_mut() {
        state.deck.extend(hand.take_all());
    }
    state.deck.extend(state.round.widow.drain(..));

    let round_no = state.round.round_no;
    let attempt = state.round.deal_attempt + 1;
    let first_hand = next_player(state.round.first_hand);
    state.round = RoundState::empty(round_no, first_hand);
    state.round.deal_attempt = attempt;

    deal_current_round(state)
}

/// Return both team piles to the deck (team one first) and set up the next
/// round with the first hand rotated. Leaves the phase to the caller.
pub fn gather_for_next_round(state: &mut GameState) -> Result<(), DomainError> {
    let [one, two] = &mut state.round.piles;
    state.deck.extend(one.take_all());
    state.deck.extend(two.take_all());

    let next_round = state.round.round_no + 1;
    let first_hand = next_player(state.round.first_hand);
    state.round = RoundState::empty(next_round, first_hand);
    state.turn = None;
    state.leader = None;

    check_card_conservation(state)
}

//! Deterministic card dealing logic.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::cards_types::{Card, DECK_SIZE};
use super::deck::{Deck, Hand};
use super::rules::{HAND_SIZE, PLAYERS, WIDOW_SIZE};
use super::state::{nth_from, Seat};
use crate::errors::domain::DomainError;

/// Hands and widow produced by one deal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    /// Indexed by seat.
    pub hands: [Hand; PLAYERS],
    pub widow: Vec<Card>,
}

/// Shuffle cards in place with a seeded ChaCha stream.
pub fn shuffle_with_seed(cards: &mut [Card], seed: u64) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    cards.shuffle(&mut rng);
}

/// Shuffle the whole deck and deal it out.
///
/// Packets go, in deck order, to `first_hand`, the next two seats
/// clockwise, the widow, and finally the fourth seat: 12 + 12 + 12 + 4 + 12.
///
/// The deck is left empty. Fails without touching it when it does not hold
/// exactly 52 cards, which catches a deck reused from a live round.
pub fn shuffle_and_deal(deck: &mut Deck, first_hand: Seat, seed: u64) -> Result<Deal, DomainError> {
    if deck.len() != DECK_SIZE {
        return Err(DomainError::invariant(format!(
            "cannot deal from {} cards, need {DECK_SIZE}",
            deck.len()
        )));
    }

    let mut cards = deck.take_all();
    shuffle_with_seed(&mut cards, seed);

    let mut hands: [Hand; PLAYERS] = Default::default();
    for n in 0..3u8 {
        let start = n as usize * HAND_SIZE;
        hands[nth_from(first_hand, n) as usize] =
            Deck::from_cards(cards[start..start + HAND_SIZE].iter().copied());
    }

    let widow_start = 3 * HAND_SIZE;
    let widow = cards[widow_start..widow_start + WIDOW_SIZE].to_vec();
    hands[nth_from(first_hand, 3) as usize] =
        Deck::from_cards(cards[widow_start + WIDOW_SIZE..].iter().copied());

    Ok(Deal { hands, widow })
}

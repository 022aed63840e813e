// Proptest generators for domain types.
// These generators ensure unique cards and valid game states for property-based testing.

use proptest::prelude::*;

use crate::domain::deck::Deck;
use crate::domain::{Card, GameMode, Rank, Seat, Suit, Trump};

pub fn suit() -> impl Strategy<Value = Suit> {
    prop::sample::select(Suit::ALL.to_vec())
}

pub fn rank() -> impl Strategy<Value = Rank> {
    prop::sample::select(Rank::ALL.to_vec())
}

pub fn mode() -> impl Strategy<Value = GameMode> {
    prop::sample::select(GameMode::ALL.to_vec())
}

pub fn card() -> impl Strategy<Value = Card> {
    (suit(), rank()).prop_map(|(suit, rank)| Card { suit, rank })
}

pub fn seat() -> impl Strategy<Value = Seat> {
    0u8..=3u8
}

/// Mode together with a trump consistent with it: a real suit for Normal,
/// `NoTrump` for everything else.
pub fn mode_and_trump() -> impl Strategy<Value = (GameMode, Trump)> {
    (mode(), suit()).prop_map(|(mode, suit)| {
        let trump = if mode.has_trump() {
            Trump::from(suit)
        } else {
            Trump::NoTrump
        };
        (mode, trump)
    })
}

/// The full deck in a random order.
pub fn shuffled_deck() -> impl Strategy<Value = Vec<Card>> {
    Just(Deck::standard().to_vec()).prop_shuffle()
}

/// `count` distinct cards.
pub fn unique_cards(count: usize) -> impl Strategy<Value = Vec<Card>> {
    shuffled_deck().prop_map(move |mut cards| {
        cards.truncate(count);
        cards
    })
}

/// Two distinct cards of the same suit.
pub fn same_suit_pair() -> impl Strategy<Value = (Card, Card)> {
    (suit(), Just(Rank::ALL.to_vec()).prop_shuffle()).prop_map(|(suit, ranks)| {
        (Card::new(suit, ranks[0]), Card::new(suit, ranks[1]))
    })
}

/// Complete trick: 4 unique cards played clockwise from a random leader,
/// under a consistent mode and trump.
/// Returns (leader, plays, mode, trump).
pub fn complete_trick() -> impl Strategy<Value = (Seat, Vec<(Seat, Card)>, GameMode, Trump)> {
    (seat(), unique_cards(4), mode_and_trump()).prop_map(|(leader, cards, (mode, trump))| {
        let plays = cards
            .into_iter()
            .enumerate()
            .map(|(i, card)| ((leader + i as u8) % 4, card))
            .collect();
        (leader, plays, mode, trump)
    })
}

/// Up to 13 cards, none of `excluded`.
pub fn hand_without_suit(excluded: Suit) -> impl Strategy<Value = Vec<Card>> {
    (shuffled_deck(), 1usize..=13).prop_map(move |(cards, count)| {
        cards
            .into_iter()
            .filter(|c| c.suit != excluded)
            .take(count)
            .collect()
    })
}

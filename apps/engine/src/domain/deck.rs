//! Suit-partitioned card collection used for the deck, seat hands and the
//! teams' won-card piles.

use rand::Rng;

use super::cards_types::{Card, Rank, Suit, DECK_SIZE};
use super::rules::POINTS_PER_TRICK;
use crate::errors::domain::{DomainError, ValidationKind};

/// Honour value of a single card: 10 for Aces and Tens, 5 for Fives.
pub const fn card_points(card: Card) -> u16 {
    match card.rank {
        Rank::Ace | Rank::Ten => 10,
        Rank::Five => 5,
        _ => 0,
    }
}

/// Cards grouped by suit, each group kept sorted by rank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    by_suit: [Vec<Card>; 4],
}

pub type Hand = Deck;

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    /// The 52-card deck, no jokers.
    pub fn standard() -> Self {
        let mut deck = Self::new();
        for suit in Suit::ALL {
            let group = &mut deck.by_suit[suit.index() as usize];
            for rank in Rank::ALL {
                group.push(Card::new(suit, rank));
            }
        }
        deck
    }

    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut deck = Self::new();
        deck.extend(cards);
        deck
    }

    pub fn len(&self) -> usize {
        self.by_suit.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_suit.iter().all(Vec::is_empty)
    }

    pub fn push(&mut self, card: Card) {
        let group = &mut self.by_suit[card.suit.index() as usize];
        let at = group.partition_point(|c| c.rank < card.rank);
        group.insert(at, card);
    }

    pub fn extend(&mut self, cards: impl IntoIterator<Item = Card>) {
        for card in cards {
            self.push(card);
        }
    }

    pub fn contains(&self, card: Card) -> bool {
        self.suit_cards(card.suit).contains(&card)
    }

    pub fn has_suit(&self, suit: Suit) -> bool {
        !self.suit_cards(suit).is_empty()
    }

    pub fn count_suit(&self, suit: Suit) -> usize {
        self.suit_cards(suit).len()
    }

    /// Cards of one suit, lowest rank first.
    pub fn suit_cards(&self, suit: Suit) -> &[Card] {
        &self.by_suit[suit.index() as usize]
    }

    /// All cards in id order.
    pub fn iter(&self) -> impl Iterator<Item = Card> + '_ {
        self.by_suit.iter().flat_map(|group| group.iter().copied())
    }

    pub fn to_vec(&self) -> Vec<Card> {
        self.iter().collect()
    }

    pub fn get_by_id(&self, id: u8) -> Option<Card> {
        let card = Card::from_id(id).ok()?;
        self.contains(card).then_some(card)
    }

    /// Remove `card`, failing when it is not held.
    pub fn pop_card(&mut self, card: Card) -> Result<Card, DomainError> {
        let group = &mut self.by_suit[card.suit.index() as usize];
        let Some(pos) = group.iter().position(|&c| c == card) else {
            return Err(DomainError::validation(
                ValidationKind::CardNotInHand,
                format!("Card {card} not found"),
            ));
        };
        Ok(group.remove(pos))
    }

    /// Remove a uniformly chosen card of `suit`, `None` when void.
    pub fn pop_random_from_suit<R: Rng + ?Sized>(
        &mut self,
        suit: Suit,
        rng: &mut R,
    ) -> Option<Card> {
        let group = &mut self.by_suit[suit.index() as usize];
        if group.is_empty() {
            return None;
        }
        let pos = rng.random_range(0..group.len());
        Some(group.remove(pos))
    }

    /// Empty the collection, returning its cards in id order.
    pub fn take_all(&mut self) -> Vec<Card> {
        let cards = self.to_vec();
        self.by_suit.iter_mut().for_each(Vec::clear);
        cards
    }

    /// 5 per complete group of four cards plus honours. Mode independent.
    pub fn score(&self) -> u16 {
        let groups = (self.len() / 4) as u16;
        groups * POINTS_PER_TRICK + self.iter().map(card_points).sum::<u16>()
    }

    /// True for the full 52 distinct cards.
    pub fn is_complete(&self) -> bool {
        self.len() == DECK_SIZE && *self == Self::standard()
    }
}

impl FromIterator<Card> for Deck {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self::from_cards(iter)
    }
}

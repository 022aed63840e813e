//! Core card-related types: Card, Rank, Suit, Trump, GameMode

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

/// Number of cards in the deck actually built and dealt (no jokers).
pub const DECK_SIZE: usize = 52;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Suit {
    Diamonds,
    Clubs,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Diamonds, Suit::Clubs, Suit::Hearts, Suit::Spades];

    /// Position in the suit-major card id layout.
    pub const fn index(self) -> u8 {
        match self {
            Suit::Diamonds => 0,
            Suit::Clubs => 1,
            Suit::Hearts => 2,
            Suit::Spades => 3,
        }
    }

    pub fn from_index(index: u8) -> Option<Suit> {
        Suit::ALL.get(index as usize).copied()
    }
}

/// Trump for a round. `NoTrump` is the "no suit chosen" sentinel: it is what
/// every non-Normal mode carries, and what a Normal round carries until the
/// hakem names a suit.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Trump {
    Diamonds,
    Clubs,
    Hearts,
    Spades,
    NoTrump,
}

impl From<Suit> for Trump {
    fn from(suit: Suit) -> Self {
        match suit {
            Suit::Diamonds => Trump::Diamonds,
            Suit::Clubs => Trump::Clubs,
            Suit::Hearts => Trump::Hearts,
            Suit::Spades => Trump::Spades,
        }
    }
}

impl TryFrom<Trump> for Suit {
    type Error = DomainError;

    fn try_from(trump: Trump) -> Result<Self, Self::Error> {
        match trump {
            Trump::Diamonds => Ok(Suit::Diamonds),
            Trump::Clubs => Ok(Suit::Clubs),
            Trump::Hearts => Ok(Suit::Hearts),
            Trump::Spades => Ok(Suit::Spades),
            Trump::NoTrump => Err(DomainError::validation(
                ValidationKind::InvalidTrump,
                "Cannot convert NoTrump to Suit",
            )),
        }
    }
}

/// Ranking family chosen by the hakem. Only `Normal` has a trump suit.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    Normal,
    Saras,
    Naras,
    AceNaras,
}

impl GameMode {
    pub const ALL: [GameMode; 4] = [
        GameMode::Normal,
        GameMode::Saras,
        GameMode::Naras,
        GameMode::AceNaras,
    ];

    pub const fn has_trump(self) -> bool {
        matches!(self, GameMode::Normal)
    }

    pub const fn index(self) -> u8 {
        match self {
            GameMode::Normal => 0,
            GameMode::Saras => 1,
            GameMode::Naras => 2,
            GameMode::AceNaras => 3,
        }
    }

    pub fn from_index(index: u8) -> Option<GameMode> {
        GameMode::ALL.get(index as usize).copied()
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Rank> {
        Rank::ALL.get(index as usize).copied()
    }

    /// Two = 1 .. Ace = 13. Used by Normal and Saras.
    pub const fn normal_strength(self) -> u8 {
        self.index() + 1
    }

    /// Fully reversed: Ace = 1 .. Two = 13.
    pub const fn naras_strength(self) -> u8 {
        13 - self.index()
    }

    /// Ace stays on top, the rest reversed: King = 1 .. Two = 12, Ace = 13.
    pub const fn ace_naras_strength(self) -> u8 {
        match self {
            Rank::Ace => 13,
            _ => 12 - self.index(),
        }
    }

    pub const fn strength(self, mode: GameMode) -> u8 {
        match mode {
            GameMode::Normal | GameMode::Saras => self.normal_strength(),
            GameMode::Naras => self.naras_strength(),
            GameMode::AceNaras => self.ace_naras_strength(),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// Stable identity in `0..52`, suit-major.
    pub const fn id(self) -> u8 {
        self.suit.index() * 13 + self.rank.index()
    }

    pub fn from_id(id: u8) -> Result<Card, DomainError> {
        let suit = Suit::from_index(id / 13);
        let rank = Rank::from_index(id % 13);
        match (suit, rank) {
            (Some(suit), Some(rank)) => Ok(Card { suit, rank }),
            _ => Err(DomainError::validation(
                ValidationKind::InvalidActionId,
                format!("Card id {id} outside 0..{DECK_SIZE}"),
            )),
        }
    }
}

// Note: Ord on Card is only for stable sorting by id.
// Never use it for trick resolution; see `cards_logic::compare`.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id().cmp(&other.id())
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

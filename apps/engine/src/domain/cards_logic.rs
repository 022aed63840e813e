//! Card game logic: checking suits in hands, comparing card strength in
//! the context of a live trick.

use serde::{Deserialize, Serialize};

use super::cards_types::{Card, GameMode, Suit, Trump};
use crate::errors::domain::DomainError;

/// Result of comparing two cards inside a trick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardOrdering {
    Greater,
    Equal,
    Less,
    /// Neither card is trump nor of the led suit, so neither can take the
    /// trick over the other. Callers keep whichever card they already hold.
    Unordered,
}

impl CardOrdering {
    pub fn reverse(self) -> Self {
        match self {
            CardOrdering::Greater => CardOrdering::Less,
            CardOrdering::Less => CardOrdering::Greater,
            other => other,
        }
    }
}

/// Everything "greater" depends on besides the two cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrickContext {
    pub mode: GameMode,
    pub trump: Trump,
    /// Suit of the first card of the trick, `None` before it is played.
    pub lead: Option<Suit>,
}

impl TrickContext {
    pub fn new(mode: GameMode, trump: Trump, lead: Option<Suit>) -> Self {
        Self { mode, trump, lead }
    }
}

pub fn hand_has_suit(hand: &[Card], suit: Suit) -> bool {
    hand.iter().any(|c| c.suit == suit)
}

/// Compare `a` against `b`.
///
/// Same suit: mode-specific rank strength decides. Different suits in
/// Normal mode: trump wins outright, then the led suit. Any other mode has
/// no trump, so only the led suit can beat an off-suit card.
///
/// Fails when two different suits meet in Normal mode before a trump suit
/// has been named.
pub fn compare(a: Card, b: Card, ctx: TrickContext) -> Result<CardOrdering, DomainError> {
    if a.suit == b.suit {
        let (sa, sb) = (a.rank.strength(ctx.mode), b.rank.strength(ctx.mode));
        return Ok(match sa.cmp(&sb) {
            std::cmp::Ordering::Greater => CardOrdering::Greater,
            std::cmp::Ordering::Equal => CardOrdering::Equal,
            std::cmp::Ordering::Less => CardOrdering::Less,
        });
    }

    if ctx.mode.has_trump() {
        let trump_suit = Suit::try_from(ctx.trump).map_err(|_| {
            DomainError::invariant(format!(
                "trump must be set before comparing {a} and {b} in Normal mode"
            ))
        })?;
        if a.suit == trump_suit {
            return Ok(CardOrdering::Greater);
        }
        if b.suit == trump_suit {
            return Ok(CardOrdering::Less);
        }
    }

    Ok(match ctx.lead {
        Some(lead) if a.suit == lead => CardOrdering::Greater,
        Some(lead) if b.suit == lead => CardOrdering::Less,
        _ => CardOrdering::Unordered,
    })
}

/// True when `challenger` takes the trick away from the current `best`.
pub fn card_beats(challenger: Card, best: Card, ctx: TrickContext) -> Result<bool, DomainError> {
    Ok(compare(challenger, best, ctx)? == CardOrdering::Greater)
}

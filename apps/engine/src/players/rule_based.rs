//! RuleBasedPlayer: a deterministic baseline that plays like a cautious
//! human partner.
//!
//! Bidding:
//! - Estimate the hand from honours held and suit length.
//! - Raise to the cheapest rung at or under the estimate, never over a partner.
//! - The third seat of an all-pass opening bids the minimum instead of
//!   throwing the deal in.
//!
//! Mode and trump:
//! - Hands heavy in low cards go Naras, ace-rich flat hands go Saras.
//! - Otherwise Normal with the longest suit as trump.
//!
//! Discards:
//! - Never trump, never the mode's top rank; short suits and low cards go first.
//!
//! Play:
//! - Partner already winning: throw the lowest card.
//! - Otherwise win with the most valuable winning card, the weakest among
//!   equals, or throw the lowest card.
//! - On lead: cash a top card, else lead low from the longest suit.

use std::cmp::Reverse;

use super::config::PlayerConfig;
use super::trait_def::{Player, PlayerError};
use crate::domain::deck::card_points;
use crate::domain::player_view::Observation;
use crate::domain::rules::{MIN_BID, PASS, RESTART_PASSES, WIDOW_SIZE};
use crate::domain::state::Team;
use crate::domain::tricks::winning_play;
use crate::domain::{card_beats, Card, GameMode, Rank, Suit, TrickContext, Trump};

/// Default allowance added to the hand estimate before bidding.
const DEFAULT_BID_MARGIN: i64 = 0;

#[derive(Clone)]
pub struct RuleBasedPlayer {
    bid_margin: i64,
}

impl RuleBasedPlayer {
    pub const NAME: &'static str = "RuleBased";
    pub const VERSION: &'static str = "1.0.0";

    pub fn new() -> Self {
        Self {
            bid_margin: DEFAULT_BID_MARGIN,
        }
    }

    /// Reads `bid_margin` (points, may be negative) from the custom fields.
    pub fn from_config(config: &PlayerConfig) -> Self {
        let bid_margin = config
            .get_custom("bid_margin")
            .and_then(|v| v.as_i64())
            .unwrap_or(DEFAULT_BID_MARGIN);
        Self { bid_margin }
    }

    // ---------- Hand evaluation ----------

    fn suit_len(cards: &[Card], suit: Suit) -> usize {
        cards.iter().filter(|c| c.suit == suit).count()
    }

    fn longest_suit(cards: &[Card]) -> Suit {
        // Ties go to the suit with more honours, then the higher suit index.
        Suit::ALL
            .into_iter()
            .max_by_key(|&s| {
                let honours: u16 = cards
                    .iter()
                    .filter(|c| c.suit == s)
                    .map(|&c| card_points(c))
                    .sum();
                (Self::suit_len(cards, s), honours, s.index())
            })
            .unwrap_or(Suit::Spades)
    }

    /// Expected points for the hand, on the bid scale.
    fn estimate(&self, hand: &[Card]) -> i64 {
        let honours: i64 = hand.iter().map(|&c| card_points(c) as i64).sum();
        let aces = hand.iter().filter(|c| c.rank == Rank::Ace).count() as i64;
        let longest = Self::suit_len(hand, Self::longest_suit(hand)) as i64;
        60 + 2 * honours + 5 * aces + 5 * (longest - 3).max(0) + self.bid_margin
    }

    fn all_known(obs: &Observation) -> Vec<Card> {
        let mut cards = obs.hand.clone();
        if let Some(widow) = &obs.widow {
            cards.extend(widow.iter().copied());
        }
        cards
    }

    fn mode_of(obs: &Observation) -> GameMode {
        obs.mode.unwrap_or(GameMode::Normal)
    }

    fn strength(card: Card, mode: GameMode) -> u8 {
        card.rank.strength(mode)
    }

    /// Lowest card by strength; point cards are given up last.
    fn lowest(cards: &[Card], mode: GameMode) -> Option<Card> {
        cards
            .iter()
            .copied()
            .min_by_key(|&c| (card_points(c), Self::strength(c, mode), c.id()))
    }
}

impl Default for RuleBasedPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for RuleBasedPlayer {
    fn make_bet(&self, obs: &Observation) -> Result<u16, PlayerError> {
        let legal = obs.legal_bids();
        if legal.is_empty() {
            return Err(PlayerError::InvalidMove("No legal bids available".into()));
        }
        if let Some(high) = obs.high_bid() {
            if Team::of(high.seat) == Team::of(obs.seat) && high.seat != obs.seat {
                return Ok(PASS);
            }
        }
        let opening_passes = obs.bids.iter().filter(|b| b.is_pass()).count();
        if obs.high_bid().is_none() && opening_passes + 1 == RESTART_PASSES {
            return Ok(MIN_BID);
        }
        let estimate = self.estimate(&obs.hand);
        let raise = legal
            .iter()
            .copied()
            .filter(|&b| b != PASS)
            .min()
            .filter(|&b| (b as i64) <= estimate);
        Ok(raise.unwrap_or(PASS))
    }

    fn decide_game_mode(&self, obs: &Observation) -> Result<GameMode, PlayerError> {
        let cards = Self::all_known(obs);
        let low = cards.iter().filter(|c| c.rank <= Rank::Five).count();
        let high = cards.iter().filter(|c| c.rank >= Rank::Queen).count();
        let aces = cards.iter().filter(|c| c.rank == Rank::Ace).count();
        let longest = Self::suit_len(&cards, Self::longest_suit(&cards));

        let mode = if low >= high + 5 {
            if aces >= 2 {
                GameMode::AceNaras
            } else {
                GameMode::Naras
            }
        } else if aces >= 3 && longest <= 5 {
            GameMode::Saras
        } else {
            GameMode::Normal
        };
        Ok(mode)
    }

    fn decide_trump(&self, obs: &Observation) -> Result<Suit, PlayerError> {
        Ok(Self::longest_suit(&Self::all_known(obs)))
    }

    fn discard_widow(&self, obs: &Observation) -> Result<[Card; WIDOW_SIZE], PlayerError> {
        let mode = Self::mode_of(obs);
        let trump = Suit::try_from(obs.trump).ok();
        let mut candidates: Vec<Card> = obs.hand.clone();
        if candidates.len() < WIDOW_SIZE {
            return Err(PlayerError::InvalidMove(format!(
                "Hand of {} cannot spare {WIDOW_SIZE} discards",
                candidates.len()
            )));
        }
        candidates.sort_by_key(|&c| {
            let keep = Some(c.suit) == trump || Self::strength(c, mode) == 13;
            (
                keep,
                Self::suit_len(&obs.hand, c.suit),
                Self::strength(c, mode),
                c.id(),
            )
        });
        candidates.truncate(WIDOW_SIZE);
        candidates
            .try_into()
            .map_err(|_| PlayerError::Internal("Discard selection has the wrong size".into()))
    }

    fn play_card(&self, obs: &Observation) -> Result<Card, PlayerError> {
        let legal = obs.legal_plays();
        let mode = Self::mode_of(obs);
        let fallback = Self::lowest(&legal, mode)
            .ok_or_else(|| PlayerError::InvalidMove("No legal plays available".into()))?;

        if obs.current_trick.is_empty() {
            // Cash a top card if one is held outside trump.
            let top = legal
                .iter()
                .copied()
                .filter(|&c| Self::strength(c, mode) == 13 && Trump::from(c.suit) != obs.trump)
                .max_by_key(|&c| (card_points(c), c.id()));
            if let Some(card) = top {
                return Ok(card);
            }
            let suit = Self::longest_suit(&legal);
            let from_suit: Vec<Card> = legal.iter().copied().filter(|c| c.suit == suit).collect();
            return Ok(Self::lowest(&from_suit, mode).unwrap_or(fallback));
        }

        let ctx = TrickContext::new(mode, obs.trump, obs.led_suit);
        let winner = winning_play(&obs.current_trick, ctx)
            .map_err(|e| PlayerError::Internal(e.to_string()))?;
        if Team::of(winner) == Team::of(obs.seat) {
            return Ok(fallback);
        }
        let best = obs
            .current_trick
            .iter()
            .find(|(s, _)| *s == winner)
            .map(|&(_, c)| c)
            .ok_or_else(|| PlayerError::Internal("Trick winner not among plays".into()))?;

        let mut winners = Vec::new();
        for &card in &legal {
            if card_beats(card, best, ctx).map_err(|e| PlayerError::Internal(e.to_string()))? {
                winners.push(card);
            }
        }
        // Bank the most points the trick allows, then spend the weakest card.
        let richest = winners
            .into_iter()
            .min_by_key(|&c| (Reverse(card_points(c)), Self::strength(c, mode), c.id()));
        Ok(richest.unwrap_or(fallback))
    }
}

//! Player view of game state - what information is visible to one seat.
//!
//! [`Observation`] is a read-only projection of [`GameState`] computed on
//! demand. It carries the seat's own hand, everything played face up, the
//! public auction and score state, and the seat's legal actions. Other
//! seats' hands never appear. The widow is only shown to the hakem, and
//! only while it is being looked at; afterwards the hakem alone sees the
//! four discards.

use serde::{Deserialize, Serialize};

use crate::domain::actions::{acting_seat, legal_action_ids, Action, ActionId};
use crate::domain::bidding::Bet;
use crate::domain::state::{CompletedTrick, GameState, Phase, Seat, Team};
use crate::domain::{Card, GameMode, Suit, Trump};

/// Bitset over card ids, bit `id` set when the card is present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardMask(pub u64);

impl CardMask {
    pub fn insert(&mut self, card: Card) {
        self.0 |= 1u64 << card.id();
    }

    pub fn contains(&self, card: Card) -> bool {
        self.0 & (1u64 << card.id()) != 0
    }

    pub fn len(&self) -> u32 {
        self.0.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn cards(&self) -> Vec<Card> {
        (0..52u8)
            .filter(|&id| self.0 & (1u64 << id) != 0)
            .filter_map(|id| Card::from_id(id).ok())
            .collect()
    }
}

impl FromIterator<Card> for CardMask {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut mask = CardMask::default();
        for card in iter {
            mask.insert(card);
        }
        mask
    }
}

/// Information visible to a seat at a decision point.
///
/// Used by [`crate::players::Player`] implementations and by the step
/// environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub seat: Seat,
    pub phase: Phase,
    pub round_no: u32,
    pub first_hand: Seat,
    /// Seat expected to act, if any.
    pub to_act: Option<Seat>,
    /// Own hand in id order.
    pub hand: Vec<Card>,
    pub hand_mask: CardMask,
    /// Every card played face up this round, including the current trick.
    pub played_mask: CardMask,
    /// Current trick so far (who, card).
    pub current_trick: Vec<(Seat, Card)>,
    pub leader: Option<Seat>,
    pub led_suit: Option<Suit>,
    /// Completed tricks this round.
    pub tricks: Vec<CompletedTrick>,
    pub hakem: Option<Seat>,
    pub bid: Option<u16>,
    pub mode: Option<GameMode>,
    pub trump: Trump,
    pub bids: Vec<Bet>,
    /// Cumulative match score per team.
    pub scores: [i32; 2],
    /// Card points from tricks won so far this round, per team. The hakem's
    /// discards are left out since only the hakem knows them.
    pub team_points: [u16; 2],
    /// Flat ids this seat may submit now.
    pub legal_actions: Vec<ActionId>,
    /// Widow cards. Hakem only, while choosing the mode.
    pub widow: Option<Vec<Card>>,
    /// Cards the hakem put down. Hakem only.
    pub discards: Option<Vec<Card>>,
}

impl Observation {
    pub fn is_my_turn(&self) -> bool {
        self.to_act == Some(self.seat)
    }

    pub fn is_hakem(&self) -> bool {
        self.hakem == Some(self.seat)
    }

    /// Legal actions decoded for the current phase.
    pub fn legal(&self) -> Vec<Action> {
        self.legal_actions
            .iter()
            .filter_map(|&id| Action::decode(id, self.phase).ok())
            .collect()
    }

    /// Legal bid values; empty outside the auction.
    pub fn legal_bids(&self) -> Vec<u16> {
        self.legal()
            .into_iter()
            .filter_map(|a| match a {
                Action::Bid(score) => Some(score),
                _ => None,
            })
            .collect()
    }

    /// Cards this seat may play; empty outside trick play.
    pub fn legal_plays(&self) -> Vec<Card> {
        self.legal()
            .into_iter()
            .filter_map(|a| match a {
                Action::Play(card) => Some(card),
                _ => None,
            })
            .collect()
    }

    pub fn high_bid(&self) -> Option<Bet> {
        self.bids.iter().rev().find(|b| !b.is_pass()).copied()
    }
}

/// Project the state onto what `seat` is allowed to see.
pub fn observe(state: &GameState, seat: Seat) -> Observation {
    let round = &state.round;
    let is_hakem = round.hakem == Some(seat);
    let hand = state.hands[seat as usize].to_vec();

    let played_mask: CardMask = round
        .tricks
        .iter()
        .flat_map(|t| t.plays.iter().map(|&(_, c)| c))
        .chain(round.trick_plays.iter().map(|&(_, c)| c))
        .collect();

    let widow = (is_hakem && state.phase == Phase::ChoosingMode).then(|| round.widow.clone());
    let discards = (is_hakem && round.mode.is_some()).then(|| round.discards.clone());

    let mut team_points = [0u16; 2];
    for trick in &round.tricks {
        team_points[Team::of(trick.winner).index()] += trick.points();
    }

    Observation {
        seat,
        phase: state.phase,
        round_no: round.round_no,
        first_hand: round.first_hand,
        to_act: acting_seat(state),
        hand_mask: hand.iter().copied().collect(),
        hand,
        played_mask,
        current_trick: round.trick_plays.clone(),
        leader: state.leader,
        led_suit: round.trick_lead,
        tricks: round.tricks.clone(),
        hakem: round.hakem,
        bid: round.bid,
        mode: round.mode,
        trump: round.trump,
        bids: round.auction.history().to_vec(),
        scores: state.scores_total,
        team_points,
        legal_actions: legal_action_ids(state, seat),
        widow,
        discards,
    }
}

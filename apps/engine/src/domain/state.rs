use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::bidding::Auction;
use crate::domain::cards_types::DECK_SIZE;
use crate::domain::deck::{Deck, Hand};
use crate::domain::rules::PLAYERS;
use crate::domain::{Card, GameMode, Suit, Trump};
use crate::errors::domain::DomainError;

pub type Seat = u8; // 0..=3

/// Partnerships sit opposite each other: seats 0 and 2, seats 1 and 3.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Team {
    One,
    Two,
}

impl Team {
    pub const fn of(seat: Seat) -> Team {
        if seat % 2 == 0 {
            Team::One
        } else {
            Team::Two
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Team::One => 0,
            Team::Two => 1,
        }
    }

    pub const fn other(self) -> Team {
        match self {
            Team::One => Team::Two,
            Team::Two => Team::One,
        }
    }

    pub const fn seats(self) -> [Seat; 2] {
        match self {
            Team::One => [0, 2],
            Team::Two => [1, 3],
        }
    }
}

/// Round progression phases.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the next deal.
    Ready,
    /// Seats bid in auction order.
    Bidding,
    /// Hakem looks at the widow and picks the ranking mode.
    ChoosingMode,
    /// Hakem names trump. Only entered in Normal mode.
    ChoosingTrump,
    /// Hakem discards four of the sixteen held cards.
    Widowing,
    /// Playing tricks within the round; `trick_no` is 1-based.
    Playing { trick_no: u8 },
    /// All twelve tricks played, scores not yet applied.
    RoundDone,
    /// Target reached; no further rounds.
    GameOver,
}

/// A finished trick as it was played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedTrick {
    pub trick_no: u8,
    pub leader: Seat,
    pub plays: Vec<(Seat, Card)>,
    pub winner: Seat,
}

impl CompletedTrick {
    /// Card points carried by this trick, including its 5 for the trick itself.
    pub fn points(&self) -> u16 {
        Deck::from_cards(self.plays.iter().map(|&(_, c)| c)).score()
    }
}

/// Per-round state, rebuilt on every deal.
#[derive(Debug, Clone)]
pub struct RoundState {
    /// 1-based round counter; restarts of the auction keep the number.
    pub round_no: u32,
    /// Seat that received the first packet and opens the auction.
    pub first_hand: Seat,
    /// Deal attempt within this round, bumped by each auction restart.
    pub deal_attempt: u32,
    pub auction: Auction,
    /// Widow while it is still set aside. Empty once merged into the hakem's hand.
    pub widow: Vec<Card>,
    pub hakem: Option<Seat>,
    /// Winning bid once the auction resolves.
    pub bid: Option<u16>,
    pub mode: Option<GameMode>,
    /// `NoTrump` until named, and for the whole round in non-Normal modes.
    pub trump: Trump,
    /// Record of the hakem's discards. The cards themselves sit in the hakem team's pile.
    pub discards: Vec<Card>,
    /// Ordered plays for the current trick (who, card).
    pub trick_plays: Vec<(Seat, Card)>,
    pub trick_lead: Option<Suit>,
    pub tricks: Vec<CompletedTrick>,
    /// Won cards per team, indexed by `Team::index`.
    pub piles: [Deck; 2],
}

impl RoundState {
    pub fn empty(round_no: u32, first_hand: Seat) -> Self {
        Self {
            round_no,
            first_hand,
            deal_attempt: 0,
            auction: Auction::new(first_hand),
            widow: Vec::new(),
            hakem: None,
            bid: None,
            mode: None,
            trump: Trump::NoTrump,
            discards: Vec::new(),
            trick_plays: Vec::with_capacity(PLAYERS),
            trick_lead: None,
            tricks: Vec::new(),
            piles: [Deck::new(), Deck::new()],
        }
    }

    pub fn tricks_won(&self, team: Team) -> usize {
        self.tricks
            .iter()
            .filter(|t| Team::of(t.winner) == team)
            .count()
    }
}

/// Entire match container, sufficient for pure domain operations.
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: Phase,
    /// Seat hands. The hakem holds sixteen between taking the widow and discarding.
    pub hands: [Hand; PLAYERS],
    /// Seat expected to act, `None` when only the engine can move.
    pub turn: Option<Seat>,
    /// Leader of the current trick (only meaningful while playing).
    pub leader: Option<Seat>,
    /// Cumulative match scores per team.
    pub scores_total: [i32; 2],
    /// Cards waiting for the next deal.
    pub deck: Deck,
    /// Base seed every dealing seed is derived from.
    pub match_seed: u64,
    pub round: RoundState,
}

impl GameState {
    /// Fresh match before the first deal.
    pub fn new(first_hand: Seat, match_seed: u64) -> Self {
        Self {
            phase: Phase::Ready,
            hands: Default::default(),
            turn: None,
            leader: None,
            scores_total: [0, 0],
            deck: Deck::standard(),
            match_seed,
            round: RoundState::empty(1, first_hand),
        }
    }

    pub fn hakem_team(&self) -> Option<Team> {
        self.round.hakem.map(Team::of)
    }

    /// Points collected so far this round, per team.
    pub fn team_points(&self) -> [u16; 2] {
        [self.round.piles[0].score(), self.round.piles[1].score()]
    }
}

/// Seat / turn math helpers (4 fixed seats: 0..=3).
///
/// Clockwise direction is positive (+1).
#[inline]
pub fn seat_offset(seat: Seat, delta: i8) -> Seat {
    let seat_i = seat as i16;
    let delta_i = delta as i16;
    ((seat_i + delta_i).rem_euclid(4)) as Seat
}

/// Returns the next player clockwise (0 → 1 → 2 → 3 → 0).
#[inline]
pub fn next_player(p: Seat) -> Seat {
    seat_offset(p, 1)
}

/// Returns the seat `n` steps clockwise from `start`.
#[inline]
pub fn nth_from(start: Seat, n: u8) -> Seat {
    seat_offset(start, n as i8)
}

/// Expected actor seat during a trick.
#[inline]
pub fn expected_actor(leader: Seat, play_count: u8) -> Seat {
    nth_from(leader, play_count)
}

pub fn require_turn(state: &GameState, ctx: &'static str) -> Result<Seat, DomainError> {
    state
        .turn
        .ok_or_else(|| DomainError::invariant(format!("turn must be set ({ctx})")))
}

pub fn require_hakem(state: &GameState, ctx: &'static str) -> Result<Seat, DomainError> {
    state
        .round
        .hakem
        .ok_or_else(|| DomainError::invariant(format!("hakem must be set ({ctx})")))
}

pub fn require_bid(state: &GameState, ctx: &'static str) -> Result<u16, DomainError> {
    state
        .round
        .bid
        .ok_or_else(|| DomainError::invariant(format!("winning bid must be set ({ctx})")))
}

pub fn require_mode(state: &GameState, ctx: &'static str) -> Result<GameMode, DomainError> {
    state
        .round
        .mode
        .ok_or_else(|| DomainError::invariant(format!("game mode must be set ({ctx})")))
}

/// Every one of the 52 cards must sit in exactly one place: a hand, the
/// widow, the current trick, a team pile, or the undealt deck.
pub fn check_card_conservation(state: &GameState) -> Result<(), DomainError> {
    let round = &state.round;
    let all = state
        .hands
        .iter()
        .flat_map(|h| h.iter())
        .chain(round.widow.iter().copied())
        .chain(round.trick_plays.iter().map(|&(_, c)| c))
        .chain(round.piles.iter().flat_map(|p| p.iter()))
        .chain(state.deck.iter());

    let mut seen: HashSet<Card> = HashSet::with_capacity(DECK_SIZE);
    for card in all {
        if !seen.insert(card) {
            return Err(DomainError::invariant(format!("card {card} held twice")));
        }
    }
    if seen.len() != DECK_SIZE {
        return Err(DomainError::invariant(format!(
            "{} cards accounted for, expected {DECK_SIZE}",
            seen.len()
        )));
    }
    Ok(())
}

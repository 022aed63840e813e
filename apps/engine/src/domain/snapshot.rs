//! Public snapshot API for observing a match without exposing hands, the
//! widow or the hakem's discards.

use serde::{Deserialize, Serialize};

use crate::domain::actions::acting_seat;
use crate::domain::bidding::Bet;
use crate::domain::rules::PLAYERS;
use crate::domain::state::{CompletedTrick, GameState, Phase, Seat, Team};
use crate::domain::{Card, GameMode, Trump};

/// Match-level header present in all snapshots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameHeader {
    pub round_no: u32,
    pub first_hand: Seat,
    pub scores_total: [i32; 2],
    /// Cards held per seat; counts only.
    pub hand_sizes: [usize; PLAYERS],
}

/// Top-level snapshot combining header and phase-specific data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub game: GameHeader,
    pub phase: PhaseSnapshot,
}

/// Adjacently tagged union of phase-specific snapshots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "data")]
pub enum PhaseSnapshot {
    Ready,
    Bidding(BiddingSnapshot),
    ChoosingMode(HakemSnapshot),
    ChoosingTrump(HakemSnapshot),
    Widowing(HakemSnapshot),
    Playing(TrickSnapshot),
    RoundDone(RoundPublic),
    GameOver,
}

/// Shared public round facts (no private cards).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundPublic {
    pub hakem: Option<Seat>,
    pub bid: Option<u16>,
    pub mode: Option<GameMode>,
    pub trump: Trump,
    pub bids: Vec<Bet>,
    pub tricks_won: [usize; 2],
    pub last_trick: Option<CompletedTrick>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BiddingSnapshot {
    pub round: RoundPublic,
    pub to_act: Option<Seat>,
    pub high_bid: Option<Bet>,
    pub active_seats: Vec<Seat>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HakemSnapshot {
    pub round: RoundPublic,
    /// Number of cards put down so far (never which ones).
    pub discarded: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrickSnapshot {
    pub round: RoundPublic,
    pub trick_no: u8,
    pub leader: Option<Seat>,
    pub current_trick: Vec<(Seat, Card)>,
    pub to_act: Option<Seat>,
}

/// Entry point: produce a snapshot of the current match state.
pub fn snapshot(state: &GameState) -> GameSnapshot {
    let game = GameHeader {
        round_no: state.round.round_no,
        first_hand: state.round.first_hand,
        scores_total: state.scores_total,
        hand_sizes: std::array::from_fn(|seat| state.hands[seat].len()),
    };

    let phase = match state.phase {
        Phase::Ready => PhaseSnapshot::Ready,
        Phase::Bidding => PhaseSnapshot::Bidding(BiddingSnapshot {
            round: build_round_public(state),
            to_act: state.round.auction.to_act(),
            high_bid: state.round.auction.high_bid(),
            active_seats: state.round.auction.active_seats().collect(),
        }),
        Phase::ChoosingMode => PhaseSnapshot::ChoosingMode(hakem_snapshot(state)),
        Phase::ChoosingTrump => PhaseSnapshot::ChoosingTrump(hakem_snapshot(state)),
        Phase::Widowing => PhaseSnapshot::Widowing(hakem_snapshot(state)),
        Phase::Playing { trick_no } => PhaseSnapshot::Playing(TrickSnapshot {
            round: build_round_public(state),
            trick_no,
            leader: state.leader,
            current_trick: state.round.trick_plays.clone(),
            to_act: acting_seat(state),
        }),
        Phase::RoundDone => PhaseSnapshot::RoundDone(build_round_public(state)),
        Phase::GameOver => PhaseSnapshot::GameOver,
    };

    GameSnapshot { game, phase }
}

fn build_round_public(state: &GameState) -> RoundPublic {
    let round = &state.round;
    RoundPublic {
        hakem: round.hakem,
        bid: round.bid,
        mode: round.mode,
        trump: round.trump,
        bids: round.auction.history().to_vec(),
        tricks_won: [round.tricks_won(Team::One), round.tricks_won(Team::Two)],
        last_trick: round.tricks.last().cloned(),
    }
}

fn hakem_snapshot(state: &GameState) -> HakemSnapshot {
    HakemSnapshot {
        round: build_round_public(state),
        discarded: state.round.discards.len(),
    }
}

//! Round payoff, match termination and the reward signal handed to learning
//! agents.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::MatchConfig;
use crate::domain::history::RoundSummary;
use crate::domain::round::gather_for_next_round;
use crate::domain::rules::{NEAR_MISS_THRESHOLD, PLAYERS, TOTAL_POINTS};
use crate::domain::state::{require_bid, require_hakem, require_mode, GameState, Phase, Seat, Team};
use crate::errors::domain::{DomainError, ValidationKind};

/// Which payoff branch a round landed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayoffKind {
    /// Hakem team took all 165 points.
    Shelem,
    /// Hakem team reached the bid.
    Made,
    /// Bid failed but the opponents stayed under 85.
    NearMiss,
    /// Bid failed and the opponents reached 85.
    Doubled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundPayoff {
    pub kind: PayoffKind,
    pub hakem_team_delta: i32,
    /// Opponents always score the points they collected.
    pub opponent_delta: i32,
}

/// Convert the round's card points and the winning bid into score deltas.
/// Branches are tried in order and the first match wins.
pub fn round_payoff(hakem_points: u16, opponent_points: u16, bid: u16) -> RoundPayoff {
    let bid_i = bid as i32;
    let (kind, hakem_team_delta) = if hakem_points == TOTAL_POINTS {
        (PayoffKind::Shelem, 2 * bid_i)
    } else if hakem_points >= bid {
        (PayoffKind::Made, bid_i)
    } else if opponent_points < NEAR_MISS_THRESHOLD {
        (PayoffKind::NearMiss, -bid_i)
    } else {
        (PayoffKind::Doubled, -2 * bid_i)
    };
    RoundPayoff {
        kind,
        hakem_team_delta,
        opponent_delta: opponent_points as i32,
    }
}

/// Per-team deltas, indexed by `Team::index`.
pub fn team_deltas(hakem_team: Team, payoff: &RoundPayoff) -> [i32; 2] {
    let mut deltas = [0; 2];
    deltas[hakem_team.index()] = payoff.hakem_team_delta;
    deltas[hakem_team.other().index()] = payoff.opponent_delta;
    deltas
}

/// Match end: a team reaches `target`, or leads by at least `target`.
/// `None` never ends on score.
pub fn is_match_over(scores: [i32; 2], target: Option<i32>) -> bool {
    let Some(target) = target else {
        return false;
    };
    scores.iter().any(|&s| s >= target) || (scores[0] - scores[1]).abs() >= target
}

/// Round-end reward for the hakem's team and the opponents.
pub fn round_rewards(kind: PayoffKind) -> (f32, f32) {
    match kind {
        PayoffKind::Shelem => (1.0, 0.0),
        PayoffKind::Made => (0.5, 0.0),
        PayoffKind::NearMiss => (-0.7, 0.5),
        PayoffKind::Doubled => (-1.0, 1.0),
    }
}

/// Round-end reward per seat.
pub fn seat_round_rewards(hakem: Seat, kind: PayoffKind) -> [f32; PLAYERS] {
    let (hakem_team, opponents) = round_rewards(kind);
    let hakem_team_id = Team::of(hakem);
    std::array::from_fn(|seat| {
        if Team::of(seat as Seat) == hakem_team_id {
            hakem_team
        } else {
            opponents
        }
    })
}

/// Per-seat reward for a finished trick: its points over 165 to the
/// winning partnership.
pub fn trick_rewards(winner: Seat, trick_points: u16) -> [f32; PLAYERS] {
    let share = trick_points as f32 / TOTAL_POINTS as f32;
    std::array::from_fn(|seat| {
        if Team::of(seat as Seat) == Team::of(winner) {
            share
        } else {
            0.0
        }
    })
}

/// Score a finished round, add it to the match totals, recycle the cards and
/// move to `Ready` or `GameOver`.
pub fn apply_round_scoring(
    state: &mut GameState,
    config: &MatchConfig,
) -> Result<RoundSummary, DomainError> {
    if state.phase != Phase::RoundDone {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Round is not finished",
        ));
    }
    let hakem = require_hakem(state, "apply_round_scoring")?;
    let bid = require_bid(state, "apply_round_scoring")?;
    let mode = require_mode(state, "apply_round_scoring")?;
    let hakem_team = Team::of(hakem);

    let points = state.team_points();
    if points[0] + points[1] != TOTAL_POINTS {
        return Err(DomainError::invariant(format!(
            "round points {} + {} do not sum to {TOTAL_POINTS}",
            points[0], points[1]
        )));
    }

    let payoff = round_payoff(
        points[hakem_team.index()],
        points[hakem_team.other().index()],
        bid,
    );
    let deltas = team_deltas(hakem_team, &payoff);
    for (total, delta) in state.scores_total.iter_mut().zip(deltas) {
        *total += delta;
    }

    let round = &state.round;
    let summary = RoundSummary {
        round_no: round.round_no,
        first_hand: round.first_hand,
        hakem,
        bid,
        mode,
        trump: round.trump,
        bids: round.auction.history().to_vec(),
        discards: round.discards.clone(),
        tricks_won: [round.tricks_won(Team::One), round.tricks_won(Team::Two)],
        team_points: points,
        payoff: payoff.kind,
        deltas,
        scores_after: state.scores_total,
    };
    info!(
        round_no = summary.round_no,
        hakem,
        bid,
        ?mode,
        team_points = ?points,
        deltas = ?deltas,
        scores = ?state.scores_total,
        "round scored"
    );

    gather_for_next_round(state)?;

    let rounds_exhausted = config.max_rounds.is_some_and(|max| summary.round_no >= max);
    if is_match_over(state.scores_total, config.target_score) || rounds_exhausted {
        state.phase = Phase::GameOver;
        info!(scores = ?state.scores_total, rounds = summary.round_no, "match over");
    } else {
        state.phase = Phase::Ready;
    }
    Ok(summary)
}

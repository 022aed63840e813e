//! Metrics collection and output for simulated matches.

use serde::Serialize;
use shelem_engine::domain::rules::PLAYERS;
use shelem_engine::domain::snapshot::GameSnapshot;
use shelem_engine::domain::{PayoffKind, RoundSummary, Team};
use shelem_engine::MatchOutcome;

use crate::types::MetricsLevel;

/// Complete match metrics for output.
#[derive(Debug, Clone, Serialize)]
pub struct GameMetrics {
    pub game_id: u32,
    pub seed: u64,
    /// Big-endian hex of `seed`, handy for grepping logs.
    pub seed_hex: String,
    pub timestamp: String,
    pub config: GameConfig,
    pub result: GameResultMetrics,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rounds: Vec<RoundMetrics>,
    pub team_metrics: Vec<TeamMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_snapshot: Option<GameSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameConfig {
    pub players: [String; PLAYERS],
    pub total_games: u32,
    pub target_score: Option<i32>,
    pub max_rounds: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameResultMetrics {
    pub final_scores: [i32; 2],
    /// `None` on a tie.
    pub winner: Option<Team>,
    pub rounds_played: usize,
    pub restarts: u32,
    pub fallbacks: [u32; PLAYERS],
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoundMetrics {
    pub round_no: u32,
    pub first_hand: u8,
    pub hakem: u8,
    pub bid: u16,
    pub mode: String,
    pub trump: String,
    /// Bets placed in the auction, passes included.
    pub auction_length: usize,
    pub tricks_won: [usize; 2],
    pub team_points: [u16; 2],
    pub payoff: PayoffKind,
    pub deltas: [i32; 2],
    pub scores_after: [i32; 2],
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamMetrics {
    pub team: Team,
    pub players: [String; 2],
    pub final_score: i32,
    /// Rounds where this team collected more card points.
    pub rounds_won: u32,
    pub contracts: ContractStats,
    pub avg_points_per_round: f64,
}

/// How a team fared when it held the contract.
#[derive(Debug, Clone, Serialize)]
pub struct ContractStats {
    pub taken: u32,
    pub made: u32,
    pub shelems: u32,
    pub doubled: u32,
    pub made_pct: f64,
    pub avg_bid: f64,
}

/// Build metrics from a finished match.
pub fn build_game_metrics(
    game_id: u32,
    config: GameConfig,
    outcome: &MatchOutcome,
    duration_ms: f64,
    level: MetricsLevel,
) -> GameMetrics {
    let timestamp = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("unknown"));

    let summaries = &outcome.history.rounds;
    let team_metrics = [Team::One, Team::Two]
        .into_iter()
        .map(|team| build_team_metrics(team, &config.players, outcome.final_scores, summaries))
        .collect();

    let detailed = level == MetricsLevel::Detailed;
    let rounds = if detailed {
        summaries.iter().map(build_round_metrics).collect()
    } else {
        Vec::new()
    };

    GameMetrics {
        game_id,
        seed: outcome.seed,
        seed_hex: hex::encode(outcome.seed.to_be_bytes()),
        timestamp,
        config,
        result: GameResultMetrics {
            final_scores: outcome.final_scores,
            winner: outcome.winner,
            rounds_played: summaries.len(),
            restarts: outcome.history.restarts,
            fallbacks: outcome.fallbacks,
            duration_ms,
        },
        rounds,
        team_metrics,
        final_snapshot: detailed.then(|| outcome.snapshot.clone()),
    }
}

fn build_round_metrics(round: &RoundSummary) -> RoundMetrics {
    RoundMetrics {
        round_no: round.round_no,
        first_hand: round.first_hand,
        hakem: round.hakem,
        bid: round.bid,
        mode: format!("{:?}", round.mode),
        trump: format!("{:?}", round.trump),
        auction_length: round.bids.len(),
        tricks_won: round.tricks_won,
        team_points: round.team_points,
        payoff: round.payoff,
        deltas: round.deltas,
        scores_after: round.scores_after,
    }
}

fn build_team_metrics(
    team: Team,
    players: &[String; PLAYERS],
    final_scores: [i32; 2],
    rounds: &[RoundSummary],
) -> TeamMetrics {
    let idx = team.index();
    let [a, b] = team.seats();

    let rounds_won = rounds
        .iter()
        .filter(|r| r.team_points[idx] > r.team_points[1 - idx])
        .count() as u32;

    let mut taken = 0u32;
    let mut made = 0u32;
    let mut shelems = 0u32;
    let mut doubled = 0u32;
    let mut bid_total = 0u64;
    for round in rounds.iter().filter(|r| r.hakem_team() == team) {
        taken += 1;
        bid_total += round.bid as u64;
        if round.bid_made() {
            made += 1;
        }
        match round.payoff {
            PayoffKind::Shelem => shelems += 1,
            PayoffKind::Doubled => doubled += 1,
            PayoffKind::Made | PayoffKind::NearMiss => {}
        }
    }

    let made_pct = if taken > 0 {
        (made as f64 / taken as f64) * 100.0
    } else {
        0.0
    };
    let avg_bid = if taken > 0 {
        bid_total as f64 / taken as f64
    } else {
        0.0
    };

    let total_points: u32 = rounds.iter().map(|r| r.team_points[idx] as u32).sum();
    let avg_points_per_round = if !rounds.is_empty() {
        total_points as f64 / rounds.len() as f64
    } else {
        0.0
    };

    TeamMetrics {
        team,
        players: [players[a as usize].clone(), players[b as usize].clone()],
        final_score: final_scores[idx],
        rounds_won,
        contracts: ContractStats {
            taken,
            made,
            shelems,
            doubled,
            made_pct,
            avg_bid,
        },
        avg_points_per_round,
    }
}

/// CSV summary row for quick analysis.
#[derive(Debug, Serialize)]
pub struct CsvSummaryRow {
    pub game_id: u32,
    pub seed: u64,
    pub winner: String,
    pub team_one_score: i32,
    pub team_two_score: i32,
    pub rounds: usize,
    pub restarts: u32,
    pub fallbacks: u32,
    pub seat0_player: String,
    pub seat1_player: String,
    pub seat2_player: String,
    pub seat3_player: String,
}

impl From<&GameMetrics> for CsvSummaryRow {
    fn from(metrics: &GameMetrics) -> Self {
        let winner = match metrics.result.winner {
            Some(Team::One) => "one",
            Some(Team::Two) => "two",
            None => "tie",
        };
        CsvSummaryRow {
            game_id: metrics.game_id,
            seed: metrics.seed,
            winner: winner.to_string(),
            team_one_score: metrics.result.final_scores[0],
            team_two_score: metrics.result.final_scores[1],
            rounds: metrics.result.rounds_played,
            restarts: metrics.result.restarts,
            fallbacks: metrics.result.fallbacks.iter().sum(),
            seat0_player: metrics.config.players[0].clone(),
            seat1_player: metrics.config.players[1].clone(),
            seat2_player: metrics.config.players[2].clone(),
            seat3_player: metrics.config.players[3].clone(),
        }
    }
}

//! Table runner: seats four [`Player`]s and drives a whole match.
//!
//! The runner is the only place that talks to strategies. It asks the seat
//! on turn for a decision, applies it, and re-asks after a rejection up to
//! `max_invalid_attempts` times. What happens next depends on
//! [`FailureMode`]: the match either fails with the seat's last reason or a
//! seeded random player decides in its place.

use rand::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{FailureMode, MatchConfig};
use crate::domain::actions::{acting_seat, apply_action, Action, ActionEffect};
use crate::domain::bidding::BidOutcome;
use crate::domain::hakem::discard_widow;
use crate::domain::history::MatchHistory;
use crate::domain::player_view::{observe, Observation};
use crate::domain::round::start_round;
use crate::domain::rules::{PLAYERS, WIDOW_SIZE};
use crate::domain::scoring::apply_round_scoring;
use crate::domain::seed_derivation::derive_player_seed;
use crate::domain::snapshot::{snapshot, GameSnapshot};
use crate::domain::state::{GameState, Phase, Seat, Team};
use crate::domain::Card;
use crate::errors::domain::DomainError;
use crate::players::{Player, PlayerError, RandomPlayer};

/// Upper bound on engine transitions in one match; a correct engine never
/// gets close.
const MAX_TRANSITIONS: usize = 1_000_000;

#[derive(Debug, Error)]
pub enum TableError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("seat {seat} could not {decision}: {source}")]
    Player {
        seat: Seat,
        decision: &'static str,
        #[source]
        source: PlayerError,
    },
    #[error("seat {seat} gave up to {decision} after {attempts} invalid attempts: {reason}")]
    TooManyInvalid {
        seat: Seat,
        decision: &'static str,
        attempts: u8,
        reason: String,
    },
}

/// Everything a finished match leaves behind.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub seed: u64,
    pub history: MatchHistory,
    pub final_scores: [i32; 2],
    /// Team ahead at the end, `None` on a tie.
    pub winner: Option<Team>,
    /// Public view of the final state.
    pub snapshot: GameSnapshot,
    /// Decisions taken by the random fallback, per seat.
    pub fallbacks: [u32; PLAYERS],
}

/// A strategy's answer for the current phase.
#[derive(Debug, Clone, Copy)]
enum Decision {
    Act(Action),
    Discard([Card; WIDOW_SIZE]),
}

pub struct Table {
    players: [Box<dyn Player>; PLAYERS],
    config: MatchConfig,
}

impl Table {
    pub fn new(
        players: [Box<dyn Player>; PLAYERS],
        config: MatchConfig,
    ) -> Result<Self, DomainError> {
        config.validate()?;
        Ok(Self { players, config })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Play one match with the configured seed, or a fresh one.
    pub fn play_match(&self) -> Result<MatchOutcome, TableError> {
        let seed = self
            .config
            .seed
            .unwrap_or_else(|| StdRng::from_os_rng().random());
        self.play_match_with_seed(seed)
    }

    pub fn play_match_with_seed(&self, seed: u64) -> Result<MatchOutcome, TableError> {
        let mut state = GameState::new(self.config.first_hand, seed);
        let mut history = MatchHistory::default();
        let fallback_players: [RandomPlayer; PLAYERS] = std::array::from_fn(|seat| {
            RandomPlayer::new(Some(derive_player_seed(seed, seat as Seat)))
        });
        let mut fallbacks = [0u32; PLAYERS];
        info!(seed, first_hand = self.config.first_hand, "match started");

        for _ in 0..MAX_TRANSITIONS {
            match state.phase {
                Phase::GameOver => {
                    let final_scores = state.scores_total;
                    let winner = history.leader();
                    info!(?final_scores, ?winner, rounds = history.rounds.len(), "match finished");
                    return Ok(MatchOutcome {
                        seed,
                        snapshot: snapshot(&state),
                        final_scores,
                        winner,
                        history,
                        fallbacks,
                    });
                }
                Phase::Ready => start_round(&mut state)?,
                Phase::RoundDone => {
                    let summary = apply_round_scoring(&mut state, &self.config)?;
                    for player in &self.players {
                        player.notify_round_complete(&summary);
                    }
                    history.push(summary);
                }
                _ => {
                    let seat = acting_seat(&state)
                        .ok_or_else(|| DomainError::invariant("no seat on turn mid-round"))?;
                    let used_fallback = self.take_turn(
                        &mut state,
                        seat,
                        &fallback_players[seat as usize],
                        &mut history,
                    )?;
                    if used_fallback {
                        fallbacks[seat as usize] += 1;
                    }
                }
            }
        }
        let detail = format!("match did not finish within {MAX_TRANSITIONS} transitions");
        Err(DomainError::invariant(detail).into())
    }

    /// Let `seat` act once. Returns whether the fallback had to decide.
    fn take_turn(
        &self,
        state: &mut GameState,
        seat: Seat,
        fallback: &RandomPlayer,
        history: &mut MatchHistory,
    ) -> Result<bool, TableError> {
        let player = self.players[seat as usize].as_ref();
        let decision_name = decision_name(state.phase);
        let fail_fast = self.config.failure_mode == FailureMode::Fail;
        let mut last_reason = String::new();

        for attempt in 1..=self.config.max_invalid_attempts {
            let obs = observe(state, seat);
            let decision = match decide(player, &obs) {
                Ok(d) => d,
                Err(PlayerError::Internal(msg)) if fail_fast => {
                    return Err(TableError::Player {
                        seat,
                        decision: decision_name,
                        source: PlayerError::Internal(msg),
                    });
                }
                Err(e) => {
                    warn!(seat, attempt, error = %e, "player failed to decide");
                    last_reason = e.to_string();
                    continue;
                }
            };
            match self.apply(state, seat, decision, history) {
                Ok(()) => return Ok(false),
                Err(e) if e.is_recoverable() => {
                    debug!(seat, attempt, error = %e, "decision rejected");
                    last_reason = e.to_string();
                }
                Err(e) => return Err(e.into()),
            }
        }

        match self.config.failure_mode {
            FailureMode::Fail => Err(TableError::TooManyInvalid {
                seat,
                decision: decision_name,
                attempts: self.config.max_invalid_attempts,
                reason: last_reason,
            }),
            FailureMode::FallbackRandom => {
                warn!(
                    seat,
                    decision = decision_name,
                    reason = %last_reason,
                    "falling back to a random legal action"
                );
                let obs = observe(state, seat);
                let decision = decide(fallback, &obs).map_err(|source| TableError::Player {
                    seat,
                    decision: decision_name,
                    source,
                })?;
                self.apply(state, seat, decision, history)?;
                Ok(true)
            }
        }
    }

    fn apply(
        &self,
        state: &mut GameState,
        seat: Seat,
        decision: Decision,
        history: &mut MatchHistory,
    ) -> Result<(), DomainError> {
        let action = match decision {
            Decision::Discard(cards) => return discard_widow(state, seat, cards),
            Decision::Act(action) => action,
        };
        match apply_action(state, seat, action)? {
            ActionEffect::Bid(BidOutcome::Restarted) => history.restarts += 1,
            ActionEffect::Played(result) => {
                if let Some(trick) = result.completed {
                    for player in &self.players {
                        player.notify_trick_complete(&trick);
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }
}

fn decide(player: &dyn Player, obs: &Observation) -> Result<Decision, PlayerError> {
    let decision = match obs.phase {
        Phase::Bidding => Decision::Act(Action::Bid(player.make_bet(obs)?)),
        Phase::ChoosingMode => Decision::Act(Action::ChooseMode(player.decide_game_mode(obs)?)),
        Phase::ChoosingTrump => Decision::Act(Action::ChooseTrump(player.decide_trump(obs)?)),
        Phase::Widowing => Decision::Discard(player.discard_widow(obs)?),
        Phase::Playing { .. } => Decision::Act(Action::Play(player.play_card(obs)?)),
        Phase::Ready | Phase::RoundDone | Phase::GameOver => {
            return Err(PlayerError::Internal(format!(
                "no decision to make in {:?}",
                obs.phase
            )));
        }
    };
    Ok(decision)
}

fn decision_name(phase: Phase) -> &'static str {
    match phase {
        Phase::Bidding => "bid",
        Phase::ChoosingMode => "choose a mode",
        Phase::ChoosingTrump => "choose trump",
        Phase::Widowing => "discard",
        Phase::Playing { .. } => "play a card",
        Phase::Ready | Phase::RoundDone | Phase::GameOver => "act",
    }
}

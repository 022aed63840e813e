//! Turn-by-turn environment over a whole match.
//!
//! The environment owns one [`GameState`] and advances it one action per
//! [`ShelemEnv::step`]. Machine-only transitions (dealing, scoring a finished
//! round, dealing the next one) happen inside the step that triggers them,
//! so after every successful call some seat is on turn unless the match is
//! over.

use rand::prelude::*;
use tracing::{debug, info, warn};

use super::step::{StepEvent, StepInfo, StepResult};
use crate::config::{DoneOn, MatchConfig};
use crate::domain::actions::{
    acting_seat, apply_action, legal_action_ids, Action, ActionEffect, ActionId,
};
use crate::domain::bidding::BidOutcome;
use crate::domain::history::MatchHistory;
use crate::domain::player_view::{observe, Observation};
use crate::domain::round::start_round;
use crate::domain::rules::PLAYERS;
use crate::domain::scoring::{apply_round_scoring, seat_round_rewards, trick_rewards};
use crate::domain::snapshot::{snapshot, GameSnapshot};
use crate::domain::state::{GameState, Phase, Seat};
use crate::errors::domain::{DomainError, ValidationKind};

pub struct ShelemEnv {
    config: MatchConfig,
    state: GameState,
    history: MatchHistory,
}

impl ShelemEnv {
    /// Validate `config` and deal the first round.
    pub fn new(config: MatchConfig) -> Result<Self, DomainError> {
        config.validate()?;
        let seed = match_seed(&config);
        let mut env = Self {
            state: GameState::new(config.first_hand, seed),
            config,
            history: MatchHistory::default(),
        };
        start_round(&mut env.state)?;
        Ok(env)
    }

    /// Start a fresh match with zeroed scores. A configured seed replays
    /// the same deals on every reset.
    pub fn reset(&mut self) -> Result<Observation, DomainError> {
        let seed = match_seed(&self.config);
        self.reset_with_seed(seed)
    }

    pub fn reset_with_seed(&mut self, seed: u64) -> Result<Observation, DomainError> {
        self.state = GameState::new(self.config.first_hand, seed);
        self.history = MatchHistory::default();
        start_round(&mut self.state)?;
        debug!(seed, "environment reset");
        Ok(self.observe(self.config.first_hand))
    }

    /// Apply a flat action id for the seat on turn.
    pub fn step(&mut self, id: ActionId) -> Result<StepResult, DomainError> {
        let action = Action::decode(id, self.state.phase)?;
        self.step_action(action)
    }

    /// Apply a typed action for the seat on turn. A rejected action leaves
    /// the environment untouched.
    pub fn step_action(&mut self, action: Action) -> Result<StepResult, DomainError> {
        if self.state.phase == Phase::GameOver {
            return Err(DomainError::validation(
                ValidationKind::MatchOver,
                "Match is over; call reset",
            ));
        }
        let actor = self
            .current_player()
            .ok_or_else(|| DomainError::invariant("no seat on turn between steps"))?;

        let effect = apply_action(&mut self.state, actor, action)?;
        let mut rewards = [0.0f32; PLAYERS];
        let mut events = Vec::new();
        let mut done = false;

        match effect {
            ActionEffect::Bid(BidOutcome::Restarted) => {
                self.history.restarts += 1;
                warn!(round_no = self.state.round.round_no, "auction restarted");
                events.push(StepEvent::AuctionRestarted {
                    round_no: self.state.round.round_no,
                    first_hand: self.state.round.first_hand,
                });
            }
            ActionEffect::Played(result) => {
                if let Some(trick) = result.completed {
                    add(&mut rewards, trick_rewards(trick.winner, trick.points()));
                    events.push(StepEvent::TrickCompleted(trick));
                }
            }
            _ => {}
        }

        if self.state.phase == Phase::RoundDone {
            let summary = apply_round_scoring(&mut self.state, &self.config)?;
            let settled = seat_round_rewards(summary.hakem, summary.payoff);
            add(&mut rewards, settled);
            self.history.push(summary.clone());
            events.push(StepEvent::RoundCompleted(summary));
            done = self.config.done_on == DoneOn::Round;
        }

        if self.state.phase == Phase::GameOver {
            let scores = self.state.scores_total;
            let winner = self.history.leader();
            info!(?scores, ?winner, rounds = self.history.rounds.len(), "match finished");
            events.push(StepEvent::MatchOver { scores, winner });
            done = true;
        } else if self.state.phase == Phase::Ready {
            start_round(&mut self.state)?;
        }

        for r in rewards.iter_mut() {
            *r = r.clamp(-1.0, 1.0);
        }
        let next_player = self.current_player();
        let observation = self.observe(next_player.unwrap_or(actor));
        Ok(StepResult {
            observation,
            reward: rewards[actor as usize],
            rewards,
            done,
            info: StepInfo {
                actor,
                action,
                events,
                next_player,
            },
        })
    }

    /// Legal flat ids for the seat on turn.
    pub fn legal_actions(&self) -> Vec<ActionId> {
        self.current_player()
            .map(|seat| legal_action_ids(&self.state, seat))
            .unwrap_or_default()
    }

    pub fn current_player(&self) -> Option<Seat> {
        acting_seat(&self.state)
    }

    /// Partial observation for `seat`.
    pub fn observe(&self, seat: Seat) -> Observation {
        observe(&self.state, seat)
    }

    pub fn is_match_over(&self) -> bool {
        self.state.phase == Phase::GameOver
    }

    pub fn snapshot(&self) -> GameSnapshot {
        snapshot(&self.state)
    }

    pub fn history(&self) -> &MatchHistory {
        &self.history
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Full state, hidden cards included. Meant for tests and tooling.
    pub fn state(&self) -> &GameState {
        &self.state
    }
}

fn match_seed(config: &MatchConfig) -> u64 {
    config
        .seed
        .unwrap_or_else(|| StdRng::from_os_rng().random())
}

fn add(total: &mut [f32; PLAYERS], delta: [f32; PLAYERS]) {
    for (t, d) in total.iter_mut().zip(delta) {
        *t += d;
    }
}

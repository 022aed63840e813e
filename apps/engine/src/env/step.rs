//! Values returned by [`ShelemEnv::step`](super::ShelemEnv::step).

use serde::Serialize;

use crate::domain::actions::Action;
use crate::domain::history::RoundSummary;
use crate::domain::player_view::Observation;
use crate::domain::rules::PLAYERS;
use crate::domain::state::{CompletedTrick, Seat, Team};

/// Something that happened as a consequence of a step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StepEvent {
    /// Three opening passes; the cards were redealt with `first_hand` opening.
    AuctionRestarted { round_no: u32, first_hand: Seat },
    TrickCompleted(CompletedTrick),
    RoundCompleted(RoundSummary),
    MatchOver {
        scores: [i32; 2],
        winner: Option<Team>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepInfo {
    /// Seat that took the action.
    pub actor: Seat,
    pub action: Action,
    pub events: Vec<StepEvent>,
    /// Seat to act next, `None` once the match is over.
    pub next_player: Option<Seat>,
}

impl StepInfo {
    pub fn round_completed(&self) -> Option<&RoundSummary> {
        self.events.iter().find_map(|e| match e {
            StepEvent::RoundCompleted(summary) => Some(summary),
            _ => None,
        })
    }

    pub fn trick_completed(&self) -> Option<&CompletedTrick> {
        self.events.iter().find_map(|e| match e {
            StepEvent::TrickCompleted(trick) => Some(trick),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepResult {
    /// View of the seat now on turn, or of the actor when nobody is.
    pub observation: Observation,
    /// Reward for the acting seat; same as `rewards[actor]`.
    pub reward: f32,
    /// Reward for every seat, each within `[-1, 1]`.
    pub rewards: [f32; PLAYERS],
    pub done: bool,
    pub info: StepInfo,
}

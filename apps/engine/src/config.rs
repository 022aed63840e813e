//! Match configuration.
//!
//! Everything a match needs to know is passed in explicitly through
//! [`MatchConfig`] when the match is created; nothing is read from ambient
//! state while rounds run.
//!
//! # Example JSON Config
//!
//! ```json
//! {
//!   "target_score": 1165,
//!   "seed": 12345,
//!   "done_on": "round",
//!   "failure_mode": "fallback_random"
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::warn;

use crate::domain::rules::{DEFAULT_TARGET_SCORE, PLAYERS};
use crate::domain::state::Seat;
use crate::errors::domain::DomainError;

/// When the step interface reports `done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoneOn {
    Round,
    #[default]
    Match,
}

/// What the table runner does once a seat exhausts its invalid attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
    /// Abort the match with the seat's last error.
    Fail,
    /// Substitute a uniformly random legal action.
    #[default]
    FallbackRandom,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Score (or lead) that ends the match. `None` never ends on score.
    pub target_score: Option<i32>,
    /// Hard cap on completed rounds.
    pub max_rounds: Option<u32>,
    /// Deterministic dealing when set; OS entropy otherwise.
    pub seed: Option<u64>,
    /// Seat receiving the first packet in round one.
    pub first_hand: Seat,
    pub done_on: DoneOn,
    pub max_invalid_attempts: u8,
    pub failure_mode: FailureMode,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            target_score: Some(DEFAULT_TARGET_SCORE),
            max_rounds: None,
            seed: None,
            first_hand: 0,
            done_on: DoneOn::default(),
            max_invalid_attempts: 3,
            failure_mode: FailureMode::default(),
        }
    }
}

impl MatchConfig {
    /// Create a MatchConfig from optional JSON, falling back to defaults
    /// when the value is missing or malformed.
    pub fn from_json(config: Option<&JsonValue>) -> Self {
        match config {
            Some(json) => serde_json::from_value(json.clone()).unwrap_or_else(|e| {
                warn!(error = %e, "ignoring malformed match config");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.first_hand as usize >= PLAYERS {
            return Err(DomainError::validation_other(format!(
                "first_hand {} is not a seat",
                self.first_hand
            )));
        }
        if matches!(self.target_score, Some(t) if t <= 0) {
            return Err(DomainError::validation_other(
                "target_score must be positive; use null for an endless match",
            ));
        }
        if self.max_rounds == Some(0) {
            return Err(DomainError::validation_other(
                "max_rounds must be at least 1",
            ));
        }
        if self.max_invalid_attempts == 0 {
            return Err(DomainError::validation_other(
                "max_invalid_attempts must be at least 1",
            ));
        }
        Ok(())
    }
}

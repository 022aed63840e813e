#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod env;
pub mod errors;
pub mod players;
pub mod table;

// Re-exports for public API
pub use config::{DoneOn, FailureMode, MatchConfig};
pub use domain::{Action, ActionId, GameState, Observation, Phase, Seat, Team};
pub use env::{ShelemEnv, StepEvent, StepInfo, StepResult};
pub use errors::{DomainError, ValidationKind};
pub use players::{Player, PlayerConfig, PlayerError};
pub use table::{MatchOutcome, Table, TableError};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    engine_test_support::test_logging::init();
}

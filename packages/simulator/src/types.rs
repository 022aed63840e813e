//! Shared types for the simulator.

use clap::ValueEnum;
use shelem_engine::players::{RandomPlayer, RuleBasedPlayer};

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per match, streamed.
    Jsonl,
    /// A single JSON array written when the run finishes.
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MetricsLevel {
    Basic,
    Detailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlayerType {
    RuleBased,
    Random,
}

impl PlayerType {
    /// Name the strategy is registered under.
    pub fn name(self) -> &'static str {
        match self {
            PlayerType::RuleBased => RuleBasedPlayer::NAME,
            PlayerType::Random => RandomPlayer::NAME,
        }
    }
}

//! Batch match runner.
//!
//! Each match gets fresh strategy instances seeded from the match seed, so a
//! run is reproducible from its seeds alone.

use shelem_engine::domain::derive_player_seed;
use shelem_engine::domain::rules::PLAYERS;
use shelem_engine::players::{by_name, PlayerConfig};
use shelem_engine::{DomainError, MatchConfig, MatchOutcome, Player, Table, TableError};
use tracing::debug;

pub struct Simulator {
    seat_names: [&'static str; PLAYERS],
    config: MatchConfig,
}

impl Simulator {
    /// Fails fast on an unknown strategy name or an invalid config.
    pub fn new(
        seat_names: [&'static str; PLAYERS],
        config: MatchConfig,
    ) -> Result<Self, SimulatorError> {
        for name in seat_names {
            if by_name(name).is_none() {
                return Err(SimulatorError::UnknownPlayer(name.to_string()));
            }
        }
        config.validate().map_err(SimulatorError::Config)?;
        Ok(Self { seat_names, config })
    }

    pub fn simulate_match(&self, seed: u64) -> Result<MatchOutcome, SimulatorError> {
        let players = self.seat_players(seed)?;
        let table = Table::new(players, self.config.clone()).map_err(SimulatorError::Config)?;
        let outcome = table
            .play_match_with_seed(seed)
            .map_err(SimulatorError::Table)?;
        debug!(
            seed,
            rounds = outcome.history.rounds.len(),
            "match simulated"
        );
        Ok(outcome)
    }

    fn seat_players(&self, seed: u64) -> Result<[Box<dyn Player>; PLAYERS], SimulatorError> {
        let mut seats = Vec::with_capacity(PLAYERS);
        for (seat, name) in self.seat_names.iter().enumerate() {
            let factory = by_name(name)
                .ok_or_else(|| SimulatorError::UnknownPlayer(name.to_string()))?;
            let config = PlayerConfig::with_seed(derive_player_seed(seed, seat as u8));
            seats.push((factory.make)(&config));
        }
        seats
            .try_into()
            .map_err(|_| SimulatorError::InvalidState("expected four seats".into()))
    }
}

#[derive(Debug)]
pub enum SimulatorError {
    /// No strategy registered under this name
    UnknownPlayer(String),
    /// Match configuration rejected
    Config(DomainError),
    /// The table runner gave up on the match
    Table(TableError),
    /// Invalid simulator state
    InvalidState(String),
}

impl std::fmt::Display for SimulatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulatorError::UnknownPlayer(name) => write!(f, "Unknown player type: {name}"),
            SimulatorError::Config(err) => write!(f, "Invalid match config: {err}"),
            SimulatorError::Table(err) => write!(f, "Match failed: {err}"),
            SimulatorError::InvalidState(msg) => write!(f, "Invalid state: {msg}"),
        }
    }
}

impl std::error::Error for SimulatorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulatorError::Config(err) => Some(err),
            SimulatorError::Table(err) => Some(err),
            SimulatorError::UnknownPlayer(_) | SimulatorError::InvalidState(_) => None,
        }
    }
}

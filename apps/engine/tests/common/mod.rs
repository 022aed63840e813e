#![allow(dead_code)]

// tests/common/mod.rs
use rand::prelude::*;
use rand::rngs::StdRng;
use shelem_engine::{ActionId, MatchConfig, ShelemEnv, StepResult};

// Logging is auto-installed for every test binary that pulls in `common`
#[ctor::ctor]
fn init_logging() {
    engine_test_support::test_logging::init();
}

/// A short seeded match: a handful of rounds, no score target.
pub fn short_match(seed: u64, rounds: u32) -> MatchConfig {
    MatchConfig {
        seed: Some(seed),
        target_score: None,
        max_rounds: Some(rounds),
        ..MatchConfig::default()
    }
}

/// Pick a uniformly random legal id for the seat on turn.
pub fn random_legal(env: &ShelemEnv, rng: &mut StdRng) -> ActionId {
    *env.legal_actions()
        .choose(rng)
        .expect("a seat is on turn with at least one legal action")
}

/// Step random legal ids until the environment reports `done`.
pub fn run_episode(env: &mut ShelemEnv, rng_seed: u64) -> Vec<StepResult> {
    let mut rng = StdRng::seed_from_u64(rng_seed);
    let mut steps = Vec::new();
    loop {
        let id = random_legal(env, &mut rng);
        let result = env.step(id).expect("legal id is accepted");
        let done = result.done;
        steps.push(result);
        if done {
            return steps;
        }
    }
}

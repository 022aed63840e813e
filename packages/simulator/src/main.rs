//! Shelem simulator CLI: plays batches of matches between registered seat
//! strategies and records per-match metrics.

mod metrics;
mod output;
mod simulator;
mod types;

use std::time::{Duration, Instant};

use clap::Parser;
use metrics::{build_game_metrics, GameConfig};
use output::OutputWriter;
use shelem_engine::domain::rules::PLAYERS;
use shelem_engine::domain::{derive_match_seed, Team};
use shelem_engine::{FailureMode, MatchConfig, MatchOutcome};
use simulator::Simulator;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use types::{MetricsLevel, OutputFormat, PlayerType};

#[derive(Parser)]
#[command(name = "shelem-simulator")]
#[command(about = "Batch simulator for Shelem matches between seat strategies")]
struct Args {
    /// Number of matches to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Strategy for all seats (shortcut to set all 4 seats at once)
    #[arg(long, conflicts_with_all = ["seat0", "seat1", "seat2", "seat3"])]
    seats: Option<PlayerType>,

    /// Strategy for seat 0
    #[arg(long, default_value = "rule-based")]
    seat0: PlayerType,

    /// Strategy for seat 1
    #[arg(long, default_value = "rule-based")]
    seat1: PlayerType,

    /// Strategy for seat 2
    #[arg(long, default_value = "rule-based")]
    seat2: PlayerType,

    /// Strategy for seat 3
    #[arg(long, default_value = "rule-based")]
    seat3: PlayerType,

    /// Base seed; match N uses seed + N - 1
    #[arg(long)]
    seed: Option<u64>,

    /// Score (or lead) that ends a match; 0 plays until --max-rounds
    #[arg(long, default_value = "1165")]
    target_score: i32,

    /// Hard cap on rounds per match
    #[arg(long)]
    max_rounds: Option<u32>,

    /// Abort a match when a seat keeps choosing illegal actions
    #[arg(long)]
    strict: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Show output summary and file paths
    #[arg(long)]
    show_output: bool,

    /// Output directory for results
    #[arg(long, default_value = "./simulation-results")]
    output_dir: String,

    /// Output format
    #[arg(long, default_value = "jsonl")]
    output_format: OutputFormat,

    /// Compress output files
    #[arg(long)]
    compress: bool,

    /// Metrics detail level
    #[arg(long, default_value = "detailed")]
    metrics_level: MetricsLevel,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Silent by default; RUST_LOG wins over the flags
    let level = if args.verbose {
        "debug"
    } else if args.show_output {
        "info"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let seat_types = match args.seats {
        Some(all) => [all; PLAYERS],
        None => [args.seat0, args.seat1, args.seat2, args.seat3],
    };
    let seat_names = seat_types.map(PlayerType::name);
    info!(games = args.games, ?seat_types, "starting simulator");

    let match_config = MatchConfig {
        target_score: (args.target_score != 0).then_some(args.target_score),
        max_rounds: args.max_rounds,
        failure_mode: if args.strict {
            FailureMode::Fail
        } else {
            FailureMode::FallbackRandom
        },
        ..MatchConfig::default()
    };
    if match_config.target_score.is_none() && match_config.max_rounds.is_none() {
        return Err("--target-score 0 needs --max-rounds, or matches never end".into());
    }
    let game_config = GameConfig {
        players: seat_names.map(str::to_string),
        total_games: args.games,
        target_score: match_config.target_score,
        max_rounds: match_config.max_rounds,
    };
    let simulator = Simulator::new(seat_names, match_config)?;

    let mut output_writer =
        OutputWriter::new(&args.output_dir, &args.output_format, args.compress)?;
    info!(output_dir = %args.output_dir, "writing results");

    let base_seed = args.seed.unwrap_or_else(rand::random);
    let start = Instant::now();
    let mut results = Vec::new();
    let mut errors = 0;

    for game_num in 1..=args.games {
        let game_start = Instant::now();
        let seed = derive_match_seed(base_seed, game_num);

        match simulator.simulate_match(seed) {
            Ok(outcome) => {
                let duration_ms = game_start.elapsed().as_secs_f64() * 1000.0;
                let metrics = build_game_metrics(
                    game_num,
                    game_config.clone(),
                    &outcome,
                    duration_ms,
                    args.metrics_level,
                );
                if let Err(e) = output_writer.write_game(&metrics) {
                    warn!("Failed to write metrics for match {}: {}", game_num, e);
                }
                info!(game_num, seed, scores = ?outcome.final_scores, "match completed");
                results.push(outcome);
            }
            Err(e) => {
                errors += 1;
                warn!("Match {} (seed {}) failed: {}", game_num, seed, e);
            }
        }
    }

    let elapsed = start.elapsed();
    let (records_path, csv_path) = output_writer.output_paths();
    let (records_path, csv_path) = (records_path.clone(), csv_path.clone());
    output_writer.finish()?;

    if args.show_output {
        info!("Detailed results written to: {}", records_path.display());
        info!("Summary CSV written to: {}", csv_path.display());
        print_summary(&results, &game_config.players, errors, elapsed, args.games);
    }

    Ok(())
}

fn print_summary(
    results: &[MatchOutcome],
    players: &[String; PLAYERS],
    errors: u32,
    elapsed: Duration,
    total: u32,
) {
    println!("\n=== Simulation Summary ===");
    println!("Matches completed: {}/{}", results.len(), total);
    if errors > 0 {
        println!("Errors: {}", errors);
    }
    println!("Total time: {:?}", elapsed);
    if results.is_empty() {
        return;
    }
    println!(
        "Average time per match: {:?}",
        elapsed / results.len() as u32
    );

    let mut wins = [0u32; 2];
    let mut ties = 0u32;
    let mut total_scores = [0i64; 2];
    let mut contracts = [0u32; 2];
    let mut made = [0u32; 2];
    let mut rounds = 0usize;
    let mut restarts = 0u32;
    let mut fallbacks = 0u32;

    for outcome in results {
        match outcome.winner {
            Some(team) => wins[team.index()] += 1,
            None => ties += 1,
        }
        for (total, score) in total_scores.iter_mut().zip(outcome.final_scores) {
            *total += i64::from(score);
        }
        for round in &outcome.history.rounds {
            let idx = round.hakem_team().index();
            contracts[idx] += 1;
            if round.bid_made() {
                made[idx] += 1;
            }
        }
        rounds += outcome.history.rounds.len();
        restarts += outcome.history.restarts;
        fallbacks += outcome.fallbacks.iter().sum::<u32>();
    }

    let n = results.len() as f64;
    println!(
        "Rounds: {} ({:.1} per match), auction restarts: {}, fallback moves: {}",
        rounds,
        rounds as f64 / n,
        restarts,
        fallbacks
    );

    println!("\n=== Results by Team ===");
    for team in [Team::One, Team::Two] {
        let idx = team.index();
        let [a, b] = team.seats();
        let made_pct = if contracts[idx] > 0 {
            made[idx] as f64 / contracts[idx] as f64 * 100.0
        } else {
            0.0
        };
        println!(
            "Team {:?} (seats {a}+{b}: {}, {}): avg={:.1}, wins={} ({:.1}%), contracts={}, made={:.1}%",
            team,
            players[a as usize],
            players[b as usize],
            total_scores[idx] as f64 / n,
            wins[idx],
            wins[idx] as f64 / n * 100.0,
            contracts[idx],
            made_pct
        );
    }
    if ties > 0 {
        println!("Ties: {}", ties);
    }
}

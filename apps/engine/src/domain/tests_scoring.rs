use crate::config::{DoneOn, MatchConfig};
use crate::domain::scoring::{
    apply_round_scoring, is_match_over, round_payoff, round_rewards, seat_round_rewards,
    team_deltas, trick_rewards, PayoffKind,
};
use crate::domain::state::Team;
use crate::domain::test_state_helpers::{
    first_legal, play_and_score_round, play_round_with, state_in_play,
};
use crate::domain::{GameMode, GameState, Phase, Suit};
use crate::errors::domain::ValidationKind;

#[test]
fn made_bid_scores_the_bid_not_the_raw_points() {
    let payoff = round_payoff(100, 65, 100);
    assert_eq!(payoff.kind, PayoffKind::Made);
    assert_eq!(payoff.hakem_team_delta, 100);
    assert_eq!(payoff.opponent_delta, 65);

    let payoff = round_payoff(140, 25, 105);
    assert_eq!(payoff.hakem_team_delta, 105);
    assert_eq!(payoff.opponent_delta, 25);
}

#[test]
fn sweep_doubles_the_bid() {
    for bid in [100, 135, 165] {
        let payoff = round_payoff(165, 0, bid);
        assert_eq!(payoff.kind, PayoffKind::Shelem);
        assert_eq!(payoff.hakem_team_delta, 2 * bid as i32);
        assert_eq!(payoff.opponent_delta, 0);
    }
}

#[test]
fn opponents_reaching_85_double_the_loss() {
    let payoff = round_payoff(60, 105, 120);
    assert_eq!(payoff.kind, PayoffKind::Doubled);
    assert_eq!(payoff.hakem_team_delta, -240);
    assert_eq!(payoff.opponent_delta, 105);

    let payoff = round_payoff(70, 95, 120);
    assert_eq!(payoff.kind, PayoffKind::Doubled);
    assert_eq!(payoff.hakem_team_delta, -240);
}

#[test]
fn near_miss_loses_the_bid_once() {
    // 90 falls short of 100 while the opponents stop at 75.
    let payoff = round_payoff(90, 75, 100);
    assert_eq!(payoff.kind, PayoffKind::NearMiss);
    assert_eq!(payoff.hakem_team_delta, -100);
    assert_eq!(payoff.opponent_delta, 75);

    // Boundary: 85 for the opponents already doubles.
    assert_eq!(round_payoff(80, 85, 100).kind, PayoffKind::Doubled);
    assert_eq!(round_payoff(81, 84, 100).kind, PayoffKind::NearMiss);
}

#[test]
fn deltas_land_on_the_right_team() {
    let payoff = round_payoff(100, 65, 100);
    assert_eq!(team_deltas(Team::One, &payoff), [100, 65]);
    assert_eq!(team_deltas(Team::Two, &payoff), [65, 100]);
}

#[test]
fn match_end_on_target_or_lead() {
    let target = Some(1165);
    assert!(!is_match_over([0, 0], target));
    assert!(!is_match_over([1100, 500], target));
    assert!(is_match_over([1165, 900], target));
    assert!(is_match_over([300, 1200], target));
    // Leading by the target also ends the match, even from negative scores.
    assert!(is_match_over([200, -965], target));
    assert!(!is_match_over([200, -964], target));
    assert!(!is_match_over([5000, -5000], None));
}

#[test]
fn round_rewards_by_outcome() {
    assert_eq!(round_rewards(PayoffKind::Shelem), (1.0, 0.0));
    assert_eq!(round_rewards(PayoffKind::Made), (0.5, 0.0));
    assert_eq!(round_rewards(PayoffKind::NearMiss), (-0.7, 0.5));
    assert_eq!(round_rewards(PayoffKind::Doubled), (-1.0, 1.0));

    assert_eq!(
        seat_round_rewards(1, PayoffKind::NearMiss),
        [0.5, -0.7, 0.5, -0.7]
    );
}

#[test]
fn trick_reward_goes_to_the_winning_partnership() {
    let rewards = trick_rewards(2, 33);
    assert_eq!(rewards[1], 0.0);
    assert_eq!(rewards[3], 0.0);
    assert!((rewards[0] - 0.2).abs() < 1e-6);
    assert_eq!(rewards[0], rewards[2]);
}

#[test]
fn scoring_requires_finished_round() {
    let mut state = state_in_play(0, 3, GameMode::Saras, None);
    let err = apply_round_scoring(&mut state, &MatchConfig::default()).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::PhaseMismatch));
    assert_eq!(state.phase, Phase::Playing { trick_no: 1 });
}

#[test]
fn scored_round_updates_totals_and_rotates_first_hand() {
    let config = MatchConfig::default();
    let mut state = GameState::new(1, 99);
    let summary = play_and_score_round(&mut state, &config);

    // The minimum opener always wins the auction when everyone else passes.
    assert_eq!(summary.hakem, 1);
    assert_eq!(summary.bid, 100);
    assert_eq!(summary.round_no, 1);
    assert_eq!(summary.team_points[0] + summary.team_points[1], 165);
    assert_eq!(state.scores_total, summary.scores_after);
    assert_eq!(summary.deltas, summary.scores_after);

    let expected = round_payoff(
        summary.team_points[Team::Two.index()],
        summary.team_points[Team::One.index()],
        100,
    );
    assert_eq!(summary.payoff, expected.kind);
    assert_eq!(summary.deltas[Team::Two.index()], expected.hakem_team_delta);

    assert_eq!(state.phase, Phase::Ready);
    assert_eq!(state.round.round_no, 2);
    assert_eq!(state.round.first_hand, 2);
    assert_eq!(state.deck.len(), 52);
}

#[test]
fn max_rounds_ends_the_match() {
    let config = MatchConfig {
        target_score: None,
        max_rounds: Some(2),
        done_on: DoneOn::Match,
        ..MatchConfig::default()
    };
    let mut state = GameState::new(0, 5);
    play_and_score_round(&mut state, &config);
    assert_eq!(state.phase, Phase::Ready);
    let second = play_and_score_round(&mut state, &config);
    assert_eq!(second.round_no, 2);
    assert_eq!(state.phase, Phase::GameOver);
}

#[test]
fn low_target_ends_after_one_round() {
    let config = MatchConfig {
        target_score: Some(50),
        ..MatchConfig::default()
    };
    let mut state = state_in_play(0, 11, GameMode::Normal, Some(Suit::Clubs));
    play_round_with(&mut state, first_legal);
    apply_round_scoring(&mut state, &config).unwrap();
    // Someone always gains at least 50 or the gap reaches 50 after one round.
    assert_eq!(state.phase, Phase::GameOver);
}

use crate::domain::cards_serde::parse_cards;
use crate::domain::state::{CompletedTrick, Team};
use crate::domain::test_state_helpers::{state_in_play, state_with_hands};
use crate::domain::tricks::{current_trick_winner, legal_moves, play_card, resolve_current_trick};
use crate::domain::{Card, GameMode, Phase, Suit, Trump};
use crate::errors::domain::{DomainError, ValidationKind};

fn cards(tokens: &[&str]) -> Vec<Card> {
    parse_cards(tokens).unwrap()
}

fn c(token: &str) -> Card {
    token.parse().unwrap()
}

#[test]
fn trump_ruff_wins_and_leads_next() {
    let mut state = state_with_hands(
        [
            cards(&["AH", "2C"]),
            cards(&["KH", "3C"]),
            cards(&["2S", "4C"]),
            cards(&["QH", "5C"]),
        ],
        0,
        GameMode::Normal,
        Trump::Spades,
    );

    play_card(&mut state, 0, c("AH")).unwrap();
    play_card(&mut state, 1, c("KH")).unwrap();
    assert_eq!(current_trick_winner(&state).unwrap(), Some(0));
    // Seat 2 is void in hearts and ruffs with the lowest spade.
    play_card(&mut state, 2, c("2S")).unwrap();
    assert_eq!(current_trick_winner(&state).unwrap(), Some(2));
    let result = play_card(&mut state, 3, c("QH")).unwrap();

    let trick = result.completed.unwrap();
    assert_eq!(trick.winner, 2);
    assert_eq!(trick.leader, 0);
    assert_eq!(trick.points(), 15);
    assert_eq!(result.trick_no_after, 2);
    assert_eq!(state.phase, Phase::Playing { trick_no: 2 });
    assert_eq!(state.turn, Some(2));
    assert_eq!(state.leader, Some(2));
    assert!(state.round.trick_plays.is_empty());
    assert_eq!(state.round.trick_lead, None);
    assert_eq!(state.round.piles[Team::One.index()].len(), 4);
}

#[test]
fn naras_low_card_wins() {
    let mut state = state_with_hands(
        [
            cards(&["9D"]),
            cards(&["2D"]),
            cards(&["AD"]),
            cards(&["AS"]),
        ],
        1,
        GameMode::Naras,
        Trump::NoTrump,
    );
    // Seat 1 leads.
    play_card(&mut state, 1, c("2D")).unwrap();
    play_card(&mut state, 2, c("AD")).unwrap();
    play_card(&mut state, 3, c("AS")).unwrap();
    let result = play_card(&mut state, 0, c("9D")).unwrap();
    // Ace is lowest in Naras, Two highest.
    assert_eq!(result.completed.unwrap().winner, 1);
}

#[test]
fn ace_naras_ace_still_wins() {
    let mut state = state_with_hands(
        [
            cards(&["KC"]),
            cards(&["2C"]),
            cards(&["AC"]),
            cards(&["3C"]),
        ],
        0,
        GameMode::AceNaras,
        Trump::NoTrump,
    );
    for (seat, token) in [(0, "KC"), (1, "2C"), (2, "AC")] {
        play_card(&mut state, seat, c(token)).unwrap();
    }
    let result = play_card(&mut state, 3, c("3C")).unwrap();
    assert_eq!(result.completed.unwrap().winner, 2);
}

#[test]
fn trumpless_off_suit_cannot_win() {
    let mut state = state_with_hands(
        [
            cards(&["3H"]),
            cards(&["AS"]),
            cards(&["AD"]),
            cards(&["2H"]),
        ],
        0,
        GameMode::Saras,
        Trump::NoTrump,
    );
    for (seat, token) in [(0, "3H"), (1, "AS"), (2, "AD")] {
        play_card(&mut state, seat, c(token)).unwrap();
    }
    let result = play_card(&mut state, 3, c("2H")).unwrap();
    assert_eq!(result.completed.unwrap().winner, 0);
}

#[test]
fn rejections_do_not_mutate() {
    let mut state = state_with_hands(
        [
            cards(&["AH", "2C"]),
            cards(&["KH", "3C"]),
            cards(&["2S"]),
            cards(&["QH"]),
        ],
        0,
        GameMode::Normal,
        Trump::Spades,
    );

    let err = play_card(&mut state, 1, c("KH")).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::OutOfTurn));

    let err = play_card(&mut state, 0, c("KH")).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::CardNotInHand));

    play_card(&mut state, 0, c("AH")).unwrap();
    let before = state.clone();
    let err = play_card(&mut state, 1, c("3C")).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::MustFollowSuit));
    assert_eq!(state.hands, before.hands);
    assert_eq!(state.round.trick_plays, before.round.trick_plays);
    assert_eq!(state.turn, before.turn);
}

#[test]
fn play_outside_trick_phase_is_phase_mismatch() {
    let mut state = state_with_hands(
        [
            cards(&["AH"]),
            cards(&["KH"]),
            cards(&["2S"]),
            cards(&["QH"]),
        ],
        0,
        GameMode::Normal,
        Trump::Spades,
    );
    state.phase = Phase::Widowing;
    let err = play_card(&mut state, 0, c("AH")).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::PhaseMismatch));
    assert!(legal_moves(&state, 0).is_empty());
}

#[test]
fn incomplete_trick_has_no_winner() {
    let mut state = state_with_hands(
        [
            cards(&["AH"]),
            cards(&["KH"]),
            cards(&["2S"]),
            cards(&["QH"]),
        ],
        0,
        GameMode::Normal,
        Trump::Spades,
    );
    assert_eq!(current_trick_winner(&state).unwrap(), None);
    play_card(&mut state, 0, c("AH")).unwrap();
    assert_eq!(resolve_current_trick(&state.round).unwrap(), None);
}

#[test]
fn hakem_leads_first_trick_and_twelve_tricks_finish_round() {
    let mut state = state_in_play(2, 77, GameMode::Normal, Some(Suit::Hearts));
    assert_eq!(state.turn, Some(2));

    let mut completed = 0;
    while let Phase::Playing { .. } = state.phase {
        let seat = state.turn.unwrap();
        let card = legal_moves(&state, seat)[0];
        let result = play_card(&mut state, seat, card).unwrap();
        if result.completed.is_some() {
            completed += 1;
        }
    }
    assert_eq!(completed, 12);
    assert_eq!(state.phase, Phase::RoundDone);
    assert_eq!(state.turn, None);
    assert!(state.hands.iter().all(|h| h.is_empty()));
    let points = state.team_points();
    assert_eq!(points[0] + points[1], 165);
}

#[test]
fn five_cards_in_one_trick_is_fatal() {
    let mut state = state_with_hands(
        [
            cards(&["2D"]),
            cards(&["3D"]),
            cards(&["4D"]),
            cards(&["5D"]),
        ],
        0,
        GameMode::Normal,
        Trump::Spades,
    );
    state.round.trick_lead = Some(Suit::Hearts);
    state.round.trick_plays = vec![
        (0, c("AH")),
        (1, c("KH")),
        (2, c("2S")),
        (3, c("QH")),
        (0, c("3H")),
    ];

    let err = resolve_current_trick(&state.round).unwrap_err();
    assert!(!err.is_recoverable());
    assert_eq!(err, DomainError::invariant("trick holds 5 cards"));
}

#[test]
fn thirteenth_trick_is_fatal() {
    let mut state = state_with_hands(
        [
            cards(&["AH"]),
            cards(&["KH"]),
            cards(&["2S"]),
            cards(&["QH"]),
        ],
        0,
        GameMode::Normal,
        Trump::Spades,
    );
    state.round.tricks = (1..=12)
        .map(|trick_no| CompletedTrick {
            trick_no,
            leader: 0,
            plays: Vec::new(),
            winner: 0,
        })
        .collect();
    state.phase = Phase::Playing { trick_no: 12 };

    play_card(&mut state, 0, c("AH")).unwrap();
    play_card(&mut state, 1, c("KH")).unwrap();
    play_card(&mut state, 2, c("2S")).unwrap();
    let err = play_card(&mut state, 3, c("QH")).unwrap_err();

    assert_eq!(err.kind(), None);
    assert!(!err.is_recoverable());
    assert_eq!(
        err,
        DomainError::invariant("13 tricks recorded in one round")
    );
}

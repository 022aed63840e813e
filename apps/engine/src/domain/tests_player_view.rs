use crate::domain::hakem::{choose_game_mode, discard_card};
use crate::domain::player_view::{observe, CardMask};
use crate::domain::round::start_round;
use crate::domain::test_state_helpers::{state_after_auction, state_in_play};
use crate::domain::tricks::{legal_moves, play_card};
use crate::domain::{Action, GameMode, GameState, Phase, Suit, Team};

#[test]
fn other_hands_never_leak() {
    let mut state = GameState::new(2, 41);
    start_round(&mut state).unwrap();
    for seat in 0..4u8 {
        let obs = observe(&state, seat);
        assert_eq!(obs.hand, state.hands[seat as usize].to_vec());
        assert_eq!(obs.hand_mask.len(), 12);
        for other in (0..4u8).filter(|&o| o != seat) {
            for card in state.hands[other as usize].iter() {
                assert!(!obs.hand_mask.contains(card));
                assert!(!obs.hand.contains(&card));
            }
        }
        assert!(obs.widow.is_none());
        assert!(obs.played_mask.is_empty());
    }
}

#[test]
fn widow_only_shown_to_hakem_while_choosing_mode() {
    let mut state = state_after_auction(1, 8);
    let widow = state.round.widow.clone();
    assert_eq!(widow.len(), 4);

    let hakem_view = observe(&state, 1);
    assert_eq!(hakem_view.widow.as_deref(), Some(widow.as_slice()));
    for seat in [0, 2, 3] {
        assert!(observe(&state, seat).widow.is_none());
    }

    choose_game_mode(&mut state, 1, GameMode::Saras).unwrap();
    assert_eq!(state.phase, Phase::Widowing);
    assert!(observe(&state, 1).widow.is_none());
    assert_eq!(observe(&state, 1).hand.len(), 16);
}

#[test]
fn discards_only_shown_to_hakem() {
    let mut state = state_after_auction(3, 12);
    choose_game_mode(&mut state, 3, GameMode::Naras).unwrap();
    let cards: Vec<_> = state.hands[3].iter().take(4).collect();
    for card in &cards {
        discard_card(&mut state, 3, *card).unwrap();
    }

    let hakem_view = observe(&state, 3);
    assert_eq!(hakem_view.discards.as_deref(), Some(cards.as_slice()));
    for seat in 0..3u8 {
        let view = observe(&state, seat);
        assert!(view.discards.is_none());
        for card in &cards {
            assert!(!view.played_mask.contains(*card));
        }
    }
}

#[test]
fn only_the_acting_seat_has_legal_actions() {
    let state = state_in_play(0, 21, GameMode::Normal, Some(Suit::Hearts));
    let acting = observe(&state, 0);
    assert!(acting.is_my_turn());
    assert!(acting.is_hakem());
    assert_eq!(acting.legal_plays(), legal_moves(&state, 0));
    assert!(acting
        .legal()
        .iter()
        .all(|a| matches!(a, Action::Play(_))));
    for seat in 1..4u8 {
        let view = observe(&state, seat);
        assert!(!view.is_my_turn());
        assert!(view.legal_actions.is_empty());
    }
}

#[test]
fn played_cards_become_public() {
    let mut state = state_in_play(2, 33, GameMode::Saras, None);
    let lead = legal_moves(&state, 2)[0];
    play_card(&mut state, 2, lead).unwrap();

    for seat in 0..4u8 {
        let view = observe(&state, seat);
        assert!(view.played_mask.contains(lead));
        assert_eq!(view.current_trick, vec![(2, lead)]);
        assert_eq!(view.led_suit, Some(lead.suit));
        assert_eq!(view.to_act, Some(3));
    }
}

#[test]
fn team_points_count_won_tricks_only() {
    let mut state = state_in_play(0, 4, GameMode::Normal, Some(Suit::Spades));
    // The hakem's discards sit in its pile but stay hidden from the tally.
    let view = observe(&state, 1);
    assert_eq!(view.team_points, [0, 0]);

    for _ in 0..4 {
        let seat = state.turn.unwrap();
        let card = legal_moves(&state, seat)[0];
        play_card(&mut state, seat, card).unwrap();
    }
    let trick = state.round.tricks[0].clone();
    let view = observe(&state, 1);
    let winner_team = Team::of(trick.winner).index();
    assert_eq!(view.team_points[winner_team], trick.points());
    assert_eq!(view.team_points[1 - winner_team], 0);
}

#[test]
fn card_mask_round_trips_cards() {
    let state = state_in_play(1, 6, GameMode::AceNaras, None);
    let hand = state.hands[1].to_vec();
    let mask: CardMask = hand.iter().copied().collect();
    assert_eq!(mask.cards(), hand);
}

// Property-based tests for the follow-suit rule

use proptest::prelude::*;

use crate::domain::state::Phase;
use crate::domain::test_state_helpers::{first_legal, play_round_with, state_with_hands};
use crate::domain::tricks::{legal_moves, play_card};
use crate::domain::{
    hand_has_suit, test_gens, test_prelude, Action, Card, GameMode, GameState, Rank, Trump,
};
use crate::errors::domain::ValidationKind;

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// A void player may play anything; a player holding the led suit only that suit.
    #[test]
    fn prop_legal_moves_follow_suit(
        cards in test_gens::unique_cards(14),
    ) {
        let lead_card = cards[0];
        let hand: Vec<Card> = cards[1..].to_vec();
        let mut state = state_with_hands(
            [vec![lead_card], hand.clone(), vec![], vec![]],
            0,
            GameMode::Saras,
            Trump::NoTrump,
        );
        play_card(&mut state, 0, lead_card).unwrap();

        let legal = legal_moves(&state, 1);
        if hand_has_suit(&hand, lead_card.suit) {
            prop_assert!(legal.iter().all(|c| c.suit == lead_card.suit));
            prop_assert_eq!(legal.len(), hand.iter().filter(|c| c.suit == lead_card.suit).count());
        } else {
            prop_assert_eq!(legal.len(), hand.len());
        }
    }

    /// Void in the led suit: every card is accepted.
    #[test]
    fn prop_void_player_may_play_anything(
        (lead_suit, hand) in test_gens::suit()
            .prop_flat_map(|s| (Just(s), test_gens::hand_without_suit(s))),
    ) {
        let lead = Card::new(lead_suit, Rank::Two);
        for card in &hand {
            let mut state = state_with_hands(
                [vec![lead], hand.clone(), vec![], vec![]],
                0,
                GameMode::Normal,
                Trump::from(card.suit),
            );
            play_card(&mut state, 0, lead).unwrap();
            prop_assert!(play_card(&mut state, 1, *card).is_ok());
        }
    }

    /// Every play accepted during a full round was the lead, followed suit,
    /// or came from a seat void in the led suit.
    #[test]
    fn prop_accepted_plays_respect_follow_suit(seed in any::<u64>(), pick in any::<u64>()) {
        let mut state = GameState::new((seed % 4) as u8, seed);
        let mut counter = pick;
        let mut violations = Vec::new();
        play_round_with(&mut state, |st, options| {
            let action = match options[0] {
                Action::Play(_) => {
                    counter = counter.wrapping_mul(6364136223846793005).wrapping_add(1);
                    options[(counter >> 33) as usize % options.len()]
                }
                _ => first_legal(st, options),
            };
            if let (Action::Play(card), Some(lead), Phase::Playing { .. }) =
                (action, st.round.trick_lead, st.phase)
            {
                let seat = st.turn.unwrap();
                let void = !st.hands[seat as usize].has_suit(lead);
                if card.suit != lead && !void {
                    violations.push(card);
                }
            }
            action
        });
        prop_assert!(violations.is_empty(), "illegal plays slipped through: {:?}", violations);
    }

    /// Holding the led suit and playing off-suit is rejected without mutation.
    #[test]
    fn prop_revoke_rejected(cards in test_gens::unique_cards(13)) {
        let lead = cards[0];
        let follower: Vec<Card> = cards[1..].to_vec();
        let on_suit = follower.iter().any(|c| c.suit == lead.suit);
        let off_suit = follower.iter().find(|c| c.suit != lead.suit).copied();
        if let (true, Some(off)) = (on_suit, off_suit) {
            let mut state = state_with_hands(
                [vec![lead], follower.clone(), vec![], vec![]],
                0,
                GameMode::Naras,
                Trump::NoTrump,
            );
            play_card(&mut state, 0, lead).unwrap();
            let before = state.hands[1].clone();
            let err = play_card(&mut state, 1, off).unwrap_err();
            prop_assert_eq!(err.kind(), Some(&ValidationKind::MustFollowSuit));
            prop_assert_eq!(&state.hands[1], &before);
            prop_assert_eq!(state.round.trick_plays.len(), 1);
        }
    }
}

// Property-based tests for the auction

use proptest::prelude::*;

use crate::domain::bidding::{legal_bids, place_bid, Auction, BidOutcome};
use crate::domain::round::start_round;
use crate::domain::rules::PASS;
use crate::domain::{test_gens, test_prelude, GameState, Phase};
use crate::errors::domain::ValidationKind;

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Any sequence of legal bids ends in a single hakem or a restart, never a hang.
    #[test]
    fn prop_auction_terminates(
        first in test_gens::seat(),
        choices in prop::collection::vec(any::<u8>(), 64),
    ) {
        let mut auction = Auction::new(first);
        let mut outcome = None;
        for choice in choices {
            let Some(seat) = auction.to_act() else { break };
            let options = auction.legal_bids();
            let score = options[choice as usize % options.len()];
            match auction.place(seat, score).unwrap() {
                BidOutcome::Continue { .. } => {}
                done => {
                    outcome = Some(done);
                    break;
                }
            }
        }
        // 14 ladder rungs plus 4 passes bound the auction well under 64 bids.
        let outcome = outcome.expect("auction must finish");
        match outcome {
            BidOutcome::Won { hakem, bid } => {
                let high = auction.high_bid().unwrap();
                prop_assert_eq!(high.seat, hakem);
                prop_assert_eq!(high.score, bid);
                prop_assert_eq!(auction.active_seats().count(), 1);
            }
            BidOutcome::Restarted => {
                prop_assert!(auction.high_bid().is_none());
                prop_assert_eq!(auction.history().len(), 3);
                prop_assert!(auction.history().iter().all(|b| b.score == PASS));
            }
            BidOutcome::Continue { .. } => unreachable!(),
        }
    }

    /// Accepted bids strictly increase.
    #[test]
    fn prop_accepted_bids_increase(
        first in test_gens::seat(),
        choices in prop::collection::vec(any::<u8>(), 64),
    ) {
        let mut auction = Auction::new(first);
        for choice in choices {
            let Some(seat) = auction.to_act() else { break };
            let options = auction.legal_bids();
            let score = options[choice as usize % options.len()];
            if !matches!(auction.place(seat, score).unwrap(), BidOutcome::Continue { .. }) {
                break;
            }
        }
        let raised: Vec<u16> = auction
            .history()
            .iter()
            .filter(|b| !b.is_pass())
            .map(|b| b.score)
            .collect();
        prop_assert!(raised.windows(2).all(|w| w[0] < w[1]));
    }

    /// Out-of-turn bids are rejected without touching the auction.
    #[test]
    fn prop_out_of_turn_rejected(seed in any::<u64>(), offset in 1u8..=3) {
        let mut state = GameState::new(0, seed);
        start_round(&mut state).unwrap();
        let before = state.round.auction.clone();
        let err = place_bid(&mut state, offset, 100).unwrap_err();
        prop_assert_eq!(err.kind(), Some(&ValidationKind::OutOfTurn));
        prop_assert_eq!(&state.round.auction, &before);
        prop_assert_eq!(state.phase, Phase::Bidding);
        prop_assert!(legal_bids(&state, offset).is_empty());
    }
}

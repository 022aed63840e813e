//! The bidding auction.
//!
//! Seats bid in queue order starting at the first-hand receiver. An accepted
//! bid must beat the running high bid and sends its bidder to the back of
//! the queue; a pass drops the seat for the rest of the auction. The auction
//! is won when a single seat is left after at least one accepted bid. If the
//! first three seats all pass, nobody can be forced to bid and the deal is
//! thrown in.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::round::redeal_after_restart;
use crate::domain::rules::{bid_ladder, is_ladder_bid, PASS, PLAYERS, RESTART_PASSES};
use crate::domain::state::{nth_from, GameState, Phase, Seat};
use crate::errors::domain::{DomainError, ValidationKind};

/// One entry of the bidding history. `score == 0` is a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bet {
    pub seat: Seat,
    pub score: u16,
}

impl Bet {
    pub fn is_pass(&self) -> bool {
        self.score == PASS
    }
}

/// What an accepted bidding action led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidOutcome {
    /// Auction continues with `next` to act.
    Continue { next: Seat },
    /// Auction over.
    Won { hakem: Seat, bid: u16 },
    /// Three opening passes; the round is being redealt.
    Restarted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Auction {
    queue: VecDeque<Seat>,
    history: Vec<Bet>,
    high: Option<Bet>,
}

impl Auction {
    pub fn new(first: Seat) -> Self {
        Self {
            queue: (0..PLAYERS as u8).map(|n| nth_from(first, n)).collect(),
            history: Vec::new(),
            high: None,
        }
    }

    /// Seat whose bid is awaited, `None` once the auction is decided.
    pub fn to_act(&self) -> Option<Seat> {
        if self.is_decided() {
            return None;
        }
        self.queue.front().copied()
    }

    pub fn history(&self) -> &[Bet] {
        &self.history
    }

    pub fn high_bid(&self) -> Option<Bet> {
        self.high
    }

    /// Seats still in the auction, in queue order.
    pub fn active_seats(&self) -> impl Iterator<Item = Seat> + '_ {
        self.queue.iter().copied()
    }

    fn is_decided(&self) -> bool {
        self.queue.len() <= 1 && self.high.is_some()
    }

    fn opening_passes(&self) -> usize {
        if self.high.is_some() {
            return 0;
        }
        self.history.iter().take_while(|b| b.is_pass()).count()
    }

    /// Every bid value the seat to act may submit: pass, then each ladder
    /// rung above the high bid.
    pub fn legal_bids(&self) -> Vec<u16> {
        let floor = self.high.map(|b| b.score).unwrap_or(0);
        std::iter::once(PASS)
            .chain(bid_ladder().filter(|&b| b > floor))
            .collect()
    }

    /// Validate and record a bid. Nothing changes when it is rejected.
    pub fn place(&mut self, seat: Seat, score: u16) -> Result<BidOutcome, DomainError> {
        let Some(expected) = self.to_act() else {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Auction already decided",
            ));
        };
        if expected != seat {
            return Err(DomainError::validation(
                ValidationKind::OutOfTurn,
                format!("Seat {expected} is bidding, not {seat}"),
            ));
        }
        if score != PASS {
            if !is_ladder_bid(score) {
                return Err(DomainError::validation(
                    ValidationKind::InvalidBid,
                    format!("Bid {score} is not on the ladder"),
                ));
            }
            if let Some(high) = self.high {
                if score <= high.score {
                    return Err(DomainError::validation(
                        ValidationKind::BidTooLow,
                        format!("Bid {score} must exceed {}", high.score),
                    ));
                }
            }
        }

        self.queue.pop_front();
        let bet = Bet { seat, score };
        self.history.push(bet);

        if bet.is_pass() {
            if self.opening_passes() >= RESTART_PASSES {
                return Ok(BidOutcome::Restarted);
            }
        } else {
            self.high = Some(bet);
            self.queue.push_back(seat);
        }

        match (self.queue.len(), self.high) {
            (1, Some(high)) => {
                if self.queue.front() != Some(&high.seat) {
                    return Err(DomainError::invariant(
                        "last seat standing is not the high bidder",
                    ));
                }
                Ok(BidOutcome::Won {
                    hakem: high.seat,
                    bid: high.score,
                })
            }
            (0, _) => Err(DomainError::invariant("auction ran out of bidders")),
            _ => self
                .queue
                .front()
                .map(|&next| BidOutcome::Continue { next })
                .ok_or_else(|| DomainError::invariant("auction queue empty")),
        }
    }
}

/// Bid values `who` may submit right now; empty when it is not their turn.
pub fn legal_bids(state: &GameState, who: Seat) -> Vec<u16> {
    if state.phase != Phase::Bidding || state.round.auction.to_act() != Some(who) {
        return Vec::new();
    }
    state.round.auction.legal_bids()
}

/// Place a bid for `who`, advancing the round on a decided auction and
/// redealing on a restart.
pub fn place_bid(state: &mut GameState, who: Seat, score: u16) -> Result<BidOutcome, DomainError> {
    if state.phase != Phase::Bidding {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Phase mismatch",
        ));
    }

    let outcome = state.round.auction.place(who, score)?;
    debug!(seat = who, score, ?outcome, "bid placed");

    match outcome {
        BidOutcome::Continue { next } => {
            state.turn = Some(next);
        }
        BidOutcome::Won { hakem, bid } => {
            state.round.hakem = Some(hakem);
            state.round.bid = Some(bid);
            state.phase = Phase::ChoosingMode;
            state.turn = Some(hakem);
        }
        BidOutcome::Restarted => {
            warn!(
                round_no = state.round.round_no,
                first_hand = state.round.first_hand,
                "three opening passes, redealing"
            );
            redeal_after_restart(state)?;
        }
    }
    Ok(outcome)
}

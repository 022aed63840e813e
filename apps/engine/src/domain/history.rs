//! Public record of finished rounds.

use serde::{Deserialize, Serialize};

use crate::domain::bidding::Bet;
use crate::domain::scoring::PayoffKind;
use crate::domain::state::{Seat, Team};
use crate::domain::{Card, GameMode, Trump};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round_no: u32,
    pub first_hand: Seat,
    pub hakem: Seat,
    pub bid: u16,
    pub mode: GameMode,
    pub trump: Trump,
    /// Full bidding history of the deal that was played.
    pub bids: Vec<Bet>,
    pub discards: Vec<Card>,
    pub tricks_won: [usize; 2],
    /// Card points per team; always sums to 165.
    pub team_points: [u16; 2],
    pub payoff: PayoffKind,
    pub deltas: [i32; 2],
    pub scores_after: [i32; 2],
}

impl RoundSummary {
    pub fn hakem_team(&self) -> Team {
        Team::of(self.hakem)
    }

    pub fn bid_made(&self) -> bool {
        matches!(self.payoff, PayoffKind::Shelem | PayoffKind::Made)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchHistory {
    pub rounds: Vec<RoundSummary>,
    /// Auctions thrown in after three opening passes.
    pub restarts: u32,
}

impl MatchHistory {
    pub fn push(&mut self, summary: RoundSummary) {
        self.rounds.push(summary);
    }

    pub fn last(&self) -> Option<&RoundSummary> {
        self.rounds.last()
    }

    pub fn final_scores(&self) -> [i32; 2] {
        self.last().map(|r| r.scores_after).unwrap_or([0, 0])
    }

    /// Team ahead on score, `None` on a tie.
    pub fn leader(&self) -> Option<Team> {
        let [one, two] = self.final_scores();
        match one.cmp(&two) {
            std::cmp::Ordering::Greater => Some(Team::One),
            std::cmp::Ordering::Less => Some(Team::Two),
            std::cmp::Ordering::Equal => None,
        }
    }
}

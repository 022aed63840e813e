pub const PLAYERS: usize = 4;
pub const HAND_SIZE: usize = 12;
pub const WIDOW_SIZE: usize = 4;
pub const TRICKS_PER_ROUND: u8 = 12;

/// Lowest and highest non-pass bid, and the ladder step between them.
pub const MIN_BID: u16 = 100;
pub const MAX_BID: u16 = 165;
pub const BID_STEP: u16 = 5;
/// Bid value that means "pass".
pub const PASS: u16 = 0;

/// Card points in a full deck: 13 tricks-worth of 5 plus honours.
pub const TOTAL_POINTS: u16 = 165;
pub const POINTS_PER_TRICK: u16 = 5;

/// Opponents below this after a failed bid leave the hakem with a single penalty.
pub const NEAR_MISS_THRESHOLD: u16 = 85;
/// A failed hakem team above this still gets the softer round reward.
pub const SOFT_FAIL_THRESHOLD: u16 = 80;

pub const DEFAULT_TARGET_SCORE: i32 = 1165;

/// Passes in a row before any accepted bid that abort the auction.
pub const RESTART_PASSES: usize = 3;

/// Every non-pass bid in ascending order: 100, 105, .., 165.
pub fn bid_ladder() -> impl Iterator<Item = u16> {
    (MIN_BID..=MAX_BID).step_by(BID_STEP as usize)
}

pub fn is_ladder_bid(score: u16) -> bool {
    (MIN_BID..=MAX_BID).contains(&score) && (score - MIN_BID) % BID_STEP == 0
}

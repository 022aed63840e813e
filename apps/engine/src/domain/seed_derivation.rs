//! RNG seed derivation utilities for deterministic matches.
//!
//! Derives unique-but-deterministic seeds for dealing and for seat
//! strategies from a single match seed, and match seeds from a batch seed.

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// SplitMix64 finalizer: nearby inputs land far apart.
fn mix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Derive the seed of match `match_no` (1-based) in a batch.
pub fn derive_match_seed(base_seed: u64, match_no: u32) -> u64 {
    mix(base_seed.wrapping_add((match_no as u64).wrapping_mul(GOLDEN_GAMMA)))
}

/// Derive a seed for dealing cards in a round.
///
/// # Arguments
///
/// * `match_seed` - Base RNG seed for the match
/// * `round_no` - Round number (1-based)
/// * `attempt` - Deal attempt within the round; bumped each time the
///   auction restarts so the redeal differs
///
/// # Returns
///
/// Derived seed that is unique per (match, round, attempt) combination.
pub fn derive_dealing_seed(match_seed: u64, round_no: u32, attempt: u32) -> u64 {
    match_seed
        .wrapping_add((round_no as u64).wrapping_mul(1_000_000))
        .wrapping_add((attempt as u64).wrapping_mul(1_000))
        .wrapping_add(2) // Offset to distinguish from player seeds
}

/// Derive a seed for the strategy sitting in `seat`.
///
/// Same match + seat = same decisions. Streams are hashed, so consecutive
/// match seeds do not hand one seat's stream to another seat.
pub fn derive_player_seed(match_seed: u64, seat: u8) -> u64 {
    mix(mix(match_seed) ^ (seat as u64 + 1))
}

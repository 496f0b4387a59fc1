//! Card reward rolls.
//!
//! Rewards are drawn from the middle of the card catalog: the leading
//! starter cards and the trailing status cards are never offered.

use crate::cards::CardId;
use crate::catalog::Catalog;
use crate::core::{GameRng, RunConfig, RunError};

/// Number of cards offered after a won encounter.
pub const REWARD_COUNT: usize = 3;

/// Catalog index range eligible for rewards, inclusive on both ends.
fn candidate_range(catalog: &Catalog, config: &RunConfig) -> Option<(usize, usize)> {
    let low = config.starter_card_count;
    let high = catalog
        .cards()
        .len()
        .checked_sub(1 + config.status_card_count)?;
    (low <= high).then_some((low, high))
}

/// Roll three pairwise-distinct reward cards.
///
/// Each option rerolls until it differs from the ones already picked, so
/// the number of RNG draws depends on collisions.
pub fn roll_rewards(
    catalog: &Catalog,
    config: &RunConfig,
    rng: &mut GameRng,
) -> Result<[CardId; REWARD_COUNT], RunError> {
    let (low, high) = candidate_range(catalog, config).ok_or(RunError::TooFewRewardCandidates {
        available: 0,
    })?;
    let available = high - low + 1;
    if available < REWARD_COUNT {
        return Err(RunError::TooFewRewardCandidates { available });
    }
    let (low, high) = (
        i32::try_from(low).map_err(|_| RunError::TooFewRewardCandidates { available })?,
        i32::try_from(high).map_err(|_| RunError::TooFewRewardCandidates { available })?,
    );

    let mut picks: [Option<i32>; REWARD_COUNT] = [None; REWARD_COUNT];
    for slot in 0..REWARD_COUNT {
        let roll = loop {
            let roll = rng.roll_in_range(low, high);
            if !picks[..slot].contains(&Some(roll)) {
                break roll;
            }
        };
        picks[slot] = Some(roll);
    }

    let mut rewards = [CardId::new(0); REWARD_COUNT];
    for (reward, pick) in rewards.iter_mut().zip(picks) {
        // Every pick lies in [low, high] which fits a CardId
        let index = pick.and_then(|p| u8::try_from(p).ok()).unwrap_or_default();
        *reward = CardId::new(index);
    }
    Ok(rewards)
}

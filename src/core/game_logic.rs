use super::constants::{MAX_XP_GROWTH_DIVISOR, STARTING_MAX_XP};
use crate::character::rank::Rank;
use crate::character::user::UserRecord;

/// XP required for the level after one with the given requirement.
/// Equivalent to `floor(max_xp * 1.5)`.
pub fn next_max_xp(max_xp: u64) -> u64 {
    max_xp.saturating_add(max_xp / MAX_XP_GROWTH_DIVISOR)
}

/// Converts excess XP into level-ups until `xp < max_xp`.
/// Returns the number of levels gained.
///
/// Excess XP carries into the new level, and each step grows `max_xp` from
/// its pre-level-up value, so one large grant can cross several levels.
pub fn normalize_level(user: &mut UserRecord) -> u32 {
    let mut levelups = 0;

    // A zero requirement would never terminate; loaders reject such records.
    if user.max_xp == 0 {
        return 0;
    }

    while user.xp >= user.max_xp {
        user.level += 1;
        user.xp -= user.max_xp;
        user.max_xp = next_max_xp(user.max_xp);
        user.rank = Rank::for_level(user.level);
        levelups += 1;
    }

    levelups
}

/// Applies XP to the user and processes any level-ups.
/// Returns the number of levels gained.
pub fn apply_xp(user: &mut UserRecord, amount: u64) -> u32 {
    user.xp = user.xp.saturating_add(amount);
    normalize_level(user)
}

/// Total XP spent to reach `level` from level 1 with no carry.
pub fn total_xp_for_level(level: u32) -> u64 {
    let mut max_xp = STARTING_MAX_XP;
    let mut total = 0u64;
    for _ in 1..level {
        total = total.saturating_add(max_xp);
        max_xp = next_max_xp(max_xp);
    }
    total
}

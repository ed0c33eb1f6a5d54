// Tier classification and gap primitives, shared by both assessment modes.
//
// Breakpoints (identical for tiers and profiles):
//   percentage <= 25  -> level 1
//   percentage <= 50  -> level 2
//   percentage <= 75  -> level 3
//   otherwise         -> level 4
//
// Input percentages are clamped to [0,100] before comparison; NaN clamps
// to 0. Classification never fails on numeric input.

use crate::types::{GapInfo, Priority, Profile, Tier, TierStatus};

const LEVEL_1_MAX: f64 = 25.0;
const LEVEL_2_MAX: f64 = 50.0;
const LEVEL_3_MAX: f64 = 75.0;

/// Maximum raw score of one fixed-form dimension (12 criteria x 3 points)
pub const MAX_RAW_SCORE: f64 = 36.0;

/// Shared breakpoint banding for tiers and profiles
fn band(percentage: f64) -> u8 {
    let bounded = if percentage.is_nan() {
        0.0
    } else {
        percentage.clamp(0.0, 100.0)
    };
    match bounded {
        p if p <= LEVEL_1_MAX => 1,
        p if p <= LEVEL_2_MAX => 2,
        p if p <= LEVEL_3_MAX => 3,
        _ => 4,
    }
}

/// Tier achieved at a given percentage
pub fn tier_from_percentage(percentage: f64) -> Tier {
    Tier::from_level(band(percentage))
}

/// Global profile for a given global percentage
pub fn profile_from_score(percentage: f64) -> Profile {
    Profile::from_level(band(percentage))
}

/// Tier achieved at a given raw 0-36 dimension score.
/// The raw score is clamped to [0,36] before conversion.
pub fn tier_from_raw_score(raw: f64) -> Tier {
    let bounded = if raw.is_nan() {
        0.0
    } else {
        raw.clamp(0.0, MAX_RAW_SCORE)
    };
    tier_from_percentage(bounded / MAX_RAW_SCORE * 100.0)
}

/// Non-negative distance from achieved to target tier
pub fn gap(achieved: Tier, target: Tier) -> u8 {
    target.level().saturating_sub(achieved.level())
}

/// Priority of closing a gap
pub fn gap_priority(gap: u8) -> Priority {
    match gap {
        g if g >= 2 => Priority::High,
        1 => Priority::Medium,
        _ => Priority::Low,
    }
}

/// Position of an achieved tier relative to the target
pub fn tier_status(achieved: Tier, target: Tier) -> TierStatus {
    if achieved > target {
        TierStatus::Above
    } else if achieved == target {
        TierStatus::On
    } else {
        TierStatus::Below
    }
}

/// Assemble the gap record for one dimension
pub fn gap_info(id: &str, name: &str, achieved: Tier, target: Tier) -> GapInfo {
    let gap = gap(achieved, target);
    GapInfo {
        id: id.to_string(),
        name: name.to_string(),
        achieved_tier: achieved,
        target_tier: target,
        gap,
        priority: gap_priority(gap),
    }
}

//! Shot counts per attack pattern.

use super::AttackPattern;

/// Distance fraction thresholds for spread weapons.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpreadFalloff {
    /// At or below this fraction every projectile lands.
    pub near: f32,
    /// Above this fraction exactly one projectile lands.
    pub far: f32,
}

impl SpreadFalloff {
    pub const DEFAULT: Self = Self {
        near: 0.1,
        far: 0.9,
    };
}

impl Default for SpreadFalloff {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Distance fraction used by the spread falloff.
///
/// This is the ratio of *squared* distance to *squared* range, so a target
/// at half range yields `0.25`, not `0.5`. Kept for balance parity with the
/// shipped weapon tables.
pub fn distance_fraction(distance_sqr: f32, range: f32) -> f32 {
    let range_sqr = range * range;
    if range_sqr <= 0.0 {
        return 1.0;
    }
    distance_sqr / range_sqr
}

/// Number of spread projectiles that land at `fraction` of range.
///
/// - `fraction <= near`: all of them
/// - `near < fraction <= far`: `ceil(projectiles * (1 - fraction))`
/// - `fraction > far`: one
pub fn landing_projectiles(projectiles: u32, fraction: f32, falloff: SpreadFalloff) -> u32 {
    if fraction <= falloff.near {
        projectiles
    } else if fraction <= falloff.far {
        let scaled = (projectiles as f32 * (1.0 - fraction)).ceil();
        (scaled.max(0.0) as u32).min(projectiles)
    } else {
        projectiles.min(1)
    }
}

/// Number of rolls one attack charge produces.
pub fn shot_count(pattern: AttackPattern, fraction: f32, falloff: SpreadFalloff) -> u32 {
    match pattern {
        AttackPattern::Melee | AttackPattern::SingleShot => 1,
        AttackPattern::Burst { shots } => shots,
        AttackPattern::Spread { projectiles } => {
            landing_projectiles(projectiles, fraction, falloff)
        }
    }
}

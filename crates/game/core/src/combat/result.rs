//! Shot result types and single-shot resolution.

use super::damage::{apply_cover_penalty, critical_damage, is_critical};
use super::hit::{accuracy, check_hit};
use super::WeaponProfile;

/// Outcome of one roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotOutcome {
    Miss,
    Hit,
    Critical,
}

/// Result of resolving one roll against a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotResult {
    pub outcome: ShotOutcome,
    /// Final damage after critical and cover adjustments. Zero on a miss.
    pub damage: u32,
}

impl ShotResult {
    pub const MISS: Self = Self {
        outcome: ShotOutcome::Miss,
        damage: 0,
    };

    pub fn is_critical(&self) -> bool {
        self.outcome == ShotOutcome::Critical
    }
}

/// Pre-drawn random values for one roll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShotRolls {
    /// Uniform in `[0, 1)`.
    pub hit: f32,
    /// Base damage already drawn from `[damage_min, damage_max]`.
    pub damage: u32,
    /// Uniform in `[0, 1)`.
    pub critical: f32,
}

/// Resolve a single roll.
///
/// 1. hit if `rolls.hit < accuracy`
/// 2. critical only outside cover
/// 3. critical damage is `ceil(base * multiplier)`
/// 4. cover subtracts a flat penalty, clamped at zero
pub fn resolve_shot(weapon: &WeaponProfile, target_in_cover: bool, rolls: ShotRolls) -> ShotResult {
    if !check_hit(accuracy(weapon, target_in_cover), rolls.hit) {
        return ShotResult::MISS;
    }

    let base = rolls.damage.clamp(weapon.damage_min, weapon.damage_max);
    let critical = is_critical(weapon.critical_chance, rolls.critical, target_in_cover);
    let damage = if critical {
        critical_damage(base, weapon.critical_multiplier)
    } else {
        base
    };
    let damage = apply_cover_penalty(damage, weapon.cover_damage_penalty, target_in_cover);

    ShotResult {
        outcome: if critical {
            ShotOutcome::Critical
        } else {
            ShotOutcome::Hit
        },
        damage,
    }
}

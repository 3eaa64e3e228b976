//! Immutable weapon descriptions.

use strum::Display;

/// Visual/holster family of a weapon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeaponClass {
    Rifle,
    LongRifle,
    Handgun,
    Melee,
}

/// How one attack charge turns into shots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackPattern {
    Melee,
    SingleShot,
    /// `shots` independent rolls.
    Burst { shots: u32 },
    /// Up to `projectiles` rolls, reduced with distance.
    Spread { projectiles: u32 },
}

/// Weapon profile used for every roll of an attack.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponProfile {
    pub name: String,
    pub class: WeaponClass,
    pub pattern: AttackPattern,
    /// Attack range in world units.
    pub range: f32,
    pub damage_min: u32,
    pub damage_max: u32,
    /// Probability in `[0, 1]`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub critical_chance: f32,
    #[cfg_attr(feature = "serde", serde(default = "WeaponProfile::default_critical_multiplier"))]
    pub critical_multiplier: f32,
    #[cfg_attr(feature = "serde", serde(default = "WeaponProfile::default_cover_damage_penalty"))]
    pub cover_damage_penalty: u32,
    #[cfg_attr(feature = "serde", serde(default = "WeaponProfile::default_cover_accuracy_penalty"))]
    pub cover_accuracy_penalty: f32,
}

impl WeaponProfile {
    pub const DEFAULT_COVER_DAMAGE_PENALTY: u32 = 5;
    pub const DEFAULT_COVER_ACCURACY_PENALTY: f32 = 0.5;
    pub const DEFAULT_CRITICAL_MULTIPLIER: f32 = 1.5;

    /// A profile with default cover and critical settings.
    pub fn new(
        name: impl Into<String>,
        class: WeaponClass,
        pattern: AttackPattern,
        range: f32,
        damage_min: u32,
        damage_max: u32,
    ) -> Self {
        Self {
            name: name.into(),
            class,
            pattern,
            range,
            damage_min,
            damage_max: damage_max.max(damage_min),
            critical_chance: 0.0,
            critical_multiplier: Self::DEFAULT_CRITICAL_MULTIPLIER,
            cover_damage_penalty: Self::DEFAULT_COVER_DAMAGE_PENALTY,
            cover_accuracy_penalty: Self::DEFAULT_COVER_ACCURACY_PENALTY,
        }
    }

    /// Basic melee weapon.
    pub fn fists() -> Self {
        Self::new("Fists", WeaponClass::Melee, AttackPattern::Melee, 1.5, 5, 10)
    }

    pub fn with_critical(mut self, chance: f32, multiplier: f32) -> Self {
        self.critical_chance = chance;
        self.critical_multiplier = multiplier;
        self
    }

    pub fn with_cover_penalties(mut self, damage: u32, accuracy: f32) -> Self {
        self.cover_damage_penalty = damage;
        self.cover_accuracy_penalty = accuracy;
        self
    }

    #[inline]
    pub fn sqr_range(&self) -> f32 {
        self.range * self.range
    }

    pub fn is_melee(&self) -> bool {
        matches!(self.pattern, AttackPattern::Melee)
    }

    #[cfg(feature = "serde")]
    fn default_critical_multiplier() -> f32 {
        Self::DEFAULT_CRITICAL_MULTIPLIER
    }

    #[cfg(feature = "serde")]
    fn default_cover_damage_penalty() -> u32 {
        Self::DEFAULT_COVER_DAMAGE_PENALTY
    }

    #[cfg(feature = "serde")]
    fn default_cover_accuracy_penalty() -> f32 {
        Self::DEFAULT_COVER_ACCURACY_PENALTY
    }
}

//! Combat capability: health, attack charges and equipped weapons.

use crate::error::{ErrorSeverity, GameError};
use crate::state::TargetRef;

use super::WeaponProfile;

/// Lifecycle of a fighter within a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FighterPhase {
    #[default]
    Idle,
    Attacking,
    Dead,
}

/// What a call to [`Fighter::take_damage`] produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageTaken {
    /// Zero damage or the fighter was already dead.
    Nothing,
    /// Non-lethal hit.
    Wounded { amount: u32, critical: bool },
    /// Health reached zero on this call.
    Killed,
}

/// Attack failures. All of them leave state untouched.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum AttackError {
    #[error("cannot attack {target}: same alignment")]
    InvalidTarget { target: TargetRef },

    #[error("no attacks remaining this turn")]
    NoAttacksRemaining,

    #[error("target out of range ({distance_sqr:.1} > {range_sqr:.1})")]
    OutOfRange { distance_sqr: f32, range_sqr: f32 },

    #[error("{0} cannot fight")]
    NoCombatCapability(crate::state::ActorId),

    #[error("{0} is dead or does not exist")]
    TargetNotFound(TargetRef),

    #[error("{0} is not the acting actor")]
    OutOfTurn(crate::state::ActorId),

    #[error("no alternate weapon to switch to")]
    NoAlternateWeapon,
}

impl GameError for AttackError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoAttacksRemaining | Self::OutOfRange { .. } | Self::NoAlternateWeapon => {
                ErrorSeverity::Recoverable
            }
            Self::InvalidTarget { .. }
            | Self::NoCombatCapability(_)
            | Self::TargetNotFound(_)
            | Self::OutOfTurn(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTarget { .. } => "ATTACK_INVALID_TARGET",
            Self::NoAttacksRemaining => "ATTACK_NO_ATTACKS_REMAINING",
            Self::OutOfRange { .. } => "ATTACK_OUT_OF_RANGE",
            Self::NoCombatCapability(_) => "ATTACK_NO_COMBAT_CAPABILITY",
            Self::TargetNotFound(_) => "ATTACK_TARGET_NOT_FOUND",
            Self::OutOfTurn(_) => "ATTACK_OUT_OF_TURN",
            Self::NoAlternateWeapon => "ATTACK_NO_ALTERNATE_WEAPON",
        }
    }
}

/// Combat capability of an actor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fighter {
    health: u32,
    max_health: u32,
    attacks_remaining: u32,
    max_attacks: u32,
    melee: WeaponProfile,
    current: Option<WeaponProfile>,
    other: Option<WeaponProfile>,
    phase: FighterPhase,
}

impl Fighter {
    pub fn new(max_health: u32, max_attacks: u32, melee: WeaponProfile) -> Self {
        Self {
            health: max_health,
            max_health,
            attacks_remaining: 0,
            max_attacks,
            melee,
            current: None,
            other: None,
            phase: FighterPhase::Idle,
        }
    }

    pub fn with_weapons(
        mut self,
        primary: Option<WeaponProfile>,
        secondary: Option<WeaponProfile>,
    ) -> Self {
        // A lone secondary becomes the drawn weapon.
        match (primary, secondary) {
            (Some(primary), secondary) => {
                self.current = Some(primary);
                self.other = secondary;
            }
            (None, secondary) => self.current = secondary,
        }
        self
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn attacks_remaining(&self) -> u32 {
        self.attacks_remaining
    }

    pub fn max_attacks(&self) -> u32 {
        self.max_attacks
    }

    pub fn phase(&self) -> FighterPhase {
        self.phase
    }

    pub fn is_dead(&self) -> bool {
        self.phase == FighterPhase::Dead
    }

    pub fn melee_weapon(&self) -> &WeaponProfile {
        &self.melee
    }

    /// Drawn ranged weapon, falling back to the melee weapon when unarmed.
    pub fn current_weapon(&self) -> &WeaponProfile {
        self.current.as_ref().unwrap_or(&self.melee)
    }

    pub fn other_weapon(&self) -> Option<&WeaponProfile> {
        self.other.as_ref()
    }

    /// Squared range of the drawn weapon.
    pub fn sqr_attack_range(&self) -> f32 {
        self.current_weapon().sqr_range()
    }

    /// Refills attack charges. No-op once dead.
    pub fn start_turn(&mut self) {
        if self.is_dead() {
            return;
        }
        self.attacks_remaining = self.max_attacks;
        self.phase = FighterPhase::Idle;
    }

    /// Picks melee inside melee range, otherwise the drawn ranged weapon.
    pub fn select_weapon(&self, distance_sqr: f32) -> Result<&WeaponProfile, AttackError> {
        if distance_sqr <= self.melee.sqr_range() {
            return Ok(&self.melee);
        }
        match self.current.as_ref() {
            Some(weapon) if distance_sqr <= weapon.sqr_range() => Ok(weapon),
            Some(weapon) => Err(AttackError::OutOfRange {
                distance_sqr,
                range_sqr: weapon.sqr_range(),
            }),
            None => Err(AttackError::OutOfRange {
                distance_sqr,
                range_sqr: self.melee.sqr_range(),
            }),
        }
    }

    /// Spends one charge and enters the attacking phase.
    pub fn begin_attack(&mut self) -> Result<(), AttackError> {
        if self.attacks_remaining == 0 {
            return Err(AttackError::NoAttacksRemaining);
        }
        self.attacks_remaining -= 1;
        self.phase = FighterPhase::Attacking;
        Ok(())
    }

    pub fn finish_attack(&mut self) {
        if self.phase == FighterPhase::Attacking {
            self.phase = FighterPhase::Idle;
        }
    }

    /// Swaps the drawn and holstered ranged weapons.
    pub fn switch_weapon(&mut self) -> Result<&WeaponProfile, AttackError> {
        if self.other.is_none() || self.current.is_none() {
            return Err(AttackError::NoAlternateWeapon);
        }
        std::mem::swap(&mut self.current, &mut self.other);
        Ok(self.current_weapon())
    }

    /// Applies damage, clamping health at zero.
    pub fn take_damage(&mut self, amount: u32, critical: bool) -> DamageTaken {
        if self.is_dead() || amount == 0 {
            return DamageTaken::Nothing;
        }
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.die();
            DamageTaken::Killed
        } else {
            DamageTaken::Wounded { amount, critical }
        }
    }

    /// Marks the fighter dead. Returns true only on the first call.
    pub fn die(&mut self) -> bool {
        if self.is_dead() {
            return false;
        }
        self.health = 0;
        self.attacks_remaining = 0;
        self.phase = FighterPhase::Dead;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{AttackPattern, WeaponClass};

    fn rifle(range: f32) -> WeaponProfile {
        WeaponProfile::new("Rifle", WeaponClass::Rifle, AttackPattern::SingleShot, range, 10, 10)
    }

    fn shotgun() -> WeaponProfile {
        WeaponProfile::new(
            "Shotgun",
            WeaponClass::Rifle,
            AttackPattern::Spread { projectiles: 5 },
            8.0,
            3,
            6,
        )
    }

    #[test]
    fn die_is_idempotent() {
        let mut fighter = Fighter::new(30, 2, WeaponProfile::fists());
        assert!(fighter.die());
        assert!(!fighter.die());
        assert!(fighter.is_dead());
    }

    #[test]
    fn lethal_damage_kills_once() {
        let mut fighter = Fighter::new(10, 1, WeaponProfile::fists());
        assert_eq!(
            fighter.take_damage(4, false),
            DamageTaken::Wounded {
                amount: 4,
                critical: false
            }
        );
        assert_eq!(fighter.take_damage(20, true), DamageTaken::Killed);
        assert_eq!(fighter.health(), 0);
        assert_eq!(fighter.take_damage(5, false), DamageTaken::Nothing);
        assert!(!fighter.die());
    }

    #[test]
    fn zero_damage_reports_nothing() {
        let mut fighter = Fighter::new(10, 1, WeaponProfile::fists());
        assert_eq!(fighter.take_damage(0, false), DamageTaken::Nothing);
        assert_eq!(fighter.health(), 10);
    }

    #[test]
    fn start_turn_refills_charges_unless_dead() {
        let mut fighter = Fighter::new(10, 2, WeaponProfile::fists());
        assert_eq!(fighter.attacks_remaining(), 0);
        fighter.start_turn();
        assert_eq!(fighter.attacks_remaining(), 2);
        fighter.begin_attack().unwrap();
        fighter.begin_attack().unwrap();
        assert_eq!(fighter.begin_attack(), Err(AttackError::NoAttacksRemaining));

        fighter.die();
        fighter.start_turn();
        assert_eq!(fighter.attacks_remaining(), 0);
    }

    #[test]
    fn weapon_selection_prefers_melee_up_close() {
        let fighter =
            Fighter::new(10, 1, WeaponProfile::fists()).with_weapons(Some(rifle(20.0)), None);
        assert!(fighter.select_weapon(1.0).unwrap().is_melee());
        assert_eq!(fighter.select_weapon(100.0).unwrap().name, "Rifle");
        assert!(matches!(
            fighter.select_weapon(401.0),
            Err(AttackError::OutOfRange { .. })
        ));
    }

    #[test]
    fn unarmed_fighters_only_reach_melee_range() {
        let fighter = Fighter::new(10, 1, WeaponProfile::fists());
        assert_eq!(fighter.sqr_attack_range(), 2.25);
        assert!(fighter.select_weapon(4.0).is_err());
    }

    #[test]
    fn switch_weapon_swaps_slots() {
        let mut fighter = Fighter::new(10, 1, WeaponProfile::fists())
            .with_weapons(Some(rifle(20.0)), Some(shotgun()));
        assert_eq!(fighter.switch_weapon().unwrap().name, "Shotgun");
        assert_eq!(fighter.other_weapon().map(|w| w.name.as_str()), Some("Rifle"));
        assert_eq!(fighter.sqr_attack_range(), 64.0);

        let mut single =
            Fighter::new(10, 1, WeaponProfile::fists()).with_weapons(Some(rifle(20.0)), None);
        assert_eq!(single.switch_weapon(), Err(AttackError::NoAlternateWeapon));
    }
}

//! Combat resolution system.
//!
//! This module provides pure functions for resolving a single shot and the
//! [`Fighter`] capability that tracks health and attack charges.
//!
//! # Architecture
//!
//! - **Pure Functions**: hit, damage and projectile falloff take pre-rolled
//!   random values and never touch state
//! - **Used by the Engine**: [`crate::engine::GameEngine::attack`] draws the
//!   rolls from the RNG oracle and applies the results
//! - **Weapon-driven**: every number comes from a [`WeaponProfile`]
//!
//! # Core Functions
//!
//! - `resolve_shot`: complete shot resolution (hit check + damage)
//! - `accuracy`: cover-adjusted accuracy
//! - `critical_damage`/`apply_cover_penalty`: damage arithmetic
//! - `landing_projectiles`: spread falloff by distance fraction

pub mod damage;
pub mod fighter;
pub mod hit;
pub mod pattern;
pub mod result;
pub mod weapon;

pub use damage::{apply_cover_penalty, critical_damage, is_critical};
pub use fighter::{AttackError, DamageTaken, Fighter, FighterPhase};
pub use hit::{accuracy, check_hit};
pub use pattern::{SpreadFalloff, distance_fraction, landing_projectiles, shot_count};
pub use result::{ShotOutcome, ShotResult, ShotRolls, resolve_shot};
pub use weapon::{AttackPattern, WeaponClass, WeaponProfile};

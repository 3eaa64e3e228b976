//! Data-driven content definitions and loaders.
//!
//! This crate provides loaders for the RON/TOML data files of a skirmish:
//! - Rules configuration (TOML)
//! - Build recipes (RON)
//! - Weapon profiles (RON)
//! - Actor templates for commanders and bots (RON)
//! - Scenarios: spawns, crates, cover walls and starting stock (RON)
//!
//! Content is consumed by runtime oracles and never appears in game state.
//!
//! All loaders use embers-core types directly with serde for RON/TOML deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ActorEntry, ActorLoader, ConfigLoader, ContentFactory, CrateSpec, LoadResult, RecipeLoader,
    ScenarioLoader, ScenarioSpec, SpawnSpec, WallSpec, WeaponCatalog, WeaponLoader,
};

//! Content loaders for reading game data from files.
//!
//! Every loader reads one file, deserializes an on-disk spec and converts it
//! into embers-core types, reporting the offending path on failure.

pub mod actors;
pub mod config;
pub mod factory;
pub mod recipes;
pub mod scenario;
pub mod weapons;

pub use actors::{ActorEntry, ActorLoader};
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use recipes::RecipeLoader;
pub use scenario::{CrateSpec, ScenarioLoader, ScenarioSpec, SpawnSpec, WallSpec};
pub use weapons::{WeaponCatalog, WeaponLoader};

use std::collections::BTreeMap;
use std::path::Path;

use embers_core::{ResourceCounts, ResourceKind};

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Resource stacks are written as `{ Steel: 2, Wood: 1 }` in data files.
pub(crate) fn counts_from_map(stacks: &BTreeMap<ResourceKind, u32>) -> ResourceCounts {
    ResourceCounts::from_pairs(stacks.iter().map(|(kind, amount)| (*kind, *amount)))
}

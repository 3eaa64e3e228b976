//! Scenario loader.
//!
//! A scenario places the commanders, any starting bots, supply crates and
//! cover walls, and sets each side's starting stock. Actors are referenced
//! by their id in `actors.ron`.

use std::collections::BTreeMap;
use std::path::Path;

use embers_core::{Position, ResourceCounts, ResourceKind};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, counts_from_map, read_file};

/// Places one actor from the actor catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnSpec {
    pub actor: String,
    pub position: Position,
}

/// A breakable supply crate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CrateSpec {
    pub position: Position,
    pub health: u32,
    pub contents: BTreeMap<ResourceKind, u32>,
}

impl CrateSpec {
    pub fn contents(&self) -> ResourceCounts {
        counts_from_map(&self.contents)
    }
}

/// A cover wall segment on the ground plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WallSpec {
    pub from: Position,
    pub to: Position,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub name: String,
    pub player: SpawnSpec,
    #[serde(default)]
    pub allies: Vec<SpawnSpec>,
    pub enemies: Vec<SpawnSpec>,
    #[serde(default)]
    pub crates: Vec<CrateSpec>,
    #[serde(default)]
    pub walls: Vec<WallSpec>,
    #[serde(default)]
    pub player_stock: BTreeMap<ResourceKind, u32>,
    #[serde(default)]
    pub enemy_stock: BTreeMap<ResourceKind, u32>,
}

impl ScenarioSpec {
    pub fn player_stock(&self) -> ResourceCounts {
        counts_from_map(&self.player_stock)
    }

    pub fn enemy_stock(&self) -> ResourceCounts {
        counts_from_map(&self.enemy_stock)
    }
}

/// Loader for scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<ScenarioSpec> {
        let content = read_file(path)?;
        let scenario: ScenarioSpec = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;

        if scenario.enemies.is_empty() {
            anyhow::bail!("Scenario '{}' places no enemies", scenario.name);
        }
        if let Some(index) = scenario.crates.iter().position(|c| c.health == 0) {
            anyhow::bail!(
                "Scenario '{}': crate {} starts broken (health 0)",
                scenario.name,
                index
            );
        }
        Ok(scenario)
    }
}

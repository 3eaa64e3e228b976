//! Content factory for loading a full skirmish from a data directory.

use std::path::{Path, PathBuf};

use embers_core::{GameConfig, RecipeCatalog};

use crate::loaders::{
    ActorEntry, ActorLoader, ConfigLoader, LoadResult, RecipeLoader, ScenarioLoader,
    ScenarioSpec, WeaponCatalog, WeaponLoader,
};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── recipes.ron
/// ├── weapons.ron
/// ├── actors.ron
/// └── scenarios/
///     └── ridge.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load rules configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load build recipes from `recipes.ron`.
    pub fn load_recipes(&self) -> LoadResult<RecipeCatalog> {
        let path = self.data_dir.join("recipes.ron");
        RecipeLoader::load(&path)
    }

    /// Load weapon profiles from `weapons.ron`.
    pub fn load_weapons(&self) -> LoadResult<WeaponCatalog> {
        let path = self.data_dir.join("weapons.ron");
        WeaponLoader::load(&path)
    }

    /// Load actor templates from `actors.ron`, resolving weapon names.
    pub fn load_actors(&self, weapons: &WeaponCatalog) -> LoadResult<Vec<ActorEntry>> {
        let path = self.data_dir.join("actors.ron");
        ActorLoader::load(&path, weapons)
    }

    /// Load a scenario from `scenarios/{name}.ron`.
    ///
    /// Every actor the scenario places must exist in `actors`.
    pub fn load_scenario(&self, name: &str, actors: &[ActorEntry]) -> LoadResult<ScenarioSpec> {
        let path = self.data_dir.join("scenarios").join(format!("{}.ron", name));
        let scenario = ScenarioLoader::load(&path)?;

        let placed = std::iter::once(&scenario.player)
            .chain(&scenario.allies)
            .chain(&scenario.enemies);
        for spawn in placed {
            if !actors.iter().any(|entry| entry.id == spawn.actor) {
                anyhow::bail!(
                    "Scenario '{}' places unknown actor '{}'",
                    scenario.name,
                    spawn.actor
                );
            }
        }
        Ok(scenario)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

//! Build recipe loader.

use std::collections::BTreeMap;
use std::path::Path;

use embers_core::{Archetype, Recipe, RecipeCatalog, ResourceKind};
use serde::Deserialize;

use crate::loaders::{LoadResult, counts_from_map, read_file};

#[derive(Debug, Deserialize)]
struct RecipeSpec {
    archetype: Archetype,
    cost: BTreeMap<ResourceKind, u32>,
}

/// Loader for the recipe catalog from RON files.
pub struct RecipeLoader;

impl RecipeLoader {
    /// RON format: `[(archetype: Warrior, cost: { Steel: 2 }), ...]`
    pub fn load(path: &Path) -> LoadResult<RecipeCatalog> {
        let content = read_file(path)?;
        let specs: Vec<RecipeSpec> = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse recipe RON: {}", e))?;

        let recipes = specs
            .iter()
            .map(|spec| Recipe::new(spec.archetype, counts_from_map(&spec.cost)));
        RecipeCatalog::new(recipes)
            .map_err(|e| anyhow::anyhow!("Invalid recipes in {}: {}", path.display(), e))
    }
}

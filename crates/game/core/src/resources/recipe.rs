//! Immutable build recipes.

use std::collections::BTreeMap;

use crate::error::{ErrorSeverity, GameError};
use crate::state::Archetype;

use super::ResourceCounts;

/// Resource cost of one unit archetype.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Recipe {
    pub archetype: Archetype,
    pub cost: ResourceCounts,
}

impl Recipe {
    pub const fn new(archetype: Archetype, cost: ResourceCounts) -> Self {
        Self { archetype, cost }
    }

    #[inline]
    pub fn can_afford(&self, counts: &ResourceCounts) -> bool {
        counts.covers(&self.cost)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RecipeError {
    #[error("duplicate recipe for {0}")]
    Duplicate(Archetype),

    #[error("{0} units cannot be built")]
    NotBuildable(Archetype),
}

impl GameError for RecipeError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Duplicate(_) => "RECIPE_DUPLICATE",
            Self::NotBuildable(_) => "RECIPE_NOT_BUILDABLE",
        }
    }
}

/// Read-only table of recipes, built once at load time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecipeCatalog {
    recipes: BTreeMap<Archetype, Recipe>,
}

impl RecipeCatalog {
    pub fn new(recipes: impl IntoIterator<Item = Recipe>) -> Result<Self, RecipeError> {
        let mut table = BTreeMap::new();
        for recipe in recipes {
            if recipe.archetype == Archetype::Default {
                return Err(RecipeError::NotBuildable(recipe.archetype));
            }
            if table.insert(recipe.archetype, recipe).is_some() {
                return Err(RecipeError::Duplicate(recipe.archetype));
            }
        }
        Ok(Self { recipes: table })
    }

    pub fn get(&self, archetype: Archetype) -> Option<&Recipe> {
        self.recipes.get(&archetype)
    }

    /// True iff every cost slot is covered by `counts`. Unknown archetypes
    /// are never affordable.
    pub fn can_afford(&self, archetype: Archetype, counts: &ResourceCounts) -> bool {
        self.get(archetype)
            .is_some_and(|recipe| recipe.can_afford(counts))
    }

    /// Archetypes affordable with `counts`, in archetype order.
    pub fn affordable(&self, counts: &ResourceCounts) -> Vec<Archetype> {
        self.recipes
            .values()
            .filter(|recipe| recipe.can_afford(counts))
            .map(|recipe| recipe.archetype)
            .collect()
    }

    pub fn any_affordable(&self, counts: &ResourceCounts) -> bool {
        self.recipes.values().any(|recipe| recipe.can_afford(counts))
    }

    /// First affordable entry of `priority`.
    pub fn first_affordable(
        &self,
        priority: &[Archetype],
        counts: &ResourceCounts,
    ) -> Option<Archetype> {
        priority
            .iter()
            .copied()
            .find(|archetype| self.can_afford(*archetype, counts))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.values()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

//! Traits describing the world around the rules.
//!
//! Oracles expose cover geometry, navigation, bot blueprints, recipes and
//! randomness. The [`Env`] aggregate bundles them so the engine can access
//! everything it needs without hard coupling to concrete implementations.
mod actors;
mod rng;
mod spatial;

pub use actors::{ActorStats, ActorTemplate, BlueprintOracle};
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use spatial::{NavigationOracle, SpatialOracle};

use crate::config::GameConfig;
use crate::resources::RecipeCatalog;

/// Aggregates read-only oracles required by the engine.
#[derive(Clone, Copy)]
pub struct Env<'a> {
    spatial: &'a dyn SpatialOracle,
    navigation: &'a dyn NavigationOracle,
    blueprints: &'a dyn BlueprintOracle,
    recipes: &'a RecipeCatalog,
    rng: &'a dyn RngOracle,
    config: &'a GameConfig,
}

impl<'a> Env<'a> {
    pub fn new(
        spatial: &'a dyn SpatialOracle,
        navigation: &'a dyn NavigationOracle,
        blueprints: &'a dyn BlueprintOracle,
        recipes: &'a RecipeCatalog,
        rng: &'a dyn RngOracle,
        config: &'a GameConfig,
    ) -> Self {
        Self {
            spatial,
            navigation,
            blueprints,
            recipes,
            rng,
            config,
        }
    }

    pub fn spatial(&self) -> &'a dyn SpatialOracle {
        self.spatial
    }

    pub fn navigation(&self) -> &'a dyn NavigationOracle {
        self.navigation
    }

    pub fn blueprints(&self) -> &'a dyn BlueprintOracle {
        self.blueprints
    }

    pub fn recipes(&self) -> &'a RecipeCatalog {
        self.recipes
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }
}

impl std::fmt::Debug for Env<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Env")
            .field("recipes", &self.recipes.len())
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}

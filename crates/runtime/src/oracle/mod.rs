//! Runtime implementations of the embers-core oracle traits.
//!
//! These implementations are bundled into an [`OracleManager`] so the runtime
//! can build [`embers_core::Env`] snapshots on demand. The data is immutable
//! during a match; dynamic state lives in [`embers_core::GameState`].
mod blueprints;
mod field;

use std::sync::Arc;

use embers_core::{Env, GameConfig, PcgRng, RecipeCatalog};

pub use blueprints::BlueprintCatalog;
pub use field::{DEFAULT_COVER_OFFSET, OpenField, Wall};

/// Manages all oracle implementations and provides unified access
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) field: Arc<OpenField>,
    pub(crate) blueprints: Arc<BlueprintCatalog>,
    pub(crate) recipes: Arc<RecipeCatalog>,
    pub(crate) config: Arc<GameConfig>,
    pub(crate) rng: PcgRng,
}

impl OracleManager {
    /// Creates a new oracle manager
    pub fn new(
        field: Arc<OpenField>,
        blueprints: Arc<BlueprintCatalog>,
        recipes: Arc<RecipeCatalog>,
        config: Arc<GameConfig>,
    ) -> Self {
        Self {
            field,
            blueprints,
            recipes,
            config,
            rng: PcgRng, // PcgRng is stateless
        }
    }

    /// Borrows every oracle as the engine's environment.
    pub fn env(&self) -> Env<'_> {
        Env::new(
            self.field.as_ref(),
            self.field.as_ref(),
            self.blueprints.as_ref(),
            self.recipes.as_ref(),
            &self.rng,
            self.config.as_ref(),
        )
    }

    pub fn field(&self) -> &OpenField {
        &self.field
    }

    pub fn blueprints(&self) -> &BlueprintCatalog {
        &self.blueprints
    }

    pub fn recipes(&self) -> &RecipeCatalog {
        &self.recipes
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

impl std::fmt::Debug for OracleManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleManager")
            .field("walls", &self.field.walls().len())
            .field("blueprints", &self.blueprints.len())
            .field("recipes", &self.recipes.len())
            .finish_non_exhaustive()
    }
}

//! Deterministic turn and AI core rules shared by the runtime and tools.
//!
//! `embers-core` defines the canonical rules (ledgers, recipes, fighters,
//! movers, builders, turn order) and exposes pure APIs without I/O. All state
//! mutation flows through [`engine::GameEngine`], and supporting crates
//! depend on the types re-exported here.
pub mod building;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod events;
pub mod movement;
pub mod resources;
pub mod state;

pub use building::{BuildError, Builder};
pub use combat::{
    AttackError, AttackPattern, DamageTaken, Fighter, FighterPhase, ShotOutcome, ShotResult,
    SpreadFalloff, WeaponClass, WeaponProfile,
};
pub use config::GameConfig;
pub use engine::{
    AttackReport, GameEngine, ShotRecord, SpawnError, StepReport, TurnError, TurnHandoff,
};
pub use env::{
    ActorStats, ActorTemplate, BlueprintOracle, Env, NavigationOracle, PcgRng, RngOracle,
    SpatialOracle, compute_seed,
};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use events::GameEvent;
pub use movement::{MoveError, MoveStatus, Mover};
pub use resources::{
    LedgerBook, LedgerChange, LedgerError, LedgerMode, Recipe, RecipeCatalog, RecipeError,
    ResourceCounts, ResourceKind,
};
pub use state::{
    ActorId, ActorIdentity, ActorKind, ActorState, Alignment, Archetype, Capabilities,
    Controller, CrateId, CrateState, EntitiesState, GamePhase, GameState, LedgerId, PickupId,
    PickupState, Position, TargetRef, TurnState,
};

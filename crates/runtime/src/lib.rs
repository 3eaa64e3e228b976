//! Runtime orchestration for the turn and AI core.
//!
//! This crate wires the deterministic engine from `embers-core` to the
//! outside world: oracles backed by loaded content, a tick-driven
//! simulation that turns move orders into motion, the rule-based AI, and a
//! topic-based event bus. Consumers embed [`Runtime`] to play a skirmish
//! turn by turn and subscribe to what happens.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`simulation`] owns the state and drives movement one tick at a time
//! - [`providers`] hosts the AI controller
//! - [`oracle`] and [`scenario`] adapt loaded content for the engine
pub mod api;
pub mod events;
pub mod oracle;
pub mod providers;
pub mod runtime;
pub mod scenario;
pub mod simulation;

#[cfg(test)]
mod testing;

pub use api::{
    EndTurnProvider, PlayerCommand, PlayerProvider, Result, RuntimeError, ScriptedProvider,
};
pub use events::{Event, EventBus, Notice, Topic};
pub use oracle::{BlueprintCatalog, OpenField, OracleManager, Wall};
pub use providers::{AiAction, AiController, AiTurn};
pub use runtime::{RunSummary, Runtime, RuntimeBuilder, RuntimeConfig, SurvivorSummary, TurnOutcome};
pub use scenario::Roster;
pub use simulation::{Simulation, TickSettings, TravelOutcome};

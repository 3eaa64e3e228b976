//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! the simulation and AI layers can stay focused on orchestration.

pub mod commands;
pub mod errors;
pub mod providers;

pub use commands::PlayerCommand;
pub use errors::{Result, RuntimeError};
pub use providers::{EndTurnProvider, PlayerProvider, ScriptedProvider};

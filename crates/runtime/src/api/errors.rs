//! Unified error types surfaced by the runtime API.
//!
//! Rule violations raised by individual actions never reach this type: they
//! are published as notices and the turn continues. `RuntimeError` covers
//! wiring mistakes and scheduler failures that stop the match.
use embers_core::{SpawnError, TurnError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("no actors are queued for turns")]
    NoActiveActors,

    #[error("a human-controlled actor is up but no player provider is set")]
    ProviderNotSet,

    #[error("runtime requires oracles to be configured before building")]
    MissingOracles,

    #[error("runtime requires a scenario or an initial state")]
    MissingScenario,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to load content: {0}")]
    Content(String),

    #[error("actor template '{0}' not found")]
    UnknownTemplate(String),

    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error(transparent)]
    Spawn(#[from] SpawnError),
}

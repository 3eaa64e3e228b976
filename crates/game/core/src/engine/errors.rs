//! Error types for turn scheduling and spawning.

use crate::error::{ErrorSeverity, GameError};
use crate::resources::LedgerError;
use crate::state::{ActorId, GamePhase};

/// Errors that can occur during turn operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("game is not running (phase: {0})")]
    NotRunning(GamePhase),

    #[error("game already started (phase: {0})")]
    AlreadyStarted(GamePhase),

    #[error("turn queue is empty")]
    EmptyQueue,

    #[error("{0} is already registered")]
    AlreadyRegistered(ActorId),

    #[error("{0} is not registered")]
    NotRegistered(ActorId),

    #[error("the player commander must join before the game starts")]
    PlayerAfterStart,
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotRunning(_) | Self::AlreadyStarted(_) => ErrorSeverity::Recoverable,
            Self::AlreadyRegistered(_) | Self::NotRegistered(_) | Self::PlayerAfterStart => {
                ErrorSeverity::Validation
            }
            Self::EmptyQueue => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotRunning(_) => "TURN_NOT_RUNNING",
            Self::AlreadyStarted(_) => "TURN_ALREADY_STARTED",
            Self::EmptyQueue => "TURN_EMPTY_QUEUE",
            Self::AlreadyRegistered(_) => "TURN_ALREADY_REGISTERED",
            Self::NotRegistered(_) => "TURN_NOT_REGISTERED",
            Self::PlayerAfterStart => "TURN_PLAYER_AFTER_START",
        }
    }
}

/// Errors raised while placing a new actor.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SpawnError {
    #[error("a player commander already exists")]
    PlayerExists,

    #[error("game is over")]
    GameOver,

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Turn(#[from] TurnError),
}

impl GameError for SpawnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::PlayerExists | Self::GameOver => ErrorSeverity::Validation,
            Self::Ledger(err) => err.severity(),
            Self::Turn(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::PlayerExists => "SPAWN_PLAYER_EXISTS",
            Self::GameOver => "SPAWN_GAME_OVER",
            Self::Ledger(err) => err.error_code(),
            Self::Turn(err) => err.error_code(),
        }
    }
}

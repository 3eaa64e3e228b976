//! Transient, user-facing messages produced by the runtime itself.
use embers_core::{ActorId, ErrorSeverity, GameError};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Notice {
    /// An action was rejected by the rules; nothing changed.
    ActionFailed {
        actor: ActorId,
        code: String,
        severity: ErrorSeverity,
        message: String,
    },
    /// A turn hit its decision or command bound and was ended for it.
    DecisionLimitReached { actor: ActorId, decisions: usize },
}

impl Notice {
    pub fn action_failed<E>(actor: ActorId, error: &E) -> Self
    where
        E: GameError + std::fmt::Display,
    {
        Notice::ActionFailed {
            actor,
            code: error.error_code().to_string(),
            severity: error.severity(),
            message: error.to_string(),
        }
    }

    pub fn actor(&self) -> ActorId {
        match self {
            Notice::ActionFailed { actor, .. } | Notice::DecisionLimitReached { actor, .. } => {
                *actor
            }
        }
    }
}

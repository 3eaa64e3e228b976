//! Shared error classification for the rules.
//!
//! Each capability defines its own error enum next to the code that raises
//! it (`AttackError`, `BuildError`, `MoveError`, `LedgerError`, ...). A
//! rejected action leaves the state untouched, so every one of them is an
//! "action failed" outcome for the caller to report and move past.

use core::fmt;

use strum::Display;

use crate::state::{ActorId, Position};

/// How a caller should treat a rejected action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The situation may change: out of range, out of move time, too poor.
    Recoverable,
    /// The request itself is wrong: friendly target, acting out of turn.
    Validation,
    /// A reference the rules rely on is dangling: unknown ledger, no blueprint.
    Internal,
    /// The turn queue can no longer be trusted.
    Fatal,
}

impl ErrorSeverity {
    pub const fn is_recoverable(self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// True for failures that point at a bug rather than at the player.
    pub const fn is_internal(self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Where and when a rejected action happened, for logs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    /// Turn nonce when the action was attempted.
    pub nonce: u64,
    pub actor: Option<ActorId>,
    pub position: Option<Position>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(nonce: u64) -> Self {
        Self {
            nonce,
            actor: None,
            position: None,
        }
    }

    #[must_use]
    pub const fn with_actor(mut self, actor: ActorId) -> Self {
        self.actor = Some(actor);
        self
    }

    #[must_use]
    pub const fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "nonce {}", self.nonce)?;
        if let Some(actor) = self.actor {
            write!(f, ", actor {actor}")?;
        }
        if let Some(position) = self.position {
            write!(f, " at {position}")?;
        }
        Ok(())
    }
}

/// Implemented by every rules error.
///
/// Codes are stable, upper-case identifiers (`ATTACK_OUT_OF_RANGE`) meant for
/// notices, tests and log filters; the `Display` text is for people.
pub trait GameError: fmt::Display + fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    fn error_code(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_classes() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_internal());
        assert!(ErrorSeverity::Internal.is_internal());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert_eq!(ErrorSeverity::Validation.to_string(), "validation");
    }

    #[test]
    fn context_reads_like_a_log_line() {
        let context = ErrorContext::new(12)
            .with_actor(ActorId(3))
            .with_position(Position::ground(1.0, 2.0));
        assert_eq!(context.to_string(), "nonce 12, actor #3 at (1.00, 0.00, 2.00)");
        assert_eq!(ErrorContext::new(4).to_string(), "nonce 4");
    }
}

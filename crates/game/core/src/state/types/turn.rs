use std::collections::VecDeque;

use strum::Display;

use super::{ActorId, Alignment};

/// Match lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GamePhase {
    #[default]
    Pregame,
    Running,
    Paused,
    Postgame,
}

/// Round-robin turn bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    pub phase: GamePhase,

    /// Live actors in turn order. The head is acting.
    pub queue: VecDeque<ActorId>,

    /// Number of turn hand-offs since the match started.
    pub turn_number: u64,

    /// Monotonic counter mixed into every random roll.
    pub nonce: u64,

    /// Set once, when the match ends.
    pub winner: Option<Alignment>,
}

impl TurnState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The actor whose capabilities may currently be mutated.
    pub fn current(&self) -> Option<ActorId> {
        self.queue.front().copied()
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn contains(&self, actor: ActorId) -> bool {
        self.queue.contains(&actor)
    }
}

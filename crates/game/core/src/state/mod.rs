//! Authoritative game state representation.
//!
//! This module owns the data structures that describe actors, props, turn
//! bookkeeping and resource ledgers. Runtime layers clone or query this
//! state but mutate it exclusively through the engine.
pub mod types;

pub use types::{
    ActorId, ActorIdentity, ActorKind, ActorState, Alignment, Archetype, Capabilities,
    Controller, CrateId, CrateState, EntitiesState, GamePhase, LedgerId, PickupId, PickupState,
    Position, TargetRef, TurnState,
};

use crate::resources::LedgerBook;

/// Canonical snapshot of a match.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// RNG seed for deterministic random generation.
    ///
    /// Set once at game initialization and never modified.
    /// Combined with `turn.nonce` to generate unique seeds for each roll.
    pub game_seed: u64,

    /// Turn order and match phase.
    pub turn: TurnState,
    /// Actors, crates and pickups.
    pub entities: EntitiesState,
    /// Every resource ledger in the match.
    pub ledgers: LedgerBook,
}

impl GameState {
    /// Creates an empty pregame state with the given seed.
    pub fn with_seed(game_seed: u64) -> Self {
        Self {
            game_seed,
            turn: TurnState::new(),
            entities: EntitiesState::new(),
            ledgers: LedgerBook::new(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.turn.phase
    }

    /// The actor currently at the head of the queue.
    pub fn current_actor(&self) -> Option<&ActorState> {
        self.turn.current().and_then(|id| self.entities.actor(id))
    }

    pub fn player(&self) -> Option<&ActorState> {
        self.entities.actor(ActorId::PLAYER)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::with_seed(0)
    }
}

//! One-way notifications emitted by the engine.
//!
//! The engine buffers events while an operation runs; the owner drains them
//! with [`crate::engine::GameEngine::take_events`] once the operation has
//! completed, so observers never see a half-applied change.

use crate::combat::ShotResult;
use crate::resources::ResourceKind;
use crate::state::{
    ActorId, Alignment, Archetype, CrateId, GamePhase, LedgerId, PickupId, Position, TargetRef,
};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    ResourceCountChanged {
        ledger: LedgerId,
        kind: ResourceKind,
        count: u32,
    },
    /// Archetypes a builder can currently afford.
    BuildAbilityChanged {
        builder: ActorId,
        affordable: Vec<Archetype>,
    },
    BuildCountChanged {
        builder: ActorId,
        builds: u32,
        max_builds: u32,
    },
    AttackCountChanged {
        actor: ActorId,
        remaining: u32,
    },
    MoveTimeChanged {
        actor: ActorId,
        remaining: f32,
    },
    MoveStateChanged {
        actor: ActorId,
        moving: bool,
        position: Position,
    },
    TurnSequenceChanged {
        queue: Vec<ActorId>,
    },
    TurnStarted {
        actor: ActorId,
        turn_number: u64,
    },
    /// Movement halted and the fighter returned to idle.
    TurnEnded {
        actor: ActorId,
    },
    ShotFired {
        attacker: ActorId,
        target: TargetRef,
        result: ShotResult,
        /// False when the target was already dead before this roll.
        applied: bool,
    },
    /// Non-lethal damage. Lethal hits report [`GameEvent::ActorDied`].
    DamageTaken {
        target: TargetRef,
        amount: u32,
        critical: bool,
    },
    ActorDied {
        actor: ActorId,
        alignment: Alignment,
    },
    ActorSpawned {
        actor: ActorId,
        archetype: Archetype,
        alignment: Alignment,
        position: Position,
        builder: Option<ActorId>,
    },
    WeaponSwitched {
        actor: ActorId,
        weapon: String,
    },
    CrateDestroyed {
        crate_id: CrateId,
    },
    PickupExposed {
        pickup: PickupId,
        kind: ResourceKind,
        amount: u32,
        position: Position,
    },
    PickupCollected {
        pickup: PickupId,
        collector: ActorId,
        kind: ResourceKind,
        amount: u32,
    },
    GamePhaseChanged {
        phase: GamePhase,
    },
    GameEnded {
        winner: Alignment,
    },
}

impl GameEvent {
    /// Events describing the turn order and match lifecycle.
    pub fn is_turn_event(&self) -> bool {
        matches!(
            self,
            Self::TurnSequenceChanged { .. }
                | Self::TurnStarted { .. }
                | Self::TurnEnded { .. }
                | Self::GamePhaseChanged { .. }
                | Self::GameEnded { .. }
        )
    }

    /// Events describing resources and building.
    pub fn is_economy_event(&self) -> bool {
        matches!(
            self,
            Self::ResourceCountChanged { .. }
                | Self::BuildAbilityChanged { .. }
                | Self::BuildCountChanged { .. }
                | Self::PickupExposed { .. }
                | Self::PickupCollected { .. }
        )
    }
}

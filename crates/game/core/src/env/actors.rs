//! Actor template definitions and blueprint oracle.
//!
//! Templates are data-driven (see the content crate) and describe everything
//! an actor needs except its id, alignment, position and ledger wiring,
//! which the engine assigns at spawn.

use crate::building::Builder;
use crate::combat::{Fighter, WeaponProfile};
use crate::movement::Mover;
use crate::state::{
    ActorId, ActorIdentity, ActorKind, ActorState, Alignment, Archetype, LedgerId, Position,
};

/// Per-actor tunables.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActorStats {
    pub max_health: u32,
    pub max_attacks: u32,
    /// Seconds of movement per turn.
    pub max_move_time: f32,
    pub speed: f32,
    pub acceleration: f32,
    pub max_builds: u32,
}

impl Default for ActorStats {
    fn default() -> Self {
        Self {
            max_health: 100,
            max_attacks: 2,
            max_move_time: 3.0,
            speed: 3.5,
            acceleration: 8.0,
            max_builds: 0,
        }
    }
}

/// Blueprint for spawning an actor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorTemplate {
    pub name: String,
    pub kind: ActorKind,
    pub archetype: Archetype,
    pub stats: ActorStats,
    pub melee: WeaponProfile,
    pub primary: Option<WeaponProfile>,
    pub secondary: Option<WeaponProfile>,
    /// Attach a build capability drawing from the actor's ledger.
    pub can_build: bool,
    /// Give the actor a ledger so it can collect pickups.
    pub has_ledger: bool,
    pub can_move: bool,
}

impl ActorTemplate {
    /// Instantiates the template. `ledger` is required when the template
    /// builds or collects.
    pub fn to_actor(
        &self,
        id: ActorId,
        alignment: Alignment,
        position: Position,
        ledger: Option<LedgerId>,
    ) -> ActorState {
        let identity = ActorIdentity {
            id,
            name: self.name.clone(),
            kind: self.kind,
            archetype: self.archetype,
            alignment,
        };
        let fighter = Fighter::new(
            self.stats.max_health,
            self.stats.max_attacks,
            self.melee.clone(),
        )
        .with_weapons(self.primary.clone(), self.secondary.clone());

        let mut actor = ActorState::new(identity, position).with_fighter(fighter);
        if self.can_move {
            actor = actor.with_mover(Mover::new(
                self.stats.max_move_time,
                self.stats.speed,
                self.stats.acceleration,
            ));
        }
        if let Some(ledger) = ledger {
            actor = actor.with_ledger(ledger);
            if self.can_build {
                actor = actor.with_builder(Builder::new(ledger, self.stats.max_builds));
            }
        }
        actor
    }

    pub fn needs_ledger(&self) -> bool {
        self.has_ledger || self.can_build
    }
}

/// Source of bot templates for builders.
pub trait BlueprintOracle: Send + Sync {
    fn bot_template(&self, archetype: Archetype, alignment: Alignment) -> Option<&ActorTemplate>;
}

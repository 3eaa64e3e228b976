use crate::building::Builder;
use crate::combat::Fighter;
use crate::movement::Mover;

use super::{ActorId, ActorIdentity, Alignment, Archetype, Capabilities, LedgerId, Position};

/// A combat participant and its owned capabilities.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorState {
    pub identity: ActorIdentity,
    pub position: Position,
    pub fighter: Option<Fighter>,
    pub mover: Option<Mover>,
    pub builder: Option<Builder>,
    /// Ledger used for pickups. Collectors forward to their builder.
    pub ledger: Option<LedgerId>,
}

impl ActorState {
    pub fn new(identity: ActorIdentity, position: Position) -> Self {
        Self {
            identity,
            position,
            fighter: None,
            mover: None,
            builder: None,
            ledger: None,
        }
    }

    pub fn with_fighter(mut self, fighter: Fighter) -> Self {
        self.fighter = Some(fighter);
        self
    }

    pub fn with_mover(mut self, mover: Mover) -> Self {
        self.mover = Some(mover);
        self
    }

    pub fn with_builder(mut self, builder: Builder) -> Self {
        self.builder = Some(builder);
        self
    }

    pub fn with_ledger(mut self, ledger: LedgerId) -> Self {
        self.ledger = Some(ledger);
        self
    }

    #[inline]
    pub fn id(&self) -> ActorId {
        self.identity.id
    }

    #[inline]
    pub fn alignment(&self) -> Alignment {
        self.identity.alignment
    }

    #[inline]
    pub fn archetype(&self) -> Archetype {
        self.identity.archetype
    }

    /// Capability set derived from the attached components.
    pub fn capabilities(&self) -> Capabilities {
        let mut caps = Capabilities::empty();
        caps.set(Capabilities::MOVEMENT, self.mover.is_some());
        caps.set(Capabilities::COMBAT, self.fighter.is_some());
        caps.set(Capabilities::BUILD, self.builder.is_some());
        caps
    }

    /// Actors without a fighter cannot die.
    pub fn is_alive(&self) -> bool {
        self.fighter.as_ref().is_none_or(|f| !f.is_dead())
    }

    pub fn attacks_remaining(&self) -> u32 {
        self.fighter.as_ref().map_or(0, Fighter::attacks_remaining)
    }

    pub fn sqr_attack_range(&self) -> f32 {
        self.fighter.as_ref().map_or(0.0, Fighter::sqr_attack_range)
    }

    pub fn move_time(&self) -> f32 {
        self.mover.as_ref().map_or(0.0, Mover::move_time)
    }

    pub fn max_travel_distance_sqr(&self) -> f32 {
        self.mover
            .as_ref()
            .map_or(0.0, Mover::max_travel_distance_sqr)
    }

    /// Resets every capability for a fresh turn.
    pub fn start_turn(&mut self) {
        if let Some(fighter) = self.fighter.as_mut() {
            fighter.start_turn();
        }
        if let Some(mover) = self.mover.as_mut() {
            mover.start_turn();
        }
        if let Some(builder) = self.builder.as_mut() {
            builder.start_turn();
        }
    }

    /// Flushes per-turn state: movement halts, fighter returns to idle.
    pub fn end_turn(&mut self) {
        if let Some(mover) = self.mover.as_mut() {
            mover.end_turn();
        }
        if let Some(fighter) = self.fighter.as_mut() {
            fighter.finish_attack();
        }
    }
}

//! Neutral world props: breakable supply crates and the pickups they drop.

use crate::resources::{ResourceCounts, ResourceKind};

use super::{CrateId, PickupId, Position};

/// A breakable crate holding resource stacks.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrateState {
    pub id: CrateId,
    pub position: Position,
    pub health: u32,
    pub contents: ResourceCounts,
}

impl CrateState {
    /// Applies damage; returns true when this call broke the crate.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if self.health == 0 || amount == 0 {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        self.health == 0
    }

    pub fn is_broken(&self) -> bool {
        self.health == 0
    }
}

/// A resource stack lying in the world, waiting to be collected.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PickupState {
    pub id: PickupId,
    pub position: Position,
    pub kind: ResourceKind,
    pub amount: u32,
}

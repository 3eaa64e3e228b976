use std::collections::BTreeMap;

use super::{ActorId, ActorState, Alignment, CrateId, CrateState, PickupId, PickupState, Position};

/// Every entity tracked in a match.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitiesState {
    actors: BTreeMap<ActorId, ActorState>,
    crates: BTreeMap<CrateId, CrateState>,
    pickups: BTreeMap<PickupId, PickupState>,
    next_actor: u32,
    next_crate: u32,
    next_pickup: u32,
}

impl EntitiesState {
    pub fn new() -> Self {
        Self {
            // 0 is reserved for the player commander.
            next_actor: 1,
            ..Self::default()
        }
    }

    pub fn allocate_actor(&mut self, player: bool) -> ActorId {
        if player {
            return ActorId::PLAYER;
        }
        let id = ActorId(self.next_actor);
        self.next_actor += 1;
        id
    }

    pub fn actor(&self, id: ActorId) -> Option<&ActorState> {
        self.actors.get(&id)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut ActorState> {
        self.actors.get_mut(&id)
    }

    pub fn insert_actor(&mut self, actor: ActorState) {
        self.actors.insert(actor.id(), actor);
    }

    pub fn remove_actor(&mut self, id: ActorId) -> Option<ActorState> {
        self.actors.remove(&id)
    }

    pub fn actors(&self) -> impl Iterator<Item = &ActorState> {
        self.actors.values()
    }

    /// Living actors of one alignment.
    pub fn aligned(&self, alignment: Alignment) -> impl Iterator<Item = &ActorState> {
        self.actors
            .values()
            .filter(move |a| a.alignment() == alignment && a.is_alive())
    }

    pub fn crate_state(&self, id: CrateId) -> Option<&CrateState> {
        self.crates.get(&id)
    }

    pub fn crate_mut(&mut self, id: CrateId) -> Option<&mut CrateState> {
        self.crates.get_mut(&id)
    }

    pub fn crates(&self) -> impl Iterator<Item = &CrateState> {
        self.crates.values()
    }

    pub fn insert_crate(
        &mut self,
        position: Position,
        health: u32,
        contents: crate::resources::ResourceCounts,
    ) -> CrateId {
        let id = CrateId(self.next_crate);
        self.next_crate += 1;
        self.crates.insert(
            id,
            CrateState {
                id,
                position,
                health,
                contents,
            },
        );
        id
    }

    pub fn remove_crate(&mut self, id: CrateId) -> Option<CrateState> {
        self.crates.remove(&id)
    }

    pub fn pickups(&self) -> impl Iterator<Item = &PickupState> {
        self.pickups.values()
    }

    pub fn pickup(&self, id: PickupId) -> Option<&PickupState> {
        self.pickups.get(&id)
    }

    pub fn insert_pickup(
        &mut self,
        position: Position,
        kind: crate::resources::ResourceKind,
        amount: u32,
    ) -> PickupId {
        let id = PickupId(self.next_pickup);
        self.next_pickup += 1;
        self.pickups.insert(
            id,
            PickupState {
                id,
                position,
                kind,
                amount,
            },
        );
        id
    }

    pub fn remove_pickup(&mut self, id: PickupId) -> Option<PickupState> {
        self.pickups.remove(&id)
    }

    /// Closest crate to `from` by squared distance.
    pub fn closest_crate(&self, from: Position) -> Option<&CrateState> {
        self.crates
            .values()
            .filter(|c| !c.is_broken())
            .min_by(|a, b| {
                from.distance_sqr(a.position)
                    .total_cmp(&from.distance_sqr(b.position))
            })
    }

    /// Closest pickup to `from` by squared distance.
    pub fn closest_pickup(&self, from: Position) -> Option<&PickupState> {
        self.pickups.values().min_by(|a, b| {
            from.distance_sqr(a.position)
                .total_cmp(&from.distance_sqr(b.position))
        })
    }
}

use crate::events::GameEvent;
use crate::movement::{MoveError, MoveStatus};
use crate::state::{ActorId, Position};

use super::GameEngine;

/// What one simulation tick did to the acting mover.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepReport {
    pub actor: ActorId,
    pub position: Position,
    pub status: MoveStatus,
    /// False when the navigation oracle could not make progress.
    pub displaced: bool,
}

impl<'a> GameEngine<'a> {
    /// Points the acting actor's mover at `destination`.
    pub fn move_to(&mut self, actor: ActorId, destination: Position) -> Result<(), MoveError> {
        if !self.is_acting(actor) {
            return Err(MoveError::OutOfTurn(actor));
        }
        let state = self
            .state
            .entities
            .actor_mut(actor)
            .ok_or(MoveError::ActorNotFound(actor))?;
        let mover = state
            .mover
            .as_mut()
            .ok_or(MoveError::NoMovementCapability(actor))?;
        mover.set_destination(destination)?;
        let position = state.position;
        self.emit(GameEvent::MoveStateChanged {
            actor,
            moving: true,
            position,
        });
        Ok(())
    }

    /// Collapses the actor's destination onto its current position.
    pub fn halt(&mut self, actor: ActorId) -> Result<(), MoveError> {
        let state = self
            .state
            .entities
            .actor_mut(actor)
            .ok_or(MoveError::ActorNotFound(actor))?;
        let mover = state
            .mover
            .as_mut()
            .ok_or(MoveError::NoMovementCapability(actor))?;
        let was_moving = mover.destination().is_some();
        mover.halt();
        let position = state.position;
        if was_moving {
            self.emit(GameEvent::MoveStateChanged {
                actor,
                moving: false,
                position,
            });
        }
        Ok(())
    }

    /// Advances the acting mover by `dt` seconds.
    ///
    /// Returns `None` when the game is not running or the head has nowhere
    /// to go. Pickups within reach of a ledger-owning mover are collected.
    pub fn step(&mut self, dt: f32) -> Option<StepReport> {
        if !self.state.turn.is_running() {
            return None;
        }
        let actor = self.state.turn.current()?;
        let navigation = self.env.navigation();
        let tolerance = self.env.config().arrival_tolerance;

        let state = self.state.entities.actor_mut(actor)?;
        let mover = state.mover.as_mut()?;
        let destination = mover.destination()?;
        let from = state.position;

        let budget = mover.step_budget(dt);
        let next = navigation.step_toward(from, destination, budget);
        let displaced = next.distance_sqr(from) > f32::EPSILON;
        let arrived = next.distance_sqr(destination) <= tolerance * tolerance;
        let status = mover.tick(dt, displaced, arrived);
        let remaining = mover.move_time();
        if displaced {
            state.position = if arrived { destination } else { next };
        }
        let position = state.position;

        if displaced {
            self.emit(GameEvent::MoveTimeChanged { actor, remaining });
        }
        if status != MoveStatus::Moving {
            self.emit(GameEvent::MoveStateChanged {
                actor,
                moving: false,
                position,
            });
        }
        if displaced {
            self.collect_pickups(actor, position);
        }

        Some(StepReport {
            actor,
            position,
            status,
            displaced,
        })
    }

    fn collect_pickups(&mut self, collector: ActorId, at: Position) {
        let Some(ledger) = self.state.entities.actor(collector).and_then(|a| a.ledger) else {
            return;
        };
        let radius_sqr = self.env.config().pickup_radius_sqr();
        let within: Vec<_> = self
            .state
            .entities
            .pickups()
            .filter(|p| p.position.distance_sqr(at) <= radius_sqr)
            .map(|p| (p.id, p.kind, p.amount))
            .collect();

        for (id, kind, amount) in within {
            let Ok(change) = self.state.ledgers.add(ledger, kind, amount) else {
                continue;
            };
            self.state.entities.remove_pickup(id);
            self.emit(GameEvent::PickupCollected {
                pickup: id,
                collector,
                kind,
                amount,
            });
            self.emit_ledger_changes([change]);
        }
    }
}

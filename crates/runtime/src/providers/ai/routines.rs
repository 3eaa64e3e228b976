//! Execution of a chosen [`AiAction`] as a sequence of engine calls.
//!
//! A routine either runs out naturally (no charges, target gone, budget
//! spent) and asks for a fresh decision, or detects that it cannot make
//! progress and ends the turn.

use embers_core::{ActorId, Archetype, GameError, Position, TargetRef};
use tracing::{debug, warn};

use super::candidates::AiAction;
use crate::simulation::{Simulation, TravelOutcome};

/// What the controller should do after a routine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Redecide,
    EndTurn,
}

pub async fn execute(sim: &mut Simulation, actor: ActorId, action: AiAction) -> Flow {
    match action {
        AiAction::AttackPlayer => attack_player(sim, actor).await,
        AiAction::AttackAllies => attack_allies(sim, actor).await,
        AiAction::BuildBot => build_bot(sim, actor),
        AiAction::GatherResources => gather(sim, actor).await,
        AiAction::TakeCover(destination) => take_cover(sim, actor, destination).await,
        AiAction::EndTurn => Flow::EndTurn,
    }
}

fn actor_snapshot(sim: &Simulation, actor: ActorId) -> Option<(Position, f32, u32)> {
    let state = sim.state().entities.actor(actor)?;
    Some((
        state.position,
        state.sqr_attack_range(),
        state.attacks_remaining(),
    ))
}

fn actor_alive(sim: &Simulation, actor: ActorId) -> Option<Position> {
    sim.state()
        .entities
        .actor(actor)
        .filter(|target| target.is_alive())
        .map(|target| target.position)
}

/// Ends the turn when the mover is stuck, otherwise asks for a new decision.
fn after_failed_approach(actor: ActorId, outcome: TravelOutcome) -> Flow {
    if outcome.is_stuck() {
        debug!(%actor, ?outcome, "mover made no progress");
        Flow::EndTurn
    } else {
        Flow::Redecide
    }
}

fn resource_total(sim: &Simulation, actor: ActorId) -> Option<u32> {
    let state = sim.state().entities.actor(actor)?;
    let ledger = state
        .builder
        .as_ref()
        .map(|builder| builder.ledger())
        .or(state.ledger)?;
    sim.state().ledgers.total(ledger).ok()
}

/// Attacks `target` while charges remain and it is still standing.
/// Returns false when an attack was rejected.
fn attack_until_spent(
    sim: &mut Simulation,
    actor: ActorId,
    target: TargetRef,
    standing: impl Fn(&Simulation) -> bool,
) -> bool {
    loop {
        let Some((_, _, attacks)) = actor_snapshot(sim, actor) else {
            return false;
        };
        if attacks == 0 || !standing(sim) {
            return true;
        }
        if sim.attack(actor, target).is_err() {
            return false;
        }
    }
}

async fn attack_player(sim: &mut Simulation, actor: ActorId) -> Flow {
    let Some(player) = actor_alive(sim, ActorId::PLAYER) else {
        return Flow::Redecide;
    };
    let Some((_, range_sqr, _)) = actor_snapshot(sim, actor) else {
        return Flow::EndTurn;
    };
    let outcome = sim.get_in_range(actor, player, range_sqr).await;
    if !outcome.reached() {
        debug!(%actor, "player out of reach after moving");
        return after_failed_approach(actor, outcome);
    }
    let target = TargetRef::Actor(ActorId::PLAYER);
    attack_until_spent(sim, actor, target, |sim| {
        actor_alive(sim, ActorId::PLAYER).is_some()
    });
    Flow::Redecide
}

/// First player-aligned bot, by archetype priority, that the actor can
/// still reach this turn.
fn pick_ally_target(sim: &Simulation, actor: ActorId) -> Option<ActorId> {
    let ctx = super::AiContext::new(actor, sim.state(), sim.oracles().env())?;
    let allies: Vec<_> = ctx.player_allies().collect();
    Archetype::BUILD_PRIORITY.iter().find_map(|archetype| {
        allies
            .iter()
            .filter(|ally| ally.archetype() == *archetype)
            .find(|ally| ctx.within_attack_reach(ally.position))
            .map(|ally| ally.id())
    })
}

async fn attack_allies(sim: &mut Simulation, actor: ActorId) -> Flow {
    let Some(ally) = pick_ally_target(sim, actor) else {
        return Flow::Redecide;
    };
    let (Some(position), Some((_, range_sqr, _))) =
        (actor_alive(sim, ally), actor_snapshot(sim, actor))
    else {
        return Flow::Redecide;
    };
    let outcome = sim.get_in_range(actor, position, range_sqr).await;
    if !outcome.reached() {
        return after_failed_approach(actor, outcome);
    }
    let target = TargetRef::Actor(ally);
    if !attack_until_spent(sim, actor, target, |sim| actor_alive(sim, ally).is_some()) {
        warn!(%actor, target = %ally, "attack on ally made no progress");
        return Flow::EndTurn;
    }
    Flow::Redecide
}

fn build_bot(sim: &mut Simulation, actor: ActorId) -> Flow {
    let choice = {
        let state = sim.state();
        let counts = state
            .entities
            .actor(actor)
            .and_then(|a| a.builder.as_ref())
            .and_then(|builder| state.ledgers.counts(builder.ledger()).ok());
        counts.and_then(|counts| {
            sim.oracles()
                .recipes()
                .first_affordable(&Archetype::BUILD_PRIORITY, counts)
        })
    };
    let Some(archetype) = choice else {
        return Flow::Redecide;
    };
    match sim.build(actor, archetype) {
        Ok(_) => Flow::Redecide,
        Err(error) => {
            // Already reported as a notice. Retrying would fail the same way.
            debug!(%actor, %archetype, code = error.error_code(), "build abandoned");
            Flow::EndTurn
        }
    }
}

async fn gather(sim: &mut Simulation, actor: ActorId) -> Flow {
    let Some(start_total) = resource_total(sim, actor) else {
        return Flow::Redecide;
    };
    let Some((here, range_sqr, _)) = actor_snapshot(sim, actor) else {
        return Flow::EndTurn;
    };

    let pickup = sim
        .state()
        .entities
        .closest_pickup(here)
        .map(|pickup| pickup.position);
    if let Some(pickup) = pickup {
        let outcome = sim.travel(actor, pickup).await;
        if resource_total(sim, actor) != Some(start_total) {
            return Flow::Redecide;
        }
        if outcome.is_stuck() {
            return after_failed_approach(actor, outcome);
        }
    }

    let Some((here, _, _)) = actor_snapshot(sim, actor) else {
        return Flow::EndTurn;
    };
    let Some((crate_id, crate_position)) = sim
        .state()
        .entities
        .closest_crate(here)
        .map(|supply| (supply.id, supply.position))
    else {
        return Flow::Redecide;
    };
    let outcome = sim.get_in_range(actor, crate_position, range_sqr).await;
    if !outcome.reached() {
        return after_failed_approach(actor, outcome);
    }

    let target = TargetRef::Crate(crate_id);
    let still_there = |sim: &Simulation| sim.state().entities.crate_state(crate_id).is_some();
    if !attack_until_spent(sim, actor, target, still_there) || still_there(sim) {
        return Flow::Redecide;
    }
    if resource_total(sim, actor) != Some(start_total) {
        return Flow::Redecide;
    }

    // Walk over the scatter to sweep up what fell near the crate.
    let outcome = sim.travel(actor, crate_position).await;
    after_failed_approach(actor, outcome)
}

async fn take_cover(sim: &mut Simulation, actor: ActorId, destination: Position) -> Flow {
    let outcome = sim.travel(actor, destination).await;
    debug!(%actor, %destination, ?outcome, "took cover");
    after_failed_approach(actor, outcome)
}

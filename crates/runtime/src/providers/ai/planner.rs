//! Rule-based action selection.
//!
//! Each evaluator is a pure predicate over the [`AiContext`]. The planner
//! collects every eligible action, then picks: nothing eligible ends the
//! turn, a collector that can gather always gathers, otherwise the pick is
//! uniform.

use embers_core::Archetype;
use rand::Rng;

use super::candidates::{AiAction, Candidates};
use super::context::AiContext;

pub struct AiPlanner;

impl AiPlanner {
    /// Evaluates every action for the context's actor.
    pub fn candidates(ctx: &AiContext<'_>) -> Candidates {
        let mut candidates = Candidates::new();

        if can_attack_player(ctx) {
            candidates.push(AiAction::AttackPlayer);
        }
        if can_attack_allies(ctx) {
            candidates.push(AiAction::AttackAllies);
        }
        if can_build_bot(ctx) {
            candidates.push(AiAction::BuildBot);
        }
        if can_gather(ctx) {
            candidates.push(AiAction::GatherResources);
        }
        if let Some(destination) = ctx.cover_destination() {
            candidates.push(AiAction::TakeCover(destination));
        }

        candidates
    }

    pub fn select(candidates: &Candidates, archetype: Archetype, rng: &mut impl Rng) -> AiAction {
        if candidates.is_empty() {
            return AiAction::EndTurn;
        }
        if archetype == Archetype::Collector && candidates.contains_gather() {
            return AiAction::GatherResources;
        }
        candidates.choose(rng).unwrap_or(AiAction::EndTurn)
    }

    pub fn decide(ctx: &AiContext<'_>, rng: &mut impl Rng) -> AiAction {
        Self::select(&Self::candidates(ctx), ctx.actor.archetype(), rng)
    }
}

pub(crate) fn can_attack_player(ctx: &AiContext<'_>) -> bool {
    let Some(player) = ctx.player() else {
        return false;
    };
    if ctx.attacks_remaining() == 0 {
        return false;
    }
    ctx.distance_sqr(player.position) <= ctx.sqr_attack_range()
        || ctx.within_attack_reach(player.position)
}

pub(crate) fn can_attack_allies(ctx: &AiContext<'_>) -> bool {
    if ctx.attacks_remaining() == 0 {
        return false;
    }
    ctx.closest_player_ally()
        .is_some_and(|ally| ctx.within_attack_reach(ally.position))
}

pub(crate) fn can_build_bot(ctx: &AiContext<'_>) -> bool {
    let Some(builder) = ctx.actor.builder.as_ref() else {
        return false;
    };
    let Some(counts) = ctx.ledger_counts() else {
        return false;
    };
    builder.has_builds_left() && ctx.env.recipes().any_affordable(counts)
}

pub(crate) fn can_gather(ctx: &AiContext<'_>) -> bool {
    if !ctx.actor.archetype().can_gather() || ctx.ledger_counts().is_none() {
        return false;
    }
    let crate_in_reach = ctx.attacks_remaining() > 0
        && ctx
            .closest_crate()
            .is_some_and(|supply| ctx.within_attack_reach(supply.position));
    let pickup_in_reach = ctx
        .closest_pickup()
        .is_some_and(|pickup| ctx.within_travel(pickup.position));
    crate_in_reach || pickup_in_reach
}

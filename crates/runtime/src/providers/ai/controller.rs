//! Drives one AI turn: decide, execute, repeat until the turn ends.

use embers_core::ActorId;
use tracing::{debug, warn};

use super::candidates::AiAction;
use super::context::AiContext;
use super::planner::AiPlanner;
use super::routines::{self, Flow};
use crate::events::Notice;
use crate::simulation::Simulation;

pub const DEFAULT_MAX_DECISIONS: usize = 24;

/// How an AI turn went.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AiTurn {
    /// Actions chosen, in order. The last one is `EndTurn` unless the
    /// decision bound or the end of the game cut the turn short.
    pub actions: Vec<AiAction>,
    pub hit_decision_limit: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct AiController {
    max_decisions: usize,
}

impl AiController {
    pub fn new(max_decisions: usize) -> Self {
        Self {
            max_decisions: max_decisions.max(1),
        }
    }

    pub fn max_decisions(&self) -> usize {
        self.max_decisions
    }

    /// Plays `actor`'s turn. The caller hands the turn over afterwards.
    pub async fn play_turn(&self, sim: &mut Simulation, actor: ActorId) -> AiTurn {
        let mut turn = AiTurn::default();

        while sim.is_acting(actor) {
            if turn.actions.len() >= self.max_decisions {
                warn!(
                    %actor,
                    decisions = turn.actions.len(),
                    "decision bound reached; ending turn"
                );
                sim.publish_notice(Notice::DecisionLimitReached {
                    actor,
                    decisions: turn.actions.len(),
                });
                turn.hit_decision_limit = true;
                break;
            }

            let decision = AiContext::new(actor, sim.state(), sim.oracles().env())
                .map(|ctx| (AiPlanner::candidates(&ctx), ctx.actor.archetype()));
            let Some((candidates, archetype)) = decision else {
                break;
            };
            let action = AiPlanner::select(&candidates, archetype, sim.rng_mut());
            debug!(
                %actor,
                candidates = ?candidates.as_slice(),
                %action,
                "ai decision"
            );
            turn.actions.push(action);

            if routines::execute(sim, actor, action).await == Flow::EndTurn {
                break;
            }
            tokio::task::yield_now().await;
        }

        turn
    }
}

impl Default for AiController {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DECISIONS)
    }
}

#[cfg(test)]
mod tests {
    use embers_core::{Alignment, Archetype, Position, ResourceCounts, ResourceKind};

    use super::*;
    use crate::simulation::TickSettings;
    use crate::testing::{Arena, bot, commander, player};

    #[tokio::test]
    async fn idle_actor_ends_its_turn_at_once() {
        let mut arena = Arena::open_field();
        arena.spawn(&player(), Alignment::Player, Position::ORIGIN);
        let enemy =
            arena.spawn(&commander(false, 0), Alignment::Enemy, Position::ground(80.0, 0.0));
        arena.start_at(enemy);
        let mut sim = arena.into_simulation();

        let turn = AiController::default().play_turn(&mut sim, enemy).await;
        assert_eq!(turn.actions, vec![AiAction::EndTurn]);
        assert!(!turn.hit_decision_limit);
    }

    #[tokio::test]
    async fn enemy_closes_in_and_shoots_the_player() {
        let mut arena = Arena::open_field();
        arena.spawn(&player(), Alignment::Player, Position::ORIGIN);
        let enemy =
            arena.spawn(&commander(false, 2), Alignment::Enemy, Position::ground(14.0, 0.0));
        arena.start_at(enemy);
        let mut sim = arena.into_simulation();

        let turn = AiController::default().play_turn(&mut sim, enemy).await;
        assert_eq!(turn.actions.first(), Some(&AiAction::AttackPlayer));
        let player = sim.state().player().unwrap();
        assert_eq!(player.fighter.as_ref().unwrap().health(), 80);
        let shooter = sim.state().entities.actor(enemy).unwrap();
        assert_eq!(shooter.attacks_remaining(), 0);
        assert!(shooter.position.distance_sqr(Position::ORIGIN) <= 100.0 + 1e-3);
    }

    #[tokio::test]
    async fn builder_spends_its_stock() {
        let mut arena = Arena::open_field();
        arena.spawn(&player(), Alignment::Player, Position::ground(80.0, 0.0));
        let enemy = arena.spawn(&commander(true, 0), Alignment::Enemy, Position::ORIGIN);
        arena.deposit(enemy, ResourceCounts::from_pairs([(ResourceKind::Steel, 2)]));
        arena.start_at(enemy);
        let mut sim = arena.into_simulation();

        let turn = AiController::default().play_turn(&mut sim, enemy).await;
        assert_eq!(turn.actions, vec![AiAction::BuildBot, AiAction::EndTurn]);
        let warriors = sim
            .state()
            .entities
            .aligned(Alignment::Enemy)
            .filter(|a| a.archetype() == Archetype::Warrior)
            .count();
        assert_eq!(warriors, 1);
    }

    #[tokio::test]
    async fn failed_build_ends_the_turn() {
        let mut arena = Arena::without_blueprint(Archetype::Warrior, Alignment::Enemy);
        arena.spawn(&player(), Alignment::Player, Position::ground(80.0, 0.0));
        let enemy = arena.spawn(&commander(true, 0), Alignment::Enemy, Position::ORIGIN);
        let stock = ResourceCounts::from_pairs([(ResourceKind::Steel, 2)]);
        arena.deposit(enemy, stock);
        arena.start_at(enemy);
        let mut sim = arena.into_simulation();

        let turn = AiController::default().play_turn(&mut sim, enemy).await;
        assert_eq!(turn.actions, vec![AiAction::BuildBot]);
        assert!(!turn.hit_decision_limit);
        let state = sim.state();
        let ledger = state.entities.actor(enemy).unwrap().ledger.unwrap();
        assert_eq!(state.ledgers.counts(ledger).unwrap(), &stock);
    }

    #[tokio::test]
    async fn collector_breaks_a_crate_and_collects() {
        let mut arena = Arena::open_field();
        arena.spawn(&player(), Alignment::Player, Position::ground(0.0, 60.0));
        let collector =
            arena.spawn(&bot(Archetype::Collector), Alignment::Enemy, Position::ORIGIN);
        arena.place_crate(Position::ground(4.0, 0.0));
        arena.start_at(collector);
        let mut sim = arena.into_simulation();

        AiController::default().play_turn(&mut sim, collector).await;
        let state = sim.state();
        assert_eq!(state.entities.crates().count(), 0);
        let ledger = state.entities.actor(collector).unwrap().ledger.unwrap();
        let collected = state.ledgers.total(ledger).unwrap();
        let left = state.entities.pickups().map(|p| p.amount).sum::<u32>();
        assert_eq!(collected + left, 2);
        assert!(collected > 0);
    }

    #[tokio::test]
    async fn decision_bound_ends_the_turn() {
        let mut arena = Arena::with_wall(Position::ground(5.0, -3.0), Position::ground(5.0, 3.0));
        arena.spawn(&player(), Alignment::Player, Position::ORIGIN);
        let enemy =
            arena.spawn(&commander(false, 0), Alignment::Enemy, Position::ground(8.0, 8.0));
        arena.start_at(enemy);
        let mut sim = arena.into_simulation();

        let turn = AiController::new(1).play_turn(&mut sim, enemy).await;
        assert!(matches!(turn.actions.as_slice(), [AiAction::TakeCover(_)]));
        assert!(turn.hit_decision_limit);
    }

    #[tokio::test]
    async fn stuck_mover_ends_the_turn() {
        let mut arena = Arena::with_wall(Position::ground(5.0, -3.0), Position::ground(5.0, 3.0));
        arena.spawn(&player(), Alignment::Player, Position::ORIGIN);
        let enemy =
            arena.spawn(&commander(false, 0), Alignment::Enemy, Position::ground(8.0, 8.0));
        arena.start_at(enemy);
        let mut sim = arena.into_simulation_with(TickSettings {
            max_ticks_per_move: 1,
            ..TickSettings::default()
        });

        let turn = AiController::default().play_turn(&mut sim, enemy).await;
        assert!(matches!(turn.actions.as_slice(), [AiAction::TakeCover(_)]));
        assert!(!turn.hit_decision_limit);
    }
}

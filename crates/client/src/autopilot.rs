//! A greedy stand-in for a human at the keyboard.
//!
//! Shoots the nearest enemy in range, otherwise spends the stock on a bot,
//! otherwise walks toward the nearest enemy. It never issues the same
//! command twice against an unchanged actor within one turn.

use async_trait::async_trait;
use embers_core::{
    ActorId, ActorState, Alignment, Archetype, GameState, RecipeCatalog, TargetRef,
};
use embers_runtime::{PlayerCommand, PlayerProvider, Result};
use tokio::sync::Mutex;

/// Stop this fraction of weapon range short of the target when closing in.
const APPROACH_MARGIN: f32 = 0.8;
/// Moves shorter than this are not worth a command.
const MIN_STEP: f32 = 0.25;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Issued {
    turn: u64,
    actor: ActorId,
    command: PlayerCommand,
    attacks: u32,
}

pub struct Autopilot {
    recipes: RecipeCatalog,
    last: Mutex<Option<Issued>>,
}

impl Autopilot {
    pub fn new(recipes: RecipeCatalog) -> Self {
        Self {
            recipes,
            last: Mutex::new(None),
        }
    }

    fn plan(&self, me: &ActorState, state: &GameState) -> PlayerCommand {
        let nearest = state
            .entities
            .aligned(Alignment::Enemy)
            .filter(|enemy| enemy.is_alive())
            .min_by(|a, b| {
                me.position
                    .distance_sqr(a.position)
                    .total_cmp(&me.position.distance_sqr(b.position))
            });

        let in_range = nearest.filter(|enemy| {
            me.attacks_remaining() > 0
                && me.position.distance_sqr(enemy.position) <= me.sqr_attack_range()
        });
        if let Some(enemy) = in_range {
            return PlayerCommand::Attack(TargetRef::Actor(enemy.id()));
        }

        let build = me
            .builder
            .as_ref()
            .filter(|builder| builder.has_builds_left())
            .and_then(|builder| state.ledgers.counts(builder.ledger()).ok())
            .and_then(|counts| {
                self.recipes
                    .first_affordable(&Archetype::BUILD_PRIORITY, counts)
            });
        if let Some(archetype) = build {
            return PlayerCommand::Build(archetype);
        }

        if let Some(enemy) = nearest.filter(|_| me.move_time() > 0.0) {
            let distance = me.position.distance_sqr(enemy.position).sqrt();
            let range = me.sqr_attack_range().sqrt();
            let step = distance - range * APPROACH_MARGIN;
            if step > MIN_STEP {
                return PlayerCommand::MoveTo(me.position.step_toward(enemy.position, step));
            }
        }

        PlayerCommand::EndTurn
    }
}

#[async_trait]
impl PlayerProvider for Autopilot {
    async fn next_command(&self, actor: ActorId, state: &GameState) -> Result<PlayerCommand> {
        let Some(me) = state.entities.actor(actor) else {
            return Ok(PlayerCommand::EndTurn);
        };
        let issued = Issued {
            turn: state.turn.turn_number,
            actor,
            command: self.plan(me, state),
            attacks: me.attacks_remaining(),
        };

        let mut last = self.last.lock().await;
        if issued.command.is_end_turn() || *last == Some(issued) {
            *last = None;
            return Ok(PlayerCommand::EndTurn);
        }
        *last = Some(issued);
        tracing::debug!(%actor, command = ?issued.command, "autopilot");
        Ok(issued.command)
    }
}

#[cfg(test)]
mod tests {
    use embers_core::{
        ActorKind, ActorStats, ActorTemplate, AttackPattern, Position, Recipe, ResourceCounts,
        ResourceKind, WeaponClass, WeaponProfile,
    };

    use super::*;

    fn template(kind: ActorKind, can_build: bool) -> ActorTemplate {
        ActorTemplate {
            name: format!("{kind}"),
            kind,
            archetype: Archetype::Default,
            stats: ActorStats {
                max_builds: 1,
                ..ActorStats::default()
            },
            melee: WeaponProfile::fists(),
            primary: Some(WeaponProfile::new(
                "Rifle",
                WeaponClass::Rifle,
                AttackPattern::SingleShot,
                10.0,
                10,
                10,
            )),
            secondary: None,
            can_build,
            has_ledger: can_build,
            can_move: true,
        }
    }

    fn recipes() -> RecipeCatalog {
        RecipeCatalog::new([Recipe {
            archetype: Archetype::Warrior,
            cost: ResourceCounts::from_pairs([(ResourceKind::Steel, 1)]),
        }])
        .unwrap()
    }

    /// Player at the origin with a fresh turn, one enemy at `enemy_at`.
    fn skirmish(enemy_at: Position, steel: u32) -> GameState {
        let mut state = GameState::with_seed(1);
        let ledger = state
            .ledgers
            .open_with(ResourceCounts::from_pairs([(ResourceKind::Steel, steel)]));

        let player = state.entities.allocate_actor(true);
        let mut actor = template(ActorKind::Player, true).to_actor(
            player,
            Alignment::Player,
            Position::ORIGIN,
            Some(ledger),
        );
        actor.start_turn();
        state.entities.insert_actor(actor);

        let enemy = state.entities.allocate_actor(false);
        let actor =
            template(ActorKind::Enemy, false).to_actor(enemy, Alignment::Enemy, enemy_at, None);
        state.entities.insert_actor(actor);
        state
    }

    #[tokio::test]
    async fn shoots_an_enemy_in_range() {
        let state = skirmish(Position::ground(6.0, 0.0), 0);
        let pilot = Autopilot::new(recipes());
        let command = pilot.next_command(ActorId::PLAYER, &state).await.unwrap();
        assert_eq!(command, PlayerCommand::Attack(TargetRef::Actor(ActorId(1))));
    }

    #[tokio::test]
    async fn builds_before_walking() {
        let state = skirmish(Position::ground(40.0, 0.0), 1);
        let pilot = Autopilot::new(recipes());
        let command = pilot.next_command(ActorId::PLAYER, &state).await.unwrap();
        assert_eq!(command, PlayerCommand::Build(Archetype::Warrior));
    }

    #[tokio::test]
    async fn walks_toward_a_distant_enemy_once() {
        let state = skirmish(Position::ground(40.0, 0.0), 0);
        let pilot = Autopilot::new(recipes());

        let command = pilot.next_command(ActorId::PLAYER, &state).await.unwrap();
        let PlayerCommand::MoveTo(target) = command else {
            panic!("expected a move");
        };
        assert!((target.x - 32.0).abs() < 1e-3);

        // Nothing changed, so repeating the move would be pointless.
        let again = pilot.next_command(ActorId::PLAYER, &state).await.unwrap();
        assert_eq!(again, PlayerCommand::EndTurn);
    }
}

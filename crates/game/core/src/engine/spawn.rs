use crate::env::ActorTemplate;
use crate::events::GameEvent;
use crate::resources::{ResourceCounts, ResourceKind};
use crate::state::{ActorId, ActorKind, Alignment, CrateId, GamePhase, LedgerId, Position};

use super::{GameEngine, SpawnError, TurnError};

impl<'a> GameEngine<'a> {
    /// Seed context offset for crate scatter rolls, clear of shot contexts.
    const SCATTER_CONTEXT: u32 = 1 << 16;

    /// Instantiates `template` and registers it with the scheduler.
    ///
    /// When `ledger` is `None` and the template collects or builds, a fresh
    /// owned ledger is opened for it.
    pub fn spawn(
        &mut self,
        template: &ActorTemplate,
        alignment: Alignment,
        position: Position,
        ledger: Option<LedgerId>,
    ) -> Result<ActorId, SpawnError> {
        self.spawn_actor(template, alignment, position, ledger, None)
    }

    pub(super) fn spawn_actor(
        &mut self,
        template: &ActorTemplate,
        alignment: Alignment,
        position: Position,
        ledger: Option<LedgerId>,
        builder: Option<ActorId>,
    ) -> Result<ActorId, SpawnError> {
        self.check_spawn(template, ledger)?;

        let is_player = template.kind == ActorKind::Player;
        let id = self.state.entities.allocate_actor(is_player);
        let ledger = match ledger {
            Some(ledger) => Some(ledger),
            None if template.needs_ledger() => Some(self.state.ledgers.open()),
            None => None,
        };

        let actor = template.to_actor(id, alignment, position, ledger);
        let archetype = actor.archetype();
        self.state.entities.insert_actor(actor);
        self.register(id)?;
        self.emit(GameEvent::ActorSpawned {
            actor: id,
            archetype,
            alignment,
            position,
            builder,
        });
        Ok(id)
    }

    /// Everything [`spawn`](Self::spawn) checks before touching the state.
    pub(super) fn check_spawn(
        &self,
        template: &ActorTemplate,
        ledger: Option<LedgerId>,
    ) -> Result<(), SpawnError> {
        if self.state.phase() == GamePhase::Postgame {
            return Err(SpawnError::GameOver);
        }
        let is_player = template.kind == ActorKind::Player;
        if is_player && self.state.player().is_some() {
            return Err(SpawnError::PlayerExists);
        }
        if let Some(ledger) = ledger {
            self.state.ledgers.resolve(ledger)?;
        }
        if is_player && self.state.phase() != GamePhase::Pregame {
            return Err(TurnError::PlayerAfterStart.into());
        }
        Ok(())
    }

    /// Places a neutral supply crate.
    pub fn place_crate(
        &mut self,
        position: Position,
        health: u32,
        contents: ResourceCounts,
    ) -> CrateId {
        self.state.entities.insert_crate(position, health, contents)
    }

    /// Opens an empty owned ledger, e.g. one shared by a whole side.
    pub fn open_ledger(&mut self) -> LedgerId {
        self.state.ledgers.open()
    }

    /// Credits a ledger directly, e.g. with starting resources.
    pub fn deposit(&mut self, ledger: LedgerId, stacks: &ResourceCounts) -> Result<(), SpawnError> {
        let changes = self.state.ledgers.add_vector(ledger, stacks)?;
        self.emit_ledger_changes(changes);
        Ok(())
    }

    /// Releases a broken crate's contents as pickups scattered around it.
    pub(super) fn break_crate(&mut self, id: CrateId, breaker: ActorId) {
        let Some(broken) = self.state.entities.remove_crate(id) else {
            return;
        };
        self.emit(GameEvent::CrateDestroyed { crate_id: id });

        let radius = self.env.config().crate_scatter_radius;
        let rng = self.env.rng();
        for (slot, (kind, amount)) in broken.contents.iter().enumerate() {
            let base = Self::SCATTER_CONTEXT + 2 * slot as u32;
            let dx = rng.spread(self.roll_seed(breaker, base), radius);
            let dz = rng.spread(self.roll_seed(breaker, base + 1), radius);
            self.expose_pickup(broken.position.offset(dx, dz), kind, amount);
        }
    }

    fn expose_pickup(&mut self, position: Position, kind: ResourceKind, amount: u32) {
        let pickup = self.state.entities.insert_pickup(position, kind, amount);
        self.emit(GameEvent::PickupExposed {
            pickup,
            kind,
            amount,
            position,
        });
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::testing::{Fixture, bot, commander};
    use crate::resources::LedgerMode;
    use crate::state::{Archetype, GameState};

    use super::*;

    #[test]
    fn builders_get_their_own_ledger() {
        let fixture = Fixture::new();
        let mut state = GameState::default();
        let mut engine = GameEngine::new(&mut state, fixture.env());
        let enemy = engine
            .spawn(&commander(ActorKind::Enemy, true), Alignment::Enemy, Position::ORIGIN, None)
            .unwrap();
        let grunt = engine
            .spawn(&bot(Archetype::Warrior), Alignment::Enemy, Position::ORIGIN, None)
            .unwrap();

        let enemy = state.entities.actor(enemy).unwrap();
        let ledger = enemy.ledger.unwrap();
        assert_eq!(enemy.builder.as_ref().map(|b| b.ledger()), Some(ledger));
        assert!(matches!(state.ledgers.mode(ledger), Some(LedgerMode::Owned(_))));
        assert_eq!(state.entities.actor(grunt).unwrap().ledger, None);
    }

    #[test]
    fn second_player_is_rejected() {
        let fixture = Fixture::new();
        let mut state = GameState::default();
        let mut engine = GameEngine::new(&mut state, fixture.env());
        let template = commander(ActorKind::Player, false);
        engine
            .spawn(&template, Alignment::Player, Position::ORIGIN, None)
            .unwrap();
        assert_eq!(
            engine.spawn(&template, Alignment::Player, Position::ORIGIN, None),
            Err(SpawnError::PlayerExists)
        );
    }

    #[test]
    fn deposit_reports_resolved_ledger() {
        let fixture = Fixture::new();
        let mut state = GameState::default();
        let owner = state.ledgers.open();
        let forward = state.ledgers.open_forwarding(owner).unwrap();
        let mut engine = GameEngine::new(&mut state, fixture.env());

        engine
            .deposit(forward, &ResourceCounts::from_pairs([(ResourceKind::Wood, 3)]))
            .unwrap();
        assert_eq!(
            engine.take_events(),
            vec![GameEvent::ResourceCountChanged {
                ledger: owner,
                kind: ResourceKind::Wood,
                count: 3
            }]
        );
    }
}

use crate::building::BuildError;
use crate::env::ActorTemplate;
use crate::events::GameEvent;
use crate::state::{ActorId, Alignment, Archetype, LedgerId, Position};

use super::{GameEngine, SpawnError};

impl<'a> GameEngine<'a> {
    /// Builds a bot of `archetype` next to `builder`.
    ///
    /// The build limit is checked before affordability. On success the
    /// recipe cost is spent, the bot joins the builder's side at the tail of
    /// the queue, and a collector is wired to deposit into the builder's
    /// ledger.
    pub fn build(&mut self, builder: ActorId, archetype: Archetype) -> Result<ActorId, BuildError> {
        if !self.is_acting(builder) {
            return Err(BuildError::OutOfTurn(builder));
        }
        let actor = self
            .state
            .entities
            .actor(builder)
            .ok_or(BuildError::NoBuildCapability(builder))?;
        let capability = actor
            .builder
            .as_ref()
            .ok_or(BuildError::NoBuildCapability(builder))?;

        let ledger = self
            .state
            .ledgers
            .resolve(capability.ledger())
            .map_err(|_| BuildError::LedgerUnavailable)?;
        let counts = self
            .state
            .ledgers
            .counts(ledger)
            .map_err(|_| BuildError::LedgerUnavailable)?;
        let cost = capability.check(archetype, self.env.recipes(), counts)?.cost;

        let alignment = actor.alignment();
        let template = self
            .env
            .blueprints()
            .bot_template(archetype, alignment)
            .ok_or(BuildError::MissingBlueprint(archetype))?;
        let position = actor.position.offset(self.env.config().spawn_offset, 0.0);
        self.check_spawn(template, None)?;

        let changes = self
            .state
            .ledgers
            .remove_vector(ledger, &cost)
            .map_err(|_| BuildError::LedgerUnavailable)?;
        let unit = match self.place_bot(template, archetype, alignment, position, ledger, builder) {
            Ok(unit) => unit,
            Err(err) => {
                self.state
                    .ledgers
                    .add_vector(ledger, &cost)
                    .map_err(|_| BuildError::LedgerUnavailable)?;
                return Err(err);
            }
        };

        let (builds, max_builds) = match self
            .state
            .entities
            .actor_mut(builder)
            .and_then(|a| a.builder.as_mut())
        {
            Some(capability) => {
                capability.record_build(unit);
                (capability.builds(), capability.max_builds())
            }
            None => return Err(BuildError::NoBuildCapability(builder)),
        };
        self.emit(GameEvent::BuildCountChanged {
            builder,
            builds,
            max_builds,
        });
        self.emit_ledger_changes(changes);
        Ok(unit)
    }

    /// Opens the bot's ledger and spawns it. A failed spawn closes the
    /// ledger again.
    fn place_bot(
        &mut self,
        template: &ActorTemplate,
        archetype: Archetype,
        alignment: Alignment,
        position: Position,
        builder_ledger: LedgerId,
        builder: ActorId,
    ) -> Result<ActorId, BuildError> {
        let bot_ledger = if archetype == Archetype::Collector {
            Some(self.state.ledgers.open_forwarding(builder_ledger).map_err(SpawnError::from)?)
        } else if template.needs_ledger() {
            Some(self.state.ledgers.open())
        } else {
            None
        };
        match self.spawn_actor(template, alignment, position, bot_ledger, Some(builder)) {
            Ok(unit) => Ok(unit),
            Err(err) => {
                if let Some(opened) = bot_ledger {
                    self.state.ledgers.close(opened).map_err(SpawnError::from)?;
                }
                Err(err.into())
            }
        }
    }

    /// Re-evaluates every builder drawing from `ledger`.
    pub(super) fn refresh_build_ability(&mut self, ledger: LedgerId) {
        let Ok(owner) = self.state.ledgers.resolve(ledger) else {
            return;
        };
        let Ok(counts) = self.state.ledgers.counts(owner) else {
            return;
        };
        let affordable = self.env.recipes().affordable(counts);
        let builders: Vec<ActorId> = self
            .state
            .entities
            .actors()
            .filter(|actor| {
                actor
                    .builder
                    .as_ref()
                    .is_some_and(|b| self.state.ledgers.resolve(b.ledger()) == Ok(owner))
            })
            .map(|actor| actor.id())
            .collect();
        for builder in builders {
            self.emit(GameEvent::BuildAbilityChanged {
                builder,
                affordable: affordable.clone(),
            });
        }
    }
}

//! Turn scheduling and capability execution.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. Each
//! public operation validates everything up front, then mutates state in one
//! go and buffers the resulting [`GameEvent`]s. A failed operation returns its
//! error and leaves both the state and the event buffer untouched.
//!
//! Only the head of the turn queue may act. Operations that take an actor id
//! check it against the head before doing anything else.

mod building;
mod combat;
mod errors;
mod movement;
mod spawn;
mod turns;

pub use combat::{AttackReport, ShotRecord};
pub use errors::{SpawnError, TurnError};
pub use movement::StepReport;
pub use turns::TurnHandoff;

use crate::env::{Env, compute_seed};
use crate::events::GameEvent;
use crate::resources::LedgerChange;
use crate::state::{ActorId, GameState, LedgerId};

/// Game engine that applies capability operations and advances turns.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
    env: Env<'a>,
    events: Vec<GameEvent>,
}

impl<'a> GameEngine<'a> {
    /// Creates a new game engine over the given state.
    pub fn new(state: &'a mut GameState, env: Env<'a>) -> Self {
        Self {
            state,
            env,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    pub fn env(&self) -> Env<'a> {
        self.env
    }

    /// Drains the events buffered since the last call, oldest first.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// True when `actor` is the head of the queue of a running game.
    pub fn is_acting(&self, actor: ActorId) -> bool {
        self.state.turn.is_running() && self.state.turn.current() == Some(actor)
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    fn emit_ledger_changes(&mut self, changes: impl IntoIterator<Item = LedgerChange>) {
        let mut touched: Option<LedgerId> = None;
        for change in changes {
            touched = Some(change.ledger);
            self.emit(GameEvent::ResourceCountChanged {
                ledger: change.ledger,
                kind: change.kind,
                count: change.count,
            });
        }
        if let Some(ledger) = touched {
            self.refresh_build_ability(ledger);
        }
    }

    /// Seed for one roll of the current action.
    fn roll_seed(&self, actor: ActorId, context: u32) -> u64 {
        compute_seed(self.state.game_seed, self.state.turn.nonce, actor.0, context)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Shared fixtures for engine tests.

    use std::collections::BTreeMap;

    use crate::combat::{AttackPattern, WeaponClass, WeaponProfile};
    use crate::config::GameConfig;
    use crate::env::{
        ActorStats, ActorTemplate, BlueprintOracle, Env, NavigationOracle, PcgRng, RngOracle,
        SpatialOracle,
    };
    use crate::resources::{Recipe, RecipeCatalog, ResourceCounts, ResourceKind};
    use crate::state::{ActorKind, Alignment, Archetype, Position};

    /// Open field with a single cover line at `x = cover_x`.
    pub struct Field {
        pub cover_x: Option<f32>,
    }

    impl SpatialOracle for Field {
        fn in_cover(&self, origin: Position, target: Position) -> bool {
            match self.cover_x {
                Some(x) => (origin.x - x).signum() != (target.x - x).signum(),
                None => false,
            }
        }

        fn cover_positions(&self, _threat: Position, _near: Position) -> Vec<Position> {
            Vec::new()
        }
    }

    impl NavigationOracle for Field {
        fn step_toward(&self, from: Position, to: Position, max_distance: f32) -> Position {
            from.step_toward(to, max_distance)
        }
    }

    /// Rolls fixed values: always hit, minimum damage, never critical.
    pub struct FixedRng(pub u32);

    impl RngOracle for FixedRng {
        fn next_u32(&self, _seed: u64) -> u32 {
            self.0
        }
    }

    pub struct Blueprints(pub BTreeMap<Archetype, ActorTemplate>);

    impl BlueprintOracle for Blueprints {
        fn bot_template(
            &self,
            archetype: Archetype,
            _alignment: Alignment,
        ) -> Option<&ActorTemplate> {
            self.0.get(&archetype)
        }
    }

    pub struct Fixture {
        pub field: Field,
        pub blueprints: Blueprints,
        pub recipes: RecipeCatalog,
        pub rng: Box<dyn RngOracle>,
        pub config: GameConfig,
    }

    impl Fixture {
        pub fn new() -> Self {
            let mut templates = BTreeMap::new();
            for archetype in Archetype::BUILD_PRIORITY {
                templates.insert(archetype, bot(archetype));
            }
            let recipes = RecipeCatalog::new([
                Recipe::new(
                    Archetype::Warrior,
                    ResourceCounts::from_pairs([(ResourceKind::Steel, 2)]),
                ),
                Recipe::new(
                    Archetype::Collector,
                    ResourceCounts::from_pairs([(ResourceKind::Wood, 1)]),
                ),
                Recipe::new(
                    Archetype::Defender,
                    ResourceCounts::from_pairs([(ResourceKind::CyanCrystal, 1)]),
                ),
            ])
            .expect("valid recipes");
            Self {
                field: Field { cover_x: None },
                blueprints: Blueprints(templates),
                recipes,
                rng: Box::new(FixedRng(0)),
                config: GameConfig::default(),
            }
        }

        pub fn with_rng(mut self, rng: impl RngOracle + 'static) -> Self {
            self.rng = Box::new(rng);
            self
        }

        pub fn with_pcg(self) -> Self {
            self.with_rng(PcgRng)
        }

        pub fn env(&self) -> Env<'_> {
            Env::new(
                &self.field,
                &self.field,
                &self.blueprints,
                &self.recipes,
                self.rng.as_ref(),
                &self.config,
            )
        }
    }

    pub fn rifle(damage: u32) -> WeaponProfile {
        WeaponProfile::new(
            "Rifle",
            WeaponClass::Rifle,
            AttackPattern::SingleShot,
            10.0,
            damage,
            damage,
        )
    }

    pub fn commander(kind: ActorKind, can_build: bool) -> ActorTemplate {
        ActorTemplate {
            name: format!("{kind:?}"),
            kind,
            archetype: Archetype::Default,
            stats: ActorStats {
                max_builds: 1,
                ..ActorStats::default()
            },
            melee: WeaponProfile::fists(),
            primary: Some(rifle(10)),
            secondary: None,
            can_build,
            has_ledger: can_build,
            can_move: true,
        }
    }

    pub fn bot(archetype: Archetype) -> ActorTemplate {
        ActorTemplate {
            name: archetype.to_string(),
            kind: ActorKind::Bot,
            archetype,
            stats: ActorStats {
                max_health: 20,
                ..ActorStats::default()
            },
            melee: WeaponProfile::fists(),
            primary: Some(rifle(5)),
            secondary: None,
            can_build: false,
            has_ledger: archetype == Archetype::Collector,
            can_move: true,
        }
    }
}

//! Small in-code battlefield for unit tests.

use std::sync::Arc;

use embers_content::ActorEntry;
use embers_core::{
    ActorId, ActorKind, ActorStats, ActorTemplate, Alignment, Archetype, AttackPattern, CrateId,
    GameConfig, GameEngine, GameState, Position, Recipe, RecipeCatalog, ResourceCounts,
    ResourceKind, WeaponClass, WeaponProfile,
};

use crate::events::EventBus;
use crate::oracle::{BlueprintCatalog, OpenField, OracleManager, Wall};
use crate::providers::ai::AiContext;
use crate::simulation::{Simulation, TickSettings};

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

pub fn player() -> ActorTemplate {
    ActorTemplate {
        name: "Commander".into(),
        kind: ActorKind::Player,
        archetype: Archetype::Default,
        stats: ActorStats::default(),
        melee: WeaponProfile::fists(),
        primary: Some(rifle(10)),
        secondary: None,
        can_build: false,
        has_ledger: false,
        can_move: true,
    }
}

pub fn commander(can_build: bool, max_attacks: u32) -> ActorTemplate {
    ActorTemplate {
        name: "Warlord".into(),
        kind: ActorKind::Enemy,
        archetype: Archetype::Default,
        stats: ActorStats {
            max_attacks,
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

fn blueprints(skip: Option<(Archetype, Alignment)>) -> BlueprintCatalog {
    let mut entries = Vec::new();
    for alignment in [Alignment::Player, Alignment::Enemy] {
        for archetype in Archetype::BUILD_PRIORITY {
            if skip == Some((archetype, alignment)) {
                continue;
            }
            entries.push(ActorEntry {
                id: format!("{alignment}_{archetype}").to_lowercase(),
                alignment,
                template: bot(archetype),
            });
        }
    }
    BlueprintCatalog::new(entries)
}

fn recipes() -> RecipeCatalog {
    let recipe = |archetype, kind, amount| Recipe {
        archetype,
        cost: ResourceCounts::from_pairs([(kind, amount)]),
    };
    RecipeCatalog::new([
        recipe(Archetype::Warrior, ResourceKind::Steel, 2),
        recipe(Archetype::Collector, ResourceKind::Wood, 1),
        recipe(Archetype::Defender, ResourceKind::CyanCrystal, 1),
    ])
    .unwrap()
}

pub fn oracles(walls: Vec<Wall>) -> OracleManager {
    oracles_without(walls, None)
}

fn oracles_without(walls: Vec<Wall>, skip: Option<(Archetype, Alignment)>) -> OracleManager {
    OracleManager::new(
        Arc::new(OpenField::new(walls)),
        Arc::new(blueprints(skip)),
        Arc::new(recipes()),
        Arc::new(GameConfig::default()),
    )
}

/// A pregame state plus the oracles it runs against.
pub struct Arena {
    pub state: GameState,
    pub oracles: OracleManager,
}

impl Arena {
    pub fn open_field() -> Self {
        Self {
            state: GameState::with_seed(7),
            oracles: oracles(Vec::new()),
        }
    }

    pub fn with_wall(from: Position, to: Position) -> Self {
        Self {
            state: GameState::with_seed(7),
            oracles: oracles(vec![Wall::new(from, to)]),
        }
    }

    /// Open field whose catalog has no bot of `archetype` for `alignment`.
    pub fn without_blueprint(archetype: Archetype, alignment: Alignment) -> Self {
        Self {
            state: GameState::with_seed(7),
            oracles: oracles_without(Vec::new(), Some((archetype, alignment))),
        }
    }

    fn engine(&mut self) -> GameEngine<'_> {
        GameEngine::new(&mut self.state, self.oracles.env())
    }

    pub fn spawn(
        &mut self,
        template: &ActorTemplate,
        alignment: Alignment,
        at: Position,
    ) -> ActorId {
        self.engine().spawn(template, alignment, at, None).unwrap()
    }

    pub fn place_crate(&mut self, at: Position) -> CrateId {
        self.engine()
            .place_crate(at, 10, ResourceCounts::from_pairs([(ResourceKind::Wood, 2)]))
    }

    pub fn deposit(&mut self, actor: ActorId, counts: ResourceCounts) {
        let ledger = self.state.entities.actor(actor).unwrap().ledger.unwrap();
        self.engine().deposit(ledger, &counts).unwrap();
    }

    /// Starts the match and rotates until `actor` heads the queue.
    pub fn start_at(&mut self, actor: ActorId) {
        let mut engine = self.engine();
        engine.start().unwrap();
        while engine.current_actor() != Some(actor) {
            engine.advance().unwrap();
        }
    }

    pub fn context(&self, actor: ActorId) -> AiContext<'_> {
        AiContext::new(actor, &self.state, self.oracles.env()).unwrap()
    }

    pub fn into_simulation(self) -> Simulation {
        self.into_simulation_with(TickSettings::default())
    }

    pub fn into_simulation_with(self, ticks: TickSettings) -> Simulation {
        Simulation::new(self.state, self.oracles, EventBus::new(), ticks)
    }
}

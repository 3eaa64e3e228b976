//! Scenario setup: places actors, crates and starting stock.
//!
//! Scenarios come from the content crate; walls are consumed by the
//! [`OpenField`](crate::oracle::OpenField) oracle and everything else is
//! applied to a pregame [`GameState`] through the engine.
//!
//! Each side that needs one gets a single shared ledger: commanders build
//! from it and starting bots collect into it.

use std::sync::Arc;

use embers_content::{ContentFactory, ScenarioSpec, SpawnSpec};
use embers_core::{
    ActorId, Alignment, CrateId, GameEngine, GameState, LedgerId, ResourceCounts,
};

use crate::api::{Result, RuntimeError};
use crate::oracle::{BlueprintCatalog, OpenField, OracleManager, Wall};

/// Ids handed out while applying a scenario.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    pub player: ActorId,
    pub allies: Vec<ActorId>,
    pub enemies: Vec<ActorId>,
    pub crates: Vec<CrateId>,
    pub player_ledger: Option<LedgerId>,
    pub enemy_ledger: Option<LedgerId>,
}

/// Cover walls of a scenario, for building the field oracle.
pub fn walls(spec: &ScenarioSpec) -> Vec<Wall> {
    spec.walls
        .iter()
        .map(|wall| Wall::new(wall.from, wall.to))
        .collect()
}

/// Loads every content file plus the named scenario and bundles the
/// oracles the scenario runs against.
pub fn load(factory: &ContentFactory, scenario: &str) -> Result<(OracleManager, ScenarioSpec)> {
    let content = |error: anyhow::Error| RuntimeError::Content(format!("{error:#}"));

    let config = factory.load_config().map_err(content)?;
    let recipes = factory.load_recipes().map_err(content)?;
    let weapons = factory.load_weapons().map_err(content)?;
    let actors = factory.load_actors(&weapons).map_err(content)?;
    let spec = factory.load_scenario(scenario, &actors).map_err(content)?;

    tracing::debug!(
        data_dir = %factory.data_dir().display(),
        scenario,
        actors = actors.len(),
        recipes = recipes.len(),
        "content loaded"
    );

    let oracles = OracleManager::new(
        Arc::new(OpenField::new(walls(&spec))),
        Arc::new(BlueprintCatalog::new(actors)),
        Arc::new(recipes),
        Arc::new(config),
    );
    Ok((oracles, spec))
}

/// Builds a pregame state for `spec`. Engine events emitted during setup are
/// discarded; nobody can be subscribed yet.
pub fn create_initial_state(
    spec: &ScenarioSpec,
    oracles: &OracleManager,
    game_seed: u64,
) -> Result<(GameState, Roster)> {
    let mut state = GameState::with_seed(game_seed);

    tracing::info!(
        scenario = %spec.name,
        allies = spec.allies.len(),
        enemies = spec.enemies.len(),
        crates = spec.crates.len(),
        "Creating initial state from scenario"
    );

    let mut engine = GameEngine::new(&mut state, oracles.env());
    let roster = populate(&mut engine, spec, oracles.blueprints())?;
    engine.take_events();
    Ok((state, roster))
}

/// Applies `spec` through an existing engine.
pub fn populate(
    engine: &mut GameEngine<'_>,
    spec: &ScenarioSpec,
    catalog: &BlueprintCatalog,
) -> Result<Roster> {
    let mut roster = Roster::default();

    let player_stock = spec.player_stock();
    let enemy_stock = spec.enemy_stock();
    let player_ledger = side_ledger(engine, spec, catalog, Alignment::Player, &player_stock)?;
    let enemy_ledger = side_ledger(engine, spec, catalog, Alignment::Enemy, &enemy_stock)?;
    roster.player_ledger = player_ledger;
    roster.enemy_ledger = enemy_ledger;

    // The commander must join first so it heads the queue.
    roster.player = place(engine, catalog, &spec.player, player_ledger)?;
    for ally in &spec.allies {
        roster.allies.push(place(engine, catalog, ally, player_ledger)?);
    }
    for enemy in &spec.enemies {
        roster.enemies.push(place(engine, catalog, enemy, enemy_ledger)?);
    }

    for crate_spec in &spec.crates {
        let id = engine.place_crate(crate_spec.position, crate_spec.health, crate_spec.contents());
        roster.crates.push(id);
    }

    tracing::info!(
        player = %roster.player,
        enemies = roster.enemies.len(),
        crates = roster.crates.len(),
        "Scenario applied"
    );
    Ok(roster)
}

/// Opens the side's shared ledger when any of its spawns needs one and
/// deposits the starting stock.
fn side_ledger(
    engine: &mut GameEngine<'_>,
    spec: &ScenarioSpec,
    catalog: &BlueprintCatalog,
    alignment: Alignment,
    stock: &ResourceCounts,
) -> Result<Option<LedgerId>> {
    let spawns: Vec<&SpawnSpec> = match alignment {
        Alignment::Player => std::iter::once(&spec.player).chain(&spec.allies).collect(),
        Alignment::Enemy => spec.enemies.iter().collect(),
        Alignment::Neutral => Vec::new(),
    };

    let mut needs_ledger = false;
    for spawn in spawns {
        let template = catalog
            .template(&spawn.actor)
            .ok_or_else(|| RuntimeError::UnknownTemplate(spawn.actor.clone()))?;
        needs_ledger |= template.needs_ledger();
    }
    if !needs_ledger {
        if !stock.is_empty() {
            tracing::warn!(
                %alignment,
                "starting stock ignored: no actor on this side keeps a ledger"
            );
        }
        return Ok(None);
    }

    let ledger = engine.open_ledger();
    engine.deposit(ledger, stock)?;
    Ok(Some(ledger))
}

fn place(
    engine: &mut GameEngine<'_>,
    catalog: &BlueprintCatalog,
    spawn: &SpawnSpec,
    ledger: Option<LedgerId>,
) -> Result<ActorId> {
    let entry = catalog
        .entry(&spawn.actor)
        .ok_or_else(|| RuntimeError::UnknownTemplate(spawn.actor.clone()))?;
    let ledger = ledger.filter(|_| entry.template.needs_ledger());
    let id = engine.spawn(&entry.template, entry.alignment, spawn.position, ledger)?;
    tracing::debug!(actor = %id, template = %spawn.actor, position = %spawn.position, "placed");
    Ok(id)
}

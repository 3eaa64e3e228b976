//! Shared fixtures for runtime integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use embers_content::{ActorEntry, ScenarioSpec, SpawnSpec};
use embers_core::{
    ActorKind, ActorStats, ActorTemplate, Alignment, Archetype, AttackPattern, GameConfig,
    Position, Recipe, RecipeCatalog, ResourceCounts, ResourceKind, WeaponClass, WeaponProfile,
};
use embers_runtime::{BlueprintCatalog, OpenField, OracleManager, RuntimeConfig};

pub fn rifle(damage: u32) -> WeaponProfile {
    WeaponProfile::new(
        "Test Rifle",
        WeaponClass::Rifle,
        AttackPattern::SingleShot,
        10.0,
        damage,
        damage,
    )
}

pub fn template(name: &str, kind: ActorKind, health: u32, damage: u32) -> ActorTemplate {
    ActorTemplate {
        name: name.to_string(),
        kind,
        archetype: Archetype::Default,
        stats: ActorStats {
            max_health: health,
            ..ActorStats::default()
        },
        melee: WeaponProfile::fists(),
        primary: Some(rifle(damage)),
        secondary: None,
        can_build: false,
        has_ledger: false,
        can_move: true,
    }
}

pub fn entry(id: &str, alignment: Alignment, template: ActorTemplate) -> ActorEntry {
    ActorEntry {
        id: id.to_string(),
        alignment,
        template,
    }
}

pub fn oracles(entries: Vec<ActorEntry>) -> OracleManager {
    let recipes = RecipeCatalog::new([Recipe {
        archetype: Archetype::Warrior,
        cost: ResourceCounts::from_pairs([(ResourceKind::Steel, 2)]),
    }])
    .expect("valid recipes");
    OracleManager::new(
        Arc::new(OpenField::new(Vec::new())),
        Arc::new(BlueprintCatalog::new(entries)),
        Arc::new(recipes),
        Arc::new(GameConfig::default()),
    )
}

/// One commander against one enemy on an open field.
pub fn duel(enemy_at: Position) -> ScenarioSpec {
    ScenarioSpec {
        name: "duel".to_string(),
        player: SpawnSpec {
            actor: "hero".to_string(),
            position: Position::ORIGIN,
        },
        allies: Vec::new(),
        enemies: vec![SpawnSpec {
            actor: "grunt".to_string(),
            position: enemy_at,
        }],
        crates: Vec::new(),
        walls: Vec::new(),
        player_stock: Default::default(),
        enemy_stock: Default::default(),
    }
}

pub fn seeded(seed: u64) -> RuntimeConfig {
    RuntimeConfig {
        seed: Some(seed),
        ..RuntimeConfig::default()
    }
}

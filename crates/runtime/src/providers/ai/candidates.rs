//! The fixed-size set of actions an AI actor may pick from.

use arrayvec::ArrayVec;
use embers_core::{GameConfig, Position};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// High-level actions the planner chooses between.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum AiAction {
    AttackPlayer,
    AttackAllies,
    BuildBot,
    GatherResources,
    /// Walk to the in-cover spot found while evaluating.
    TakeCover(Position),
    EndTurn,
}

impl AiAction {
    pub fn label(&self) -> &'static str {
        match self {
            AiAction::AttackPlayer => "attack-player",
            AiAction::AttackAllies => "attack-allies",
            AiAction::BuildBot => "build-bot",
            AiAction::GatherResources => "gather-resources",
            AiAction::TakeCover(_) => "take-cover",
            AiAction::EndTurn => "end-turn",
        }
    }

    fn same_kind(&self, other: &AiAction) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl std::fmt::Display for AiAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Candidate set. Each action kind appears at most once.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Candidates {
    actions: ArrayVec<AiAction, { GameConfig::MAX_CANDIDATES }>,
}

impl Candidates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `action` unless its kind is already present. Returns whether it
    /// was added.
    pub fn push(&mut self, action: AiAction) -> bool {
        if self.actions.iter().any(|existing| existing.same_kind(&action)) {
            return false;
        }
        self.actions.try_push(action).is_ok()
    }

    pub fn contains_gather(&self) -> bool {
        self.actions.contains(&AiAction::GatherResources)
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn as_slice(&self) -> &[AiAction] {
        &self.actions
    }

    /// Uniform pick; `None` when empty.
    pub fn choose(&self, rng: &mut impl Rng) -> Option<AiAction> {
        if self.actions.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.actions.len());
        self.actions.get(index).copied()
    }
}

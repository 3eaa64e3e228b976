//! Commands a human-controlled actor can issue during its turn.
use embers_core::{Archetype, Position, TargetRef};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum PlayerCommand {
    /// Walk toward a point until arrival, a stall or budget exhaustion.
    MoveTo(Position),
    /// Spend one attack charge on the target.
    Attack(TargetRef),
    Build(Archetype),
    SwitchWeapon,
    EndTurn,
}

impl PlayerCommand {
    pub fn is_end_turn(&self) -> bool {
        matches!(self, PlayerCommand::EndTurn)
    }
}

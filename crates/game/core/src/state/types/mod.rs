pub mod actor;
pub mod common;
pub mod entities;
pub mod identity;
pub mod props;
pub mod turn;

pub use actor::ActorState;
pub use common::{ActorId, CrateId, LedgerId, PickupId, Position, TargetRef};
pub use entities::EntitiesState;
pub use identity::{ActorIdentity, ActorKind, Alignment, Archetype, Capabilities, Controller};
pub use props::{CrateState, PickupState};
pub use turn::{GamePhase, TurnState};

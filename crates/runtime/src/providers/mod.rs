//! Turn drivers for actors that are not fed by a [`crate::PlayerProvider`].

pub mod ai;

pub use ai::{AiAction, AiContext, AiController, AiPlanner, AiTurn};

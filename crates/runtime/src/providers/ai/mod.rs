//! Rule-based AI for enemy-controlled actors.
//!
//! This module mirrors how an enemy thinks during its turn:
//!
//! 1. **Context**: [`AiContext`] answers distance, budget and target
//!    questions about the match from the actor's point of view
//!
//! 2. **Candidates**: [`AiPlanner`] evaluates attack-player, attack-allies,
//!    build-bot, gather-resources and take-cover, each as a pure predicate
//!
//! 3. **Selection**: nothing eligible ends the turn; collectors always
//!    gather when they can; otherwise the pick is uniform
//!
//! 4. **Execution**: routines turn the chosen [`AiAction`] into engine calls
//!    and cooperative movement, then ask for a fresh decision
//!
//! [`AiController`] repeats the cycle until the turn ends or the per-turn
//! decision bound is reached.

pub mod candidates;
pub mod context;
pub mod controller;
pub mod planner;
mod routines;

pub use candidates::{AiAction, Candidates};
pub use context::AiContext;
pub use controller::{AiController, AiTurn, DEFAULT_MAX_DECISIONS};
pub use planner::AiPlanner;

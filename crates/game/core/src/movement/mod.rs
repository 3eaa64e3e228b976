//! Movement capability.
//!
//! Movement is budgeted in seconds. The engine advances it one simulation
//! tick at a time; path planning is delegated to the navigation oracle.

pub mod mover;

pub use mover::{MoveError, MoveStatus, Mover};

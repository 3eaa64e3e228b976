//! Build capability.

pub mod builder;

pub use builder::{BuildError, Builder};

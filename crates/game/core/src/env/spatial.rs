//! Spatial and navigation queries answered by the host world.

use crate::state::Position;

/// Geometry queries. Implementations own cover layout; the rules only ask.
pub trait SpatialOracle: Send + Sync {
    fn distance_sqr(&self, a: Position, b: Position) -> f32 {
        a.distance_sqr(b)
    }

    /// True when something blocks the line from `origin` to `target`.
    fn in_cover(&self, origin: Position, target: Position) -> bool;

    /// Positions that are in cover from `threat`, closest to `near` first.
    fn cover_positions(&self, threat: Position, near: Position) -> Vec<Position>;

    /// First candidate reachable from `from` within the squared travel budget.
    fn find_reachable_destination(
        &self,
        from: Position,
        candidates: &[Position],
        max_travel_sqr: f32,
    ) -> Option<Position> {
        candidates
            .iter()
            .copied()
            .find(|candidate| self.distance_sqr(from, *candidate) <= max_travel_sqr)
    }
}

/// Black-box movement executor.
pub trait NavigationOracle: Send + Sync {
    /// Next position when travelling from `from` toward `to` by at most
    /// `max_distance`. Returning `from` signals that the mover is stuck.
    fn step_toward(&self, from: Position, to: Position, max_distance: f32) -> Position;
}

//! Cooperative movement tasks.
//!
//! A task points the acting mover somewhere, then steps the simulation one
//! tick at a time, yielding to the scheduler between ticks. Every tick is a
//! complete engine operation, so a task can be abandoned between ticks
//! without leaving partial state behind.

use embers_core::{ActorId, MoveStatus, Position};
use tracing::{trace, warn};

use super::Simulation;

/// How a movement task ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TravelOutcome {
    /// At the destination, or within the requested range.
    Reached,
    /// Navigation made no progress.
    Stalled,
    /// The move budget ran out first.
    Exhausted,
    /// The per-move tick bound was hit.
    TimedOut,
    /// The mover refused to start.
    Rejected,
}

impl TravelOutcome {
    pub fn reached(self) -> bool {
        self == TravelOutcome::Reached
    }

    /// The mover cannot get any further this turn however often it is asked.
    pub fn is_stuck(self) -> bool {
        matches!(self, TravelOutcome::Stalled | TravelOutcome::TimedOut)
    }
}

impl Simulation {
    /// Walks `actor` toward `destination` until arrival, a stall or budget
    /// exhaustion.
    pub async fn travel(&mut self, actor: ActorId, destination: Position) -> TravelOutcome {
        let tolerance = self.oracles.config().arrival_tolerance;
        let Some(position) = self.state.entities.actor(actor).map(|a| a.position) else {
            return TravelOutcome::Rejected;
        };
        if position.distance_sqr(destination) <= tolerance * tolerance {
            return TravelOutcome::Reached;
        }
        if self.move_to(actor, destination).is_err() {
            return TravelOutcome::Rejected;
        }
        self.drive(actor, |_| false).await
    }

    /// Walks `actor` toward `target` until it is within `range_sqr`.
    ///
    /// Returns immediately when already in range, and reports
    /// [`TravelOutcome::Exhausted`] without moving when no move time is left.
    pub async fn get_in_range(
        &mut self,
        actor: ActorId,
        target: Position,
        range_sqr: f32,
    ) -> TravelOutcome {
        let in_range = move |at: Position| at.distance_sqr(target) <= range_sqr;
        let Some(state) = self.state.entities.actor(actor) else {
            return TravelOutcome::Rejected;
        };
        if in_range(state.position) {
            return TravelOutcome::Reached;
        }
        if state.move_time() <= 0.0 {
            return TravelOutcome::Exhausted;
        }
        if self.move_to(actor, target).is_err() {
            return TravelOutcome::Rejected;
        }
        self.drive(actor, in_range).await
    }

    async fn drive(&mut self, actor: ActorId, done: impl Fn(Position) -> bool) -> TravelOutcome {
        for tick in 0..self.ticks.max_ticks_per_move {
            let Some(report) = self.step() else {
                return TravelOutcome::Stalled;
            };
            if report.actor != actor {
                return TravelOutcome::Rejected;
            }
            trace!(%actor, tick, position = %report.position, status = ?report.status, "move tick");

            if done(report.position) {
                // Range reached mid-route: drop the rest of the path.
                let _ = self.halt(actor);
                return TravelOutcome::Reached;
            }
            match report.status {
                MoveStatus::Moving => {}
                MoveStatus::Exhausted => return TravelOutcome::Exhausted,
                MoveStatus::Idle if report.displaced => return TravelOutcome::Reached,
                MoveStatus::Idle => return TravelOutcome::Stalled,
            }
            tokio::task::yield_now().await;
        }

        warn!(%actor, ticks = self.ticks.max_ticks_per_move, "move tick bound reached");
        let _ = self.halt(actor);
        TravelOutcome::TimedOut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_stalls_and_timeouts_are_stuck() {
        assert!(TravelOutcome::Stalled.is_stuck());
        assert!(TravelOutcome::TimedOut.is_stuck());
        assert!(!TravelOutcome::Exhausted.is_stuck());
        assert!(!TravelOutcome::Rejected.is_stuck());
        assert!(!TravelOutcome::Reached.is_stuck());
    }
}

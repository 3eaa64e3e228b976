use crate::error::{ErrorSeverity, GameError};
use crate::state::{ActorId, Position};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum MoveError {
    #[error("out of move time")]
    OutOfMoveTime,

    #[error("{0} cannot move")]
    NoMovementCapability(ActorId),

    #[error("{0} is not the acting actor")]
    OutOfTurn(ActorId),

    #[error("{0} does not exist")]
    ActorNotFound(ActorId),
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::OutOfMoveTime => ErrorSeverity::Recoverable,
            Self::NoMovementCapability(_) | Self::OutOfTurn(_) => ErrorSeverity::Validation,
            Self::ActorNotFound(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfMoveTime => "MOVE_OUT_OF_MOVE_TIME",
            Self::NoMovementCapability(_) => "MOVE_NO_MOVEMENT_CAPABILITY",
            Self::OutOfTurn(_) => "MOVE_OUT_OF_TURN",
            Self::ActorNotFound(_) => "MOVE_ACTOR_NOT_FOUND",
        }
    }
}

/// Result of advancing a mover by one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MoveStatus {
    /// No destination, inactive, or already there.
    Idle,
    /// Moved and still has budget.
    Moving,
    /// Budget ran out on this tick; the destination was collapsed.
    Exhausted,
}

/// Movement capability of an actor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mover {
    max_move_time: f32,
    move_time: f32,
    speed: f32,
    acceleration: f32,
    destination: Option<Position>,
    active: bool,
    moving: bool,
}

impl Mover {
    pub fn new(max_move_time: f32, speed: f32, acceleration: f32) -> Self {
        Self {
            max_move_time,
            move_time: 0.0,
            speed,
            acceleration,
            destination: None,
            active: false,
            moving: false,
        }
    }

    pub fn move_time(&self) -> f32 {
        self.move_time
    }

    pub fn max_move_time(&self) -> f32 {
        self.max_move_time
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn can_move(&self) -> bool {
        self.active && self.move_time > 0.0
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn destination(&self) -> Option<Position> {
        self.destination
    }

    pub fn start_turn(&mut self) {
        self.move_time = self.max_move_time;
        self.active = true;
        self.destination = None;
        self.moving = false;
    }

    /// Halts and deactivates. Remaining time is kept for display only.
    pub fn end_turn(&mut self) {
        self.halt();
        self.active = false;
    }

    pub fn set_destination(&mut self, destination: Position) -> Result<(), MoveError> {
        if !self.can_move() {
            return Err(MoveError::OutOfMoveTime);
        }
        self.destination = Some(destination);
        Ok(())
    }

    /// Collapses the destination onto the current position.
    pub fn halt(&mut self) {
        self.destination = None;
        self.moving = false;
    }

    /// Distance the mover may cover this tick.
    pub fn step_budget(&self, dt: f32) -> f32 {
        if !self.can_move() {
            return 0.0;
        }
        self.speed * dt.min(self.move_time)
    }

    /// Books a tick of travel. Only ticks with displacement cost move time.
    pub fn tick(&mut self, dt: f32, displaced: bool, arrived: bool) -> MoveStatus {
        if !self.active || self.destination.is_none() {
            self.moving = false;
            return MoveStatus::Idle;
        }
        if !displaced {
            self.halt();
            return MoveStatus::Idle;
        }
        self.moving = true;
        self.move_time = (self.move_time - dt).max(0.0);
        if self.move_time <= 0.0 {
            self.halt();
            return MoveStatus::Exhausted;
        }
        if arrived {
            self.halt();
            return MoveStatus::Idle;
        }
        MoveStatus::Moving
    }

    /// Predicted squared reach for the remaining budget.
    ///
    /// `(speed * move_time - speed / acceleration)^2`, with the linear term
    /// clamped at zero so a nearly spent budget does not predict long reach.
    pub fn max_travel_distance_sqr(&self) -> f32 {
        let speed_up_time = if self.acceleration > 0.0 {
            self.speed / self.acceleration
        } else {
            0.0
        };
        let reach = (self.speed * self.move_time - speed_up_time).max(0.0);
        reach * reach
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mover() -> Mover {
        let mut mover = Mover::new(3.0, 4.0, 8.0);
        mover.start_turn();
        mover
    }

    #[test]
    fn start_turn_resets_budget() {
        let mut mover = Mover::new(3.0, 4.0, 8.0);
        assert!(!mover.can_move());
        mover.start_turn();
        assert_eq!(mover.move_time(), 3.0);
        assert!(mover.can_move());
    }

    #[test]
    fn ticks_consume_time_until_exhausted() {
        let mut mover = mover();
        mover.set_destination(Position::ground(100.0, 0.0)).unwrap();
        assert_eq!(mover.tick(1.0, true, false), MoveStatus::Moving);
        assert_eq!(mover.move_time(), 2.0);
        assert_eq!(mover.tick(2.5, true, false), MoveStatus::Exhausted);
        assert_eq!(mover.move_time(), 0.0);
        assert_eq!(mover.destination(), None);
        assert_eq!(
            mover.set_destination(Position::ORIGIN),
            Err(MoveError::OutOfMoveTime)
        );
    }

    #[test]
    fn stalled_ticks_are_free() {
        let mut mover = mover();
        mover.set_destination(Position::ground(1.0, 0.0)).unwrap();
        assert_eq!(mover.tick(0.5, false, false), MoveStatus::Idle);
        assert_eq!(mover.move_time(), 3.0);
        assert_eq!(mover.destination(), None);
    }

    #[test]
    fn max_travel_matches_formula() {
        let mover = mover();
        // (4 * 3 - 4 / 8)^2
        assert!((mover.max_travel_distance_sqr() - 11.5 * 11.5).abs() < 1e-4);
    }

    #[test]
    fn max_travel_clamps_at_zero() {
        let mut mover = mover();
        mover.set_destination(Position::ground(50.0, 0.0)).unwrap();
        mover.tick(2.95, true, false);
        assert_eq!(mover.max_travel_distance_sqr(), 0.0);
    }

    #[test]
    fn end_turn_deactivates() {
        let mut mover = mover();
        mover.set_destination(Position::ground(5.0, 0.0)).unwrap();
        mover.end_turn();
        assert!(!mover.can_move());
        assert_eq!(mover.destination(), None);
    }
}

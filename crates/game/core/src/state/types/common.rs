use std::fmt;

/// Unique identifier for any actor tracked in the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorId(pub u32);

impl ActorId {
    /// Reserved identifier for the human-controlled commander.
    pub const PLAYER: Self = Self(0);

    /// Returns true if this id represents the player.
    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::PLAYER
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle into the [`LedgerBook`](crate::resources::LedgerBook).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LedgerId(pub u32);

impl fmt::Display for LedgerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ledger#{}", self.0)
    }
}

/// Identifier of a breakable supply crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrateId(pub u32);

impl fmt::Display for CrateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "crate#{}", self.0)
    }
}

/// Identifier of an exposed resource pickup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PickupId(pub u32);

impl fmt::Display for PickupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pickup#{}", self.0)
    }
}

/// Anything that can be the target of an attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetRef {
    Actor(ActorId),
    Crate(CrateId),
}

impl fmt::Display for TargetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Actor(id) => write!(f, "{id}"),
            Self::Crate(id) => write!(f, "{id}"),
        }
    }
}

/// Continuous world position. `y` is height; the ground plane is x/z.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Point on the ground plane.
    pub const fn ground(x: f32, z: f32) -> Self {
        Self { x, y: 0.0, z }
    }

    /// Squared euclidean distance. Planners compare squared values only.
    #[inline]
    pub fn distance_sqr(self, other: Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Moves up to `max_distance` toward `target`, stopping on it.
    pub fn step_toward(self, target: Position, max_distance: f32) -> Position {
        let dist_sqr = self.distance_sqr(target);
        if dist_sqr <= max_distance * max_distance || dist_sqr <= f32::EPSILON {
            return target;
        }
        let scale = max_distance / dist_sqr.sqrt();
        Position {
            x: self.x + (target.x - self.x) * scale,
            y: self.y + (target.y - self.y) * scale,
            z: self.z + (target.z - self.z) * scale,
        }
    }

    /// Offsets the position on the ground plane.
    pub fn offset(self, dx: f32, dz: f32) -> Position {
        Position {
            x: self.x + dx,
            y: self.y,
            z: self.z + dz,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_squared() {
        let a = Position::ground(0.0, 0.0);
        let b = Position::ground(3.0, 4.0);
        assert_eq!(a.distance_sqr(b), 25.0);
    }

    #[test]
    fn step_toward_stops_on_target() {
        let a = Position::ground(0.0, 0.0);
        let b = Position::ground(3.0, 4.0);
        assert_eq!(a.step_toward(b, 10.0), b);

        let mid = a.step_toward(b, 2.5);
        assert!((mid.x - 1.5).abs() < 1e-5);
        assert!((mid.z - 2.0).abs() < 1e-5);
    }

    #[test]
    fn player_id_is_reserved() {
        assert!(ActorId::PLAYER.is_player());
        assert!(!ActorId(3).is_player());
        assert_eq!(ActorId(7).to_string(), "#7");
    }
}

//! Open battlefield with straight cover walls.
//!
//! Movement is straight-line; walls never block travel, they only break line
//! of fire. All geometry is on the x/z ground plane.
use embers_core::{NavigationOracle, Position, SpatialOracle};

/// Default distance between a wall and the cover points behind it.
pub const DEFAULT_COVER_OFFSET: f32 = 1.0;

/// Sampling positions along a wall, as fractions of its length.
const COVER_SAMPLES: [f32; 3] = [0.25, 0.5, 0.75];

/// A cover wall segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wall {
    pub from: Position,
    pub to: Position,
}

impl Wall {
    pub fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }

    /// True when the segment `a`-`b` crosses the wall. Touching or collinear
    /// lines do not count.
    pub fn blocks(&self, a: Position, b: Position) -> bool {
        let d1 = cross(self.from, self.to, a);
        let d2 = cross(self.from, self.to, b);
        let d3 = cross(a, b, self.from);
        let d4 = cross(a, b, self.to);
        d1 * d2 < 0.0 && d3 * d4 < 0.0
    }

    fn midpoint_distance_sqr(&self, near: Position) -> f32 {
        let mid = Position::ground(
            (self.from.x + self.to.x) * 0.5,
            (self.from.z + self.to.z) * 0.5,
        );
        mid.distance_sqr(near)
    }

    /// Points `offset` away from the wall on the side facing away from
    /// `threat`. Empty when the threat stands on the wall's line.
    fn shadow_points(&self, threat: Position, offset: f32) -> Vec<Position> {
        let dx = self.to.x - self.from.x;
        let dz = self.to.z - self.from.z;
        let len = (dx * dx + dz * dz).sqrt();
        if len <= f32::EPSILON {
            return Vec::new();
        }
        let (nx, nz) = (-dz / len, dx / len);
        let side = (threat.x - self.from.x) * nx + (threat.z - self.from.z) * nz;
        if side.abs() <= f32::EPSILON {
            return Vec::new();
        }
        let away = -side.signum() * offset;

        COVER_SAMPLES
            .iter()
            .map(|t| {
                Position::ground(
                    self.from.x + dx * t + nx * away,
                    self.from.z + dz * t + nz * away,
                )
            })
            .collect()
    }
}

/// z-component of `(a - o) x (b - o)` on the ground plane.
fn cross(o: Position, a: Position, b: Position) -> f32 {
    (a.x - o.x) * (b.z - o.z) - (a.z - o.z) * (b.x - o.x)
}

/// Spatial and navigation oracle for a flat field.
#[derive(Clone, Debug, Default)]
pub struct OpenField {
    walls: Vec<Wall>,
    cover_offset: f32,
}

impl OpenField {
    pub fn new(walls: impl IntoIterator<Item = Wall>) -> Self {
        Self {
            walls: walls.into_iter().collect(),
            cover_offset: DEFAULT_COVER_OFFSET,
        }
    }

    pub fn with_cover_offset(mut self, offset: f32) -> Self {
        self.cover_offset = offset;
        self
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }
}

impl SpatialOracle for OpenField {
    fn in_cover(&self, origin: Position, target: Position) -> bool {
        self.walls.iter().any(|wall| wall.blocks(origin, target))
    }

    /// Walls are visited nearest first; within a wall, points nearest first.
    fn cover_positions(&self, threat: Position, near: Position) -> Vec<Position> {
        let mut walls: Vec<&Wall> = self.walls.iter().collect();
        walls.sort_by(|a, b| {
            a.midpoint_distance_sqr(near)
                .total_cmp(&b.midpoint_distance_sqr(near))
        });

        let mut positions = Vec::new();
        for wall in walls {
            let mut points: Vec<Position> = wall
                .shadow_points(threat, self.cover_offset)
                .into_iter()
                .filter(|point| self.in_cover(threat, *point))
                .collect();
            points.sort_by(|a, b| a.distance_sqr(near).total_cmp(&b.distance_sqr(near)));
            positions.extend(points);
        }
        positions
    }
}

impl NavigationOracle for OpenField {
    fn step_toward(&self, from: Position, to: Position, max_distance: f32) -> Position {
        if max_distance <= 0.0 {
            return from;
        }
        from.step_toward(to, max_distance)
    }
}

use crate::combat::SpreadFalloff;

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Squared distance under which a cover destination counts as "here".
    pub cover_epsilon_sqr: f32,
    /// Radius within which a ledger-owning actor collects a pickup.
    pub pickup_radius: f32,
    /// Distance at which a mover is considered to have arrived.
    pub arrival_tolerance: f32,
    /// How far in front of its builder a new bot appears.
    pub spawn_offset: f32,
    /// Radius around a broken crate over which pickups scatter.
    pub crate_scatter_radius: f32,
    /// Spread weapon falloff thresholds.
    pub spread_falloff: SpreadFalloff,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Size of the AI candidate menu.
    pub const MAX_CANDIDATES: usize = 5;
    /// Upper bound of shots rolled by a single attack charge.
    pub const MAX_SHOTS_PER_ATTACK: u32 = 32;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_COVER_EPSILON_SQR: f32 = 0.1;
    pub const DEFAULT_PICKUP_RADIUS: f32 = 1.0;
    pub const DEFAULT_ARRIVAL_TOLERANCE: f32 = 0.05;
    pub const DEFAULT_SPAWN_OFFSET: f32 = 1.0;
    pub const DEFAULT_CRATE_SCATTER_RADIUS: f32 = 1.5;

    pub fn new() -> Self {
        Self {
            cover_epsilon_sqr: Self::DEFAULT_COVER_EPSILON_SQR,
            pickup_radius: Self::DEFAULT_PICKUP_RADIUS,
            arrival_tolerance: Self::DEFAULT_ARRIVAL_TOLERANCE,
            spawn_offset: Self::DEFAULT_SPAWN_OFFSET,
            crate_scatter_radius: Self::DEFAULT_CRATE_SCATTER_RADIUS,
            spread_falloff: SpreadFalloff::DEFAULT,
        }
    }

    pub fn pickup_radius_sqr(&self) -> f32 {
        self.pickup_radius * self.pickup_radius
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

//! Bounce - a 2D rigid-body collision arena
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, collision detection and response, arena state)
//! - `settings`: Data-driven arena configuration
//! - `error`: Configuration errors surfaced at construction time

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, Result};
pub use settings::ArenaSettings;

/// Simulation configuration constants
pub mod consts {
    /// Simulation ticks per second
    pub const TICK_RATE: u32 = 100;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;

    /// A box corner closer than this to a wall counts as touching it (pixels)
    pub const WALL_CONTACT_THRESHOLD: f32 = 1.0;
    /// Tolerance for point-on-segment tests
    pub const LINE_EPSILON: f32 = 0.0001;
    /// Tolerance when comparing rotations for a shared frame
    pub const ANGLE_EPSILON: f32 = 1.0e-5;

    /// Length of the debug normal markers drawn at edge midpoints
    pub const NORMAL_MARKER_LENGTH: f32 = 50.0;
}

/// Normalized angle to [-π, π]
///
/// Constant time for any finite input; non-finite input stays non-finite.
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::PI;
    (angle + PI).rem_euclid(2.0 * PI) - PI
}

/// Remainder of an angle after removing whole quarter turns, in [0, π/2)
#[inline]
pub fn quarter_turn_residual(angle: f32) -> f32 {
    angle.rem_euclid(std::f32::consts::FRAC_PI_2)
}

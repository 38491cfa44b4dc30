//! Arena settings
//!
//! Loaded from a JSON file by the native runner; every field falls back to
//! its default when missing.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::TICK_RATE;
use crate::error::{ConfigError, Result};
use crate::sim::{Color, ResponsePolicy};

/// Arena construction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaSettings {
    // === Boundary ===
    /// Top-left corner of the unrotated boundary
    pub boundary_x: f32,
    pub boundary_y: f32,
    pub boundary_width: f32,
    pub boundary_height: f32,
    /// Cosmetic
    pub boundary_stroke_width: f32,
    pub boundary_color: Color,

    // === Population ===
    /// Circles spawned at startup
    pub circle_count: u32,
    /// Boxes spawned at startup
    pub box_count: u32,
    /// Spawned body diameter range (pixels)
    pub min_body_size: f32,
    pub max_body_size: f32,
    /// Largest per-axis spawn speed (pixels/second)
    pub max_spawn_speed: f32,
    /// Seed for spawn placement, size, velocity, and color
    pub seed: u64,

    // === Simulation ===
    /// Ticks per second
    pub tick_rate: u32,
    /// Response for pairs involving a box
    pub response: ResponsePolicy,
    /// Pairwise sweeps per tick (1 = single insertion-order pass)
    pub solver_passes: u32,
    /// Log every collision
    pub debug: bool,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            boundary_x: 0.0,
            boundary_y: 0.0,
            boundary_width: 1280.0,
            boundary_height: 720.0,
            boundary_stroke_width: 2.0,
            boundary_color: Color::PURPLE,

            circle_count: 5,
            box_count: 0,
            min_body_size: 10.0,
            max_body_size: 80.0,
            // One pixel per tick on each axis
            max_spawn_speed: TICK_RATE as f32,
            seed: 1,

            tick_rate: TICK_RATE,
            response: ResponsePolicy::default(),
            solver_passes: 1,
            debug: false,
        }
    }
}

impl ArenaSettings {
    /// Parse and validate settings from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Fixed timestep for the configured tick rate
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("boundary_x", self.boundary_x),
            ("boundary_y", self.boundary_y),
            ("boundary_stroke_width", self.boundary_stroke_width),
            ("max_spawn_speed", self.max_spawn_speed),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }

        if !(self.boundary_width > 0.0 && self.boundary_height > 0.0)
            || !self.boundary_width.is_finite()
            || !self.boundary_height.is_finite()
        {
            return Err(ConfigError::InvalidExtents {
                width: self.boundary_width,
                height: self.boundary_height,
            });
        }

        if !(self.min_body_size > 0.0 && self.min_body_size <= self.max_body_size)
            || !self.max_body_size.is_finite()
        {
            return Err(invalid(
                "min_body_size",
                format!(
                    "need 0 < min ({}) <= max ({})",
                    self.min_body_size, self.max_body_size
                ),
            ));
        }

        // Circles need their diameter; boxes spawn at any rotation, so their diagonal
        let largest = if self.box_count > 0 {
            Vec2::splat(self.max_body_size).length()
        } else {
            self.max_body_size
        };
        if largest >= self.boundary_width.min(self.boundary_height) {
            return Err(ConfigError::SpawnDoesNotFit {
                size: largest,
                width: self.boundary_width,
                height: self.boundary_height,
            });
        }

        if self.max_spawn_speed < 0.0 {
            return Err(invalid("max_spawn_speed", "must not be negative".into()));
        }
        if self.tick_rate == 0 {
            return Err(invalid("tick_rate", "must be at least 1".into()));
        }
        if self.solver_passes == 0 {
            return Err(invalid("solver_passes", "must be at least 1".into()));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::InvalidSetting { field, reason }
}

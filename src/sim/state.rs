//! Arena state
//!
//! The arena owns everything a tick touches: the body list (boundary first),
//! the simulation context, and the seeded RNG used for spawning. Nothing
//! here is global; the host holds one `Arena` and passes it to `tick`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::resolve::ResponsePolicy;
use super::shape::{Body, Boundary, Circle, Color, OrientedRect};
use super::vector::Vector;
use crate::error::{ConfigError, Result};
use crate::settings::ArenaSettings;

/// Per-arena simulation switches and counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimContext {
    /// Log every collision as it is resolved
    pub debug: bool,
    /// Collisions resolved since the arena was created
    pub collision_count: u64,
    /// Response for pairs involving a box
    pub response: ResponsePolicy,
    /// Pairwise sweeps per tick
    pub solver_passes: u32,
}

impl Default for SimContext {
    fn default() -> Self {
        Self {
            debug: false,
            collision_count: 0,
            response: ResponsePolicy::default(),
            solver_passes: 1,
        }
    }
}

/// Spawn parameters kept from the settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct SpawnRules {
    min_size: f32,
    max_size: f32,
    max_speed: f32,
}

/// Complete arena state (deterministic, serializable)
///
/// Snapshots are checked on the way in, the same as freshly built bodies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ArenaSnapshot")]
pub struct Arena {
    /// Boundary at index 0, then moving bodies in spawn order
    pub(crate) bodies: Vec<Body>,
    pub(crate) context: SimContext,
    /// Simulation tick counter
    pub time_ticks: u64,
    spawn: SpawnRules,
    rng: Pcg32,
}

/// Wire form of `Arena`, validated by `TryFrom` before use
#[derive(Deserialize)]
struct ArenaSnapshot {
    bodies: Vec<Body>,
    context: SimContext,
    time_ticks: u64,
    spawn: SpawnRules,
    rng: Pcg32,
}

impl TryFrom<ArenaSnapshot> for Arena {
    type Error = ConfigError;

    fn try_from(snapshot: ArenaSnapshot) -> Result<Self> {
        let boundaries = snapshot.bodies.iter().filter(|b| b.is_boundary()).count();
        if boundaries != 1 || !snapshot.bodies.first().is_some_and(Body::is_boundary) {
            return Err(ConfigError::InvalidSetting {
                field: "bodies",
                reason: format!("expected one boundary at index 0, found {boundaries}"),
            });
        }
        for body in &snapshot.bodies {
            body.validate()?;
        }
        if snapshot.context.solver_passes == 0 {
            return Err(ConfigError::InvalidSetting {
                field: "solver_passes",
                reason: "must be at least 1".into(),
            });
        }
        let spawn = &snapshot.spawn;
        if !(spawn.min_size > 0.0 && spawn.min_size <= spawn.max_size && spawn.max_size.is_finite())
            || !(spawn.max_speed.is_finite() && spawn.max_speed >= 0.0)
        {
            return Err(ConfigError::InvalidSetting {
                field: "spawn",
                reason: format!("bad spawn rules {spawn:?}"),
            });
        }

        Ok(Self {
            bodies: snapshot.bodies,
            context: snapshot.context,
            time_ticks: snapshot.time_ticks,
            spawn: snapshot.spawn,
            rng: snapshot.rng,
        })
    }
}

impl Arena {
    /// Build the boundary and spawn the initial bodies
    pub fn new(settings: &ArenaSettings) -> Result<Self> {
        settings.validate()?;

        let boundary = Boundary::new(
            settings.boundary_x,
            settings.boundary_y,
            settings.boundary_width,
            settings.boundary_height,
            settings.boundary_stroke_width,
        )?
        .with_color(settings.boundary_color);

        let mut arena = Self {
            bodies: vec![Body::Boundary(boundary)],
            context: SimContext {
                debug: settings.debug,
                collision_count: 0,
                response: settings.response,
                solver_passes: settings.solver_passes,
            },
            time_ticks: 0,
            spawn: SpawnRules {
                min_size: settings.min_body_size,
                max_size: settings.max_body_size,
                max_speed: settings.max_spawn_speed,
            },
            rng: Pcg32::seed_from_u64(settings.seed),
        };

        for _ in 0..settings.circle_count {
            arena.spawn_circle()?;
        }
        for _ in 0..settings.box_count {
            arena.spawn_box()?;
        }

        log::info!(
            "Arena ready: {} bodies inside {}x{} boundary (seed {})",
            arena.body_count(),
            settings.boundary_width,
            settings.boundary_height,
            settings.seed
        );
        Ok(arena)
    }

    /// All bodies, boundary first
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn context(&self) -> &SimContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut SimContext {
        &mut self.context
    }

    pub fn boundary(&self) -> Option<&Boundary> {
        self.bodies.iter().find_map(|b| match b {
            Body::Boundary(boundary) => Some(boundary),
            _ => None,
        })
    }

    fn boundary_mut(&mut self) -> Option<&mut Boundary> {
        self.bodies.iter_mut().find_map(|b| match b {
            Body::Boundary(boundary) => Some(boundary),
            _ => None,
        })
    }

    /// Add a moving body; returns its index
    pub fn add_body(&mut self, body: impl Into<Body>) -> Result<usize> {
        let body = body.into();
        if body.is_boundary() {
            return Err(ConfigError::InvalidSetting {
                field: "bodies",
                reason: "an arena has exactly one boundary".into(),
            });
        }
        self.bodies.push(body);
        Ok(self.bodies.len() - 1)
    }

    /// Spawn a circle of random size, color, and velocity inside the boundary
    pub fn spawn_circle(&mut self) -> Result<usize> {
        let size = self.random_size();
        let center = self.random_point_inside(size / 2.0)?;
        let velocity = self.random_velocity();
        let color = self.random_color();

        let circle = Circle::new(center, size / 2.0, velocity)?.with_color(color);
        log::info!("Spawned circle r={:.1} at ({:.1}, {:.1})", size / 2.0, center.x, center.y);
        self.add_body(circle)
    }

    /// Spawn a box of random size, rotation, color, and velocity inside the boundary
    pub fn spawn_box(&mut self) -> Result<usize> {
        let width = self.random_size();
        let height = self.random_size();
        // Keep every corner inside whatever the rotation
        let margin = Vec2::new(width, height).length() / 2.0;
        let center = self.random_point_inside(margin)?;
        let rotation = self.rng.random_range(-std::f32::consts::PI..std::f32::consts::PI);
        let velocity = self.random_velocity();
        let color = self.random_color();

        let rect = OrientedRect::new(center, Vec2::new(width, height) / 2.0, rotation)?
            .with_velocity(velocity)?
            .with_color(color);
        log::info!("Spawned box {width:.1}x{height:.1} at ({:.1}, {:.1})", center.x, center.y);
        self.add_body(rect)
    }

    /// Remove the oldest moving body; the boundary is never removed
    pub fn despawn(&mut self) -> Option<Body> {
        let index = self.bodies.iter().position(|b| !b.is_boundary())?;
        let body = self.bodies.remove(index);
        log::info!("Despawned {:?} body, {} left", body.kind(), self.body_count());
        Some(body)
    }

    /// Resize the boundary around its center
    pub fn scale_boundary(&mut self, factor: f32) -> Result<()> {
        match self.boundary_mut() {
            Some(boundary) => boundary.scale(factor),
            None => Ok(()),
        }
    }

    pub fn rotate_boundary(&mut self, delta: f32) -> Result<()> {
        match self.boundary_mut() {
            Some(boundary) => boundary.rotate_by(delta),
            None => Ok(()),
        }
    }

    pub fn toggle_debug(&mut self) {
        self.context.debug = !self.context.debug;
        log::info!("Debug: {}", self.context.debug);
    }

    /// Moving bodies (everything but the boundary)
    pub fn body_count(&self) -> usize {
        self.bodies.iter().filter(|b| !b.is_boundary()).count()
    }

    pub fn collision_count(&self) -> u64 {
        self.context.collision_count
    }

    /// Sum of circle speeds
    pub fn total_speed(&self) -> f32 {
        self.bodies
            .iter()
            .filter(|b| matches!(b, Body::Circle(_)))
            .map(|b| b.velocity().length())
            .sum()
    }

    fn random_size(&mut self) -> f32 {
        if self.spawn.min_size < self.spawn.max_size {
            self.rng.random_range(self.spawn.min_size..self.spawn.max_size)
        } else {
            self.spawn.min_size
        }
    }

    fn random_point_inside(&mut self, margin: f32) -> Result<Vec2> {
        let (u, v) = (self.rng.random::<f32>(), self.rng.random::<f32>());
        match self.boundary() {
            Some(boundary) => boundary.point_inside(u, v, margin),
            None => Ok(Vec2::ZERO),
        }
    }

    fn random_velocity(&mut self) -> Vector {
        let max = self.spawn.max_speed;
        if max == 0.0 {
            return Vector::ZERO;
        }
        Vector::new(
            self.rng.random_range(-max..max),
            self.rng.random_range(-max..max),
        )
    }

    fn random_color(&mut self) -> Color {
        Color::rgb(self.rng.random(), self.rng.random(), self.rng.random())
    }
}

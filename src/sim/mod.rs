//! Deterministic collision simulation
//!
//! Everything that moves bodies lives here. The module is pure and
//! deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order, boundary first)
//! - No rendering or platform dependencies

pub mod collision;
pub mod line;
pub mod resolve;
pub mod shape;
pub mod state;
pub mod tick;
pub mod vector;

pub use collision::{Collision, detect};
pub use line::Line;
pub use resolve::{ResponsePolicy, resolve};
pub use shape::{Body, BodyKind, Boundary, Circle, Color, OrientedRect};
pub use state::{Arena, SimContext};
pub use tick::{TickInput, check_and_resolve_all, integrate, tick};
pub use vector::{Point, Vector, reflect};

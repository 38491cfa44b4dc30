//! Fixed timestep simulation tick
//!
//! Per tick: apply input → integrate positions → pairwise detect and
//! resolve. Pairs are scanned in insertion order (i < j) using positions
//! already corrected earlier in the same sweep.

use super::collision::detect;
use super::resolve::resolve;
use super::shape::Body;
use super::state::{Arena, SimContext};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Multiply the boundary size by this factor
    pub scale: Option<f32>,
    /// Rotate the boundary by this many radians
    pub rotate: f32,
    pub spawn_circle: bool,
    pub spawn_box: bool,
    /// Remove the oldest moving body
    pub despawn: bool,
    pub toggle_debug: bool,
}

/// Straight-line integration of every body
pub fn integrate(bodies: &mut [Body], dt: f32) {
    for body in bodies.iter_mut() {
        body.update_position(dt);
    }
}

/// Detect and resolve every unordered pair; returns the number of hits
///
/// Runs up to `ctx.solver_passes` sweeps, stopping early once a sweep finds
/// nothing.
pub fn check_and_resolve_all(bodies: &mut [Body], ctx: &mut SimContext) -> u32 {
    let mut total = 0;

    for pass in 0..ctx.solver_passes.max(1) {
        let mut hits = 0;
        for j in 1..bodies.len() {
            let (head, tail) = bodies.split_at_mut(j);
            let b = &mut tail[0];
            for (i, a) in head.iter_mut().enumerate() {
                let collision = detect(a, b);
                if !collision.hit {
                    continue;
                }
                if ctx.debug {
                    log::debug!(
                        "pass {pass}: {:?}#{i} vs {:?}#{j} normal=({:.3}, {:.3}) depth={:.3}",
                        a.kind(),
                        b.kind(),
                        collision.normal.x,
                        collision.normal.y,
                        collision.depth
                    );
                }
                resolve(a, b, &collision, ctx.response);
                hits += 1;
            }
        }

        total += hits;
        if hits == 0 {
            break;
        }
    }

    ctx.collision_count += u64::from(total);
    total
}

/// Advance the arena by one fixed timestep; returns the collisions resolved
pub fn tick(arena: &mut Arena, input: &TickInput, dt: f32) -> u32 {
    apply_input(arena, input);

    integrate(&mut arena.bodies, dt);
    let hits = check_and_resolve_all(&mut arena.bodies, &mut arena.context);

    arena.time_ticks += 1;
    hits
}

fn apply_input(arena: &mut Arena, input: &TickInput) {
    if input.toggle_debug {
        arena.toggle_debug();
    }
    if let Some(factor) = input.scale {
        if let Err(e) = arena.scale_boundary(factor) {
            log::warn!("Boundary scale ignored: {e}");
        }
    }
    if input.rotate != 0.0 {
        if let Err(e) = arena.rotate_boundary(input.rotate) {
            log::warn!("Boundary rotation ignored: {e}");
        }
    }
    if input.spawn_circle {
        if let Err(e) = arena.spawn_circle() {
            log::warn!("Circle spawn failed: {e}");
        }
    }
    if input.spawn_box {
        if let Err(e) = arena.spawn_box() {
            log::warn!("Box spawn failed: {e}");
        }
    }
    if input.despawn && arena.despawn().is_none() {
        log::debug!("Nothing to despawn");
    }
}

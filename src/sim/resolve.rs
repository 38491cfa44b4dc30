//! Collision response
//!
//! Turns a detected `Collision` into corrected velocities and positions.
//! The boundary is immovable: bodies hitting it are reflected and pushed
//! back inside. Moving bodies exchange their normal velocity components as
//! equal masses and split the positional correction evenly.

use serde::{Deserialize, Serialize};

use super::collision::Collision;
use super::shape::{Body, BodyKind};
use super::vector::reflect;

/// How two moving bodies respond once they overlap
///
/// Circle pairs always bounce. The policy covers pairs involving a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponsePolicy {
    /// Boxes bounce exactly like circles
    #[default]
    Elastic,
    /// Box pairs are detected but left untouched
    Inert,
}

/// Apply the response for a collision between `a` and `b`
///
/// `collision.normal` must point from `a` toward `b`, as produced by
/// `detect(a, b)`. When the boundary is the second operand the pair is
/// swapped (and the normal flipped) so the wall is always handled as the
/// first, fixed side.
pub fn resolve(a: &mut Body, b: &mut Body, collision: &Collision, policy: ResponsePolicy) {
    if !collision.hit {
        return;
    }

    match (a.kind(), b.kind()) {
        (BodyKind::Boundary, BodyKind::Boundary) => {}
        (BodyKind::Boundary, _) => resolve_against_wall(b, collision),
        (_, BodyKind::Boundary) => resolve_against_wall(a, &collision.flipped()),
        (BodyKind::Circle, BodyKind::Circle) => exchange_normal_velocity(a, b, collision),
        (BodyKind::Circle | BodyKind::Rect, BodyKind::Circle | BodyKind::Rect) => {
            if policy == ResponsePolicy::Elastic {
                exchange_normal_velocity(a, b, collision);
            }
        }
    }
}

/// Bounce a body off the wall and move it out by the penetration depth
///
/// `collision.normal` points from the wall into the arena.
pub fn resolve_against_wall(body: &mut Body, collision: &Collision) {
    body.set_velocity(reflect(body.velocity(), collision.normal));
    body.translate(collision.normal * collision.depth);
}

/// Equal-mass elastic response along the collision normal
///
/// Each body moves half the depth apart. The normal component of the
/// relative velocity is handed from `a` to `b` only while they approach;
/// bodies already separating keep their velocities.
pub fn exchange_normal_velocity(a: &mut Body, b: &mut Body, collision: &Collision) {
    let n = collision.normal;
    let half = n * (collision.depth * 0.5);
    a.translate(-half);
    b.translate(half);

    let closing = (a.velocity() - b.velocity()).dot(n);
    if closing > 0.0 {
        a.set_velocity(a.velocity() - n * closing);
        b.set_velocity(b.velocity() + n * closing);
    }
}

//! Narrow-phase collision detection
//!
//! Every shape pair reduces to one `Collision`: a hit flag, a unit normal
//! pointing from the first operand toward the second, the penetration depth
//! along that normal, and a contact point when the test produces one.
//!
//! Wall tests are velocity-gated. A body that is already moving away from a
//! wall is not reported, so a contact resolved on one tick cannot be
//! reflected back into the wall on the next.

use serde::{Deserialize, Serialize};

use super::shape::{Body, Boundary, Circle, OrientedRect};
use super::vector::{Point, Vector, normalize_or_zero};
use crate::consts::{ANGLE_EPSILON, WALL_CONTACT_THRESHOLD};
use crate::quarter_turn_residual;

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collision {
    /// Whether the bodies overlap
    pub hit: bool,
    /// Unit normal from the first body toward the second
    pub normal: Vector,
    /// Penetration depth along `normal`
    pub depth: f32,
    /// Contact point, when the test can name one
    pub contact: Option<Point>,
}

impl Collision {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vector::ZERO,
            depth: 0.0,
            contact: None,
        }
    }

    /// The same contact seen from the other body
    #[inline]
    pub fn flipped(self) -> Self {
        Self {
            normal: -self.normal,
            ..self
        }
    }
}

impl Default for Collision {
    fn default() -> Self {
        Self::miss()
    }
}

/// Check any two bodies for overlap
pub fn detect(a: &Body, b: &Body) -> Collision {
    match (a, b) {
        (Body::Circle(a), Body::Circle(b)) => circle_vs_circle(a, b),
        (Body::Circle(c), Body::Rect(r)) => circle_vs_rect(c, r),
        (Body::Rect(r), Body::Circle(c)) => circle_vs_rect(c, r).flipped(),
        (Body::Rect(a), Body::Rect(b)) => rect_vs_rect(a, b),
        (Body::Boundary(w), Body::Circle(c)) => boundary_vs_circle(w, c),
        (Body::Circle(c), Body::Boundary(w)) => boundary_vs_circle(w, c).flipped(),
        (Body::Boundary(w), Body::Rect(r)) => boundary_vs_rect(w, r),
        (Body::Rect(r), Body::Boundary(w)) => boundary_vs_rect(w, r).flipped(),
        // An arena holds exactly one boundary
        (Body::Boundary(_), Body::Boundary(_)) => Collision::miss(),
    }
}

/// Two circles overlap when their centers are closer than the sum of radii
pub fn circle_vs_circle(a: &Circle, b: &Circle) -> Collision {
    let delta = b.center - a.center;
    let dist = delta.length();
    let min_dist = a.radius() + b.radius();

    if dist >= min_dist {
        return Collision::miss();
    }

    // Coincident centers give a zero normal
    let normal = normalize_or_zero(delta);
    Collision {
        hit: true,
        normal,
        depth: min_dist - dist,
        contact: Some(a.center + normal * a.radius()),
    }
}

/// Check a circle trapped inside the boundary against each wall
///
/// Walls are tried left, bottom, right, top; the first one the circle both
/// touches and moves toward wins. The normal points into the arena.
pub fn boundary_vs_circle(boundary: &Boundary, circle: &Circle) -> Collision {
    for wall in boundary.edges() {
        let normal = wall.normal();
        let dist = normal.dot(circle.center - wall.from);
        let moving_toward = circle.velocity.dot(normal) < 0.0;

        if dist < circle.radius() && moving_toward {
            return Collision {
                hit: true,
                normal,
                depth: circle.radius() - dist,
                contact: Some(circle.center - normal * dist),
            };
        }
    }

    Collision::miss()
}

/// Check a box trapped inside the boundary, corner by corner
///
/// A corner counts as touching a wall once it is within
/// `WALL_CONTACT_THRESHOLD` of it; the first (wall, corner) pair that also
/// has the box moving toward the wall wins.
pub fn boundary_vs_rect(boundary: &Boundary, rect: &OrientedRect) -> Collision {
    let corners = rect.corners();

    for wall in boundary.edges() {
        let normal = wall.normal();
        if rect.velocity.dot(normal) >= 0.0 {
            continue;
        }
        for corner in corners {
            let dist = normal.dot(corner - wall.from);
            if dist < WALL_CONTACT_THRESHOLD {
                return Collision {
                    hit: true,
                    normal,
                    depth: WALL_CONTACT_THRESHOLD - dist,
                    contact: Some(corner),
                };
            }
        }
    }

    Collision::miss()
}

/// Circle against a rotated box; the normal points from the circle to the box
pub fn circle_vs_rect(circle: &Circle, rect: &OrientedRect) -> Collision {
    let reach = circle.radius() + rect.bounding_radius();
    if (rect.center() - circle.center).length_squared() >= reach * reach {
        return Collision::miss();
    }

    let half = rect.half_extents();
    let local = rect.to_local(circle.center);
    let clamped = local.clamp(-half, half);

    if clamped != local {
        // Center is outside the box: push along the closest-point direction
        let closest = rect.to_world(clamped);
        let delta = closest - circle.center;
        let dist = delta.length();
        if dist >= circle.radius() {
            return Collision::miss();
        }
        return Collision {
            hit: true,
            normal: normalize_or_zero(delta),
            depth: circle.radius() - dist,
            contact: Some(closest),
        };
    }

    // Center is inside the box: leave through the nearest face
    let [u, v] = rect.axes();
    let face_x = half.x - local.x.abs();
    let face_y = half.y - local.y.abs();
    let (axis, face_dist, along) = if face_x <= face_y {
        (u, face_x, local.x)
    } else {
        (v, face_y, local.y)
    };
    let outward = if along < 0.0 { -axis } else { axis };

    Collision {
        hit: true,
        normal: -outward,
        depth: circle.radius() + face_dist,
        contact: Some(circle.center + outward * face_dist),
    }
}

/// Two boxes: a shared-frame overlap test when their rotations match modulo
/// a quarter turn, the Separating Axis Theorem otherwise
pub fn rect_vs_rect(a: &OrientedRect, b: &OrientedRect) -> Collision {
    let reach = a.bounding_radius() + b.bounding_radius();
    if (b.center() - a.center()).length_squared() >= reach * reach {
        return Collision::miss();
    }

    if share_frame(a, b) {
        aligned_overlap(a, b)
    } else {
        sat_overlap(a, b)
    }
}

/// Whether two boxes' edges are parallel (rotations equal modulo 90°)
pub fn share_frame(a: &OrientedRect, b: &OrientedRect) -> bool {
    let diff = (quarter_turn_residual(a.rotation()) - quarter_turn_residual(b.rotation())).abs();
    diff < ANGLE_EPSILON || std::f32::consts::FRAC_PI_2 - diff < ANGLE_EPSILON
}

/// Overlap test in the frame of `a`, valid when the boxes share a frame
///
/// At rotation 0 this is a plain AABB test. The push axis is the one with
/// the smaller overlap; ties go to `a`'s first axis.
pub fn aligned_overlap(a: &OrientedRect, b: &OrientedRect) -> Collision {
    let delta = b.center() - a.center();
    let mut best: Option<(f32, Vector)> = None;

    for axis in a.axes() {
        let distance = delta.dot(axis);
        let overlap = a.projected_radius(axis) + b.projected_radius(axis) - distance.abs();
        if overlap <= 0.0 {
            return Collision::miss();
        }
        if best.is_none_or(|(depth, _)| overlap < depth) {
            let normal = if distance < 0.0 { -axis } else { axis };
            best = Some((overlap, normal));
        }
    }

    match best {
        Some((depth, normal)) => Collision {
            hit: true,
            normal,
            depth,
            contact: None,
        },
        None => Collision::miss(),
    }
}

/// Separating Axis Theorem over both boxes' edge normals
///
/// Any axis with disjoint projections ends the test. Otherwise the axis of
/// least overlap becomes the normal, turned to point from `a` toward `b`.
pub fn sat_overlap(a: &OrientedRect, b: &OrientedRect) -> Collision {
    let corners_a = a.corners();
    let corners_b = b.corners();
    let [a0, a1] = a.axes();
    let [b0, b1] = b.axes();

    let mut min_depth = f32::MAX;
    let mut min_axis = Vector::ZERO;

    for axis in [a0, a1, b0, b1] {
        let (min_a, max_a) = project_corners(&corners_a, axis);
        let (min_b, max_b) = project_corners(&corners_b, axis);

        let overlap = (max_a - min_b).min(max_b - min_a);
        if overlap <= 0.0 {
            return Collision::miss(); // Separating axis found
        }
        if overlap < min_depth {
            min_depth = overlap;
            min_axis = axis;
        }
    }

    if min_axis.dot(b.center() - a.center()) < 0.0 {
        min_axis = -min_axis;
    }

    Collision {
        hit: true,
        normal: min_axis,
        depth: min_depth,
        contact: None,
    }
}

/// Min and max of the corners projected onto `axis`
pub fn project_corners(corners: &[Point; 4], axis: Vector) -> (f32, f32) {
    let first = corners[0].dot(axis);
    corners[1..]
        .iter()
        .map(|c| c.dot(axis))
        .fold((first, first), |(min, max), p| (min.min(p), max.max(p)))
}

//! 2D point and vector algebra
//!
//! Points and vectors share one representation (`glam::Vec2`); a `Vector`
//! is a `Point` used as a direction. Addition, subtraction, scaling, dot
//! product, and length come straight from glam. The helpers here cover the
//! few operations the collision code needs on top of that.

use glam::Vec2;

/// A position in arena space
pub type Point = Vec2;

/// A direction or displacement in arena space
pub type Vector = Vec2;

/// Unit vector in the direction of `v`, or the zero vector when `v` has zero length
#[inline]
pub fn normalize_or_zero(v: Vector) -> Vector {
    let length = v.length();
    if length == 0.0 {
        Vector::ZERO
    } else {
        v / length
    }
}

/// Reflect a velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n, with `normal` of unit length.
#[inline]
pub fn reflect(velocity: Vector, normal: Vector) -> Vector {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Rotate `p` about `origin` by `angle` radians (positive = counterclockwise
/// in a Y-up frame)
#[inline]
pub fn rotate_around(p: Point, origin: Point, angle: f32) -> Point {
    let (sin, cos) = angle.sin_cos();
    let t = p - origin;
    Point::new(t.x * cos - t.y * sin, t.x * sin + t.y * cos) + origin
}

/// Z component of the 3D cross product of two planar vectors
#[inline]
pub fn cross(a: Vector, b: Vector) -> f32 {
    a.x * b.y - a.y * b.x
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1.0e-3
    }

    #[test]
    fn test_normalize_zero_vector() {
        assert_eq!(normalize_or_zero(Vector::ZERO), Vector::ZERO);
        let n = normalize_or_zero(Vector::new(3.0, 4.0));
        assert!(approx(n, Vector::new(0.6, 0.8)));
    }

    #[test]
    fn test_reflect_off_vertical_wall() {
        // Moving right, hits a wall whose normal points left
        let reflected = reflect(Vector::new(100.0, 20.0), Vector::new(-1.0, 0.0));
        assert!(approx(reflected, Vector::new(-100.0, 20.0)));
    }

    #[test]
    fn test_rotate_around_pivot() {
        let p = rotate_around(Point::new(2.0, 1.0), Point::new(1.0, 1.0), FRAC_PI_2);
        assert!(approx(p, Point::new(1.0, 2.0)));

        let p = rotate_around(Point::new(2.0, 1.0), Point::new(1.0, 1.0), PI);
        assert!(approx(p, Point::new(0.0, 1.0)));
    }

    #[test]
    fn test_cross_sign() {
        assert_eq!(cross(Vector::X, Vector::Y), 1.0);
        assert_eq!(cross(Vector::Y, Vector::X), -1.0);
    }

    proptest! {
        #[test]
        fn reflection_is_involutive(
            vx in -500.0f32..500.0,
            vy in -500.0f32..500.0,
            angle in -PI..PI,
        ) {
            let v = Vector::new(vx, vy);
            let n = Vector::new(angle.cos(), angle.sin());
            let back = reflect(reflect(v, n), n);
            prop_assert!((back - v).length() < 1.0e-2);
        }

        #[test]
        fn reflection_preserves_speed(
            vx in -500.0f32..500.0,
            vy in -500.0f32..500.0,
            angle in -PI..PI,
        ) {
            let v = Vector::new(vx, vy);
            let n = Vector::new(angle.cos(), angle.sin());
            prop_assert!((reflect(v, n).length() - v.length()).abs() < 1.0e-2);
        }
    }
}

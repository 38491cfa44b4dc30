//! Directed line segments
//!
//! Edges of boxes and of the arena boundary are handed around as `Line`s.
//! The normal of a line is its direction turned a quarter turn clockwise
//! (`(dy, -dx)`), so edges walked in a consistent winding give normals that
//! all face the same side.

use serde::{Deserialize, Serialize};

use super::vector::{Point, Vector, cross, normalize_or_zero};
use crate::consts::LINE_EPSILON;

/// A directed segment from `from` to `to`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub from: Point,
    pub to: Point,
}

impl Line {
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    /// Edge vector (to - from)
    #[inline]
    pub fn delta(&self) -> Vector {
        self.to - self.from
    }

    pub fn length(&self) -> f32 {
        self.delta().length()
    }

    /// Unit direction from `from` to `to`, zero for a degenerate segment
    pub fn direction(&self) -> Vector {
        normalize_or_zero(self.delta())
    }

    pub fn midpoint(&self) -> Point {
        (self.from + self.to) * 0.5
    }

    /// Unit normal, the edge vector rotated by -90°
    pub fn normal(&self) -> Vector {
        let d = self.delta();
        normalize_or_zero(Vector::new(d.y, -d.x))
    }

    /// Marker segment starting at the midpoint and running `length` along the normal
    pub fn normal_line(&self, length: f32) -> Line {
        let mid = self.midpoint();
        Line::new(mid, mid + self.normal() * length)
    }

    /// Signed distance of `p` from the infinite line, positive on the normal side
    #[inline]
    pub fn signed_distance(&self, p: Point) -> f32 {
        self.normal().dot(p - self.from)
    }

    /// Intersection point of two segments
    ///
    /// Returns `None` for parallel segments or when the crossing lies outside
    /// either segment.
    pub fn intersect(&self, other: &Line) -> Option<Point> {
        let d1 = self.delta();
        let d2 = other.delta();

        let denom = cross(d1, d2);
        if denom == 0.0 {
            return None; // Parallel
        }

        let d3 = other.from - self.from;
        let t = cross(d3, d2) / denom;
        let u = cross(d3, d1) / denom;

        if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
            return None;
        }

        Some(self.from + d1 * t)
    }

    /// Whether `p` lies on the segment (within a small tolerance)
    pub fn contains_point(&self, p: Point) -> bool {
        let min = self.from.min(self.to) - Vector::splat(LINE_EPSILON);
        let max = self.from.max(self.to) + Vector::splat(LINE_EPSILON);

        if p.x < min.x || p.x > max.x || p.y < min.y || p.y > max.y {
            return false;
        }

        // (p - from) x (to - from) is ~0 for collinear points
        let c = cross(self.delta(), p - self.from);
        c > -LINE_EPSILON && c < LINE_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(x1: f32, y1: f32, x2: f32, y2: f32) -> Line {
        Line::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    fn assert_hit(a: Line, b: Line, expected: Point) {
        let p = a.intersect(&b).expect("segments should intersect");
        assert!(
            (p - expected).length() < 0.01,
            "intersect({a:?}, {b:?}) = {p:?}, want {expected:?}"
        );
    }

    #[test]
    fn test_intersect_crossings() {
        assert_hit(line(-1.0, 0.0, 1.0, 0.0), line(0.0, -1.0, 0.0, 1.0), Point::ZERO);
        assert_hit(line(0.0, 5.0, 10.0, 5.0), line(5.0, 0.0, 5.0, 10.0), Point::new(5.0, 5.0));
        assert_hit(line(0.0, 0.0, 10.0, 10.0), line(0.0, 10.0, 10.0, 0.0), Point::new(5.0, 5.0));
        assert_hit(
            line(0.0, 0.0, 100.0, 0.0),
            line(50.0, -10.0, 50.0, 10.0),
            Point::new(50.0, 0.0),
        );
    }

    #[test]
    fn test_intersect_t_junction_at_endpoint() {
        assert_hit(line(0.0, 5.0, 10.0, 5.0), line(5.0, 5.0, 5.0, 10.0), Point::new(5.0, 5.0));
    }

    #[test]
    fn test_intersect_misses() {
        // Parallel
        assert!(line(0.0, 0.0, 10.0, 0.0).intersect(&line(0.0, 5.0, 10.0, 5.0)).is_none());
        assert!(line(0.0, 0.0, 0.0, 10.0).intersect(&line(5.0, 0.0, 5.0, 10.0)).is_none());
        // Segments stop short of each other
        assert!(line(0.0, 0.0, 5.0, 0.0).intersect(&line(10.0, 0.0, 10.0, 10.0)).is_none());
        // Would only meet if extended
        assert!(line(0.0, 0.0, 2.0, 2.0).intersect(&line(5.0, 0.0, 5.0, 3.0)).is_none());
    }

    #[test]
    fn test_contains_point() {
        let horizontal = line(0.0, 0.0, 10.0, 0.0);
        assert!(horizontal.contains_point(Point::new(0.0, 0.0)));
        assert!(horizontal.contains_point(Point::new(10.0, 0.0)));
        assert!(horizontal.contains_point(Point::new(5.0, 0.0)));
        assert!(!horizontal.contains_point(Point::new(5.0, 1.0)));
        assert!(!horizontal.contains_point(Point::new(-1.0, 0.0)));
        assert!(!horizontal.contains_point(Point::new(11.0, 0.0)));

        assert!(line(0.0, 0.0, 0.0, 10.0).contains_point(Point::new(0.0, 5.0)));

        let diagonal = line(0.0, 0.0, 10.0, 10.0);
        assert!(diagonal.contains_point(Point::new(5.0, 5.0)));
        assert!(!diagonal.contains_point(Point::new(15.0, 15.0)));
        assert!(!diagonal.contains_point(Point::new(5.0, 5.1)));
    }

    #[test]
    fn test_normal_is_clockwise_quarter_turn() {
        let n = line(0.0, 0.0, 10.0, 0.0).normal();
        assert!((n - Vector::new(0.0, -1.0)).length() < 1.0e-6);

        let n = line(0.0, 0.0, 0.0, 4.0).normal();
        assert!((n - Vector::new(1.0, 0.0)).length() < 1.0e-6);

        assert_eq!(line(3.0, 3.0, 3.0, 3.0).normal(), Vector::ZERO);
    }

    #[test]
    fn test_normal_line_starts_at_midpoint() {
        let marker = line(0.0, 0.0, 0.0, 10.0).normal_line(50.0);
        assert_eq!(marker.from, Point::new(0.0, 5.0));
        assert!((marker.to - Point::new(50.0, 5.0)).length() < 1.0e-4);
    }

    #[test]
    fn test_signed_distance() {
        let edge = line(0.0, 0.0, 0.0, 10.0); // normal +x
        assert!((edge.signed_distance(Point::new(3.0, 7.0)) - 3.0).abs() < 1.0e-6);
        assert!((edge.signed_distance(Point::new(-2.0, 1.0)) + 2.0).abs() < 1.0e-6);
    }
}

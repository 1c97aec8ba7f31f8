//! Cubic Bézier curves.

use flowcanvas_core::Point;
use serde::Serialize;

/// Number of straight segments used to approximate a curve for hit testing.
const HIT_TEST_SEGMENTS: usize = 32;

/// A cubic Bézier curve from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CubicCurve {
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

impl CubicCurve {
    /// Builds the horizontal S-curve used for connections: the first control
    /// point sits `offset` to the right of `start`, the second `offset` to the
    /// left of `end`, whatever the relative placement of the two anchors.
    #[must_use]
    pub fn horizontal(start: Point, end: Point, offset: f64) -> Self {
        Self {
            start,
            control1: start + Point::new(offset, 0.0),
            control2: end - Point::new(offset, 0.0),
            end,
        }
    }

    /// Evaluates the curve at parameter `t` in `[0, 1]`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point {
        let u = 1.0 - t;
        self.start * (u * u * u)
            + self.control1 * (3.0 * u * u * t)
            + self.control2 * (3.0 * u * t * t)
            + self.end * (t * t * t)
    }

    /// The point halfway along the curve's parameter range.
    #[must_use]
    pub fn midpoint(&self) -> Point {
        self.point_at(0.5)
    }

    /// SVG path data for this curve.
    #[must_use]
    pub fn to_svg_path(&self) -> String {
        format!(
            "M {} {} C {} {}, {} {}, {} {}",
            self.start.x,
            self.start.y,
            self.control1.x,
            self.control1.y,
            self.control2.x,
            self.control2.y,
            self.end.x,
            self.end.y
        )
    }

    /// Approximate shortest distance from `point` to the curve.
    #[must_use]
    pub fn distance_to(&self, point: Point) -> f64 {
        let mut previous = self.start;
        let mut best = f64::INFINITY;
        for step in 1..=HIT_TEST_SEGMENTS {
            let next = self.point_at(step as f64 / HIT_TEST_SEGMENTS as f64);
            best = best.min(distance_to_segment(point, previous, next));
            previous = next;
        }
        best
    }
}

fn distance_to_segment(point: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let length_squared = ab.x * ab.x + ab.y * ab.y;
    if length_squared == 0.0 {
        return point.distance_to(a);
    }
    let ap = point - a;
    let t = ((ap.x * ab.x + ap.y * ab.y) / length_squared).clamp(0.0, 1.0);
    point.distance_to(a + ab * t)
}

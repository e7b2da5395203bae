//! Basic 2D types and tolerances.
//!
//! - `GeomCfg`: tolerances for the parallel test and zero-length guards.
//! - `Segment`: directed pair of points, also used as a ray.
//! - `Polygon`: closed vertex loop with lazy edge iteration.

use nalgebra::Vector2;

use super::util::cross;
use crate::GeomError;

/// A point in the plane.
pub type Point = Vector2<f64>;

/// Geometry configuration (tolerances).
#[derive(Clone, Copy, Debug)]
pub struct GeomCfg {
    /// Relative parallel threshold: a ray `r` and edge `s` are treated as
    /// parallel when `|r × s| <= eps_parallel * |r| * |s|` (sine of the angle).
    pub eps_parallel: f64,
    /// Rays and edges at most this long are degenerate.
    pub eps_len: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_parallel: 1e-12,
            eps_len: 1e-12,
        }
    }
}

/// Directed segment `a → b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
}

impl Segment {
    #[inline]
    pub fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }
    #[inline]
    pub fn dir(&self) -> Vector2<f64> {
        self.b - self.a
    }
    #[inline]
    pub fn length(&self) -> f64 {
        self.dir().norm()
    }
    /// Point at parameter `t` (`0 → a`, `1 → b`; unbounded).
    #[inline]
    pub fn point_at(&self, t: f64) -> Point {
        self.a + self.dir() * t
    }
}

/// Implicitly closed polygon (last vertex connects back to the first).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    pub verts: Vec<Point>,
}

impl Polygon {
    /// Accepts any vertex count; see `try_new` for the validating variant.
    pub fn new(verts: Vec<Point>) -> Self {
        Self { verts }
    }

    pub fn try_new(verts: Vec<Point>) -> Result<Self, GeomError> {
        if verts.len() < 3 {
            return Err(GeomError::TooFewVertices { got: verts.len() });
        }
        Ok(Self { verts })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.verts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }

    /// At least 3 vertices.
    #[inline]
    pub fn is_proper(&self) -> bool {
        self.verts.len() >= 3
    }

    /// Edges `v[i] → v[i+1]` including the closing edge. No edges below 2 vertices.
    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        let n = if self.verts.len() < 2 {
            0
        } else {
            self.verts.len()
        };
        (0..n).map(move |i| Segment::new(self.verts[i], self.verts[(i + 1) % n]))
    }

    /// Shoelace signed area; positive for counterclockwise loops.
    pub fn signed_area(&self) -> f64 {
        self.edges().map(|e| cross(e.a, e.b)).sum::<f64>() * 0.5
    }

    /// Apply `f` to every vertex.
    pub fn map(&self, f: impl Fn(Point) -> Point) -> Polygon {
        Polygon {
            verts: self.verts.iter().map(|&p| f(p)).collect(),
        }
    }
}

impl From<Vec<Point>> for Polygon {
    fn from(verts: Vec<Point>) -> Self {
        Self::new(verts)
    }
}

//! Plane geometry primitives shared by every query.
//!
//! Purpose
//! - `Point` is a plain `nalgebra::Vector2<f64>`; no wrapper type.
//! - `Segment` is directed and doubles as a ray (origin `a`, direction `b - a`).
//! - `Polygon` is an implicitly closed vertex loop. Fewer than 3 vertices is
//!   tolerated everywhere and simply never contains a point.
//! - `GeomCfg` centralizes the tolerances used by the intersection solver.

mod types;
mod util;

pub use types::{GeomCfg, Point, Polygon, Segment};
pub use util::{cross, polar, reflect_through, rotate_about};

#[cfg(test)]
mod tests;

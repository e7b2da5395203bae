use nalgebra::{Rotation2, Vector2};

use super::Point;

/// Scalar 2D cross product `a.x * b.y - a.y * b.x`.
/// Positive for a→b counterclockwise.
#[inline]
pub fn cross(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Unit vector at angle `theta` (radians, counterclockwise from +x).
#[inline]
pub fn polar(theta: f64) -> Vector2<f64> {
    Vector2::new(theta.cos(), theta.sin())
}

/// Rotate `p` about `center` by `theta` radians (counterclockwise).
#[inline]
pub fn rotate_about(p: Point, center: Point, theta: f64) -> Point {
    center + Rotation2::new(theta) * (p - center)
}

/// Point reflection through `center`: `p ↦ 2c − p`.
#[inline]
pub fn reflect_through(p: Point, center: Point) -> Point {
    center * 2.0 - p
}

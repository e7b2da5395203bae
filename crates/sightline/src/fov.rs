//! Cone-of-vision (FOV) polygons by ray-fan sampling.
//!
//! Model
//! - Facing angle `φ = atan2(target − origin)`; the cone spans `φ ± half_angle`.
//! - `ray_count + 1` rays at `φ − h + (i / ray_count)·2h`, `i = 0..=ray_count`.
//!   Computing the fraction as `i / ray_count` keeps shared angles bit-identical
//!   when the ray count is multiplied (e.g. 50 → 100), so hit points there agree.
//! - Each ray runs to `origin + unit(angle)·max_len` and stops at the nearest
//!   occluder. `max_len` should exceed the scene diagonal.
//!
//! Sampling trades exactness at silhouette corners for simplicity; more rays
//! reduce faceting at linear cost. This is not an exact visibility polygon.

use std::f64::consts::{FRAC_PI_6, PI};

use crate::contains::contains_points;
use crate::geom::{polar, GeomCfg, Point, Polygon, Segment};
use crate::occluder::ObstacleSet;
use crate::scene::SceneBounds;
use crate::GeomError;

/// Far-point length relative to the scene diagonal.
const FAR_MARGIN: f64 = 1.01;

/// FOV sampling parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FovCfg {
    /// Half of the cone's opening angle (radians).
    pub half_angle: f64,
    /// Number of angular steps; the fan has `ray_count + 1` rays.
    pub ray_count: usize,
    /// Length of each unobstructed ray.
    pub max_len: f64,
}

impl Default for FovCfg {
    /// 60° cone, 100 steps, sized for the default grid.
    fn default() -> Self {
        Self::for_bounds(SceneBounds::default(), FRAC_PI_6, 100)
    }
}

impl FovCfg {
    /// Rays long enough to leave `bounds` from any interior origin.
    pub fn for_bounds(bounds: SceneBounds, half_angle: f64, ray_count: usize) -> Self {
        Self {
            half_angle,
            ray_count,
            max_len: bounds.diagonal() * FAR_MARGIN,
        }
    }

    /// Checks the caller contract. `build_fov` itself never validates.
    pub fn validate(&self) -> Result<(), GeomError> {
        if self.ray_count == 0 {
            return Err(GeomError::invalid_fov("ray_count must be >= 1"));
        }
        if !(self.half_angle.is_finite() && self.half_angle > 0.0) {
            return Err(GeomError::invalid_fov("half_angle must be finite and > 0"));
        }
        if self.half_angle >= PI {
            return Err(GeomError::invalid_fov("cone must be narrower than 2π"));
        }
        if !(self.max_len.is_finite() && self.max_len > 0.0) {
            return Err(GeomError::invalid_fov("max_len must be finite and > 0"));
        }
        Ok(())
    }

    /// Angle of ray `i` for a cone facing `facing`.
    #[inline]
    pub fn ray_angle(&self, facing: f64, i: usize) -> f64 {
        if self.ray_count == 0 {
            return facing;
        }
        let frac = i as f64 / self.ray_count as f64;
        facing - self.half_angle + frac * (2.0 * self.half_angle)
    }
}

/// Fan polygon: the origin followed by one end point per ray, in angle order.
#[derive(Clone, Debug, PartialEq)]
pub struct VisibilityPolygon {
    /// `points[0]` is the origin.
    points: Vec<Point>,
}

impl VisibilityPolygon {
    #[inline]
    pub fn origin(&self) -> Point {
        self.points[0]
    }

    /// Ray end points (hits or far points), increasing angle.
    #[inline]
    pub fn rim(&self) -> &[Point] {
        &self.points[1..]
    }

    /// All vertices, origin first; implicitly closed.
    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.points
    }

    pub fn to_polygon(&self) -> Polygon {
        Polygon::new(self.points.clone())
    }

    /// Unsigned shoelace area of the fan.
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        let twice: f64 = (0..n)
            .map(|i| {
                let (a, b) = (self.points[i], self.points[(i + 1) % n]);
                a.x * b.y - a.y * b.x
            })
            .sum();
        twice.abs() * 0.5
    }

    /// Even–odd membership in the fan.
    pub fn contains(&self, p: Point) -> bool {
        contains_points(p, &self.points)
    }
}

/// Facing angle from `origin` toward `target` (`0` when they coincide).
#[inline]
pub fn facing_angle(origin: Point, target: Point) -> f64 {
    let d = target - origin;
    d.y.atan2(d.x)
}

/// Sample the cone facing `target` from `origin` against `obstacles`.
///
/// `ray_count == 0` degrades to a single ray along the facing direction.
pub fn build_fov(
    origin: Point,
    target: Point,
    fov: FovCfg,
    obstacles: &ObstacleSet,
    cfg: GeomCfg,
) -> VisibilityPolygon {
    let facing = facing_angle(origin, target);
    let rays = if fov.ray_count == 0 { 1 } else { fov.ray_count + 1 };
    let mut points = Vec::with_capacity(rays + 1);
    points.push(origin);
    for i in 0..rays {
        let angle = fov.ray_angle(facing, i);
        points.push(cast_far(origin, angle, fov.max_len, obstacles, cfg));
    }
    VisibilityPolygon { points }
}

fn cast_far(origin: Point, angle: f64, max_len: f64, obstacles: &ObstacleSet, cfg: GeomCfg) -> Point {
    let far = origin + polar(angle) * max_len;
    obstacles
        .nearest_hit(&Segment::new(origin, far), max_len, cfg)
        .map_or(far, |h| h.point)
}

//! Single-ray line-of-sight casts.
//!
//! A cast runs from `origin` toward `target` and stops at the first occluder
//! edge. Hits beyond `target` are ignored, so an unobstructed cast returns
//! `target` itself.

use crate::geom::{GeomCfg, Point, Segment};
use crate::intersect::Hit;
use crate::occluder::ObstacleSet;

/// Nearest occluder hit between `origin` and `target`, if any.
///
/// A zero-length request has no hit.
pub fn cast_ray_hit(
    origin: Point,
    target: Point,
    obstacles: &ObstacleSet,
    cfg: GeomCfg,
) -> Option<Hit> {
    let ray = Segment::new(origin, target);
    let len = ray.length();
    if !(len > cfg.eps_len) {
        return None;
    }
    obstacles.nearest_hit(&ray, len, cfg)
}

/// End point of the sight line: the nearest hit, or `target` unchanged.
pub fn cast_ray(origin: Point, target: Point, obstacles: &ObstacleSet, cfg: GeomCfg) -> Point {
    cast_ray_hit(origin, target, obstacles, cfg).map_or(target, |h| h.point)
}

/// A resolved sight line, ready for drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SightLine {
    pub origin: Point,
    pub target: Point,
    /// Where the line stops (`target` when unobstructed).
    pub end: Point,
    pub hit: Option<Hit>,
}

impl SightLine {
    #[inline]
    pub fn is_blocked(&self) -> bool {
        self.hit.is_some()
    }
}

pub fn cast_sight_line(
    origin: Point,
    target: Point,
    obstacles: &ObstacleSet,
    cfg: GeomCfg,
) -> SightLine {
    let hit = cast_ray_hit(origin, target, obstacles, cfg);
    SightLine {
        origin,
        target,
        end: hit.map_or(target, |h| h.point),
        hit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Polygon;
    use crate::occluder::Obstacle;
    use nalgebra::vector;

    fn wall(a: Point, b: Point) -> ObstacleSet {
        // Two-vertex loop: a single blocking edge (traversed both ways).
        ObstacleSet::new(vec![Obstacle::from_polygon(Polygon::new(vec![a, b]))])
    }

    #[test]
    fn empty_set_returns_target_unchanged() {
        let empty = ObstacleSet::default();
        let target = vector![3.25, -7.5];
        let end = cast_ray(vector![1.0, 2.0], target, &empty, GeomCfg::default());
        assert_eq!(end, target);
    }

    #[test]
    fn axis_aligned_wall_blocks_at_five() {
        let set = wall(vector![5.0, -5.0], vector![5.0, 5.0]);
        let origin = vector![0.0, 0.0];
        let target = vector![10.0, 0.0];
        let hit = cast_ray_hit(origin, target, &set, GeomCfg::default()).unwrap();
        assert!((hit.point - vector![5.0, 0.0]).norm() < 1e-12);
        assert!((hit.dist - 5.0).abs() < 1e-12);
        let end = cast_ray(origin, target, &set, GeomCfg::default());
        assert!(end.x > origin.x && end.x < target.x);
        assert_eq!(end, hit.point);
    }

    #[test]
    fn wall_beyond_target_does_not_block() {
        let set = wall(vector![5.0, -5.0], vector![5.0, 5.0]);
        let target = vector![4.0, 0.0];
        let line = cast_sight_line(vector![0.0, 0.0], target, &set, GeomCfg::default());
        assert!(!line.is_blocked());
        assert_eq!(line.end, target);
    }

    #[test]
    fn zero_length_cast_returns_target() {
        let set = wall(vector![5.0, -5.0], vector![5.0, 5.0]);
        let p = vector![1.0, 1.0];
        assert_eq!(cast_ray(p, p, &set, GeomCfg::default()), p);
    }

    #[test]
    fn diagonal_cast_matches_parametric_distance() {
        // Wall x + y = 6 crossing the ray from (0,0) to (8,8) at (3,3).
        let set = wall(vector![6.0, 0.0], vector![0.0, 6.0]);
        let line = cast_sight_line(vector![0.0, 0.0], vector![8.0, 8.0], &set, GeomCfg::default());
        let hit = line.hit.unwrap();
        assert!((hit.point - vector![3.0, 3.0]).norm() < 1e-12);
        assert!((hit.dist - 18f64.sqrt()).abs() < 1e-12);
    }
}

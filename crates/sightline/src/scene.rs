//! Scene snapshot and per-frame batch queries.
//!
//! The caller owns a `Scene` and mutates it between frames; each frame hands
//! `&Scene` to `sight_lines` / `fovs`. Nothing here caches across calls.

use nalgebra::vector;

use crate::agent::{Agent, Role};
use crate::cast::{cast_sight_line, SightLine};
use crate::fov::{build_fov, FovCfg, VisibilityPolygon};
use crate::geom::{GeomCfg, Point};
use crate::occluder::ObstacleSet;
use crate::shapes::Grid;

/// Axis-aligned scene extent `[0, width] × [0, height]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneBounds {
    pub width: f64,
    pub height: f64,
}

impl Default for SceneBounds {
    fn default() -> Self {
        Grid::default().bounds()
    }
}

impl SceneBounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn diagonal(&self) -> f64 {
        self.width.hypot(self.height)
    }

    #[inline]
    pub fn center(&self) -> Point {
        vector![self.width / 2.0, self.height / 2.0]
    }

    /// Closed-interval membership.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }

    /// Clamp `p` to the bounds shrunk by `margin` on every side.
    /// If the margin leaves nothing, the coordinate collapses to the center.
    pub fn clamp(&self, p: Point, margin: f64) -> Point {
        fn clamp_axis(v: f64, lo: f64, hi: f64) -> f64 {
            if lo > hi {
                (lo + hi) / 2.0
            } else {
                v.max(lo).min(hi)
            }
        }
        vector![
            clamp_axis(p.x, margin, self.width - margin),
            clamp_axis(p.y, margin, self.height - margin)
        ]
    }
}

/// Everything a frame needs: bounds, occluders, agents.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub bounds: SceneBounds,
    pub obstacles: ObstacleSet,
    pub agents: Vec<Agent>,
}

impl Scene {
    pub fn new(bounds: SceneBounds) -> Self {
        Self {
            bounds,
            ..Self::default()
        }
    }

    /// One sight line per agent, in agent order.
    pub fn sight_lines(&self, cfg: GeomCfg) -> Vec<SightLine> {
        self.agents
            .iter()
            .map(|a| cast_sight_line(a.origin(), a.target(), &self.obstacles, cfg))
            .collect()
    }

    /// One visibility fan per agent, in agent order.
    pub fn fovs(&self, fov: FovCfg, cfg: GeomCfg) -> Vec<VisibilityPolygon> {
        self.agents
            .iter()
            .map(|a| build_fov(a.origin(), a.target(), fov, &self.obstacles, cfg))
            .collect()
    }

    /// Agent under `p`. Enemies win over allies, allies over the player.
    pub fn pick_agent(&self, p: Point) -> Option<usize> {
        [Role::Enemy, Role::Ally, Role::Player]
            .into_iter()
            .find_map(|role| {
                self.agents
                    .iter()
                    .position(|a| a.role() == role && a.hit(p))
            })
    }

    /// Duplicate every obstacle through the scene center.
    pub fn mirror_obstacles(&mut self) {
        self.obstacles.mirror_duplicate(self.bounds.center());
    }
}

//! Grid-anchored obstacle catalogue.
//!
//! Purpose
//! - Place the four catalogue shapes on a square grid: a chosen anchor vertex
//!   lands on grid point `(gx·cell, gy·cell)` and the shape is rotated about it.
//!
//! Model (cell size `c`, `h = √3/2 · side`)
//! - Triangles: side `1.8c` (small) or `3.6c` (big); vertices `(0,0) (−s/2,h) (s/2,h)`.
//! - Rhombus: side `1.8c` with a 60° corner.
//! - Trapezoid: top `1.8c`, bottom twice the top, 60° flanks.
//! - Anchors a shape lacks (e.g. top-right on a triangle) fall back to top-left.

use std::f64::consts::FRAC_PI_3;
use std::fmt;
use std::str::FromStr;

use nalgebra::vector;

use crate::geom::{rotate_about, Point, Polygon};
use crate::occluder::Obstacle;
use crate::scene::SceneBounds;
use crate::GeomError;

/// Shapes are slightly smaller than their grid footprint.
const SHAPE_SCALE: f64 = 0.9;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    SmallTriangle,
    BigTriangle,
    Rhombus,
    Trapezoid,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Anchor {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::SmallTriangle,
        ShapeKind::BigTriangle,
        ShapeKind::Rhombus,
        ShapeKind::Trapezoid,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::SmallTriangle => "small_triangle",
            ShapeKind::BigTriangle => "big_triangle",
            ShapeKind::Rhombus => "rhombus",
            ShapeKind::Trapezoid => "trapezoid",
        }
    }

    /// Unplaced vertices with the top-left vertex at the origin.
    pub fn template(self, cell: f64) -> Vec<Point> {
        let half_sqrt3 = 3f64.sqrt() / 2.0;
        match self {
            ShapeKind::SmallTriangle | ShapeKind::BigTriangle => {
                let cells = if self == ShapeKind::SmallTriangle { 2.0 } else { 4.0 };
                let s = cells * cell * SHAPE_SCALE;
                let h = half_sqrt3 * s;
                vec![vector![0.0, 0.0], vector![-s / 2.0, h], vector![s / 2.0, h]]
            }
            ShapeKind::Rhombus => {
                let s = 2.0 * cell * SHAPE_SCALE;
                let (dx, dy) = (s * FRAC_PI_3.cos(), s * FRAC_PI_3.sin());
                vec![
                    vector![0.0, 0.0],
                    vector![s, 0.0],
                    vector![s + dx, dy],
                    vector![dx, dy],
                ]
            }
            ShapeKind::Trapezoid => {
                let tw = 2.0 * cell * SHAPE_SCALE;
                let bw = 2.0 * tw;
                let h = half_sqrt3 * tw;
                let flank = (bw - tw) / 2.0;
                vec![
                    vector![0.0, 0.0],
                    vector![tw, 0.0],
                    vector![tw + flank, h],
                    vector![-flank, h],
                ]
            }
        }
    }

    /// Template vertex index used as the pivot for `anchor`.
    pub fn anchor_index(self, anchor: Anchor) -> usize {
        match self {
            ShapeKind::SmallTriangle | ShapeKind::BigTriangle => match anchor {
                Anchor::BottomLeft => 1,
                Anchor::BottomRight => 2,
                Anchor::TopLeft | Anchor::TopRight => 0,
            },
            ShapeKind::Rhombus | ShapeKind::Trapezoid => match anchor {
                Anchor::TopLeft => 0,
                Anchor::TopRight => 1,
                Anchor::BottomRight => 2,
                Anchor::BottomLeft => 3,
            },
        }
    }
}

impl Anchor {
    pub fn name(self) -> &'static str {
        match self {
            Anchor::TopLeft => "top_left",
            Anchor::TopRight => "top_right",
            Anchor::BottomLeft => "bottom_left",
            Anchor::BottomRight => "bottom_right",
        }
    }
}

impl FromStr for ShapeKind {
    type Err = GeomError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| GeomError::unknown("shape", s))
    }
}

impl FromStr for Anchor {
    type Err = GeomError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top_left" => Ok(Anchor::TopLeft),
            "top_right" => Ok(Anchor::TopRight),
            "bottom_left" => Ok(Anchor::BottomLeft),
            "bottom_right" => Ok(Anchor::BottomRight),
            _ => Err(GeomError::unknown("anchor", s)),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Square placement grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
    pub cols: u32,
    pub rows: u32,
    pub cell_size: f64,
}

impl Default for Grid {
    /// 16 × 36 cells of 20 units (a 320 × 720 portrait board).
    fn default() -> Self {
        Self {
            cols: 16,
            rows: 36,
            cell_size: 20.0,
        }
    }
}

impl Grid {
    #[inline]
    pub fn point(&self, gx: i32, gy: i32) -> Point {
        vector![gx as f64 * self.cell_size, gy as f64 * self.cell_size]
    }

    pub fn bounds(&self) -> SceneBounds {
        SceneBounds::new(
            self.cols as f64 * self.cell_size,
            self.rows as f64 * self.cell_size,
        )
    }
}

/// Place `kind` with its `anchor` vertex on grid point `(gx, gy)`, rotated by
/// `angle_deg` about that point. The grid point becomes the obstacle's pivot.
pub fn place(kind: ShapeKind, grid: &Grid, gx: i32, gy: i32, angle_deg: f64, anchor: Anchor) -> Obstacle {
    let template = kind.template(grid.cell_size);
    let pivot = grid.point(gx, gy);
    let offset = pivot - template[kind.anchor_index(anchor)];
    let theta = angle_deg.to_radians();
    let verts = template
        .into_iter()
        .map(|p| rotate_about(p + offset, pivot, theta))
        .collect();
    Obstacle::new(Some(kind), vec![Polygon::new(verts)], pivot)
}

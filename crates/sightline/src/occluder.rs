//! Obstacles and the flat occluder index.
//!
//! Purpose
//! - `Obstacle`: one or more polygons plus an anchor (pivot) point used by the
//!   editing operations (rotate, translate, mirror).
//! - `ObstacleSet`: ordered collection queried for the nearest hit along a ray.
//!
//! Model
//! - Every polygon is decomposed into its closed-loop edges on the fly; the
//!   scan is linear in the total edge count and allocates nothing.
//! - There is no spatial acceleration structure. Scenes hold tens of
//!   obstacles, so `rays × edges` stays small at interactive rates.

use tracing::debug;

use crate::contains::point_in_polygon;
use crate::geom::{reflect_through, rotate_about, GeomCfg, Point, Polygon, Segment};
use crate::intersect::{intersect, Hit};
use crate::shapes::ShapeKind;

/// A compound occluder.
#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    /// Catalogue shape this obstacle was placed from; `None` for free-form polygons.
    pub kind: Option<ShapeKind>,
    pub polys: Vec<Polygon>,
    /// Pivot for rotation; moves with translation and mirroring.
    pub anchor: Point,
}

impl Obstacle {
    pub fn new(kind: Option<ShapeKind>, polys: Vec<Polygon>, anchor: Point) -> Self {
        Self {
            kind,
            polys,
            anchor,
        }
    }

    /// Free-form single polygon anchored at its vertex mean.
    pub fn from_polygon(poly: Polygon) -> Self {
        let anchor = if poly.is_empty() {
            Point::zeros()
        } else {
            poly.verts.iter().sum::<Point>() / poly.len() as f64
        };
        Self::new(None, vec![poly], anchor)
    }

    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        self.polys.iter().flat_map(|p| p.edges())
    }

    /// Rotate every vertex about the anchor, counterclockwise in degrees.
    pub fn rotate_deg(&mut self, deg: f64) {
        let (anchor, theta) = (self.anchor, deg.to_radians());
        for poly in &mut self.polys {
            for v in &mut poly.verts {
                *v = rotate_about(*v, anchor, theta);
            }
        }
    }

    /// Move every vertex and the anchor by `delta`.
    pub fn translate(&mut self, delta: Point) {
        for poly in &mut self.polys {
            for v in &mut poly.verts {
                *v += delta;
            }
        }
        self.anchor += delta;
    }

    /// Point-reflected copy through `center`.
    pub fn mirrored(&self, center: Point) -> Obstacle {
        Obstacle {
            kind: self.kind,
            polys: self
                .polys
                .iter()
                .map(|p| p.map(|v| reflect_through(v, center)))
                .collect(),
            anchor: reflect_through(self.anchor, center),
        }
    }

    /// True if any of the polygons contains `p` (even–odd per polygon).
    pub fn contains(&self, p: Point) -> bool {
        self.polys.iter().any(|poly| point_in_polygon(p, poly))
    }
}

/// Ordered obstacle collection; the unit every visibility query reads.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObstacleSet {
    pub obstacles: Vec<Obstacle>,
}

impl ObstacleSet {
    pub fn new(obstacles: Vec<Obstacle>) -> Self {
        Self { obstacles }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Obstacle> {
        self.obstacles.iter()
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Obstacle> {
        self.obstacles.get_mut(index)
    }

    pub fn push(&mut self, obstacle: Obstacle) {
        debug!(index = self.obstacles.len(), kind = ?obstacle.kind, "obstacle added");
        self.obstacles.push(obstacle);
    }

    pub fn remove(&mut self, index: usize) -> Option<Obstacle> {
        if index >= self.obstacles.len() {
            return None;
        }
        debug!(index, "obstacle removed");
        Some(self.obstacles.remove(index))
    }

    pub fn clear(&mut self) {
        debug!(count = self.obstacles.len(), "obstacles cleared");
        self.obstacles.clear();
    }

    /// Append the point-reflected copy of every current obstacle.
    pub fn mirror_duplicate(&mut self, center: Point) {
        let copies: Vec<Obstacle> = self.obstacles.iter().map(|o| o.mirrored(center)).collect();
        debug!(count = copies.len(), cx = center.x, cy = center.y, "obstacles mirrored");
        self.obstacles.extend(copies);
    }

    /// Index of the first obstacle containing `p`.
    pub fn pick(&self, p: Point) -> Option<usize> {
        self.obstacles.iter().position(|o| o.contains(p))
    }

    /// Every edge of every polygon, in obstacle order.
    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        self.obstacles.iter().flat_map(|o| o.edges())
    }

    /// Nearest hit along `ray` with distance at most `max_dist`.
    /// Equal distances keep the first edge encountered.
    pub fn nearest_hit(&self, ray: &Segment, max_dist: f64, cfg: GeomCfg) -> Option<Hit> {
        let mut best: Option<Hit> = None;
        for edge in self.edges() {
            if let Some(hit) = intersect(ray, &edge, cfg) {
                if hit.dist <= max_dist && best.as_ref().is_none_or(|b| hit.dist < b.dist) {
                    best = Some(hit);
                }
            }
        }
        best
    }
}

impl From<Vec<Obstacle>> for ObstacleSet {
    fn from(obstacles: Vec<Obstacle>) -> Self {
        Self::new(obstacles)
    }
}

impl<'a> IntoIterator for &'a ObstacleSet {
    type Item = &'a Obstacle;
    type IntoIter = std::slice::Iter<'a, Obstacle>;
    fn into_iter(self) -> Self::IntoIter {
        self.obstacles.iter()
    }
}

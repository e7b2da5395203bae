//! Curated entry points for front-ends (UNSTABLE).
//!
//! The four query functions plus the types needed to call them. Editing and
//! scene helpers live in their own modules and in `prelude`.

pub use crate::cast::cast_ray;
pub use crate::contains::point_in_polygon;
pub use crate::fov::{build_fov, FovCfg, VisibilityPolygon};
pub use crate::geom::{GeomCfg, Point, Polygon, Segment};
pub use crate::intersect::{intersect, Hit};
pub use crate::occluder::{Obstacle, ObstacleSet};

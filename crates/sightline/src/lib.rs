//! Visibility queries for point agents among polygonal occluders in the plane.
//!
//! Every query is a pure function of its arguments: callers own the scene
//! (obstacles, agents) and hand a borrowed snapshot to each call.
//!
//! Layout
//! - `geom`: points, segments, polygons, tolerances.
//! - `intersect`: ray vs. segment solve.
//! - `occluder`: obstacles, obstacle sets, nearest-hit scan.
//! - `cast` / `fov`: single ray casts and sampled cones of vision.
//! - `contains`: crossing-number point-in-polygon test.
//! - `shapes`, `agent`, `scene`: authoring helpers and per-frame batching.

pub mod agent;
pub mod api;
pub mod cast;
pub mod contains;
pub mod error;
pub mod fov;
pub mod geom;
pub mod intersect;
pub mod occluder;
pub mod scene;
pub mod shapes;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::GeomError;
pub use geom::{GeomCfg, Point, Polygon, Segment};
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::agent::{spawn_agent, Agent, AgentState, Role, SpawnToken, AGENT_RADIUS};
    pub use crate::cast::{cast_ray, cast_ray_hit, cast_sight_line, SightLine};
    pub use crate::contains::point_in_polygon;
    pub use crate::fov::{build_fov, FovCfg, VisibilityPolygon};
    pub use crate::geom::{GeomCfg, Point, Polygon, Segment};
    pub use crate::intersect::{intersect, Hit};
    pub use crate::occluder::{Obstacle, ObstacleSet};
    pub use crate::scene::{Scene, SceneBounds};
    pub use crate::shapes::{place, Anchor, Grid, ShapeKind};
    pub use crate::GeomError;
}

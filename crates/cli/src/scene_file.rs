//! JSON scene description and its conversion into a `Scene` snapshot.
//!
//! Every section is optional; an empty object `{}` is a valid (empty) scene on
//! the default 16 × 36 grid.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sightline::prelude::*;
use std::path::Path;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneFile {
    #[serde(default)]
    pub grid: GridSpec,
    #[serde(default)]
    pub obstacles: Vec<ObstacleSpec>,
    /// Append a point-mirrored copy of every obstacle through the board center.
    #[serde(default)]
    pub mirror: bool,
    #[serde(default)]
    pub agents: Vec<AgentSpec>,
    #[serde(default)]
    pub fov: FovSpec,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridSpec {
    pub cols: u32,
    pub rows: u32,
    pub cell_size: f64,
}

impl Default for GridSpec {
    fn default() -> Self {
        let g = Grid::default();
        Self {
            cols: g.cols,
            rows: g.rows,
            cell_size: g.cell_size,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum ObstacleSpec {
    /// Catalogue shape placed on the grid.
    Shape {
        shape: String,
        cell: [i32; 2],
        #[serde(default)]
        angle_deg: f64,
        #[serde(default)]
        anchor: Option<String>,
        /// Extra rotation about the pivot after placement.
        #[serde(default)]
        rotate_deg: f64,
        #[serde(default)]
        translate: [f64; 2],
    },
    /// Free-form compound obstacle.
    Polygons {
        polygons: Vec<Vec<[f64; 2]>>,
        #[serde(default)]
        anchor: Option<[f64; 2]>,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentSpec {
    pub role: String,
    pub position: [f64; 2],
    pub look_at: [f64; 2],
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FovSpec {
    pub half_angle_deg: f64,
    pub rays: usize,
}

impl Default for FovSpec {
    fn default() -> Self {
        Self {
            half_angle_deg: 30.0,
            rays: 100,
        }
    }
}

#[inline]
fn pt(p: [f64; 2]) -> Point {
    Point::new(p[0], p[1])
}

impl SceneFile {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("reading scene {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("parsing scene {}", path.display()))
    }

    pub fn grid(&self) -> Grid {
        Grid {
            cols: self.grid.cols,
            rows: self.grid.rows,
            cell_size: self.grid.cell_size,
        }
    }

    /// Build the snapshot; names and polygon sizes are validated here.
    pub fn build(&self) -> Result<Scene> {
        let grid = self.grid();
        let mut scene = Scene::new(grid.bounds());
        for (i, spec) in self.obstacles.iter().enumerate() {
            let obstacle = build_obstacle(spec, &grid).with_context(|| format!("obstacle {i}"))?;
            scene.obstacles.push(obstacle);
        }
        if self.mirror {
            scene.mirror_obstacles();
        }
        for (i, a) in self.agents.iter().enumerate() {
            let role: Role = a.role.parse().with_context(|| format!("agent {i}"))?;
            scene
                .agents
                .push(Agent::new(role, pt(a.position), pt(a.look_at)));
        }
        Ok(scene)
    }

    /// FOV parameters sized for this scene's bounds.
    pub fn fov_cfg(&self) -> Result<FovCfg> {
        let fov = FovCfg::for_bounds(
            self.grid().bounds(),
            self.fov.half_angle_deg.to_radians(),
            self.fov.rays,
        );
        fov.validate()?;
        Ok(fov)
    }

    /// A small mirrored board with one agent of each role.
    pub fn demo() -> Self {
        let shape = |name: &str, cell: [i32; 2], angle_deg: f64, anchor: &str| {
            ObstacleSpec::Shape {
                shape: name.to_string(),
                cell,
                angle_deg,
                anchor: Some(anchor.to_string()),
                rotate_deg: 0.0,
                translate: [0.0, 0.0],
            }
        };
        let agent = |role: &str, position: [f64; 2], look_at: [f64; 2]| AgentSpec {
            role: role.to_string(),
            position,
            look_at,
        };
        Self {
            grid: GridSpec::default(),
            obstacles: vec![
                shape("small_triangle", [4, 8], 0.0, "top_left"),
                shape("big_triangle", [11, 6], 15.0, "bottom_left"),
                shape("rhombus", [3, 13], 0.0, "top_left"),
                shape("trapezoid", [8, 14], -30.0, "top_right"),
            ],
            mirror: true,
            agents: vec![
                agent("player", [160.0, 360.0], [160.0, 100.0]),
                agent("enemy", [60.0, 80.0], [200.0, 300.0]),
                agent("ally", [250.0, 600.0], [120.0, 420.0]),
            ],
            fov: FovSpec::default(),
        }
    }
}

fn build_obstacle(spec: &ObstacleSpec, grid: &Grid) -> Result<Obstacle> {
    match spec {
        ObstacleSpec::Shape {
            shape,
            cell,
            angle_deg,
            anchor,
            rotate_deg,
            translate,
        } => {
            let kind: ShapeKind = shape.parse()?;
            let anchor: Anchor = match anchor {
                Some(name) => name.parse()?,
                None => Anchor::default(),
            };
            let mut o = place(kind, grid, cell[0], cell[1], *angle_deg, anchor);
            if *rotate_deg != 0.0 {
                o.rotate_deg(*rotate_deg);
            }
            o.translate(pt(*translate));
            Ok(o)
        }
        ObstacleSpec::Polygons { polygons, anchor } => {
            if polygons.is_empty() {
                anyhow::bail!("polygons obstacle needs at least one polygon");
            }
            let polys = polygons
                .iter()
                .map(|verts| Polygon::try_new(verts.iter().copied().map(pt).collect()))
                .collect::<Result<Vec<_>, _>>()?;
            let mut o = Obstacle::from_polygon(polys[0].clone());
            o.polys = polys;
            if let Some(a) = anchor {
                o.anchor = pt(*a);
            }
            Ok(o)
        }
    }
}

//! One simulated frame: a few placed shapes, mirrored, plus three agents.
//!
//! Usage:
//!   cargo run -p sightline --example frame
//!
//! Prints each agent's sight-line end point and FOV summary.

use nalgebra::vector;
use sightline::prelude::*;

fn main() {
    let grid = Grid::default();
    let mut scene = Scene::new(grid.bounds());
    scene
        .obstacles
        .push(place(ShapeKind::SmallTriangle, &grid, 4, 8, 0.0, Anchor::TopLeft));
    scene
        .obstacles
        .push(place(ShapeKind::Rhombus, &grid, 9, 12, 30.0, Anchor::BottomLeft));
    scene
        .obstacles
        .push(place(ShapeKind::Trapezoid, &grid, 6, 15, -15.0, Anchor::TopRight));
    scene.mirror_obstacles();

    let center = scene.bounds.center();
    scene
        .agents
        .push(Agent::new(Role::Player, center, vector![center.x, 0.0]));
    for index in 0..2 {
        scene.agents.push(spawn_agent(
            Role::Enemy,
            scene.bounds,
            SpawnToken { seed: 2025, index },
        ));
    }

    let cfg = GeomCfg::default();
    let lines = scene.sight_lines(cfg);
    let fans = scene.fovs(FovCfg::default(), cfg);
    for ((agent, line), fan) in scene.agents.iter().zip(&lines).zip(&fans) {
        println!(
            "{:<6} at ({:6.1},{:6.1}) -> end ({:6.1},{:6.1}) blocked={} fov_area={:9.1}",
            agent.role(),
            line.origin.x,
            line.origin.y,
            line.end.x,
            line.end.y,
            line.is_blocked(),
            fan.area()
        );
    }
}

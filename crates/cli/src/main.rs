use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use sightline::prelude::*;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

mod provenance;
mod scene_file;

use provenance::{write_sidecar, Payload};
use scene_file::SceneFile;

#[derive(Parser)]
#[command(name = "sightline")]
#[command(about = "Run visibility queries against a JSON scene description")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// One sight line per agent
    Cast {
        #[arg(long)]
        scene: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// One visibility polygon per agent
    Fov {
        #[arg(long)]
        scene: PathBuf,
        /// Overrides the scene's half angle
        #[arg(long)]
        half_angle_deg: Option<f64>,
        /// Overrides the scene's ray count
        #[arg(long)]
        rays: Option<usize>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Obstacle and agent under a point
    Pick {
        #[arg(long)]
        scene: PathBuf,
        #[arg(long, allow_hyphen_values = true)]
        x: f64,
        #[arg(long, allow_hyphen_values = true)]
        y: f64,
    },
    /// Write the built-in demo scene
    DemoScene {
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Cast { scene, out } => {
            let doc = cast(&scene)?;
            emit(&doc, out.as_deref(), Payload::new("cast", json!({})).with_scene(&scene))
        }
        Action::Fov {
            scene,
            half_angle_deg,
            rays,
            out,
        } => {
            let doc = fov(&scene, half_angle_deg, rays)?;
            let params = json!({ "half_angle_deg": half_angle_deg, "rays": rays });
            emit(&doc, out.as_deref(), Payload::new("fov", params).with_scene(&scene))
        }
        Action::Pick { scene, x, y } => {
            let doc = pick(&scene, Point::new(x, y))?;
            println!("{}", serde_json::to_string_pretty(&doc)?);
            Ok(())
        }
        Action::DemoScene { out } => demo_scene(&out),
        Action::Report => report(),
    }
}

fn load(scene: &Path) -> Result<(SceneFile, Scene)> {
    let file = SceneFile::load(scene)?;
    let built = file
        .build()
        .with_context(|| format!("building scene {}", scene.display()))?;
    tracing::info!(
        scene = %scene.display(),
        obstacles = built.obstacles.len(),
        agents = built.agents.len(),
        "scene loaded"
    );
    Ok((file, built))
}

#[inline]
fn xy(p: Point) -> [f64; 2] {
    [p.x, p.y]
}

fn cast(scene: &Path) -> Result<Value> {
    let (_, scene) = load(scene)?;
    let lines = scene.sight_lines(GeomCfg::default());
    let blocked = lines.iter().filter(|l| l.is_blocked()).count();
    tracing::info!(lines = lines.len(), blocked, "cast");
    let rows: Vec<Value> = scene
        .agents
        .iter()
        .zip(&lines)
        .map(|(agent, line)| {
            json!({
                "role": agent.role().name(),
                "origin": xy(line.origin),
                "target": xy(line.target),
                "end": xy(line.end),
                "blocked": line.is_blocked(),
                "dist": line.hit.map(|h| h.dist),
            })
        })
        .collect();
    Ok(json!({ "sight_lines": rows }))
}

fn fov(scene: &Path, half_angle_deg: Option<f64>, rays: Option<usize>) -> Result<Value> {
    let (mut file, scene) = load(scene)?;
    if let Some(deg) = half_angle_deg {
        file.fov.half_angle_deg = deg;
    }
    if let Some(n) = rays {
        file.fov.rays = n;
    }
    let cfg = file.fov_cfg()?;
    let fans = scene.fovs(cfg, GeomCfg::default());
    tracing::info!(fans = fans.len(), rays = cfg.ray_count, "fov");
    let rows: Vec<Value> = scene
        .agents
        .iter()
        .zip(&fans)
        .map(|(agent, fan)| {
            json!({
                "role": agent.role().name(),
                "origin": xy(fan.origin()),
                "area": fan.area(),
                "vertices": fan.vertices().iter().copied().map(xy).collect::<Vec<_>>(),
            })
        })
        .collect();
    Ok(json!({
        "half_angle_deg": cfg.half_angle.to_degrees(),
        "ray_count": cfg.ray_count,
        "max_len": cfg.max_len,
        "fovs": rows,
    }))
}

fn pick(scene: &Path, p: Point) -> Result<Value> {
    let (_, scene) = load(scene)?;
    let obstacle = scene.obstacles.pick(p);
    let agent = scene.pick_agent(p);
    tracing::info!(x = p.x, y = p.y, obstacle = ?obstacle, agent = ?agent, "pick");
    Ok(json!({
        "point": xy(p),
        "obstacle": obstacle,
        "agent": agent,
        "agent_role": agent.map(|i| scene.agents[i].role().name()),
    }))
}

fn demo_scene(out: &Path) -> Result<()> {
    tracing::info!(out = %out.display(), "demo-scene");
    let doc = serde_json::to_value(SceneFile::demo())?;
    write_json(&doc, out)?;
    write_sidecar(out, Payload::new("demo-scene", json!({})))?;
    Ok(())
}

fn report() -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "crate_version": sightline::VERSION,
        "defaults": {
            "eps_parallel": GeomCfg::default().eps_parallel,
            "eps_len": GeomCfg::default().eps_len,
            "grid": [Grid::default().cols, Grid::default().rows],
            "cell_size": Grid::default().cell_size,
        },
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

/// Print `doc` to stdout, or write it to `out` with a provenance sidecar.
#[track_caller]
fn emit(doc: &Value, out: Option<&Path>, payload: Payload) -> Result<()> {
    match out {
        Some(path) => {
            write_json(doc, path)?;
            let sidecar = write_sidecar(path, payload)?;
            tracing::info!(out = %path.display(), sidecar = %sidecar.display(), "written");
        }
        None => println!("{}", serde_json::to_string_pretty(doc)?),
    }
    Ok(())
}

fn write_json(doc: &Value, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    std::fs::write(path, serde_json::to_vec_pretty(doc)?)
        .with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_scene(dir: &Path, json: &str) -> PathBuf {
        let path = dir.join("scene.json");
        std::fs::write(&path, json).unwrap();
        path
    }

    const WALL_SCENE: &str = r#"{
        "grid": {"cols": 5, "rows": 5, "cell_size": 20},
        "obstacles": [{"type": "polygons", "polygons": [[[50,0],[55,0],[55,100],[50,100]]]}],
        "agents": [
            {"role": "player", "position": [10, 50], "look_at": [90, 50]},
            {"role": "enemy", "position": [90, 20], "look_at": [70, 20]}
        ],
        "fov": {"half_angle_deg": 20, "rays": 8}
    }"#;

    #[test]
    fn cast_reports_blocked_and_clear_lines() {
        let dir = tempdir().unwrap();
        let doc = cast(&write_scene(dir.path(), WALL_SCENE)).unwrap();
        let lines = doc["sight_lines"].as_array().unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["role"], "player");
        assert_eq!(lines[0]["blocked"], true);
        assert!((lines[0]["end"][0].as_f64().unwrap() - 50.0).abs() < 1e-9);
        assert!((lines[0]["dist"].as_f64().unwrap() - 40.0).abs() < 1e-9);
        assert_eq!(lines[1]["blocked"], false);
        assert!(lines[1]["dist"].is_null());
    }

    #[test]
    fn fov_uses_scene_settings_and_overrides() {
        let dir = tempdir().unwrap();
        let scene = write_scene(dir.path(), WALL_SCENE);
        let doc = fov(&scene, None, None).unwrap();
        assert_eq!(doc["ray_count"], 8);
        let fans = doc["fovs"].as_array().unwrap();
        // Origin plus ray_count + 1 rim points.
        assert_eq!(fans[0]["vertices"].as_array().unwrap().len(), 10);

        let doc = fov(&scene, Some(10.0), Some(4)).unwrap();
        assert_eq!(doc["ray_count"], 4);
        assert!((doc["half_angle_deg"].as_f64().unwrap() - 10.0).abs() < 1e-9);
        assert!(fov(&scene, None, Some(0)).is_err());
    }

    #[test]
    fn pick_finds_obstacle_and_agent() {
        let dir = tempdir().unwrap();
        let scene = write_scene(dir.path(), WALL_SCENE);
        let doc = pick(&scene, Point::new(52.0, 10.0)).unwrap();
        assert_eq!(doc["obstacle"], 0);
        assert!(doc["agent"].is_null());
        let doc = pick(&scene, Point::new(91.0, 21.0)).unwrap();
        assert_eq!(doc["agent"], 1);
        assert_eq!(doc["agent_role"], "enemy");
    }

    #[test]
    fn emit_writes_output_and_sidecar() {
        let dir = tempdir().unwrap();
        let scene = write_scene(dir.path(), WALL_SCENE);
        let out = dir.path().join("nested").join("casts.json");
        let doc = cast(&scene).unwrap();
        emit(&doc, Some(&out), Payload::new("cast", json!({})).with_scene(&scene)).unwrap();
        let written: Value = serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(written, doc);
        assert!(dir.path().join("nested").join("casts.provenance.json").exists());
    }

    #[test]
    fn demo_scene_loads_back() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("demo.json");
        demo_scene(&out).unwrap();
        let doc = cast(&out).unwrap();
        assert_eq!(doc["sight_lines"].as_array().unwrap().len(), 3);
        assert!(dir.path().join("demo.provenance.json").exists());
    }

    #[test]
    fn missing_scene_is_an_error() {
        let dir = tempdir().unwrap();
        let err = cast(&dir.path().join("nope.json")).unwrap_err();
        assert!(format!("{err:#}").contains("reading scene"));
    }
}

use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use shapeview_engine::geom::{Point2, Point3};
use shapeview_engine::render::RecordingBackend;
use shapeview_engine::scene::{App, InputState, SceneDesc};
use shapeview_engine::{BezierCurve, Shape, ShapeKind};

const USAGE: &str = r"scene_cli (shapeview-engine)

USAGE:
  scene_cli demo
  scene_cli pick <x> <y>
  scene_cli scatter <count> [--seed <n>]
  scene_cli curve <segment-length>
  scene_cli dump-scene <path>
  scene_cli load-scene <path>

COMMANDS:
  demo          Build the demo scene and print what would be uploaded
  pick          Cast a pick ray through a pixel of the 800x600 demo viewport
  scatter       Scatter random spheres and pick through the center pixel
  curve         Resample the demo Bezier curve at a uniform arc length
  dump-scene    Write the demo scene description as JSON
  load-scene    Read a scene description back and rebuild its meshes
";

const VIEWPORT: (f64, f64) = (800.0, 600.0);

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        eprintln!("scene_cli error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        print!("{USAGE}");
        return Ok(());
    };

    match command.as_str() {
        "demo" => run_demo(),
        "pick" => {
            let x = parse_f64(args.get(1), "x")?;
            let y = parse_f64(args.get(2), "y")?;
            run_pick(x, y)
        }
        "scatter" => {
            let count = parse_usize(args.get(1), "count")?;
            let seed = match args.get(2).map(String::as_str) {
                Some("--seed") => parse_u64(args.get(3), "seed")?,
                Some(other) => return Err(format!("unknown option `{other}`")),
                None => 7,
            };
            run_scatter(count, seed)
        }
        "curve" => {
            let segment_length = parse_f64(args.get(1), "segment-length")?;
            run_curve(segment_length)
        }
        "dump-scene" => {
            let path = args.get(1).ok_or("dump-scene needs a path")?;
            run_dump_scene(Path::new(path))
        }
        "load-scene" => {
            let path = args.get(1).ok_or("load-scene needs a path")?;
            run_load_scene(Path::new(path))
        }
        "-h" | "--help" => {
            print!("{USAGE}");
            Ok(())
        }
        other => Err(format!("unknown command `{other}`\n\n{USAGE}")),
    }
}

fn run_demo() -> Result<(), String> {
    let app = App::new(VIEWPORT.0, VIEWPORT.1);
    let mut backend = RecordingBackend::new();

    let handles = app.upload_scene(&mut backend);
    app.draw_scene(&mut backend, &handles);

    println!("demo scene: {} shapes", app.shapes().len());
    for (shape, upload) in app.shapes().iter().zip(&backend.uploads) {
        shape
            .mesh()
            .validate()
            .map_err(|err| format!("{} mesh invalid: {err}", shape.kind().name()))?;
        println!(
            "  {:<13} {:>6} vertices {:>6} indices  at ({:.1}, {:.1}, {:.1})",
            shape.kind().name(),
            upload.vertex_count,
            upload.index_count,
            shape.position().x,
            shape.position().y,
            shape.position().z,
        );
    }
    println!("draw calls: {}", backend.draws.len());
    Ok(())
}

fn run_pick(x: f64, y: f64) -> Result<(), String> {
    let mut app = App::new(VIEWPORT.0, VIEWPORT.1);
    let input = InputState {
        pick_at: Some((x, y)),
        ..InputState::default()
    };
    app.update(&input, 0.0);

    match app.last_hit() {
        Some(hit) => {
            let shape = &app.shapes()[hit.shape_index];
            println!(
                "hit {} (shape {}) at distance {:.4}",
                shape.kind().name(),
                hit.shape_index,
                hit.distance
            );
            println!(
                "  position ({:.4}, {:.4}, {:.4})",
                hit.position.x, hit.position.y, hit.position.z
            );
            println!(
                "  normal   ({:.4}, {:.4}, {:.4})",
                hit.normal.x, hit.normal.y, hit.normal.z
            );
        }
        None => println!("no hit"),
    }
    Ok(())
}

fn run_scatter(count: usize, seed: u64) -> Result<(), String> {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut shapes = Vec::with_capacity(count);
    for _ in 0..count {
        let position = Point3::new(
            rng.random_range(-4.0..4.0),
            rng.random_range(-3.0..3.0),
            rng.random_range(-12.0..-2.0),
        );
        let radius = rng.random_range(0.2..1.0);
        shapes.push(Shape::at(
            ShapeKind::Sphere {
                radius,
                sectors: 16,
                stacks: 8,
                flat_shading: false,
            },
            position,
        ));
    }

    let mut app = App::with_shapes(VIEWPORT.0, VIEWPORT.1, shapes);
    let input = InputState {
        pick_at: Some((VIEWPORT.0 / 2.0, VIEWPORT.1 / 2.0)),
        ..InputState::default()
    };
    app.update(&input, 0.0);

    println!("scattered {count} spheres (seed {seed})");
    match app.last_hit() {
        Some(hit) => println!(
            "center pixel hits sphere {} at distance {:.4}",
            hit.shape_index, hit.distance
        ),
        None => println!("center pixel hits nothing"),
    }
    Ok(())
}

fn run_curve(segment_length: f64) -> Result<(), String> {
    if !segment_length.is_finite() || segment_length <= 0.0 {
        return Err("segment length must be positive".to_string());
    }

    let mut curve = BezierCurve::new(100);
    for p in [
        Point2::new(-0.8, -0.8),
        Point2::new(-0.3, 0.8),
        Point2::new(0.3, -0.8),
        Point2::new(0.8, 0.8),
    ] {
        curve.add_control_point(p);
    }

    println!("uniform-in-parameter samples: {}", curve.point_count());

    curve.resample_uniform_length(segment_length);
    let flat = curve.curve_points();
    println!(
        "arc-length resampled at {segment_length}: {} samples",
        curve.point_count()
    );

    for (index, window) in flat.chunks_exact(2).collect::<Vec<_>>().windows(2).enumerate() {
        let a = Point2::new(window[0][0], window[0][1]);
        let b = Point2::new(window[1][0], window[1][1]);
        println!("  segment {index:>3}: length {:.5}", a.distance_to(b));
    }
    Ok(())
}

fn run_dump_scene(path: &Path) -> Result<(), String> {
    let app = App::new(VIEWPORT.0, VIEWPORT.1);
    let json = serde_json::to_string_pretty(&app.scene_desc())
        .map_err(|err| format!("serialize failed: {err}"))?;
    fs::write(path, json).map_err(|err| format!("write {}: {err}", path.display()))?;
    println!("wrote scene to {}", path.display());
    Ok(())
}

fn run_load_scene(path: &Path) -> Result<(), String> {
    let json =
        fs::read_to_string(path).map_err(|err| format!("read {}: {err}", path.display()))?;
    let desc: SceneDesc =
        serde_json::from_str(&json).map_err(|err| format!("parse {}: {err}", path.display()))?;

    let mut app = App::with_shapes(VIEWPORT.0, VIEWPORT.1, Vec::new());
    app.load_scene(desc);

    println!("loaded {} shapes from {}", app.shapes().len(), path.display());
    for shape in app.shapes() {
        println!(
            "  {:<13} {:>6} vertices {:>6} triangles",
            shape.kind().name(),
            shape.mesh().vertex_count(),
            shape.mesh().triangle_count()
        );
    }
    Ok(())
}

fn parse_f64(arg: Option<&String>, name: &str) -> Result<f64, String> {
    arg.ok_or(format!("missing <{name}>"))?
        .parse()
        .map_err(|_| format!("<{name}> must be a number"))
}

fn parse_usize(arg: Option<&String>, name: &str) -> Result<usize, String> {
    arg.ok_or(format!("missing <{name}>"))?
        .parse()
        .map_err(|_| format!("<{name}> must be a non-negative integer"))
}

fn parse_u64(arg: Option<&String>, name: &str) -> Result<u64, String> {
    arg.ok_or(format!("missing <{name}>"))?
        .parse()
        .map_err(|_| format!("<{name}> must be a non-negative integer"))
}

//! Hollow3D Terminal Viewer
//!
//! Renders the built-in polyhedra (or a geometry JSON file) in the terminal.
//! Controls:
//!   - Tab: cycle shapes, 1/2/3: orthographic/perspective/oblique camera
//!   - WASD / E/R: rotate, arrows and ,/.: translate, +/-: scale
//!   - [/]: orbit camera, I/O: zoom, Space: animate, L: shading
//!   - 0: reset, P: export pose JSON, Q/ESC: quit

use clap::{Parser, ValueEnum};
use crossterm::terminal;
use hollow3d_core::{asset, models, ProjectionMode, Shape};
use nalgebra::{Point3, Vector3};
use std::path::PathBuf;

use hollow3d_terminal::ViewerApp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StartShape {
    ZeroHollow,
    Tetrahedron,
    Prism,
}

#[derive(Debug, Parser)]
#[command(name = "hollow3d", about = "Interactive 3D polyhedron viewer for the terminal")]
struct Args {
    /// Geometry JSON file to view instead of the built-in shapes
    file: Option<PathBuf>,

    /// Built-in shape to show first
    #[arg(long, value_enum, default_value_t = StartShape::ZeroHollow)]
    shape: StartShape,

    /// Target frame rate of the animation tick
    #[arg(long, default_value_t = 30)]
    fps: u64,
}

fn main() -> hollow3d_core::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let (cols, rows) = terminal::size()?;
    let center = Point3::new(cols as f32 / 2.0, rows as f32 / 2.0, 0.0);
    let size = (rows.min(cols) as f32 * 0.7).max(8.0);

    let mut shapes = match &args.file {
        Some(path) => {
            let geometry = asset::load_geometry(path)?;
            log::info!(
                "loaded {} vertices from {}",
                geometry.vertices.len(),
                path.display()
            );
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "scene".to_string());
            vec![Shape::new(name, geometry)]
        }
        None => built_in_shapes(center, size, args.shape),
    };

    // The home perspective camera sits at the world origin looking down -z;
    // aim it at the viewport center where the shapes are built.
    for shape in &mut shapes {
        shape
            .camera_for_mut(ProjectionMode::Perspective)
            .translation = Vector3::new(center.x, center.y, 0.0);
    }

    log::info!("starting viewer with {} shape(s)", shapes.len());
    let mut app = ViewerApp::new(shapes, args.fps)?;
    app.run()?;
    Ok(())
}

fn built_in_shapes(center: Point3<f32>, size: f32, first: StartShape) -> Vec<Shape> {
    let (dx, dy, dz) = (size * 1.4, size, size * 0.5);
    let frame_start = Point3::new(
        center.x - dx / 2.0,
        center.y - dy / 2.0,
        center.z - dz / 2.0,
    );

    let mut shapes = vec![
        Shape::new(
            "zero-hollow",
            models::zero_hollow(frame_start, dx, dy, dz, size * 0.16),
        ),
        Shape::new(
            "tetrahedron",
            models::tetrahedron(center, size * 0.7, size * 0.12),
        ),
        Shape::new("prism", models::triangular_prism(center, size, size)),
    ];

    let start = match first {
        StartShape::ZeroHollow => 0,
        StartShape::Tetrahedron => 1,
        StartShape::Prism => 2,
    };
    shapes.rotate_left(start);
    shapes
}

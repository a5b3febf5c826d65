//! Example: load and view a geometry JSON file in the terminal
//!
//! Usage: cargo run --example load_scene -- path/to/scene.json

use std::env;

use hollow3d_core::{asset, models, Shape};
use hollow3d_terminal::ViewerApp;
use nalgebra::Point3;

fn main() -> hollow3d_core::Result<()> {
    env_logger::init();
    let args: Vec<String> = env::args().collect();

    let shape = match args.get(1) {
        Some(path) => {
            println!("Loading geometry file: {path}");
            let geometry = asset::load_geometry(path.as_ref())?;
            println!("Loaded {} triangles", geometry.triangle_count());
            Shape::new("scene", geometry)
        }
        None => {
            eprintln!("Usage: {} <scene.json>", args[0]);
            eprintln!("\nNo geometry file provided, using the built-in prism...");
            Shape::new(
                "prism",
                models::triangular_prism(Point3::new(40.0, 20.0, 0.0), 20.0, 20.0),
            )
        }
    };

    println!("Starting terminal viewer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = ViewerApp::new(vec![shape], 30)?;
    app.run()?;
    Ok(())
}

//! Geometry asset import/export (JSON)
//!
//! Two accepted import forms: a flat vertex list with explicit colors and a
//! pivot, or a compact indexed form where each group of six indices is one
//! quad face sharing one hex color. Export writes the flat form with the
//! shape's current world-transformed positions.

use std::fs;
use std::path::Path;

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::{position, Color, Geometry, Vertex};
use crate::shape::Shape;

fn default_w() -> f32 {
    1.0
}

#[derive(Debug, Serialize, Deserialize)]
struct PointData {
    x: f32,
    y: f32,
    z: f32,
    #[serde(default = "default_w")]
    w: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ColorData {
    r: f32,
    g: f32,
    b: f32,
    a: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct VertexData {
    position: PointData,
    color: ColorData,
}

#[derive(Debug, Serialize, Deserialize)]
struct FlatDocument {
    vertices: Vec<VertexData>,
    center: PointData,
}

#[derive(Debug, Deserialize)]
struct CompactDocument {
    vertices: Vec<PointData>,
    indices: Vec<usize>,
    #[serde(rename = "hexColors")]
    hex_colors: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GeometryDocument {
    Flat(FlatDocument),
    Compact(CompactDocument),
}

/// Number of indices forming one quad face in the compact form
const INDICES_PER_QUAD: usize = 6;

/// Parse a geometry asset in either accepted JSON form
pub fn parse_geometry(json: &str) -> Result<Geometry> {
    let document: GeometryDocument = serde_json::from_str(json)?;
    match document {
        GeometryDocument::Flat(flat) => Ok(expand_flat(flat)),
        GeometryDocument::Compact(compact) => expand_compact(compact),
    }
}

/// Read and parse a geometry asset file
pub fn load_geometry(path: &Path) -> Result<Geometry> {
    parse_geometry(&fs::read_to_string(path)?)
}

fn expand_flat(document: FlatDocument) -> Geometry {
    let center = Point3::new(document.center.x, document.center.y, document.center.z);
    let mut geometry = Geometry::with_capacity(center, document.vertices.len());
    for v in document.vertices {
        geometry.vertices.push(Vertex::new(
            nalgebra::Vector4::new(v.position.x, v.position.y, v.position.z, v.position.w),
            Color::new(v.color.r, v.color.g, v.color.b, v.color.a),
        ));
    }
    geometry
}

fn expand_compact(document: CompactDocument) -> Result<Geometry> {
    if document.indices.len() % INDICES_PER_QUAD != 0 {
        return Err(Error::InvalidGeometry(format!(
            "index count {} is not a multiple of {INDICES_PER_QUAD}",
            document.indices.len()
        )));
    }

    // The pivot of the compact form is the centroid of its raw points
    let centroid = document
        .vertices
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + Vector3::new(p.x, p.y, p.z))
        / document.vertices.len().max(1) as f32;
    let mut geometry = Geometry::with_capacity(Point3::from(centroid), document.indices.len());

    for (face, group) in document.indices.chunks(INDICES_PER_QUAD).enumerate() {
        let hex = document.hex_colors.get(face).ok_or_else(|| {
            Error::InvalidGeometry(format!("no hex color for face {face}"))
        })?;
        let color = Color::from_hex(hex)?;
        for &index in group {
            let point = document.vertices.get(index).ok_or_else(|| {
                Error::InvalidGeometry(format!("index {index} out of bounds"))
            })?;
            geometry
                .vertices
                .push(Vertex::new(position(point.x, point.y, point.z), color));
        }
    }
    Ok(geometry)
}

/// Serialize the shape's current world-transformed vertices in the flat form
pub fn export_pose(shape: &Shape) -> Result<String> {
    let center = shape.geometry.center;
    let document = FlatDocument {
        vertices: shape
            .transformed_vertices()
            .iter()
            .map(|v| VertexData {
                position: PointData {
                    x: v.position.x,
                    y: v.position.y,
                    z: v.position.z,
                    w: v.position.w,
                },
                color: ColorData {
                    r: v.color.r,
                    g: v.color.g,
                    b: v.color.b,
                    a: v.color.a,
                },
            })
            .collect(),
        center: PointData {
            x: center.x,
            y: center.y,
            z: center.z,
            w: 1.0,
        },
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Write the exported pose to a file
pub fn write_pose(shape: &Shape, path: &Path) -> Result<()> {
    fs::write(path, export_pose(shape)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const FLAT: &str = r#"{
        "vertices": [
            {"position": {"x": 1.0, "y": 2.0, "z": 3.0, "w": 1.0},
             "color": {"r": 1.0, "g": 0.0, "b": 0.0, "a": 1.0}},
            {"position": {"x": 4.0, "y": 5.0, "z": 6.0},
             "color": {"r": 0.0, "g": 1.0, "b": 0.0, "a": 1.0}}
        ],
        "center": {"x": 2.5, "y": 3.5, "z": 4.5}
    }"#;

    const COMPACT: &str = r##"{
        "vertices": [
            {"x": 0.0, "y": 0.0, "z": 0.0},
            {"x": 1.0, "y": 0.0, "z": 0.0},
            {"x": 1.0, "y": 1.0, "z": 0.0},
            {"x": 0.0, "y": 1.0, "z": 0.0}
        ],
        "indices": [0, 1, 2, 0, 2, 3],
        "hexColors": ["#00ff00"]
    }"##;

    #[test]
    fn test_parse_flat_form() {
        let geometry = parse_geometry(FLAT).unwrap();
        assert_eq!(geometry.vertices.len(), 2);
        assert_relative_eq!(geometry.vertices[0].position.x, 1.0, epsilon = 1e-6);
        // Omitted w defaults to 1
        assert_relative_eq!(geometry.vertices[1].position.w, 1.0, epsilon = 1e-6);
        assert_relative_eq!(geometry.center.y, 3.5, epsilon = 1e-6);
    }

    #[test]
    fn test_parse_compact_form() {
        let geometry = parse_geometry(COMPACT).unwrap();
        assert_eq!(geometry.vertices.len(), 6);
        let green = Color::from_hex("#00ff00").unwrap();
        assert!(geometry.vertices.iter().all(|v| v.color == green));
        // Centroid of the unit quad corners
        assert_relative_eq!(geometry.center.x, 0.5, epsilon = 1e-6);
        assert_relative_eq!(geometry.center.y, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_compact_rejects_out_of_bounds_index() {
        let json = r##"{
            "vertices": [{"x": 0.0, "y": 0.0, "z": 0.0}],
            "indices": [0, 0, 9, 0, 0, 0],
            "hexColors": ["#00ff00"]
        }"##;
        assert!(matches!(
            parse_geometry(json),
            Err(Error::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_compact_rejects_missing_color() {
        let json = r##"{
            "vertices": [{"x": 0.0, "y": 0.0, "z": 0.0}],
            "indices": [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            "hexColors": ["#00ff00"]
        }"##;
        assert!(matches!(
            parse_geometry(json),
            Err(Error::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_compact_rejects_bad_hex() {
        let json = r#"{
            "vertices": [{"x": 0.0, "y": 0.0, "z": 0.0}],
            "indices": [0, 0, 0, 0, 0, 0],
            "hexColors": ["00ff00"]
        }"#;
        assert!(matches!(parse_geometry(json), Err(Error::InvalidColor(_))));
    }

    #[test]
    fn test_export_of_rest_pose_round_trips() {
        let geometry = parse_geometry(FLAT).unwrap();
        let shape = Shape::new("test", geometry);
        let exported = export_pose(&shape).unwrap();
        let reloaded = parse_geometry(&exported).unwrap();
        assert_eq!(reloaded.vertices.len(), shape.geometry.vertices.len());
        for (a, b) in shape.geometry.vertices.iter().zip(&reloaded.vertices) {
            assert!((a.position - b.position).norm() < 1e-5);
        }
    }

    #[test]
    fn test_export_reflects_translation() {
        let geometry = parse_geometry(FLAT).unwrap();
        let mut shape = Shape::new("test", geometry);
        shape.state.translate(10.0, 0.0, 0.0);
        let reloaded = parse_geometry(&export_pose(&shape).unwrap()).unwrap();
        assert_relative_eq!(reloaded.vertices[0].position.x, 11.0, epsilon = 1e-4);
    }
}

//! Geometry primitives: homogeneous points, colors, vertices, triangle lists

use nalgebra::{Point3, Vector3, Vector4};

use crate::error::{Error, Result};

/// Build a homogeneous position (w = 1)
pub fn position(x: f32, y: f32, z: f32) -> Vector4<f32> {
    Vector4::new(x, y, z, 1.0)
}

/// An RGBA color with channel values in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a `#rrggbb` hex string (alpha = 1)
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex
            .strip_prefix('#')
            .ok_or_else(|| Error::InvalidColor(format!("missing '#' prefix: {hex:?}")))?;
        if digits.len() != 6 {
            return Err(Error::InvalidColor(format!(
                "expected 6 hex digits: {hex:?}"
            )));
        }
        let channel = |range: std::ops::Range<usize>| -> Result<f32> {
            u8::from_str_radix(&digits[range], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|_| Error::InvalidColor(format!("bad hex digits: {hex:?}")))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
            a: 1.0,
        })
    }

    /// Scale the rgb channels by a brightness factor, clamped to [0, 1]
    pub fn shaded(&self, brightness: f32) -> Self {
        let b = brightness.clamp(0.0, 1.0);
        Self {
            r: self.r * b,
            g: self.g * b,
            b: self.b * b,
            a: self.a,
        }
    }
}

/// A vertex with homogeneous position and color, immutable once built
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vector4<f32>,
    pub color: Color,
}

impl Vertex {
    pub fn new(position: Vector4<f32>, color: Color) -> Self {
        Self { position, color }
    }
}

/// A triangle list plus the pivot point that rotation and scale are applied
/// about
#[derive(Debug, Clone)]
pub struct Geometry {
    pub vertices: Vec<Vertex>,
    pub center: Point3<f32>,
}

impl Geometry {
    pub fn new(center: Point3<f32>) -> Self {
        Self {
            vertices: Vec::new(),
            center,
        }
    }

    pub fn with_capacity(center: Point3<f32>, capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity),
            center,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn push_triangle(&mut self, a: Vector4<f32>, b: Vector4<f32>, c: Vector4<f32>, color: Color) {
        self.vertices.push(Vertex::new(a, color));
        self.vertices.push(Vertex::new(b, color));
        self.vertices.push(Vertex::new(c, color));
    }

    /// Push a quad a-b-c-d (counter-clockwise) as two triangles
    pub fn push_quad(
        &mut self,
        a: Vector4<f32>,
        b: Vector4<f32>,
        c: Vector4<f32>,
        d: Vector4<f32>,
        color: Color,
    ) {
        self.push_triangle(a, b, c, color);
        self.push_triangle(a, c, d, color);
    }

    /// Face normal of the i-th triangle: normalized cross product of two edge
    /// vectors. Degenerate triangles yield the zero vector.
    pub fn face_normal(&self, triangle: usize) -> Vector3<f32> {
        let base = triangle * 3;
        let a = self.vertices[base].position.xyz();
        let b = self.vertices[base + 1].position.xyz();
        let c = self.vertices[base + 2].position.xyz();
        (b - a)
            .cross(&(c - a))
            .try_normalize(1e-12)
            .unwrap_or_else(Vector3::zeros)
    }
}

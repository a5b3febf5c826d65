//! Camera models: shared parameters plus a tagged projection variant

use nalgebra::{Matrix4, Point3, Vector3};

use crate::transform::Transform;

/// Guards the oblique shear against division by zero at axis-aligned angles
const SHEAR_EPSILON: f32 = 1e-6;

/// The three projection families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
    Oblique,
}

/// Per-family projection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Maps a width x height x depth box directly to clip space
    Orthographic { depth: f32 },
    /// Vertical field of view (radians) with near/far planes
    Perspective { fov: f32, near: f32, far: f32 },
    /// Shear by (theta, phi) composed onto the orthographic box map
    Oblique { theta: f32, phi: f32, depth: f32 },
}

impl Projection {
    pub fn mode(&self) -> ProjectionMode {
        match self {
            Projection::Orthographic { .. } => ProjectionMode::Orthographic,
            Projection::Perspective { .. } => ProjectionMode::Perspective,
            Projection::Oblique { .. } => ProjectionMode::Oblique,
        }
    }
}

/// A camera instance. Every field is read on each matrix build; nothing is
/// cached across parameter changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera rotation around each axis (radians)
    pub rotation: Vector3<f32>,
    /// Camera translation
    pub translation: Vector3<f32>,
    pub zoom: f32,
    /// Focus point the camera is nominally aimed at
    pub focus: Point3<f32>,
    pub projection: Projection,
}

impl Camera {
    pub fn new(projection: Projection) -> Self {
        Self {
            rotation: Vector3::zeros(),
            translation: Vector3::zeros(),
            zoom: 1.0,
            focus: Point3::origin(),
            projection,
        }
    }

    pub fn orthographic() -> Self {
        Self::new(Projection::Orthographic { depth: 2000.0 })
    }

    pub fn perspective() -> Self {
        Self::new(Projection::Perspective {
            fov: std::f32::consts::FRAC_PI_4,
            near: 1.0,
            far: 2000.0,
        })
    }

    pub fn oblique() -> Self {
        Self::new(Projection::Oblique {
            theta: std::f32::consts::FRAC_PI_4,
            phi: std::f32::consts::FRAC_PI_4,
            depth: 2000.0,
        })
    }

    pub fn mode(&self) -> ProjectionMode {
        self.projection.mode()
    }

    /// Restore the home view: zero rotation/translation, zoom 1
    pub fn reset(&mut self) {
        self.rotation = Vector3::zeros();
        self.translation = Vector3::zeros();
        self.zoom = 1.0;
    }

    /// Build the projection matrix for the current canvas dimensions.
    /// Valid until the next parameter change.
    pub fn projection_matrix(&self, width: f32, height: f32) -> Matrix4<f32> {
        match self.projection {
            Projection::Orthographic { depth } => orthographic(width, height, depth),
            Projection::Perspective { fov, near, far } => {
                perspective(fov, width / height, near, far)
            }
            Projection::Oblique { theta, phi, depth } => {
                oblique_shear(theta, phi) * orthographic(width, height, depth)
            }
        }
    }

    /// Build the view matrix as the inverse of the camera placement
    pub fn view_matrix(&self) -> Matrix4<f32> {
        let t = self.translation;
        let placement = match self.projection {
            Projection::Orthographic { .. } => {
                self.rotation_matrix()
                    * self.zoom_scaling()
                    * Transform::translation(t.x, t.y, t.z)
            }
            // Only y-axis camera rotation participates here; the x/z fields
            // are tracked but unused (see DESIGN.md).
            Projection::Perspective { .. } => {
                Transform::rotation_y(self.rotation.y)
                    * Transform::translation(t.x, t.y, t.z + self.zoom * 100.0)
            }
            Projection::Oblique { .. } => {
                self.rotation_matrix()
                    * self.zoom_scaling()
                    * Transform::translation(t.x, t.y, t.z + self.zoom)
            }
        };
        Transform::inverse(&placement)
    }

    fn rotation_matrix(&self) -> Matrix4<f32> {
        Transform::rotation_x(self.rotation.x)
            * Transform::rotation_y(self.rotation.y)
            * Transform::rotation_z(self.rotation.z)
    }

    fn zoom_scaling(&self) -> Matrix4<f32> {
        let s = 1.0 / self.zoom;
        Transform::scaling(s, s, s)
    }
}

/// Box map: x in [0, w] to [-1, 1], y in [0, h] to [1, -1] (y flipped),
/// z in [-d/2, d/2] to [-1, 1]
fn orthographic(width: f32, height: f32, depth: f32) -> Matrix4<f32> {
    Matrix4::new(
        2.0 / width, 0.0, 0.0, -1.0,
        0.0, -2.0 / height, 0.0, 1.0,
        0.0, 0.0, 2.0 / depth, 0.0,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Standard f = cot(fov/2) construction with near/far negated to match a
/// right-handed, camera-looking-down-negative-z convention
fn perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Matrix4<f32> {
    let f = 1.0 / (fov / 2.0).tan();
    let n = -near;
    let fz = -far;
    let range_inv = 1.0 / (n - fz);
    Matrix4::new(
        f / aspect, 0.0, 0.0, 0.0,
        0.0, f, 0.0, 0.0,
        0.0, 0.0, (n + fz) * range_inv, 2.0 * n * fz * range_inv,
        0.0, 0.0, -1.0, 0.0,
    )
}

/// Shear x and y by z; at theta = phi = 90 degrees the shear vanishes and the
/// composition reduces to the plain orthographic map
fn oblique_shear(theta: f32, phi: f32) -> Matrix4<f32> {
    let shear_x = -1.0 / (theta + SHEAR_EPSILON).tan();
    let shear_y = -1.0 / (phi + SHEAR_EPSILON).tan();
    Matrix4::new(
        1.0, 0.0, shear_x, 0.0,
        0.0, 1.0, shear_y, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    )
}

//! Data-driven shape: geometry plus transform state plus embedded cameras

use nalgebra::Matrix4;

use crate::camera::{Camera, ProjectionMode};
use crate::geometry::{Geometry, Vertex};
use crate::transform::{Transform, TransformState};

/// A renderable shape. One camera instance is embedded per projection mode so
/// switching modes preserves each camera's own rotation/translation/zoom.
#[derive(Debug, Clone)]
pub struct Shape {
    pub name: String,
    pub geometry: Geometry,
    pub state: TransformState,
    /// Lambertian shading toggle
    pub shading: bool,
    mode: ProjectionMode,
    orthographic: Camera,
    perspective: Camera,
    oblique: Camera,
}

impl Shape {
    pub fn new(name: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            name: name.into(),
            geometry,
            state: TransformState::new(),
            shading: false,
            mode: ProjectionMode::Orthographic,
            orthographic: Camera::orthographic(),
            perspective: Camera::perspective(),
            oblique: Camera::oblique(),
        }
    }

    pub fn mode(&self) -> ProjectionMode {
        self.mode
    }

    /// Switch the active camera. Direct assignment; the other cameras keep
    /// their stored parameters.
    pub fn set_mode(&mut self, mode: ProjectionMode) {
        self.mode = mode;
    }

    /// The active camera
    pub fn camera(&self) -> &Camera {
        self.camera_for(self.mode)
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        self.camera_for_mut(self.mode)
    }

    pub fn camera_for(&self, mode: ProjectionMode) -> &Camera {
        match mode {
            ProjectionMode::Orthographic => &self.orthographic,
            ProjectionMode::Perspective => &self.perspective,
            ProjectionMode::Oblique => &self.oblique,
        }
    }

    pub fn camera_for_mut(&mut self, mode: ProjectionMode) -> &mut Camera {
        match mode {
            ProjectionMode::Orthographic => &mut self.orthographic,
            ProjectionMode::Perspective => &mut self.perspective,
            ProjectionMode::Oblique => &mut self.oblique,
        }
    }

    /// Model matrix about the shape's pivot
    pub fn model_matrix(&self) -> Matrix4<f32> {
        Transform::model_matrix(&self.state, &self.geometry.center)
    }

    /// View matrix of the active camera
    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.camera().view_matrix()
    }

    /// The single per-draw matrix:
    /// projection(mode) * view(mode) * model, recomputed from the current
    /// canvas dimensions and camera parameters on every call
    pub fn render_matrix(&self, width: f32, height: f32) -> Matrix4<f32> {
        let camera = self.camera();
        let projection = camera.projection_matrix(width, height);
        let view = camera.view_matrix();
        projection * view * self.model_matrix()
    }

    /// Vertices carried into world space by the current model matrix
    pub fn transformed_vertices(&self) -> Vec<Vertex> {
        let model = self.model_matrix();
        self.geometry
            .vertices
            .iter()
            .map(|v| Vertex::new(Transform::matvec(&model, &v.position), v.color))
            .collect()
    }

    /// Restore translation (0,0,0), rotation (0,0,0), scale (1,1,1) and the
    /// home view of all three embedded cameras
    pub fn reset_params(&mut self) {
        self.state.reset();
        self.orthographic.reset();
        self.perspective.reset();
        self.oblique.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{position, Color, Geometry};
    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector3, Vector4};

    fn unit_quad() -> Geometry {
        let mut geometry = Geometry::new(Point3::new(0.5, 0.5, 0.0));
        geometry.push_quad(
            position(0.0, 0.0, 0.0),
            position(1.0, 0.0, 0.0),
            position(1.0, 1.0, 0.0),
            position(0.0, 1.0, 0.0),
            Color::new(0.0, 1.0, 0.0, 1.0),
        );
        geometry
    }

    #[test]
    fn test_rest_pose_leaves_vertices_unchanged() {
        let shape = Shape::new("quad", unit_quad());
        let transformed = shape.transformed_vertices();
        for (before, after) in shape.geometry.vertices.iter().zip(&transformed) {
            assert!((before.position - after.position).norm() < 1e-6);
        }
    }

    #[test]
    fn test_translation_carries_vertices() {
        let mut shape = Shape::new("quad", unit_quad());
        shape.state.translate(10.0, -5.0, 2.0);
        let moved = shape.transformed_vertices();
        let expected = shape.geometry.vertices[0].position + Vector4::new(10.0, -5.0, 2.0, 0.0);
        assert!((moved[0].position - expected).norm() < 1e-5);
    }

    #[test]
    fn test_mode_switch_preserves_camera_parameters() {
        let mut shape = Shape::new("quad", unit_quad());

        shape.camera_mut().rotation.y = 0.7;
        shape.camera_mut().translation.x = 12.0;
        shape.camera_mut().zoom = 2.5;
        let saved = shape.camera().clone();

        shape.set_mode(ProjectionMode::Perspective);
        shape.camera_mut().zoom = 9.0;
        shape.set_mode(ProjectionMode::Orthographic);

        assert_eq!(*shape.camera(), saved);
    }

    #[test]
    fn test_reset_params_restores_defaults() {
        let mut shape = Shape::new("quad", unit_quad());
        shape.state.rotate(0.5, 0.5, 0.5);
        shape.state.translate(3.0, 4.0, 5.0);
        shape.state.scale_by(2.0);
        shape.set_mode(ProjectionMode::Oblique);
        for mode in [
            ProjectionMode::Orthographic,
            ProjectionMode::Perspective,
            ProjectionMode::Oblique,
        ] {
            shape.camera_for_mut(mode).zoom = 4.0;
        }

        shape.reset_params();

        assert_eq!(shape.state.translation, Vector3::zeros());
        assert_eq!(shape.state.rotation, Vector3::zeros());
        assert_eq!(shape.state.scale, Vector3::new(1.0, 1.0, 1.0));
        for mode in [
            ProjectionMode::Orthographic,
            ProjectionMode::Perspective,
            ProjectionMode::Oblique,
        ] {
            assert_relative_eq!(shape.camera_for(mode).zoom, 1.0, epsilon = 1e-6);
        }
        // The active mode itself is UI state and survives a reset
        assert_eq!(shape.mode(), ProjectionMode::Oblique);
    }

    #[test]
    fn test_render_matrix_at_home_equals_projection() {
        let shape = Shape::new("quad", unit_quad());
        let camera = shape.camera();
        let expected = camera.projection_matrix(800.0, 600.0);
        let got = shape.render_matrix(800.0, 600.0);
        assert!((got - expected).norm() < 1e-5);
    }
}

//! 4x4 homogeneous transform construction and composition

use nalgebra::{Matrix4, Point3, Vector3, Vector4};

/// Per-shape transform state (mutated in place by UI input)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    /// Translation along each axis
    pub translation: Vector3<f32>,
    /// Rotation around each axis (in radians)
    pub rotation: Vector3<f32>,
    /// Per-axis scale factors
    pub scale: Vector3<f32>,
}

impl TransformState {
    pub fn new() -> Self {
        Self {
            translation: Vector3::zeros(),
            rotation: Vector3::zeros(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// Restore translation and rotation to zero, scale to one
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.rotation.x += dx;
        self.rotation.y += dy;
        self.rotation.z += dz;
    }

    /// Translate by delta amounts
    pub fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.translation.x += dx;
        self.translation.y += dy;
        self.translation.z += dz;
    }

    /// Multiply the scale factors uniformly
    pub fn scale_by(&mut self, factor: f32) {
        self.scale *= factor;
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self::new()
    }
}

/// Transform builder for 4x4 column-major matrices
pub struct Transform;

impl Transform {
    /// Create a translation matrix
    pub fn translation(tx: f32, ty: f32, tz: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(tx, ty, tz))
    }

    /// Create a scaling matrix
    pub fn scaling(sx: f32, sy: f32, sz: f32) -> Matrix4<f32> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
    }

    /// Create a rotation matrix around the x axis (theta in radians)
    pub fn rotation_x(theta: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::new(theta, 0.0, 0.0))
    }

    /// Create a rotation matrix around the y axis (theta in radians)
    pub fn rotation_y(theta: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::new(0.0, theta, 0.0))
    }

    /// Create a rotation matrix around the z axis (theta in radians)
    pub fn rotation_z(theta: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::new(0.0, 0.0, theta))
    }

    /// Matrix product. Not commutative; callers own the composition order.
    pub fn multiply(a: &Matrix4<f32>, b: &Matrix4<f32>) -> Matrix4<f32> {
        a * b
    }

    /// General 4x4 inverse. Singular input falls back to the identity;
    /// callers assume well-conditioned matrices and never check.
    pub fn inverse(m: &Matrix4<f32>) -> Matrix4<f32> {
        m.try_inverse().unwrap_or_else(Matrix4::identity)
    }

    pub fn transpose(m: &Matrix4<f32>) -> Matrix4<f32> {
        m.transpose()
    }

    /// Apply a matrix to a homogeneous 4-vector. No perspective divide;
    /// callers divide by w where needed.
    pub fn matvec(m: &Matrix4<f32>, v: &Vector4<f32>) -> Vector4<f32> {
        m * v
    }

    /// Unit-length 3-vector
    pub fn normalize(v: &Vector3<f32>) -> Vector3<f32> {
        v.normalize()
    }

    /// Build a camera-to-world matrix from eye position, look-at target and
    /// up vector using the cross-product orthonormal-basis construction.
    pub fn look_at(eye: &Point3<f32>, target: &Point3<f32>, up: &Vector3<f32>) -> Matrix4<f32> {
        let forward = Self::normalize(&(eye - target));
        let right = Self::normalize(&up.cross(&forward));
        let new_up = forward.cross(&right);

        Matrix4::new(
            right.x, new_up.x, forward.x, eye.x,
            right.y, new_up.y, forward.y, eye.y,
            right.z, new_up.z, forward.z, eye.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Compose a model matrix about a pivot point:
    /// toCenter * translate * rotateX * rotateY * rotateZ * scale * toOrigin
    pub fn model_matrix(state: &TransformState, center: &Point3<f32>) -> Matrix4<f32> {
        let to_center = Self::translation(center.x, center.y, center.z);
        let to_origin = Self::translation(-center.x, -center.y, -center.z);
        let translate = Self::translation(
            state.translation.x,
            state.translation.y,
            state.translation.z,
        );
        let rx = Self::rotation_x(state.rotation.x);
        let ry = Self::rotation_y(state.rotation.y);
        let rz = Self::rotation_z(state.rotation.z);
        let scale = Self::scaling(state.scale.x, state.scale.y, state.scale.z);

        to_center * translate * rx * ry * rz * scale * to_origin
    }

    /// Normal matrix for carrying normals into view space:
    /// transpose of the inverse of view * model
    pub fn normal_matrix(view_model: &Matrix4<f32>) -> Matrix4<f32> {
        Self::transpose(&Self::inverse(view_model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_near_identity(m: &Matrix4<f32>) {
        assert!((m - Matrix4::identity()).norm() < 1e-5, "not identity: {}", m);
    }

    #[test]
    fn test_rotation_inverts_with_negated_angle() {
        for theta in [0.0, 0.3, 1.2, -2.5, std::f32::consts::PI] {
            assert_near_identity(&(Transform::rotation_x(theta) * Transform::rotation_x(-theta)));
            assert_near_identity(&(Transform::rotation_y(theta) * Transform::rotation_y(-theta)));
            assert_near_identity(&(Transform::rotation_z(theta) * Transform::rotation_z(-theta)));
        }
    }

    #[test]
    fn test_scaling_inverts_with_reciprocal() {
        let s = Transform::scaling(2.0, 4.0, 0.5);
        let inv = Transform::scaling(0.5, 0.25, 2.0);
        assert_near_identity(&(s * inv));
    }

    #[test]
    fn test_translation_moves_origin_exactly() {
        let m = Transform::translation(3.0, -7.0, 11.0);
        let v = Transform::matvec(&m, &Vector4::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(v, Vector4::new(3.0, -7.0, 11.0, 1.0));
    }

    #[test]
    fn test_inverse_round_trips() {
        let m = Transform::translation(1.0, 2.0, 3.0)
            * Transform::rotation_y(0.7)
            * Transform::scaling(2.0, 2.0, 2.0);
        assert_near_identity(&(m * Transform::inverse(&m)));
        assert!((Transform::inverse(&Transform::inverse(&m)) - m).norm() < 1e-4);
    }

    #[test]
    fn test_inverse_of_singular_is_identity() {
        let singular = Transform::scaling(1.0, 1.0, 0.0);
        assert_eq!(Transform::inverse(&singular), Matrix4::identity());
    }

    #[test]
    fn test_rest_state_model_matrix_is_identity() {
        let state = TransformState::new();
        let center = Point3::new(42.0, -3.0, 8.0);
        assert_near_identity(&Transform::model_matrix(&state, &center));
    }

    #[test]
    fn test_model_matrix_rotates_about_center() {
        // The pivot itself must stay fixed under pure rotation
        let mut state = TransformState::new();
        state.rotation = Vector3::new(0.4, 1.1, -0.6);
        let center = Point3::new(5.0, 6.0, 7.0);
        let m = Transform::model_matrix(&state, &center);
        let moved = Transform::matvec(&m, &Vector4::new(5.0, 6.0, 7.0, 1.0));
        assert_relative_eq!(moved.x, 5.0, epsilon = 1e-4);
        assert_relative_eq!(moved.y, 6.0, epsilon = 1e-4);
        assert_relative_eq!(moved.z, 7.0, epsilon = 1e-4);
    }

    #[test]
    fn test_look_at_maps_eye_to_local_origin() {
        let eye = Point3::new(3.0, 4.0, 5.0);
        let target = Point3::new(3.0, 4.0, 0.0);
        let up = Vector3::new(0.0, 1.0, 0.0);
        let camera_to_world = Transform::look_at(&eye, &target, &up);
        let view = Transform::inverse(&camera_to_world);
        let local = Transform::matvec(&view, &Vector4::new(eye.x, eye.y, eye.z, 1.0));
        assert!(local.xyz().norm() < 1e-4);
        assert_relative_eq!(local.w, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_transform_state_mutators() {
        let mut state = TransformState::new();
        state.rotate(0.1, 0.2, 0.3);
        state.translate(1.0, 2.0, 3.0);
        state.scale_by(2.0);
        assert_relative_eq!(state.rotation.y, 0.2, epsilon = 1e-6);
        assert_relative_eq!(state.translation.z, 3.0, epsilon = 1e-6);
        assert_relative_eq!(state.scale.x, 2.0, epsilon = 1e-6);

        state.reset();
        assert_eq!(state, TransformState::new());
    }
}

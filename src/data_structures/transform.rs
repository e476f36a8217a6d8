//! Per-draw model transform.
//!
//! A [`Transform`] is scale, per-axis rotation in degrees and a position. It
//! is turned into a single model matrix right before a draw and never kept
//! around afterwards.

use cgmath::{Deg, Matrix4, Rad, Vector3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale: [f32; 3],
    /// Rotation about X, Y and Z in degrees.
    pub rotation: [f32; 3],
    pub position: [f32; 3],
}

impl Transform {
    pub const IDENTITY: Self = Self::new([1.0, 1.0, 1.0], [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]);

    pub const fn new(scale: [f32; 3], rotation: [f32; 3], position: [f32; 3]) -> Self {
        Self {
            scale,
            rotation,
            position,
        }
    }

    /// Compose the model matrix as `T · Rx · Ry · Rz · S`.
    ///
    /// The order matters: reading right to left the mesh is scaled, rotated
    /// about Z, then Y, then X, and finally moved into place.
    pub fn to_matrix(&self) -> Matrix4<f32> {
        let [sx, sy, sz] = self.scale;
        let [rx, ry, rz] = self.rotation.map(|deg| Rad::from(Deg(deg)));

        Matrix4::from_translation(Vector3::from(self.position))
            * Matrix4::from_angle_x(rx)
            * Matrix4::from_angle_y(ry)
            * Matrix4::from_angle_z(rz)
            * Matrix4::from_nonuniform_scale(sx, sy, sz)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Vector4;

    use super::*;

    fn apply(t: &Transform, p: [f32; 3]) -> Vector4<f32> {
        t.to_matrix() * Vector4::new(p[0], p[1], p[2], 1.0)
    }

    fn assert_close(actual: Vector4<f32>, expected: Vector4<f32>, epsilon: f32) {
        let actual: [f32; 4] = actual.into();
        let expected: [f32; 4] = expected.into();
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert!((a - e).abs() <= epsilon, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn scales_then_rotates_then_translates() {
        let t = Transform::new([2.0, 1.0, 1.0], [0.0, 0.0, 90.0], [5.0, 0.0, 0.0]);
        let p = apply(&t, [1.0, 0.0, 0.0]);
        assert_close(p, Vector4::new(5.0, 2.0, 0.0, 1.0), 1e-5);
    }

    #[test]
    fn z_rotation_is_applied_before_x_rotation() {
        // Rz(90) takes +X to +Y, then Rx(90) takes +Y to +Z.
        let t = Transform::new([1.0, 1.0, 1.0], [90.0, 0.0, 90.0], [0.0, 0.0, 0.0]);
        let p = apply(&t, [1.0, 0.0, 0.0]);
        assert_close(p, Vector4::new(0.0, 0.0, 1.0, 1.0), 1e-5);

        // The opposite order would have left the point on +Y.
        let reversed = Matrix4::from_angle_z(Deg(90.0)) * Matrix4::from_angle_x(Deg(90.0));
        let q = reversed * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert_close(q, Vector4::new(0.0, 1.0, 0.0, 1.0), 1e-5);
    }

    #[test]
    fn y_rotation_follows_right_hand_rule() {
        let t = Transform::new([1.0, 1.0, 1.0], [0.0, 90.0, 0.0], [0.0, 0.0, 0.0]);
        let p = apply(&t, [0.0, 0.0, 1.0]);
        assert_close(p, Vector4::new(1.0, 0.0, 0.0, 1.0), 1e-5);
    }

    #[test]
    fn identity_leaves_points_alone() {
        let p = apply(&Transform::default(), [1.5, -2.0, 3.25]);
        assert_close(p, Vector4::new(1.5, -2.0, 3.25, 1.0), 1e-6);
    }
}

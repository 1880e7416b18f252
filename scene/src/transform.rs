use cgmath::{EuclideanSpace, Matrix4, Quaternion, Rotation, Vector3};

use crate::common::transform_ops::{
    apply_scale, compose_rotation, compose_trs, normalize_or_zero, rotate_position_about_pivot,
};

/// A local transform expressed as translation, rotation and scale.
///
/// The matrix form is `T * R * S`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub translation: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vector3 { x: 0.0, y: 0.0, z: 0.0 },
        rotation: Quaternion {
            s: 1.0,
            v: Vector3 { x: 0.0, y: 0.0, z: 0.0 },
        },
        scale: Vector3 { x: 1.0, y: 1.0, z: 1.0 },
    };

    pub fn new(translation: Vector3<f32>, rotation: Quaternion<f32>, scale: Vector3<f32>) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    pub fn from_translation(translation: Vector3<f32>) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn from_rotation(rotation: Quaternion<f32>) -> Self {
        Self {
            rotation,
            ..Self::IDENTITY
        }
    }

    pub fn from_scale(scale: Vector3<f32>) -> Self {
        Self {
            scale,
            ..Self::IDENTITY
        }
    }

    /// Computes the local matrix.
    pub fn matrix(&self) -> Matrix4<f32> {
        compose_trs(self.translation, self.rotation, self.scale)
    }

    /// Applies `rotation` in the local frame (`current * rotation`).
    pub fn rotated(&self, rotation: Quaternion<f32>) -> Self {
        Self {
            rotation: self.rotation * rotation,
            ..*self
        }
    }

    /// Rotates translation and orientation around a pivot in the parent's
    /// frame.
    pub fn rotated_about_pivot(
        &self,
        pivot: cgmath::Point3<f32>,
        rotation: Quaternion<f32>,
    ) -> Self {
        let position = cgmath::Point3::from_vec(self.translation);
        let moved = rotate_position_about_pivot(position, pivot, rotation);
        Self {
            translation: Vector3::new(moved.x, moved.y, moved.z),
            rotation: compose_rotation(self.rotation, rotation),
            scale: self.scale,
        }
    }

    pub fn scaled_by(&self, factor: Vector3<f32>) -> Self {
        Self {
            scale: apply_scale(self.scale, factor),
            ..*self
        }
    }

    /// Local forward direction (-Z rotated by the orientation).
    pub fn forward(&self) -> Vector3<f32> {
        normalize_or_zero(self.rotation.rotate_vector(Vector3::new(0.0, 0.0, -1.0)))
    }

    pub fn up(&self) -> Vector3<f32> {
        normalize_or_zero(self.rotation.rotate_vector(Vector3::unit_y()))
    }

    pub fn right(&self) -> Vector3<f32> {
        normalize_or_zero(self.rotation.rotate_vector(Vector3::unit_x()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::EPSILON;
    use cgmath::{Deg, InnerSpace, Point3, Rotation3, SquareMatrix};

    fn assert_matrix_eq(actual: Matrix4<f32>, expected: Matrix4<f32>) {
        for i in 0..4 {
            for j in 0..4 {
                assert!(
                    (actual[i][j] - expected[i][j]).abs() < EPSILON,
                    "element [{i}][{j}] = {}, expected {}",
                    actual[i][j],
                    expected[i][j]
                );
            }
        }
    }

    #[test]
    fn test_identity_matrix() {
        assert_matrix_eq(Transform::IDENTITY.matrix(), Matrix4::identity());
        assert_eq!(Transform::default(), Transform::IDENTITY);
    }

    #[test]
    fn test_trs_composition_order() {
        let t = Transform::new(
            Vector3::new(10.0, 20.0, 30.0),
            Quaternion::from_angle_y(Deg(45.0)),
            Vector3::new(2.0, 2.0, 2.0),
        );

        let expected = Matrix4::from_translation(t.translation)
            * Matrix4::from(t.rotation)
            * Matrix4::from_nonuniform_scale(2.0, 2.0, 2.0);

        assert_matrix_eq(t.matrix(), expected);
    }

    #[test]
    fn test_rotated_is_local() {
        let t = Transform::from_rotation(Quaternion::from_angle_z(Deg(90.0)))
            .rotated(Quaternion::from_angle_x(Deg(90.0)));

        // Local X rotation first: -Z forward becomes +Y, then Z rotation maps +Y to -X
        let forward = t.forward();
        assert!((forward - Vector3::new(-1.0, 0.0, 0.0)).magnitude() < EPSILON, "{:?}", forward);
    }

    #[test]
    fn test_rotated_about_pivot() {
        let t = Transform::from_translation(Vector3::new(2.0, 0.0, 0.0))
            .rotated_about_pivot(Point3::new(1.0, 0.0, 0.0), Quaternion::from_angle_z(Deg(90.0)));

        assert!((t.translation - Vector3::new(1.0, 1.0, 0.0)).magnitude() < EPSILON);
        assert!((t.right() - Vector3::new(0.0, 1.0, 0.0)).magnitude() < EPSILON);
    }

    #[test]
    fn test_scaled_by() {
        let t = Transform::from_scale(Vector3::new(2.0, 3.0, 4.0))
            .scaled_by(Vector3::new(0.5, 1.0, 2.0));
        assert_eq!(t.scale, Vector3::new(1.0, 3.0, 8.0));
    }

    #[test]
    fn test_default_axes() {
        let t = Transform::IDENTITY;
        assert_eq!(t.forward(), Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(t.up(), Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(t.right(), Vector3::new(1.0, 0.0, 0.0));
    }
}

//! Matrix and quaternion helpers shared by the scene graph.
//!
//! Everything here is a pure function over cgmath types: composing local
//! matrices from translation/rotation/scale, reading direction vectors back
//! out of a matrix, and a few rotation utilities used by node transforms.

use cgmath::{
    InnerSpace, Matrix4, Point3, Quaternion, Rotation, Rotation3, SquareMatrix, Vector3, Vector4,
};

use crate::EPSILON;

// =============================================================================
// Matrix Composition
// =============================================================================

/// Builds the local matrix `T * R * S`.
///
/// Scale is applied first, then rotation, then translation.
pub fn compose_trs(
    translation: Vector3<f32>,
    rotation: Quaternion<f32>,
    scale: Vector3<f32>,
) -> Matrix4<f32> {
    Matrix4::from_translation(translation)
        * Matrix4::from(rotation)
        * Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z)
}

/// Returns the translation column of an affine matrix.
pub fn matrix_translation(matrix: &Matrix4<f32>) -> Vector3<f32> {
    matrix.w.truncate()
}

/// Returns the length of each basis column, i.e. the scale baked into the
/// matrix.
pub fn matrix_scale(matrix: &Matrix4<f32>) -> Vector3<f32> {
    Vector3::new(
        matrix.x.truncate().magnitude(),
        matrix.y.truncate().magnitude(),
        matrix.z.truncate().magnitude(),
    )
}

/// Inverts an affine matrix, falling back to identity when it is singular.
pub fn invert_or_identity(matrix: &Matrix4<f32>) -> Matrix4<f32> {
    matrix.invert().unwrap_or_else(Matrix4::identity)
}

// =============================================================================
// Direction Vectors
// =============================================================================
//
// Forward is -Z, matching a right-handed camera looking down its negative Z.

/// Forward direction (-Z) of a matrix, transformed as a direction.
pub fn matrix_forward(matrix: &Matrix4<f32>) -> Vector3<f32> {
    direction(matrix, Vector3::new(0.0, 0.0, -1.0))
}

/// Back direction (+Z) of a matrix.
pub fn matrix_back(matrix: &Matrix4<f32>) -> Vector3<f32> {
    direction(matrix, Vector3::unit_z())
}

/// Up direction (+Y) of a matrix.
pub fn matrix_up(matrix: &Matrix4<f32>) -> Vector3<f32> {
    direction(matrix, Vector3::unit_y())
}

/// Right direction (+X) of a matrix.
pub fn matrix_right(matrix: &Matrix4<f32>) -> Vector3<f32> {
    direction(matrix, Vector3::unit_x())
}

/// Transforms a direction by the matrix and normalizes it.
///
/// A degenerate result (e.g. from a zero scale) is returned unnormalized.
pub fn direction(matrix: &Matrix4<f32>, axis: Vector3<f32>) -> Vector3<f32> {
    let v = (*matrix * Vector4::new(axis.x, axis.y, axis.z, 0.0)).truncate();
    normalize_or_zero(v)
}

/// Normalizes a vector, leaving near-zero vectors untouched.
pub fn normalize_or_zero(v: Vector3<f32>) -> Vector3<f32> {
    if v.magnitude2() > EPSILON * EPSILON {
        v.normalize()
    } else {
        v
    }
}

// =============================================================================
// Rotation Utilities
// =============================================================================

/// Rotates a position around a pivot point.
pub fn rotate_position_about_pivot(
    position: Point3<f32>,
    pivot: Point3<f32>,
    rotation: Quaternion<f32>,
) -> Point3<f32> {
    pivot + rotation.rotate_vector(position - pivot)
}

/// Applies `rotation` on top of `current` in the parent's frame
/// (`rotation * current`).
pub fn compose_rotation(current: Quaternion<f32>, rotation: Quaternion<f32>) -> Quaternion<f32> {
    rotation * current
}

/// Creates a rotation from an axis and angle in radians.
///
/// A near-zero axis yields the identity rotation instead of NaNs.
pub fn quaternion_from_axis_angle_safe(axis: Vector3<f32>, angle: f32) -> Quaternion<f32> {
    if axis.magnitude2() > EPSILON {
        Quaternion::from_axis_angle(axis.normalize(), cgmath::Rad(angle))
    } else {
        Quaternion::new(1.0, 0.0, 0.0, 0.0)
    }
}

/// Component-wise product of two scale vectors.
pub fn apply_scale(current: Vector3<f32>, factor: Vector3<f32>) -> Vector3<f32> {
    Vector3::new(current.x * factor.x, current.y * factor.y, current.z * factor.z)
}

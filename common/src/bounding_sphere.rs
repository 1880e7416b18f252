use cgmath::{InnerSpace, Matrix4, MetricSpace, Point3, Transform};

use crate::BoundingBox;

/// A bounding sphere in 3D space.
///
/// A sphere with a zero radius is empty, regardless of where its center is.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoundingSphere {
    pub center: Point3<f32>,
    pub radius: f32,
}

impl Default for BoundingSphere {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl BoundingSphere {
    /// The canonical empty sphere.
    pub const EMPTY: Self = Self {
        center: Point3 { x: 0.0, y: 0.0, z: 0.0 },
        radius: 0.0,
    };

    pub fn new(center: Point3<f32>, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Creates the sphere circumscribing the given box.
    pub fn from_box(bounds: &BoundingBox) -> Self {
        let center = bounds.center();
        Self {
            center,
            radius: center.distance(bounds.max),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.radius == 0.0
    }

    /// Transforms the sphere in place by an affine matrix.
    ///
    /// The center is transformed as a point and the radius is scaled by the
    /// largest axis scale of the matrix, so the result stays conservative
    /// under non-uniform scale.
    pub fn transform(&mut self, matrix: &Matrix4<f32>) {
        self.center = matrix.transform_point(self.center);

        let scale = matrix
            .x
            .truncate()
            .magnitude()
            .max(matrix.y.truncate().magnitude())
            .max(matrix.z.truncate().magnitude());
        self.radius *= scale;
    }

    /// Returns a transformed copy of the sphere.
    pub fn transformed(&self, matrix: &Matrix4<f32>) -> Self {
        let mut copy = *self;
        copy.transform(matrix);
        copy
    }

    /// Grows the sphere to contain `other`.
    ///
    /// Merging an empty sphere is a no-op and merging into an empty sphere
    /// replaces it.
    pub fn merge(&mut self, other: &BoundingSphere) {
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            *self = *other;
            return;
        }

        let offset = self.center - other.center;
        let d = offset.magnitude();

        // One sphere already contains the other
        if d <= other.radius - self.radius {
            *self = *other;
            return;
        }
        if d <= self.radius - other.radius {
            return;
        }

        let radius = (self.radius + other.radius + d) * 0.5;
        let direction = offset / d;
        self.center = other.center + direction * (radius - other.radius);
        self.radius = radius;
    }

    /// Grows the sphere to contain the given box, via the box's
    /// circumscribed sphere.
    pub fn merge_box(&mut self, bounds: &BoundingBox) {
        if bounds.is_empty() {
            return;
        }
        self.merge(&Self::from_box(bounds));
    }

    /// Tests if a point lies inside or on the sphere.
    pub fn contains_point(&self, point: Point3<f32>) -> bool {
        self.center.distance2(point) <= self.radius * self.radius
    }

    /// Tests if this sphere intersects another sphere.
    pub fn intersects(&self, other: &BoundingSphere) -> bool {
        self.center.distance(other.center) <= self.radius + other.radius
    }
}

use cgmath::{EuclideanSpace, Matrix4, Point3, Transform};

use crate::BoundingSphere;

/// An axis-aligned bounding box in 3D space.
///
/// A box whose `min` equals its `max` is empty. The default (zeroed) box is
/// empty, which is what nodes hand back when they have nothing to report.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoundingBox {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl BoundingBox {
    /// The canonical empty box.
    pub const EMPTY: Self = Self {
        min: Point3 { x: 0.0, y: 0.0, z: 0.0 },
        max: Point3 { x: 0.0, y: 0.0, z: 0.0 },
    };

    /// Creates a new box from min and max points.
    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        Self { min, max }
    }

    /// Creates a box that encompasses all the given points.
    /// Returns None if the points slice is empty.
    pub fn from_points(points: &[Point3<f32>]) -> Option<Self> {
        let (first, rest) = points.split_first()?;

        let mut bounds = Self::new(*first, *first);
        for point in rest {
            bounds.expand(*point);
        }

        Some(bounds)
    }

    /// Creates the smallest box that encloses the given sphere.
    pub fn from_sphere(sphere: &BoundingSphere) -> Self {
        let r = sphere.radius;
        let c = sphere.center;
        Self {
            min: Point3::new(c.x - r, c.y - r, c.z - r),
            max: Point3::new(c.x + r, c.y + r, c.z + r),
        }
    }

    /// Returns true when the box encloses no volume and no offset point,
    /// i.e. `min == max` on every axis.
    pub fn is_empty(&self) -> bool {
        self.min == self.max
    }

    /// Returns the 8 corner points of the box.
    pub fn corners(&self) -> [Point3<f32>; 8] {
        [
            Point3::new(self.min.x, self.min.y, self.min.z),
            Point3::new(self.max.x, self.min.y, self.min.z),
            Point3::new(self.min.x, self.max.y, self.min.z),
            Point3::new(self.max.x, self.max.y, self.min.z),
            Point3::new(self.min.x, self.min.y, self.max.z),
            Point3::new(self.max.x, self.min.y, self.max.z),
            Point3::new(self.min.x, self.max.y, self.max.z),
            Point3::new(self.max.x, self.max.y, self.max.z),
        ]
    }

    /// Transforms the box in place by an affine matrix.
    ///
    /// All 8 corners are transformed and the result is re-fitted to the axes,
    /// so rotation grows the box rather than skewing it.
    pub fn transform(&mut self, matrix: &Matrix4<f32>) {
        let corners = self.corners();
        let first = matrix.transform_point(corners[0]);

        let mut fitted = Self::new(first, first);
        for corner in &corners[1..] {
            fitted.expand(matrix.transform_point(*corner));
        }

        *self = fitted;
    }

    /// Returns a transformed copy of the box.
    pub fn transformed(&self, matrix: &Matrix4<f32>) -> Self {
        let mut copy = *self;
        copy.transform(matrix);
        copy
    }

    /// Grows the box to include the given point.
    pub fn expand(&mut self, point: Point3<f32>) {
        self.min = Point3::new(
            self.min.x.min(point.x),
            self.min.y.min(point.y),
            self.min.z.min(point.z),
        );
        self.max = Point3::new(
            self.max.x.max(point.x),
            self.max.y.max(point.y),
            self.max.z.max(point.z),
        );
    }

    /// Grows the box to contain `other`.
    ///
    /// Merging an empty box is a no-op. Merging into an empty box replaces it,
    /// so the result never gets stretched toward the origin.
    pub fn merge(&mut self, other: &BoundingBox) {
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            *self = *other;
            return;
        }

        self.expand(other.min);
        self.expand(other.max);
    }

    /// Grows the box to contain the given sphere.
    pub fn merge_sphere(&mut self, sphere: &BoundingSphere) {
        if sphere.is_empty() {
            return;
        }
        self.merge(&Self::from_sphere(sphere));
    }

    /// Returns the center point of the box.
    pub fn center(&self) -> Point3<f32> {
        self.min.midpoint(self.max)
    }

    /// Returns the size of the box along each axis.
    pub fn size(&self) -> (f32, f32, f32) {
        (
            self.max.x - self.min.x,
            self.max.y - self.min.y,
            self.max.z - self.min.z,
        )
    }

    /// Tests if a point is inside the box (inclusive of boundaries).
    pub fn contains_point(&self, point: Point3<f32>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Tests if this box intersects another box.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}

use cgmath::Matrix4;

use crate::{BoundingBox, BoundingSphere};

/// Which kind of bounding volume a node aggregates, if any.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum BoundsType {
    /// The node does not take part in spatial bounds queries.
    #[default]
    None,
    Box,
    Sphere,
}

/// A bounding volume tagged with its kind.
///
/// `None` carries no payload; queries against it always see an empty volume.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum BoundingVolume {
    #[default]
    None,
    Box(BoundingBox),
    Sphere(BoundingSphere),
}

impl BoundingVolume {
    /// Returns an empty volume of the given kind.
    pub fn empty(kind: BoundsType) -> Self {
        match kind {
            BoundsType::None => Self::None,
            BoundsType::Box => Self::Box(BoundingBox::EMPTY),
            BoundsType::Sphere => Self::Sphere(BoundingSphere::EMPTY),
        }
    }

    pub fn kind(&self) -> BoundsType {
        match self {
            Self::None => BoundsType::None,
            Self::Box(_) => BoundsType::Box,
            Self::Sphere(_) => BoundsType::Sphere,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Box(bounds) => bounds.is_empty(),
            Self::Sphere(sphere) => sphere.is_empty(),
        }
    }

    /// Transforms the payload in place. Empty volumes are left untouched,
    /// since transforming one has no meaningful result.
    pub fn transform(&mut self, matrix: &Matrix4<f32>) {
        if self.is_empty() {
            return;
        }
        match self {
            Self::None => {}
            Self::Box(bounds) => bounds.transform(matrix),
            Self::Sphere(sphere) => sphere.transform(matrix),
        }
    }

    /// Merges another volume into this one, keeping this volume's kind.
    ///
    /// Mixed kinds are merged conservatively: a sphere grows around a box and
    /// a box grows around a sphere. Merging into `None` does nothing.
    pub fn merge(&mut self, other: &BoundingVolume) {
        match (self, other) {
            (_, Self::None) | (Self::None, _) => {}
            (Self::Box(a), Self::Box(b)) => a.merge(b),
            (Self::Box(a), Self::Sphere(b)) => a.merge_sphere(b),
            (Self::Sphere(a), Self::Sphere(b)) => a.merge(b),
            (Self::Sphere(a), Self::Box(b)) => a.merge_box(b),
        }
    }

    /// The box payload, or the canonical empty box for any other kind.
    pub fn as_box(&self) -> BoundingBox {
        match self {
            Self::Box(bounds) => *bounds,
            _ => BoundingBox::EMPTY,
        }
    }

    /// The sphere payload, or the canonical empty sphere for any other kind.
    pub fn as_sphere(&self) -> BoundingSphere {
        match self {
            Self::Sphere(sphere) => *sphere,
            _ => BoundingSphere::EMPTY,
        }
    }
}

impl From<BoundingBox> for BoundingVolume {
    fn from(bounds: BoundingBox) -> Self {
        Self::Box(bounds)
    }
}

impl From<BoundingSphere> for BoundingVolume {
    fn from(sphere: BoundingSphere) -> Self {
        Self::Sphere(sphere)
    }
}

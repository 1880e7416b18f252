use std::cell::Cell;

use cgmath::Point3;

use super::{Attachment, NodeBinding};
use crate::common::{BoundingBox, BoundingSphere, BoundingVolume, BoundsType, RgbaColor};

/// The kind of light and its shape parameters.
///
/// Position and direction are not stored: a light shines from its node's
/// origin along the node's forward (-Z) axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum LightKind {
    /// Parallel rays, like sunlight.
    Directional,
    /// Radiates in all directions out to `range`.
    Point { range: f32 },
    /// A cone of light out to `range`. Angles are in radians.
    Spot {
        range: f32,
        inner_angle: f32,
        outer_angle: f32,
    },
}

/// A light attached to a node.
#[derive(Debug)]
pub struct Light {
    kind: Cell<LightKind>,
    color: Cell<RgbaColor>,
    intensity: Cell<f32>,
    binding: NodeBinding,
}

impl Light {
    pub fn new(kind: LightKind, color: RgbaColor, intensity: f32) -> Self {
        Self {
            kind: Cell::new(kind),
            color: Cell::new(color),
            intensity: Cell::new(intensity),
            binding: NodeBinding::new(),
        }
    }

    pub fn directional(color: RgbaColor) -> Self {
        Self::new(LightKind::Directional, color, 1.0)
    }

    pub fn point(color: RgbaColor, range: f32) -> Self {
        Self::new(LightKind::Point { range }, color, 1.0)
    }

    pub fn spot(color: RgbaColor, range: f32, inner_angle: f32, outer_angle: f32) -> Self {
        Self::new(
            LightKind::Spot {
                range,
                inner_angle,
                outer_angle,
            },
            color,
            1.0,
        )
    }

    /// A copy of the light that is not attached to any node.
    pub fn duplicate(&self) -> Self {
        Self::new(self.kind.get(), self.color.get(), self.intensity.get())
    }

    pub fn kind(&self) -> LightKind {
        self.kind.get()
    }

    pub fn color(&self) -> RgbaColor {
        self.color.get()
    }

    pub fn set_color(&self, color: RgbaColor) {
        self.color.set(color);
    }

    pub fn intensity(&self) -> f32 {
        self.intensity.get()
    }

    pub fn set_intensity(&self, intensity: f32) {
        self.intensity.set(intensity);
    }

    /// Range of a point or spot light; `None` for directional lights.
    pub fn range(&self) -> Option<f32> {
        match self.kind.get() {
            LightKind::Directional => None,
            LightKind::Point { range } | LightKind::Spot { range, .. } => Some(range),
        }
    }

    /// Changes the range of a point or spot light. The owning node's
    /// aggregate bounds are invalidated since point lights contribute to
    /// them. Ignored for directional lights.
    pub fn set_range(&self, new_range: f32) {
        let kind = match self.kind.get() {
            LightKind::Directional => return,
            LightKind::Point { .. } => LightKind::Point { range: new_range },
            LightKind::Spot {
                inner_angle,
                outer_angle,
                ..
            } => LightKind::Spot {
                range: new_range,
                inner_angle,
                outer_angle,
            },
        };
        self.kind.set(kind);

        if let Some(node) = self.node() {
            node.set_bounds_dirty();
        }
    }

    /// Local-space volume lit by the light, for bounds aggregation.
    ///
    /// Only point lights contribute: a sphere of radius `range` around the
    /// node origin, or the cube enclosing it.
    pub(crate) fn local_bounds(&self, kind: BoundsType) -> BoundingVolume {
        let LightKind::Point { range } = self.kind.get() else {
            return BoundingVolume::empty(kind);
        };
        let sphere = BoundingSphere::new(Point3::new(0.0, 0.0, 0.0), range);
        match kind {
            BoundsType::None => BoundingVolume::None,
            BoundsType::Box => BoundingVolume::Box(BoundingBox::from_sphere(&sphere)),
            BoundsType::Sphere => BoundingVolume::Sphere(sphere),
        }
    }
}

impl Attachment for Light {
    fn binding(&self) -> &NodeBinding {
        &self.binding
    }
}

use super::Node;
use crate::common::{BoundingBox, BoundingSphere, BoundingVolume, BoundsType};
use crate::DirtyFlags;

impl Node {
    pub fn bounds_type(&self) -> BoundsType {
        self.bounds.get().kind()
    }

    /// Selects which kind of volume this node aggregates.
    ///
    /// The previous volume is discarded. This node and all of its ancestors
    /// have their bounds marked stale.
    pub fn set_bounds_type(&self, kind: BoundsType) {
        if self.bounds_type() == kind {
            return;
        }
        log::debug!("Node '{}' bounds type set to {:?}", self.id(), kind);

        self.bounds.set(BoundingVolume::empty(kind));
        self.set_bounds_dirty();
    }

    /// Marks the aggregate bounds of this node and every ancestor stale.
    pub fn set_bounds_dirty(&self) {
        self.dirty.set(self.dirty.get() | DirtyFlags::BOUNDS);
        self.mark_ancestors_bounds_dirty();
    }

    /// World-space bounding box of this node and its subtree.
    ///
    /// Returns the empty box unless the bounds type is
    /// [`BoundsType::Box`].
    pub fn bounding_box(&self) -> BoundingBox {
        if self.bounds_type() != BoundsType::Box {
            return BoundingBox::EMPTY;
        }
        self.aggregate_bounds().as_box()
    }

    /// World-space bounding sphere of this node and its subtree.
    ///
    /// Returns the empty sphere unless the bounds type is
    /// [`BoundsType::Sphere`].
    pub fn bounding_sphere(&self) -> BoundingSphere {
        if self.bounds_type() != BoundsType::Sphere {
            return BoundingSphere::EMPTY;
        }
        self.aggregate_bounds().as_sphere()
    }

    /// This node's volume if it is of the given kind, else an empty one.
    fn bounds_of_kind(&self, kind: BoundsType) -> BoundingVolume {
        if self.bounds_type() != kind {
            return BoundingVolume::empty(kind);
        }
        self.aggregate_bounds()
    }

    fn aggregate_bounds(&self) -> BoundingVolume {
        if !self.dirty.get().contains(DirtyFlags::BOUNDS) {
            return self.bounds.get();
        }

        let kind = self.bounds_type();
        let mut volume = BoundingVolume::empty(kind);
        if let Some(model) = self.model() {
            volume.merge(&model.local_bounds(kind));
        }
        if let Some(light) = self.light() {
            volume.merge(&light.local_bounds(kind));
        }
        // Skipped internally for an empty volume
        volume.transform(&self.world_matrix());

        let mut child = self.first_child();
        while let Some(node) = child {
            volume.merge(&node.bounds_of_kind(kind));
            child = node.next_sibling();
        }

        self.bounds.set(volume);
        self.dirty.set(self.dirty.get() - DirtyFlags::BOUNDS);
        volume
    }
}

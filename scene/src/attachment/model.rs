use std::rc::Rc;

use super::{Attachment, NodeBinding};
use crate::common::{BoundingBox, BoundingSphere, BoundingVolume, BoundsType};

/// Geometry shared between models. Only its local-space bounds are visible
/// to the scene graph, and they are fixed once the mesh is built.
#[derive(Debug)]
pub struct Mesh {
    bounding_box: BoundingBox,
    bounding_sphere: BoundingSphere,
}

impl Mesh {
    pub fn new(bounding_box: BoundingBox, bounding_sphere: BoundingSphere) -> Self {
        Self {
            bounding_box,
            bounding_sphere,
        }
    }

    /// Creates a mesh whose sphere circumscribes the given box.
    pub fn from_box(bounding_box: BoundingBox) -> Self {
        Self::new(bounding_box, BoundingSphere::from_box(&bounding_box))
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bounding_box
    }

    pub fn bounding_sphere(&self) -> BoundingSphere {
        self.bounding_sphere
    }
}

/// A renderable instance of a [`Mesh`].
#[derive(Debug)]
pub struct Model {
    mesh: Rc<Mesh>,
    binding: NodeBinding,
}

impl Model {
    pub fn new(mesh: Rc<Mesh>) -> Self {
        Self {
            mesh,
            binding: NodeBinding::new(),
        }
    }

    /// A new unattached model sharing this model's mesh.
    pub fn duplicate(&self) -> Self {
        Self::new(self.mesh.clone())
    }

    pub fn mesh(&self) -> &Rc<Mesh> {
        &self.mesh
    }

    /// Local-space bounds of the mesh as the requested kind of volume.
    pub(crate) fn local_bounds(&self, kind: BoundsType) -> BoundingVolume {
        match kind {
            BoundsType::None => BoundingVolume::None,
            BoundsType::Box => BoundingVolume::Box(self.mesh.bounding_box()),
            BoundsType::Sphere => BoundingVolume::Sphere(self.mesh.bounding_sphere()),
        }
    }
}

impl Attachment for Model {
    fn binding(&self) -> &NodeBinding {
        &self.binding
    }
}

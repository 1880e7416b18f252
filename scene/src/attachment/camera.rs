use std::cell::Cell;

use cgmath::{Deg, Matrix4, SquareMatrix};

use super::{Attachment, NodeBinding};
use crate::common::transform_ops::invert_or_identity;

/// Projection parameters of a [`Camera`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Projection {
    Perspective {
        /// Vertical field of view in degrees.
        fovy: f32,
        /// Width over height.
        aspect: f32,
        znear: f32,
        zfar: f32,
    },
    Orthographic {
        /// Width of the view volume.
        zoom_x: f32,
        /// Height of the view volume.
        zoom_y: f32,
        aspect: f32,
        znear: f32,
        zfar: f32,
    },
}

impl Projection {
    pub fn matrix(&self) -> Matrix4<f32> {
        match *self {
            Self::Perspective {
                fovy,
                aspect,
                znear,
                zfar,
            } => cgmath::perspective(Deg(fovy), aspect, znear, zfar),
            Self::Orthographic {
                zoom_x,
                zoom_y,
                znear,
                zfar,
                ..
            } => {
                let half_width = zoom_x * 0.5;
                let half_height = zoom_y * 0.5;
                cgmath::ortho(-half_width, half_width, -half_height, half_height, znear, zfar)
            }
        }
    }

    pub fn aspect(&self) -> f32 {
        match *self {
            Self::Perspective { aspect, .. } | Self::Orthographic { aspect, .. } => aspect,
        }
    }

    fn with_aspect(self, new_aspect: f32) -> Self {
        match self {
            Self::Perspective {
                fovy, znear, zfar, ..
            } => Self::Perspective {
                fovy,
                aspect: new_aspect,
                znear,
                zfar,
            },
            Self::Orthographic {
                zoom_x,
                zoom_y,
                znear,
                zfar,
                ..
            } => Self::Orthographic {
                zoom_x,
                zoom_y,
                aspect: new_aspect,
                znear,
                zfar,
            },
        }
    }
}

/// A camera attached to a node.
///
/// The camera's placement is its node's world matrix: the view matrix is the
/// inverse of that matrix. An unattached camera views from the origin.
#[derive(Debug)]
pub struct Camera {
    projection: Cell<Projection>,
    binding: NodeBinding,
}

impl Camera {
    pub fn new(projection: Projection) -> Self {
        Self {
            projection: Cell::new(projection),
            binding: NodeBinding::new(),
        }
    }

    /// Creates a perspective camera. `fovy` is in degrees.
    pub fn perspective(fovy: f32, aspect: f32, znear: f32, zfar: f32) -> Self {
        Self::new(Projection::Perspective {
            fovy,
            aspect,
            znear,
            zfar,
        })
    }

    pub fn orthographic(zoom_x: f32, zoom_y: f32, aspect: f32, znear: f32, zfar: f32) -> Self {
        Self::new(Projection::Orthographic {
            zoom_x,
            zoom_y,
            aspect,
            znear,
            zfar,
        })
    }

    /// A copy of the camera's projection that is not attached to any node.
    pub fn duplicate(&self) -> Self {
        Self::new(self.projection.get())
    }

    pub fn projection(&self) -> Projection {
        self.projection.get()
    }

    pub fn set_projection(&self, projection: Projection) {
        self.projection.set(projection);
    }

    pub fn set_aspect_ratio(&self, aspect: f32) {
        self.projection.set(self.projection.get().with_aspect(aspect));
    }

    pub fn is_perspective(&self) -> bool {
        matches!(self.projection.get(), Projection::Perspective { .. })
    }

    /// World-to-view transform.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        invert_or_identity(&self.inverse_view_matrix())
    }

    /// View-to-world transform, i.e. the node's world matrix.
    pub fn inverse_view_matrix(&self) -> Matrix4<f32> {
        self.node()
            .map(|node| node.world_matrix())
            .unwrap_or_else(Matrix4::identity)
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection.get().matrix()
    }

    pub fn view_projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn inverse_view_projection_matrix(&self) -> Matrix4<f32> {
        invert_or_identity(&self.view_projection_matrix())
    }
}

impl Attachment for Camera {
    fn binding(&self) -> &NodeBinding {
        &self.binding
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::EPSILON;
    use crate::Node;
    use cgmath::{InnerSpace, Point3, Transform, Vector3};
    use std::rc::Rc;

    #[test]
    fn test_unattached_camera_views_from_origin() {
        let camera = Camera::perspective(60.0, 1.0, 0.1, 100.0);
        assert_eq!(camera.view_matrix(), Matrix4::identity());
        assert!(camera.node().is_none());
    }

    #[test]
    fn test_view_matrix_inverts_node_placement() {
        let node = Node::create("camera");
        node.set_translation(Vector3::new(0.0, 0.0, 10.0));
        let camera = Rc::new(Camera::perspective(60.0, 1.0, 0.1, 100.0));
        node.set_camera(Some(camera.clone()));

        let eye = camera.view_matrix().transform_point(Point3::new(0.0, 0.0, 10.0));
        assert!(eye.x.abs() < EPSILON && eye.y.abs() < EPSILON && eye.z.abs() < EPSILON);
    }

    #[test]
    fn test_view_follows_node_after_move() {
        let node = Node::create("camera");
        let camera = Rc::new(Camera::perspective(60.0, 1.0, 0.1, 100.0));
        node.set_camera(Some(camera.clone()));
        assert_eq!(camera.view_matrix(), Matrix4::identity());

        node.set_translation(Vector3::new(3.0, 0.0, 0.0));
        let origin = camera.view_matrix().transform_point(Point3::new(0.0, 0.0, 0.0));
        assert!((origin.x + 3.0).abs() < EPSILON, "origin.x = {}", origin.x);
    }

    #[test]
    fn test_set_aspect_ratio_keeps_kind() {
        let camera = Camera::orthographic(10.0, 5.0, 2.0, 0.1, 50.0);
        camera.set_aspect_ratio(1.5);

        assert!(!camera.is_perspective());
        assert_eq!(camera.projection().aspect(), 1.5);
    }

    #[test]
    fn test_inverse_view_projection_round_trips_point() {
        let node = Node::create("camera");
        node.set_translation(Vector3::new(1.0, 2.0, 8.0));
        let camera = Rc::new(Camera::perspective(45.0, 1.5, 0.5, 100.0));
        node.set_camera(Some(camera.clone()));

        let p = Point3::new(0.5, -0.25, -3.0);
        let clip = camera.view_projection_matrix().transform_point(p);
        let back = camera.inverse_view_projection_matrix().transform_point(clip);
        assert!((back - p).magnitude() < 1e-3);
    }

    #[test]
    fn test_duplicate_is_unbound() {
        let node = Node::create("camera");
        let camera = Rc::new(Camera::perspective(60.0, 1.0, 0.1, 100.0));
        node.set_camera(Some(camera.clone()));

        let copy = camera.duplicate();
        assert!(copy.node().is_none());
        assert_eq!(copy.projection(), camera.projection());
    }
}

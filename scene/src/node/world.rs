use std::rc::Rc;

use cgmath::{Matrix, Matrix4, Point3, Quaternion, Rad, Rotation3, SquareMatrix, Vector3};

use super::Node;
use crate::attachment::{Attachment, Camera};
use crate::common::transform_ops::{
    direction, invert_or_identity, matrix_forward, matrix_right, matrix_translation, matrix_up,
};
use crate::{DirtyFlags, Scene, Transform};

impl Node {
    // ========== Local Transform ==========

    pub fn transform(&self) -> Transform {
        self.transform.get()
    }

    pub fn set_transform(&self, transform: Transform) {
        self.transform.set(transform);
        self.transform_changed();
    }

    pub fn set_identity(&self) {
        self.set_transform(Transform::IDENTITY);
    }

    pub fn translation(&self) -> Vector3<f32> {
        self.transform.get().translation
    }

    pub fn set_translation(&self, translation: Vector3<f32>) {
        self.set_transform(Transform {
            translation,
            ..self.transform.get()
        });
    }

    pub fn rotation(&self) -> Quaternion<f32> {
        self.transform.get().rotation
    }

    pub fn set_rotation(&self, rotation: Quaternion<f32>) {
        self.set_transform(Transform {
            rotation,
            ..self.transform.get()
        });
    }

    pub fn scale(&self) -> Vector3<f32> {
        self.transform.get().scale
    }

    pub fn set_scale(&self, scale: Vector3<f32>) {
        self.set_transform(Transform {
            scale,
            ..self.transform.get()
        });
    }

    pub fn translate(&self, offset: Vector3<f32>) {
        self.set_translation(self.translation() + offset);
    }

    /// Moves along the local forward (-Z) axis.
    pub fn translate_forward(&self, amount: f32) {
        self.translate(self.transform.get().forward() * amount);
    }

    /// Moves along the local left (-X) axis.
    pub fn translate_left(&self, amount: f32) {
        self.translate(self.transform.get().right() * -amount);
    }

    pub fn translate_up(&self, amount: f32) {
        self.translate(self.transform.get().up() * amount);
    }

    /// Applies `rotation` in the local frame.
    pub fn rotate(&self, rotation: Quaternion<f32>) {
        self.set_transform(self.transform.get().rotated(rotation));
    }

    /// Rotates about the local X axis by `angle` radians.
    pub fn rotate_x(&self, angle: f32) {
        self.rotate(Quaternion::from_angle_x(Rad(angle)));
    }

    pub fn rotate_y(&self, angle: f32) {
        self.rotate(Quaternion::from_angle_y(Rad(angle)));
    }

    pub fn rotate_z(&self, angle: f32) {
        self.rotate(Quaternion::from_angle_z(Rad(angle)));
    }

    /// Rotates translation and orientation about a pivot in the parent's
    /// frame.
    pub fn rotate_about_pivot(&self, pivot: Point3<f32>, rotation: Quaternion<f32>) {
        self.set_transform(self.transform.get().rotated_about_pivot(pivot, rotation));
    }

    /// Multiplies the current scale component-wise.
    pub fn scale_by(&self, factor: Vector3<f32>) {
        self.set_transform(self.transform.get().scaled_by(factor));
    }

    pub fn local_matrix(&self) -> Matrix4<f32> {
        self.transform.get().matrix()
    }

    pub fn forward_vector(&self) -> Vector3<f32> {
        self.transform.get().forward()
    }

    pub fn up_vector(&self) -> Vector3<f32> {
        self.transform.get().up()
    }

    pub fn right_vector(&self) -> Vector3<f32> {
        self.transform.get().right()
    }

    // ========== Dirty Propagation ==========

    /// Marks the world matrix, world-view-projection and bounds of this node
    /// and every descendant stale, and marks the bounds of every ancestor
    /// stale. Nothing is recomputed until queried.
    pub fn transform_changed(&self) {
        self.mark_subtree_dirty();
        self.mark_ancestors_bounds_dirty();
    }

    fn mark_subtree_dirty(&self) {
        self.dirty.set(self.dirty.get() | DirtyFlags::ALL);

        let mut child = self.first_child();
        while let Some(node) = child {
            node.mark_subtree_dirty();
            child = node.next_sibling();
        }

        self.notify(|l| l.transform_changed(self));
    }

    /// Every ancestor is marked, with no early exit on an already dirty one:
    /// nodes without a bounds type never clear their bit.
    pub(super) fn mark_ancestors_bounds_dirty(&self) {
        let mut current = self.parent();
        while let Some(node) = current {
            node.dirty.set(node.dirty.get() | DirtyFlags::BOUNDS);
            current = node.parent();
        }
    }

    // ========== World Matrix ==========

    /// Returns the world matrix, recomputing it if stale.
    ///
    /// The dirty bit is cleared before the parent is consulted so a query
    /// re-entered during the computation returns the cached value instead
    /// of recursing. After storing the result every child is refreshed, so
    /// a top-down pass over the tree costs O(n).
    pub fn world_matrix(&self) -> Matrix4<f32> {
        let dirty = self.dirty.get();
        if dirty.contains(DirtyFlags::WORLD) {
            self.dirty.set(dirty - DirtyFlags::WORLD);

            let world = match self.authoritative_physics_transform() {
                Some(physics) => physics,
                None => match self.parent() {
                    Some(parent) => parent.world_matrix() * self.local_matrix(),
                    None => self.local_matrix(),
                },
            };
            self.world.set(world);
            #[cfg(test)]
            self.world_computations.set(self.world_computations.get() + 1);

            let mut child = self.first_child();
            while let Some(node) = child {
                node.world_matrix();
                child = node.next_sibling();
            }
        }
        self.world.get()
    }

    fn authoritative_physics_transform(&self) -> Option<Matrix4<f32>> {
        self.collision_object
            .borrow()
            .as_ref()
            .filter(|object| object.is_authoritative())
            .map(|object| object.world_transform())
    }

    pub fn inverse_transpose_world_matrix(&self) -> Matrix4<f32> {
        invert_or_identity(&self.world_matrix()).transpose()
    }

    // ========== Camera Matrices ==========

    /// The scene this node belongs to, found through the nearest ancestor
    /// (or this node) that is a scene root.
    pub fn scene(&self) -> Option<Rc<Scene>> {
        if let Some(scene) = self.scene.borrow().upgrade() {
            return Some(scene);
        }
        let mut current = self.parent();
        while let Some(node) = current {
            if let Some(scene) = node.scene.borrow().upgrade() {
                return Some(scene);
            }
            current = node.parent();
        }
        None
    }

    fn active_camera(&self) -> Option<Rc<Camera>> {
        self.scene()?.active_camera()
    }

    fn camera_matrix(&self, f: impl FnOnce(&Camera) -> Matrix4<f32>) -> Matrix4<f32> {
        match self.active_camera() {
            Some(camera) => f(&camera),
            None => Matrix4::identity(),
        }
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.camera_matrix(Camera::view_matrix)
    }

    pub fn inverse_view_matrix(&self) -> Matrix4<f32> {
        self.camera_matrix(Camera::inverse_view_matrix)
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.camera_matrix(Camera::projection_matrix)
    }

    pub fn view_projection_matrix(&self) -> Matrix4<f32> {
        self.camera_matrix(Camera::view_projection_matrix)
    }

    pub fn inverse_view_projection_matrix(&self) -> Matrix4<f32> {
        self.camera_matrix(Camera::inverse_view_projection_matrix)
    }

    pub fn world_view_matrix(&self) -> Matrix4<f32> {
        self.view_matrix() * self.world_matrix()
    }

    pub fn inverse_transpose_world_view_matrix(&self) -> Matrix4<f32> {
        invert_or_identity(&self.world_view_matrix()).transpose()
    }

    /// Recomputed on every call; camera motion is not tracked by a dirty
    /// bit.
    pub fn world_view_projection_matrix(&self) -> Matrix4<f32> {
        self.dirty.set(self.dirty.get() - DirtyFlags::WORLD_VIEW_PROJ);
        self.view_projection_matrix() * self.world_matrix()
    }

    // ========== World-Space Vectors ==========

    pub fn translation_world(&self) -> Vector3<f32> {
        matrix_translation(&self.world_matrix())
    }

    pub fn translation_view(&self) -> Vector3<f32> {
        matrix_translation(&self.world_view_matrix())
    }

    pub fn forward_vector_world(&self) -> Vector3<f32> {
        matrix_forward(&self.world_matrix())
    }

    pub fn forward_vector_view(&self) -> Vector3<f32> {
        direction(&self.world_view_matrix(), Vector3::new(0.0, 0.0, -1.0))
    }

    pub fn right_vector_world(&self) -> Vector3<f32> {
        matrix_right(&self.world_matrix())
    }

    pub fn up_vector_world(&self) -> Vector3<f32> {
        matrix_up(&self.world_matrix())
    }

    /// World position of the active camera's node, or the origin.
    pub fn active_camera_translation_world(&self) -> Vector3<f32> {
        self.active_camera()
            .and_then(|camera| camera.node())
            .map(|node| node.translation_world())
            .unwrap_or_else(|| Vector3::new(0.0, 0.0, 0.0))
    }

    /// View-space position of the active camera's node, or the origin.
    pub fn active_camera_translation_view(&self) -> Vector3<f32> {
        self.active_camera()
            .and_then(|camera| camera.node())
            .map(|node| node.translation_view())
            .unwrap_or_else(|| Vector3::new(0.0, 0.0, 0.0))
    }
}

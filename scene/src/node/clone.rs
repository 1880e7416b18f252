use std::rc::Rc;

use super::Node;

impl Node {
    /// Deep-copies this node and its subtree into a new detached tree.
    ///
    /// Ids, types, transforms, tags, enabled state and bounds type are
    /// copied. Cameras, lights, audio sources and models are duplicated
    /// (models share their mesh); other attachments are not carried over.
    /// Child order is preserved.
    pub fn clone_tree(&self) -> Rc<Node> {
        let copy = Node::with_type(self.id(), self.node_type);
        copy.transform.set(self.transform.get());
        copy.enabled.set(self.enabled.get());
        *copy.tags.borrow_mut() = self.tags.borrow().clone();
        copy.set_bounds_type(self.bounds_type());

        if let Some(camera) = self.camera() {
            copy.set_camera(Some(Rc::new(camera.duplicate())));
        }
        if let Some(light) = self.light() {
            copy.set_light(Some(Rc::new(light.duplicate())));
        }
        if let Some(model) = self.model() {
            copy.set_model(Some(Rc::new(model.duplicate())));
        }
        if let Some(source) = self.audio_source() {
            copy.set_audio_source(Some(Rc::new(source.duplicate())));
        }

        // Children link at the head, so add them back to front
        let children: Vec<Rc<Node>> = self.children().collect();
        for child in children.iter().rev() {
            copy.add_child(&child.clone_tree());
        }
        copy
    }
}

//! Components that attach to a [`Node`] through its fixed slots.
//!
//! A node owns each attached component through an `Rc`; the component only
//! observes its node through a [`NodeBinding`], so the pair never forms an
//! ownership cycle.

mod agent;
mod audio;
mod camera;
mod form;
mod light;
mod model;
mod particle;
mod physics;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::Node;

pub use agent::AiAgent;
pub use audio::AudioSource;
pub use camera::{Camera, Projection};
pub use form::Form;
pub use light::{Light, LightKind};
pub use model::{Mesh, Model};
pub use particle::ParticleEmitter;
pub use physics::{CollisionObjectType, PhysicsCollisionObject, RigidBodyParameters};

/// Non-owning back-reference from a component to the node it is attached to.
#[derive(Debug, Default)]
pub struct NodeBinding {
    node: RefCell<Weak<Node>>,
}

impl NodeBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// The node this component is attached to, if it is still alive.
    pub fn node(&self) -> Option<Rc<Node>> {
        self.node.borrow().upgrade()
    }

    pub fn is_bound(&self) -> bool {
        self.node.borrow().strong_count() > 0
    }

    pub(crate) fn bind(&self, node: Weak<Node>) {
        *self.node.borrow_mut() = node;
    }

    /// Clears the back-reference if it still points at `node`. A component
    /// that has since been attached elsewhere keeps its newer binding.
    pub(crate) fn unbind_from(&self, node: *const Node) {
        let mut current = self.node.borrow_mut();
        if std::ptr::eq(current.as_ptr(), node) {
            *current = Weak::new();
        }
    }
}

/// Implemented by every component that can occupy a node slot.
pub trait Attachment {
    fn binding(&self) -> &NodeBinding;

    /// The node this component is attached to.
    fn node(&self) -> Option<Rc<Node>> {
        self.binding().node()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbound_binding() {
        let binding = NodeBinding::new();
        assert!(binding.node().is_none());
        assert!(!binding.is_bound());
    }

    #[test]
    fn test_unbind_ignores_other_node() {
        let a = Node::create("a");
        let b = Node::create("b");
        let binding = NodeBinding::new();

        binding.bind(Rc::downgrade(&a));
        binding.unbind_from(Rc::as_ptr(&b));
        assert!(Rc::ptr_eq(&binding.node().unwrap(), &a));

        binding.unbind_from(Rc::as_ptr(&a));
        assert!(binding.node().is_none());
    }

    #[test]
    fn test_binding_does_not_keep_node_alive() {
        let node = Node::create("short-lived");
        let binding = NodeBinding::new();
        binding.bind(Rc::downgrade(&node));

        drop(node);
        assert!(binding.node().is_none());
    }
}

//! The scene graph node.
//!
//! Nodes are shared as `Rc<Node>` and mutated through `&self`. A node owns
//! its first child, and every node owns its next sibling, so a parent owns
//! its whole child chain through `first_child`. Parent, previous-sibling,
//! scene and component back-references are `Weak` and never extend a
//! lifetime.

mod attachments;
mod bounds;
mod clone;
mod hierarchy;
mod lookup;
mod world;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use cgmath::{Matrix4, SquareMatrix};

use crate::attachment::{
    AiAgent, AudioSource, Camera, Form, Light, Model, ParticleEmitter, PhysicsCollisionObject,
};
use crate::common::BoundingVolume;
use crate::{DirtyFlags, NodeListener, Scene, Transform};

pub use hierarchy::Children;
pub(crate) use hierarchy::{link_after, release_chain, unlink};

/// Distinguishes plain nodes from skeleton joints.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum NodeType {
    #[default]
    Node,
    Joint,
}

impl NodeType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Node => "Node",
            Self::Joint => "Joint",
        }
    }
}

/// A transformable element of the scene hierarchy.
pub struct Node {
    self_ref: Weak<Node>,
    id: RefCell<String>,
    node_type: NodeType,

    // Hierarchy
    parent: RefCell<Weak<Node>>,
    first_child: RefCell<Option<Rc<Node>>>,
    next_sibling: RefCell<Option<Rc<Node>>>,
    prev_sibling: RefCell<Weak<Node>>,
    child_count: Cell<usize>,
    /// Set only on roots inserted into a scene.
    scene: RefCell<Weak<Scene>>,
    notify_hierarchy_changed: Cell<bool>,
    listeners: RefCell<Vec<Rc<dyn NodeListener>>>,

    // State
    enabled: Cell<bool>,
    tags: RefCell<Option<HashMap<String, String>>>,

    // Transform and caches
    transform: Cell<Transform>,
    world: Cell<Matrix4<f32>>,
    dirty: Cell<DirtyFlags>,
    bounds: Cell<BoundingVolume>,
    #[cfg(test)]
    world_computations: Cell<usize>,

    // Attachment slots
    camera: RefCell<Option<Rc<Camera>>>,
    light: RefCell<Option<Rc<Light>>>,
    model: RefCell<Option<Rc<Model>>>,
    audio_source: RefCell<Option<Rc<AudioSource>>>,
    particle_emitter: RefCell<Option<Rc<ParticleEmitter>>>,
    collision_object: RefCell<Option<Rc<PhysicsCollisionObject>>>,
    agent: RefCell<Option<Rc<AiAgent>>>,
    form: RefCell<Option<Rc<Form>>>,
}

impl Node {
    /// Creates a detached node with every cache dirty and no bounds type.
    pub fn create(id: impl Into<String>) -> Rc<Node> {
        Self::with_type(id, NodeType::Node)
    }

    /// Creates a detached skeleton joint.
    pub fn create_joint(id: impl Into<String>) -> Rc<Node> {
        Self::with_type(id, NodeType::Joint)
    }

    pub(crate) fn with_type(id: impl Into<String>, node_type: NodeType) -> Rc<Node> {
        let id = id.into();
        Rc::new_cyclic(|self_ref| Node {
            self_ref: self_ref.clone(),
            id: RefCell::new(id),
            node_type,
            parent: RefCell::new(Weak::new()),
            first_child: RefCell::new(None),
            next_sibling: RefCell::new(None),
            prev_sibling: RefCell::new(Weak::new()),
            child_count: Cell::new(0),
            scene: RefCell::new(Weak::new()),
            notify_hierarchy_changed: Cell::new(true),
            listeners: RefCell::new(Vec::new()),
            enabled: Cell::new(true),
            tags: RefCell::new(None),
            transform: Cell::new(Transform::IDENTITY),
            world: Cell::new(Matrix4::identity()),
            dirty: Cell::new(DirtyFlags::ALL),
            bounds: Cell::new(BoundingVolume::None),
            #[cfg(test)]
            world_computations: Cell::new(0),
            camera: RefCell::new(None),
            light: RefCell::new(None),
            model: RefCell::new(None),
            audio_source: RefCell::new(None),
            particle_emitter: RefCell::new(None),
            collision_object: RefCell::new(None),
            agent: RefCell::new(None),
            form: RefCell::new(None),
        })
    }

    pub fn id(&self) -> String {
        self.id.borrow().clone()
    }

    pub fn set_id(&self, id: impl Into<String>) {
        *self.id.borrow_mut() = id.into();
    }

    pub(crate) fn id_matches(&self, id: &str, exact_match: bool) -> bool {
        let own = self.id.borrow();
        if exact_match {
            *own == id
        } else {
            own.starts_with(id)
        }
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn type_name(&self) -> &'static str {
        self.node_type.name()
    }

    /// The currently pending dirty bits.
    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty.get()
    }

    // ========== Tags ==========

    /// Sets a tag, or removes it when `value` is `None`.
    pub fn set_tag(&self, name: &str, value: Option<&str>) {
        let mut tags = self.tags.borrow_mut();
        match value {
            Some(value) => {
                tags.get_or_insert_with(HashMap::new)
                    .insert(name.to_string(), value.to_string());
            }
            None => {
                if let Some(map) = tags.as_mut() {
                    map.remove(name);
                    if map.is_empty() {
                        *tags = None;
                    }
                }
            }
        }
    }

    pub fn tag(&self, name: &str) -> Option<String> {
        self.tags.borrow().as_ref()?.get(name).cloned()
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags
            .borrow()
            .as_ref()
            .is_some_and(|tags| tags.contains_key(name))
    }

    // ========== Enabled State ==========

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    /// False when this node or any ancestor is disabled.
    pub fn is_enabled_in_hierarchy(&self) -> bool {
        if !self.enabled.get() {
            return false;
        }
        let mut current = self.parent();
        while let Some(node) = current {
            if !node.enabled.get() {
                return false;
            }
            current = node.parent();
        }
        true
    }

    // ========== Listeners ==========

    pub fn add_listener(&self, listener: Rc<dyn NodeListener>) {
        self.listeners.borrow_mut().push(listener);
    }

    pub fn remove_listener(&self, listener: &Rc<dyn NodeListener>) {
        self.listeners
            .borrow_mut()
            .retain(|l| !Rc::ptr_eq(l, listener));
    }

    /// Invokes `f` on a snapshot of the listeners.
    fn notify(&self, f: impl Fn(&dyn NodeListener)) {
        if self.listeners.borrow().is_empty() {
            return;
        }
        let listeners = self.listeners.borrow().clone();
        for listener in &listeners {
            f(listener.as_ref());
        }
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        hierarchy::release_chain(self.first_child.get_mut().take());
        self.unbind_attachments();
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &*self.id.borrow())
            .field("type", &self.node_type)
            .field("child_count", &self.child_count.get())
            .field("transform", &self.transform.get())
            .field("dirty", &self.dirty.get())
            .field("bounds", &self.bounds.get())
            .finish_non_exhaustive()
    }
}

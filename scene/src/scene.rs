//! The root container of a node hierarchy.
//!
//! A scene owns its root nodes through the same intrusive sibling links a
//! parent uses for its children: `first_node` owns the head, each root owns
//! the next one. Every root carries a weak back-reference to the scene,
//! which descendants find by walking up their parents.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::attachment::Camera;
use crate::common::{BoundingBox, BoundingSphere, RgbaColor};
use crate::node::{self, Children};
use crate::{walk_tree, Node, SceneConfig, TreeVisitor, Viewport};

pub struct Scene {
    self_ref: Weak<Scene>,
    config: RefCell<SceneConfig>,

    first_node: RefCell<Option<Rc<Node>>>,
    last_node: RefCell<Weak<Node>>,
    node_count: Cell<usize>,

    active_camera: RefCell<Option<Rc<Camera>>>,
}

impl Scene {
    /// Creates an empty scene with default settings.
    pub fn create(id: impl Into<String>) -> Rc<Scene> {
        Self::with_config(SceneConfig::default().with_id(id))
    }

    pub fn with_config(config: SceneConfig) -> Rc<Scene> {
        log::debug!("Creating scene '{}'", config.id);
        Rc::new_cyclic(|self_ref| Scene {
            self_ref: self_ref.clone(),
            config: RefCell::new(config),
            first_node: RefCell::new(None),
            last_node: RefCell::new(Weak::new()),
            node_count: Cell::new(0),
            active_camera: RefCell::new(None),
        })
    }

    // ========== Settings ==========

    pub fn id(&self) -> String {
        self.config.borrow().id.clone()
    }

    pub fn set_id(&self, id: impl Into<String>) {
        self.config.borrow_mut().id = id.into();
    }

    /// A copy of the current settings.
    pub fn config(&self) -> SceneConfig {
        self.config.borrow().clone()
    }

    pub fn ambient_color(&self) -> RgbaColor {
        self.config.borrow().ambient_color
    }

    pub fn set_ambient_color(&self, color: RgbaColor) {
        self.config.borrow_mut().ambient_color = color;
    }

    pub fn viewport(&self) -> Viewport {
        self.config.borrow().viewport
    }

    pub fn set_viewport(&self, viewport: Viewport) {
        self.config.borrow_mut().viewport = viewport;
    }

    // ========== Cameras ==========

    pub fn active_camera(&self) -> Option<Rc<Camera>> {
        self.active_camera.borrow().clone()
    }

    /// Sets the camera every node of this scene renders through.
    pub fn set_active_camera(&self, camera: Option<Rc<Camera>>) {
        let unchanged = match (self.active_camera.borrow().as_ref(), camera.as_ref()) {
            (Some(current), Some(new)) => Rc::ptr_eq(current, new),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return;
        }
        log::debug!(
            "Scene '{}' active camera {}",
            self.id(),
            if camera.is_some() { "set" } else { "cleared" }
        );
        *self.active_camera.borrow_mut() = camera;
    }

    /// The camera the audio listener follows, when the scene is configured
    /// to bind it.
    pub fn audio_listener_camera(&self) -> Option<Rc<Camera>> {
        if !self.config.borrow().bind_audio_listener_to_camera {
            return None;
        }
        self.active_camera()
    }

    // ========== Root Nodes ==========

    /// Creates a new root node and appends it to the scene.
    pub fn add_node(&self, id: impl Into<String>) -> Rc<Node> {
        let node = Node::create(id);
        self.add_existing_node(&node);
        node
    }

    /// Appends `node` as the last root of this scene.
    ///
    /// The node is first detached from its parent or from the scene it
    /// currently belongs to. Adding a node that is already a root here does
    /// nothing.
    pub fn add_existing_node(&self, node: &Rc<Node>) {
        if node.is_root_of(&self.self_ref) {
            return;
        }

        if node.parent().is_some() {
            node.remove();
        } else if let Some(other) = node.scene() {
            other.remove_node(node);
        }

        let tail = self.last_node.borrow().upgrade();
        node::link_after(&self.first_node, tail.as_ref(), node);
        *self.last_node.borrow_mut() = Rc::downgrade(node);
        node.set_scene(self.self_ref.clone());
        self.node_count.set(self.node_count.get() + 1);

        log::debug!("Added node '{}' to scene '{}'", node.id(), self.id());
        node.transform_changed();
    }

    /// Removes a root node from this scene. Nodes that are not roots of this
    /// scene are left alone.
    pub fn remove_node(&self, node: &Rc<Node>) {
        if !node.is_root_of(&self.self_ref) {
            log::warn!(
                "Node '{}' is not a root of scene '{}'; nothing removed",
                node.id(),
                self.id()
            );
            return;
        }

        let is_last = self
            .last_node
            .borrow()
            .upgrade()
            .is_some_and(|last| Rc::ptr_eq(&last, node));
        if is_last {
            *self.last_node.borrow_mut() = node
                .previous_sibling()
                .map(|prev| Rc::downgrade(&prev))
                .unwrap_or_default();
        }

        node::unlink(&self.first_node, node);
        node.set_scene(Weak::new());
        self.node_count.set(self.node_count.get().saturating_sub(1));

        log::debug!("Removed node '{}' from scene '{}'", node.id(), self.id());
    }

    pub fn remove_all_nodes(&self) {
        while let Some(node) = self.first_node() {
            self.remove_node(&node);
        }
    }

    /// Number of root nodes.
    pub fn node_count(&self) -> usize {
        self.node_count.get()
    }

    pub fn first_node(&self) -> Option<Rc<Node>> {
        self.first_node.borrow().clone()
    }

    /// Iterates the root nodes in insertion order.
    pub fn nodes(&self) -> Children {
        Children::starting_at(self.first_node())
    }

    // ========== Lookup ==========

    /// Finds a node by id. Roots are checked first; with `recursive`, each
    /// root's subtree is then searched in order.
    pub fn find_node(&self, id: &str, recursive: bool, exact_match: bool) -> Option<Rc<Node>> {
        if let Some(found) = self.nodes().find(|node| node.id_matches(id, exact_match)) {
            return Some(found);
        }
        if recursive {
            return self
                .nodes()
                .find_map(|node| node.find_node(id, true, exact_match));
        }
        None
    }

    /// Appends every matching node to `nodes` and returns how many were
    /// added.
    pub fn find_nodes(
        &self,
        id: &str,
        nodes: &mut Vec<Rc<Node>>,
        recursive: bool,
        exact_match: bool,
    ) -> usize {
        let before = nodes.len();
        nodes.extend(self.nodes().filter(|node| node.id_matches(id, exact_match)));
        if recursive {
            for node in self.nodes() {
                node.find_nodes(id, nodes, true, exact_match);
            }
        }
        nodes.len() - before
    }

    // ========== Traversal ==========

    /// Walks every root's subtree depth first.
    pub fn visit<V: TreeVisitor>(&self, visitor: &mut V) {
        for node in self.nodes() {
            walk_tree(&node, visitor);
        }
    }

    // ========== Bounds ==========

    /// Union of the roots' world-space bounding boxes.
    pub fn bounding_box(&self) -> BoundingBox {
        let mut bounds = BoundingBox::EMPTY;
        for node in self.nodes() {
            bounds.merge(&node.bounding_box());
        }
        bounds
    }

    /// Union of the roots' world-space bounding spheres.
    pub fn bounding_sphere(&self) -> BoundingSphere {
        let mut bounds = BoundingSphere::EMPTY;
        for node in self.nodes() {
            bounds.merge(&node.bounding_sphere());
        }
        bounds
    }
}

impl Drop for Scene {
    fn drop(&mut self) {
        node::release_chain(self.first_node.get_mut().take());
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("id", &self.config.borrow().id)
            .field("node_count", &self.node_count.get())
            .field("has_active_camera", &self.active_camera.borrow().is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attachment::Attachment;

    fn ids(scene: &Scene) -> Vec<String> {
        scene.nodes().map(|n| n.id()).collect()
    }

    #[test]
    fn test_scene_defaults() {
        let scene = Scene::create("level");

        assert_eq!(scene.id(), "level");
        assert_eq!(scene.node_count(), 0);
        assert!(scene.first_node().is_none());
        assert!(scene.active_camera().is_none());
        assert_eq!(scene.ambient_color(), RgbaColor::BLACK);
        assert_eq!(scene.bounding_box(), BoundingBox::EMPTY);
    }

    #[test]
    fn test_add_nodes_appends() {
        let scene = Scene::create("s");
        let a = scene.add_node("a");
        scene.add_node("b");
        scene.add_node("c");

        assert_eq!(ids(&scene), vec!["a", "b", "c"]);
        assert_eq!(scene.node_count(), 3);
        assert!(Rc::ptr_eq(&a.scene().unwrap(), &scene));
        assert!(a.parent().is_none());
    }

    #[test]
    fn test_add_existing_root_is_noop() {
        let scene = Scene::create("s");
        let a = scene.add_node("a");
        scene.add_existing_node(&a);

        assert_eq!(scene.node_count(), 1);
    }

    #[test]
    fn test_remove_last_then_append() {
        let scene = Scene::create("s");
        scene.add_node("a");
        let b = scene.add_node("b");

        scene.remove_node(&b);
        assert!(b.scene().is_none());
        assert!(b.previous_sibling().is_none());

        scene.add_node("c");
        assert_eq!(ids(&scene), vec!["a", "c"]);
    }

    #[test]
    fn test_remove_middle_root() {
        let scene = Scene::create("s");
        scene.add_node("a");
        let b = scene.add_node("b");
        scene.add_node("c");

        scene.remove_node(&b);

        assert_eq!(ids(&scene), vec!["a", "c"]);
        assert_eq!(scene.node_count(), 2);
    }

    #[test]
    fn test_remove_foreign_node_is_ignored() {
        let scene = Scene::create("s");
        scene.add_node("a");
        let stray = Node::create("stray");

        scene.remove_node(&stray);
        assert_eq!(scene.node_count(), 1);
    }

    #[test]
    fn test_root_moves_between_scenes() {
        let first = Scene::create("first");
        let second = Scene::create("second");
        let node = first.add_node("n");

        second.add_existing_node(&node);

        assert_eq!(first.node_count(), 0);
        assert_eq!(second.node_count(), 1);
        assert!(Rc::ptr_eq(&node.scene().unwrap(), &second));
    }

    #[test]
    fn test_child_becomes_root() {
        let scene = Scene::create("s");
        let parent = scene.add_node("parent");
        let child = Node::create("child");
        parent.add_child(&child);
        assert!(Rc::ptr_eq(&child.scene().unwrap(), &scene));

        scene.add_existing_node(&child);

        assert_eq!(parent.child_count(), 0);
        assert_eq!(ids(&scene), vec!["parent", "child"]);
    }

    #[test]
    fn test_add_child_takes_root_out_of_scene() {
        let scene = Scene::create("s");
        let a = scene.add_node("a");
        let b = scene.add_node("b");

        a.add_child(&b);

        assert_eq!(ids(&scene), vec!["a"]);
        assert_eq!(scene.node_count(), 1);
        assert!(Rc::ptr_eq(&b.parent().unwrap(), &a));
        // Still reachable through its parent
        assert!(Rc::ptr_eq(&b.scene().unwrap(), &scene));
        assert!(b.is_root_of(&Weak::new()));
    }

    #[test]
    fn test_remove_all_nodes() {
        let scene = Scene::create("s");
        let nodes: Vec<_> = (0..5).map(|i| scene.add_node(format!("n{i}"))).collect();

        scene.remove_all_nodes();

        assert_eq!(scene.node_count(), 0);
        assert!(scene.first_node().is_none());
        assert!(nodes.iter().all(|n| n.scene().is_none()));
        scene.add_node("fresh");
        assert_eq!(ids(&scene), vec!["fresh"]);
    }

    #[test]
    fn test_find_node_checks_roots_first() {
        let scene = Scene::create("s");
        let a = scene.add_node("a");
        a.add_child(&Node::create("target"));
        let root_target = scene.add_node("target");

        let found = scene.find_node("target", true, true).unwrap();
        assert!(Rc::ptr_eq(&found, &root_target));

        let mut all = Vec::new();
        assert_eq!(scene.find_nodes("target", &mut all, true, true), 2);
        assert!(Rc::ptr_eq(&all[0], &root_target));
        assert!(scene.find_node("target", false, true).is_some());
        assert!(scene.find_node("tar", false, true).is_none());
        assert!(scene.find_node("tar", false, false).is_some());
    }

    #[test]
    fn test_active_camera() {
        let scene = Scene::create("s");
        let holder = scene.add_node("camera");
        let camera = Rc::new(Camera::perspective(60.0, 1.5, 0.1, 100.0));
        holder.set_camera(Some(camera.clone()));

        scene.set_active_camera(Some(camera.clone()));

        assert!(Rc::ptr_eq(&scene.active_camera().unwrap(), &camera));
        assert!(Rc::ptr_eq(&scene.audio_listener_camera().unwrap(), &camera));
        assert!(Rc::ptr_eq(&camera.node().unwrap(), &holder));
    }

    #[test]
    fn test_audio_listener_unbound() {
        let scene =
            Scene::with_config(SceneConfig::default().with_audio_listener_bound_to_camera(false));
        scene.set_active_camera(Some(Rc::new(Camera::perspective(60.0, 1.0, 0.1, 10.0))));

        assert!(scene.audio_listener_camera().is_none());
    }

    #[test]
    fn test_settings() {
        let scene = Scene::create("s");
        scene.set_ambient_color(RgbaColor::RED);
        scene.set_viewport(Viewport::new(0.0, 0.0, 800.0, 400.0));
        scene.set_id("renamed");

        let config = scene.config();
        assert_eq!(config.id, "renamed");
        assert_eq!(config.ambient_color, RgbaColor::RED);
        assert_eq!(scene.viewport().aspect_ratio(), 2.0);
    }

    #[test]
    fn test_drop_scene_releases_roots() {
        let scene = Scene::create("s");
        let kept = scene.add_node("kept");
        let weak = Rc::downgrade(&scene.add_node("released"));

        drop(scene);

        assert!(weak.upgrade().is_none());
        assert!(kept.scene().is_none());
        assert!(kept.next_sibling().is_none());
    }

    #[test]
    fn test_drop_scene_with_many_roots() {
        let scene = Scene::create("s");
        for i in 0..100_000 {
            scene.add_node(format!("n{i}"));
        }
        assert_eq!(scene.node_count(), 100_000);
        drop(scene);
    }
}

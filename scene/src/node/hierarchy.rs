use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::Node;
use crate::Scene;

/// Iterator over a node's children, head first.
pub struct Children {
    next: Option<Rc<Node>>,
}

impl Children {
    /// Iterates the sibling chain beginning at `first`.
    pub(crate) fn starting_at(first: Option<Rc<Node>>) -> Self {
        Self { next: first }
    }
}

impl Iterator for Children {
    type Item = Rc<Node>;

    fn next(&mut self) -> Option<Rc<Node>> {
        let current = self.next.take()?;
        self.next = current.next_sibling();
        Some(current)
    }
}

impl Node {
    // ========== Navigation ==========

    pub fn parent(&self) -> Option<Rc<Node>> {
        self.parent.borrow().upgrade()
    }

    pub fn first_child(&self) -> Option<Rc<Node>> {
        self.first_child.borrow().clone()
    }

    pub fn next_sibling(&self) -> Option<Rc<Node>> {
        self.next_sibling.borrow().clone()
    }

    pub fn previous_sibling(&self) -> Option<Rc<Node>> {
        self.prev_sibling.borrow().upgrade()
    }

    /// Number of direct children, maintained on link and unlink.
    pub fn child_count(&self) -> usize {
        self.child_count.get()
    }

    pub fn children(&self) -> Children {
        Children::starting_at(self.first_child())
    }

    /// The topmost ancestor, or this node when it has no parent.
    pub fn root_node(&self) -> Option<Rc<Node>> {
        let mut current = self.self_ref.upgrade()?;
        while let Some(parent) = current.parent() {
            current = parent;
        }
        Some(current)
    }

    /// True when this node appears on `other`'s parent chain.
    pub fn is_ancestor_of(&self, other: &Node) -> bool {
        let mut current = other.parent();
        while let Some(node) = current {
            if std::ptr::eq(node.as_ref(), self) {
                return true;
            }
            current = node.parent();
        }
        false
    }

    fn is_child_of(&self, parent: &Node) -> bool {
        std::ptr::eq(self.parent.borrow().as_ptr(), parent)
    }

    // ========== Mutation ==========

    /// Makes `child` the first child of this node.
    ///
    /// A child that already belongs to another parent, or that is a scene
    /// root, is detached from there first. Adding an existing child is a
    /// no-op. Parenting a node under itself or one of its descendants is a
    /// caller error and is only checked in debug builds.
    pub fn add_child(&self, child: &Rc<Node>) {
        if child.is_child_of(self) {
            return;
        }
        debug_assert!(
            !std::ptr::eq(child.as_ref(), self) && !child.is_ancestor_of(self),
            "node '{}' cannot become a child of itself or its descendant",
            child.id()
        );

        let old_parent = child.parent();
        if let Some(old_parent) = &old_parent {
            old_parent.unlink_child(child);
        } else {
            let scene = child.scene.borrow().upgrade();
            if let Some(scene) = scene {
                scene.remove_node(child);
            }
        }

        let head = self.first_child.borrow_mut().take();
        if let Some(head) = &head {
            *head.prev_sibling.borrow_mut() = Rc::downgrade(child);
        }
        *child.next_sibling.borrow_mut() = head;
        *child.prev_sibling.borrow_mut() = Weak::new();
        *child.parent.borrow_mut() = self.self_ref.clone();
        *self.first_child.borrow_mut() = Some(child.clone());
        self.child_count.set(self.child_count.get() + 1);

        child.parent_changed(old_parent.as_ref());
        if let Some(old_parent) = &old_parent {
            old_parent.child_removed(child);
        }
        self.child_added(child);
    }

    /// Removes `child` from this node. Does nothing if it is not a child.
    pub fn remove_child(&self, child: &Rc<Node>) {
        if !child.is_child_of(self) {
            log::warn!(
                "Node '{}' is not a child of '{}'; nothing removed",
                child.id(),
                self.id()
            );
            return;
        }
        child.remove();
    }

    /// Detaches this node from its parent.
    ///
    /// If the parent held the last strong reference, the subtree is dropped
    /// once the caller releases theirs.
    pub fn remove(&self) {
        let Some(parent) = self.parent() else {
            return;
        };
        let Some(this) = self.self_ref.upgrade() else {
            return;
        };
        parent.unlink_child(&this);
        this.transform_changed();
        this.parent_changed(Some(&parent));
        parent.child_removed(&this);
    }

    /// Removes every child, firing a single hierarchy-changed notification
    /// for the whole batch.
    pub fn remove_all_children(&self) {
        let notify = self.notify_hierarchy_changed.replace(false);
        while let Some(child) = self.first_child() {
            child.remove();
        }
        self.notify_hierarchy_changed.set(notify);
        if notify {
            self.hierarchy_changed();
        }
    }

    /// Unlinks `child` from this node without firing any event.
    fn unlink_child(&self, child: &Rc<Node>) {
        unlink(&self.first_child, child);
        *child.parent.borrow_mut() = Weak::new();
        self.child_count.set(self.child_count.get().saturating_sub(1));
    }

    // ========== Scene Membership ==========

    /// True when this node is a root of `scene`.
    pub(crate) fn is_root_of(&self, scene: &Weak<Scene>) -> bool {
        Weak::ptr_eq(&self.scene.borrow(), scene)
    }

    pub(crate) fn set_scene(&self, scene: Weak<Scene>) {
        *self.scene.borrow_mut() = scene;
    }

    // ========== Events ==========

    fn parent_changed(&self, old_parent: Option<&Rc<Node>>) {
        self.notify(|l| l.parent_changed(self, old_parent));
    }

    fn child_added(&self, child: &Rc<Node>) {
        self.notify(|l| l.child_added(self, child));
        child.transform_changed();
        if self.notify_hierarchy_changed.get() {
            self.hierarchy_changed();
        }
    }

    fn child_removed(&self, child: &Rc<Node>) {
        self.notify(|l| l.child_removed(self, child));
        if self.notify_hierarchy_changed.get() {
            self.hierarchy_changed();
        }
    }

    /// The set of children changed: the aggregate bounds of this node and
    /// every ancestor are stale.
    fn hierarchy_changed(&self) {
        self.notify(|l| l.hierarchy_changed(self));
        self.set_bounds_dirty();
    }
}

/// Unlinks `node` from the sibling chain owned by `head`, clearing the
/// node's sibling links. The caller must hold its own reference to `node`.
pub(crate) fn unlink(head: &RefCell<Option<Rc<Node>>>, node: &Rc<Node>) {
    let next = node.next_sibling.borrow_mut().take();
    let prev = std::mem::take(&mut *node.prev_sibling.borrow_mut()).upgrade();

    if let Some(next) = &next {
        *next.prev_sibling.borrow_mut() = prev.as_ref().map(Rc::downgrade).unwrap_or_default();
    }
    match prev {
        Some(prev) => *prev.next_sibling.borrow_mut() = next,
        None => *head.borrow_mut() = next,
    }
}

/// Releases a sibling chain front to back without recursing along it.
/// Nodes kept alive elsewhere become detached roots.
pub(crate) fn release_chain(mut next: Option<Rc<Node>>) {
    while let Some(node) = next {
        next = node.next_sibling.borrow_mut().take();
        *node.prev_sibling.borrow_mut() = Weak::new();
        *node.parent.borrow_mut() = Weak::new();
        *node.scene.borrow_mut() = Weak::new();
    }
}

/// Appends `node` after `tail` (or as `head` when the chain is empty).
pub(crate) fn link_after(
    head: &RefCell<Option<Rc<Node>>>,
    tail: Option<&Rc<Node>>,
    node: &Rc<Node>,
) {
    *node.next_sibling.borrow_mut() = None;
    match tail {
        Some(tail) => {
            *node.prev_sibling.borrow_mut() = Rc::downgrade(tail);
            *tail.next_sibling.borrow_mut() = Some(node.clone());
        }
        None => {
            *node.prev_sibling.borrow_mut() = Weak::new();
            *head.borrow_mut() = Some(node.clone());
        }
    }
}

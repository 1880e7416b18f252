use std::rc::Rc;

use crate::Node;

/// Receives structural and transform events from a [`Node`].
///
/// Every method has a no-op default so implementors only override what they
/// need. Listeners are invoked from a snapshot of the node's listener list,
/// so they may add or remove listeners, or mutate the graph, while handling
/// an event.
pub trait NodeListener {
    /// The node's local transform, or that of an ancestor, changed.
    fn transform_changed(&self, _node: &Node) {}

    /// The node moved to a new parent (or to none). `old_parent` is the
    /// previous parent, if it is still alive.
    fn parent_changed(&self, _node: &Node, _old_parent: Option<&Rc<Node>>) {}

    fn child_added(&self, _node: &Node, _child: &Rc<Node>) {}

    fn child_removed(&self, _node: &Node, _child: &Rc<Node>) {}

    /// The node's set of children changed. Fired once per batch when
    /// children are removed in bulk.
    fn hierarchy_changed(&self, _node: &Node) {}
}

use std::rc::Rc;

use super::Node;

impl Node {
    /// Finds the first descendant whose id equals `id` (or starts with it
    /// when `exact_match` is false).
    ///
    /// Immediate children are checked before any grandchild. With
    /// `recursive`, each child's subtree is then searched in turn.
    pub fn find_node(&self, id: &str, recursive: bool, exact_match: bool) -> Option<Rc<Node>> {
        if let Some(found) = self.children().find(|child| child.id_matches(id, exact_match)) {
            return Some(found);
        }
        if recursive {
            return self
                .children()
                .find_map(|child| child.find_node(id, true, exact_match));
        }
        None
    }

    /// Appends every matching descendant to `nodes` using the same order as
    /// [`Node::find_node`] and returns how many were added.
    pub fn find_nodes(
        &self,
        id: &str,
        nodes: &mut Vec<Rc<Node>>,
        recursive: bool,
        exact_match: bool,
    ) -> usize {
        let before = nodes.len();
        nodes.extend(self.children().filter(|child| child.id_matches(id, exact_match)));
        if recursive {
            for child in self.children() {
                child.find_nodes(id, nodes, true, exact_match);
            }
        }
        nodes.len() - before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// root
    /// ├── arm_left
    /// │   └── hand
    /// └── arm_right
    ///     └── hand_right
    fn rig() -> Rc<Node> {
        let root = Node::create("root");
        let left = Node::create("arm_left");
        let right = Node::create("arm_right");
        root.add_child(&right);
        root.add_child(&left);
        left.add_child(&Node::create("hand"));
        right.add_child(&Node::create("hand_right"));
        root
    }

    #[test]
    fn test_find_immediate_child() {
        let root = rig();
        assert_eq!(root.find_node("arm_right", false, true).unwrap().id(), "arm_right");
        assert!(root.find_node("hand", false, true).is_none());
    }

    #[test]
    fn test_find_recursive() {
        let root = rig();
        assert_eq!(root.find_node("hand_right", true, true).unwrap().id(), "hand_right");
        assert!(root.find_node("foot", true, true).is_none());
    }

    #[test]
    fn test_prefix_match() {
        let root = rig();
        // Children are checked before grandchildren
        assert_eq!(root.find_node("arm", true, false).unwrap().id(), "arm_left");
        assert_eq!(root.find_node("hand_", true, false).unwrap().id(), "hand_right");
    }

    #[test]
    fn test_find_does_not_match_self() {
        let root = rig();
        assert!(root.find_node("root", true, true).is_none());
    }

    #[test]
    fn test_find_nodes_collects_all() {
        let root = rig();
        let mut found = Vec::new();

        let count = root.find_nodes("hand", &mut found, true, false);

        assert_eq!(count, 2);
        let ids: Vec<String> = found.iter().map(|n| n.id()).collect();
        assert_eq!(ids, vec!["hand", "hand_right"]);
    }

    #[test]
    fn test_find_nodes_no_match_leaves_output() {
        let root = rig();
        let mut found = vec![root.clone()];

        assert_eq!(root.find_nodes("foot", &mut found, true, true), 0);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_find_nodes_non_recursive() {
        let root = rig();
        let mut found = Vec::new();
        assert_eq!(root.find_nodes("arm", &mut found, false, false), 2);
        assert_eq!(root.find_nodes("hand", &mut found, false, false), 0);
    }
}

use std::rc::Rc;

use crate::Node;

/// Trait for implementing tree traversal operations.
///
/// Implementors can be passed to [`walk_tree`] or
/// [`Scene::visit`](crate::Scene::visit) to perform arbitrary work on each
/// node. The visitor receives callbacks when entering and exiting nodes.
pub trait TreeVisitor {
    /// Called when entering a node, before its children.
    ///
    /// Returns true to continue into the children, false to skip the subtree.
    fn enter_node(&mut self, node: &Rc<Node>) -> bool;

    /// Called when exiting a node, after its children.
    fn exit_node(&mut self, _node: &Rc<Node>) {}
}

/// Walks the subtree rooted at `node` depth first, children in list order.
pub fn walk_tree<V: TreeVisitor>(node: &Rc<Node>, visitor: &mut V) {
    if visitor.enter_node(node) {
        for child in node.children() {
            walk_tree(&child, visitor);
        }
    }
    visitor.exit_node(node);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
        skip: Option<String>,
    }

    impl TreeVisitor for Recorder {
        fn enter_node(&mut self, node: &Rc<Node>) -> bool {
            self.events.push(format!("enter {}", node.id()));
            self.skip.as_deref() != Some(node.id().as_str())
        }

        fn exit_node(&mut self, node: &Rc<Node>) {
            self.events.push(format!("exit {}", node.id()));
        }
    }

    fn tree() -> Rc<Node> {
        let root = Node::create("root");
        let a = Node::create("a");
        root.add_child(&Node::create("b"));
        root.add_child(&a);
        a.add_child(&Node::create("a1"));
        root
    }

    #[test]
    fn test_walk_order() {
        let mut recorder = Recorder::default();
        walk_tree(&tree(), &mut recorder);

        assert_eq!(
            recorder.events,
            vec![
                "enter root", "enter a", "enter a1", "exit a1", "exit a", "enter b", "exit b",
                "exit root",
            ]
        );
    }

    #[test]
    fn test_skip_subtree() {
        let mut recorder = Recorder {
            skip: Some("a".to_string()),
            ..Default::default()
        };
        walk_tree(&tree(), &mut recorder);

        assert!(!recorder.events.iter().any(|e| e.contains("a1")));
        assert!(recorder.events.contains(&"exit a".to_string()));
    }

    #[test]
    fn test_count_visitor() {
        struct Count(usize);
        impl TreeVisitor for Count {
            fn enter_node(&mut self, _node: &Rc<Node>) -> bool {
                self.0 += 1;
                true
            }
        }

        let mut count = Count(0);
        walk_tree(&tree(), &mut count);
        assert_eq!(count.0, 4);
    }
}

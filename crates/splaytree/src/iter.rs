//! In-order traversal

use crate::tree::{NodeId, SplayTree};

/// In-order iterator over a [`SplayTree`], created by [`SplayTree::iter`]
///
/// Walks with an explicit stack and never splays.
pub struct Iter<'a, K, V> {
    tree: &'a SplayTree<K, V>,
    stack: Vec<NodeId>,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(tree: &'a SplayTree<K, V>) -> Self {
        let mut iter = Self {
            tree,
            stack: Vec::new(),
        };
        iter.push_left_spine(tree.root());
        iter
    }

    fn push_left_spine(&mut self, mut cursor: Option<NodeId>) {
        while let Some(id) = cursor {
            self.stack.push(id);
            cursor = self.tree.node(id).left;
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.tree.node(id);
        self.push_left_spine(node.right);
        Some((&node.key, &node.value))
    }
}

//! Splay tree implementation
//!
//! Nodes are stored in an arena and never freed; the tree only grows.

use std::cmp::Ordering;

use crate::iter::Iter;

/// Index of a node in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeId(usize);

/// Node in the splay tree
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V, parent: Option<NodeId>) -> Self {
        Self {
            key,
            value,
            parent,
            left: None,
            right: None,
        }
    }
}

/// Ordered key-value store that splays every successful lookup to the root
pub struct SplayTree<K, V> {
    nodes: Vec<Node<K, V>>,
    root: Option<NodeId>,
}

impl<K: Ord, V> SplayTree<K, V> {
    /// Create an empty tree
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }

    /// Insert a key-value pair as a new leaf
    ///
    /// The tree is not rebalanced on insert. A key equal to an existing one
    /// is placed in that node's right subtree, so duplicates are kept.
    pub fn insert(&mut self, key: K, value: V) {
        let id = NodeId(self.nodes.len());

        let Some(mut current) = self.root else {
            self.nodes.push(Node::new(key, value, None));
            self.root = Some(id);
            return;
        };

        let goes_left = loop {
            let node = self.node(current);
            let goes_left = key < node.key;
            let next = if goes_left { node.left } else { node.right };
            match next {
                Some(child) => current = child,
                None => break goes_left,
            }
        };

        self.nodes.push(Node::new(key, value, Some(current)));
        let parent = self.node_mut(current);
        if goes_left {
            parent.left = Some(id);
        } else {
            parent.right = Some(id);
        }
    }

    /// Look up a key, splaying the matching node to the root
    ///
    /// # Returns
    /// * `Some((key, value))` - The stored pair, now at the root
    /// * `None` - Key absent; the tree shape is left untouched
    pub fn find(&mut self, key: &K) -> Option<(&K, &V)> {
        let id = self.locate(key)?;
        self.splay(id);
        let node = self.node(id);
        Some((&node.key, &node.value))
    }

    /// Check whether a key is present without splaying
    pub fn contains_key(&self, key: &K) -> bool {
        self.locate(key).is_some()
    }

    /// Key currently stored at the root
    pub fn root_key(&self) -> Option<&K> {
        self.root.map(|id| &self.node(id).key)
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes on the longest root-to-leaf path
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|id| (id, 1)).into_iter().collect();

        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            let node = self.node(id);
            for child in [node.left, node.right].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }

        height
    }

    /// In-order iterator over `(key, value)` pairs
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self)
    }

    /// Verify the ordering and parent-link invariants
    ///
    /// Keys must come out of an in-order walk in non-decreasing order, every
    /// child must point back at its parent, and every node must be reachable
    /// from the root.
    pub fn is_valid_bst(&self) -> bool {
        let Some(root) = self.root else {
            return self.nodes.is_empty();
        };
        if self.node(root).parent.is_some() {
            return false;
        }

        let mut reachable = 0;
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            reachable += 1;
            let node = self.node(id);
            for child in [node.left, node.right].into_iter().flatten() {
                if self.node(child).parent != Some(id) {
                    return false;
                }
                stack.push(child);
            }
        }
        if reachable != self.nodes.len() {
            return false;
        }

        let keys: Vec<&K> = self.iter().map(|(key, _)| key).collect();
        keys.windows(2).all(|pair| pair[0] <= pair[1])
    }

    /// Find the uppermost node holding `key`
    fn locate(&self, key: &K) -> Option<NodeId> {
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let node = self.node(id);
            cursor = match key.cmp(&node.key) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(id),
            };
        }
        None
    }

    /// Rotate `id` up until it becomes the root
    fn splay(&mut self, id: NodeId) {
        while let Some(parent) = self.node(id).parent {
            let is_left = self.is_left_child(id);

            let Some(grand) = self.node(parent).parent else {
                // Zig
                if is_left {
                    self.rotate_right(parent);
                } else {
                    self.rotate_left(parent);
                }
                continue;
            };

            match (is_left, self.is_left_child(parent)) {
                // Zig-zig
                (true, true) => {
                    self.rotate_right(grand);
                    self.rotate_right(parent);
                }
                (false, false) => {
                    self.rotate_left(grand);
                    self.rotate_left(parent);
                }
                // Zig-zag
                (true, false) => {
                    self.rotate_right(parent);
                    self.rotate_left(grand);
                }
                (false, true) => {
                    self.rotate_left(parent);
                    self.rotate_right(grand);
                }
            }
        }
    }

    /// Promote the left child of `id` into its place
    fn rotate_right(&mut self, id: NodeId) {
        let Some(pivot) = self.node(id).left else {
            return;
        };

        let inner = self.node(pivot).right;
        self.node_mut(id).left = inner;
        if let Some(inner) = inner {
            self.node_mut(inner).parent = Some(id);
        }

        self.replace_in_parent(id, pivot);
        self.node_mut(pivot).right = Some(id);
        self.node_mut(id).parent = Some(pivot);
    }

    /// Promote the right child of `id` into its place
    fn rotate_left(&mut self, id: NodeId) {
        let Some(pivot) = self.node(id).right else {
            return;
        };

        let inner = self.node(pivot).left;
        self.node_mut(id).right = inner;
        if let Some(inner) = inner {
            self.node_mut(inner).parent = Some(id);
        }

        self.replace_in_parent(id, pivot);
        self.node_mut(pivot).left = Some(id);
        self.node_mut(id).parent = Some(pivot);
    }

    /// Hang `new` where `old` hangs: under `old`'s parent, or at the root
    fn replace_in_parent(&mut self, old: NodeId, new: NodeId) {
        let parent = self.node(old).parent;
        self.node_mut(new).parent = parent;

        match parent {
            None => self.root = Some(new),
            Some(parent) => {
                let parent = self.node_mut(parent);
                if parent.left == Some(old) {
                    parent.left = Some(new);
                } else {
                    parent.right = Some(new);
                }
            }
        }
    }

    fn is_left_child(&self, id: NodeId) -> bool {
        match self.node(id).parent {
            Some(parent) => self.node(parent).left == Some(id),
            None => false,
        }
    }
}

impl<K, V> SplayTree<K, V> {
    pub(crate) fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<K, V> {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        &mut self.nodes[id.0]
    }
}

impl<K: Ord, V> Default for SplayTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K: Ord, V> IntoIterator for &'a SplayTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

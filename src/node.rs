//! The building block of a [`Tree`][crate::Tree].
//!
//! A `Node` is plain data: a key and two optional, exclusively owned children. It does not
//! enforce any ordering between itself and its children - keeping the search tree invariant is
//! the job of the `Tree` that owns the nodes.
//!
//! # Examples
//!
//! ```
//! use rebalance_bst::Node;
//!
//! let mut node = Node::new(2);
//! node.set_left(Some(Node::new(1)));
//! node.set_right(Some(Node::new(3)));
//!
//! assert_eq!(node.left().map(Node::key), Some(&1));
//! assert_eq!(node.right().map(Node::key), Some(&3));
//! assert_eq!(node.height(), 1);
//! ```

use std::fmt;

/// An owned, possibly empty, child slot.
pub(crate) type Link<K> = Option<Box<Node<K>>>;

/// The height of an empty subtree, one less than the height of a leaf.
pub(crate) const EMPTY_HEIGHT: isize = -1;

/// The height of a possibly empty subtree. See [`Node::height`].
pub(crate) fn subtree_height<K>(node: Option<&Node<K>>) -> isize {
    node.map_or(EMPTY_HEIGHT, |node| node.height() as isize)
}

/// A binary tree cell holding a key and up to two children.
pub struct Node<K> {
    pub(crate) key: K,
    pub(crate) left: Link<K>,
    pub(crate) right: Link<K>,
}

impl<K> Clone for Node<K>
where
    K: Clone,
{
    // Copies the subtree bottom up from an explicit stack so a long path can't exhaust the call
    // stack.
    fn clone(&self) -> Self {
        // Copied subtrees waiting for their parent, innermost last.
        let mut copied: Vec<Node<K>> = Vec::new();
        let mut stack = Vec::new();
        stack.extend(self.right().map(|right| (right, false)));
        stack.extend(self.left().map(|left| (left, false)));
        while let Some((node, expanded)) = stack.pop() {
            if !expanded {
                stack.push((node, true));
                stack.extend(node.right().map(|right| (right, false)));
                stack.extend(node.left().map(|left| (left, false)));
                continue;
            }
            let copy = node.copy_with_children(&mut copied);
            copied.push(copy);
        }

        self.copy_with_children(&mut copied)
    }
}

impl<K> fmt::Debug for Node<K>
where
    K: fmt::Debug,
{
    // Only one level deep, use the traversals on `Tree` to see a whole subtree.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("left", &self.left().map(Node::key))
            .field("right", &self.right().map(Node::key))
            .finish()
    }
}

impl<K> Node<K> {
    /// Creates a node with the given key and no children.
    pub fn new(key: K) -> Self {
        Self {
            key,
            left: None,
            right: None,
        }
    }

    /// The key stored in this node.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Replaces the key stored in this node, returning the old one.
    pub fn set_key(&mut self, key: K) -> K {
        std::mem::replace(&mut self.key, key)
    }

    /// The left child, if any.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The right child, if any.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Mutable access to the left child, if any.
    pub fn left_mut(&mut self) -> Option<&mut Self> {
        self.left.as_deref_mut()
    }

    /// Mutable access to the right child, if any.
    pub fn right_mut(&mut self) -> Option<&mut Self> {
        self.right.as_deref_mut()
    }

    /// Replaces the left subtree and returns the one previously owned by this node. Dropping the
    /// returned subtree releases it.
    pub fn set_left(&mut self, left: Option<Self>) -> Option<Self> {
        std::mem::replace(&mut self.left, left.map(Box::new)).map(|old| *old)
    }

    /// Replaces the right subtree and returns the one previously owned by this node. Dropping the
    /// returned subtree releases it.
    pub fn set_right(&mut self, right: Option<Self>) -> Option<Self> {
        std::mem::replace(&mut self.right, right.map(Box::new)).map(|old| *old)
    }

    /// Returns `true` if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// The number of edges on the longest path from this node down to a leaf. A node without
    /// children has a height of 0.
    ///
    /// This walks the subtree one level at a time so arbitrarily deep (degenerate) subtrees don't
    /// grow the call stack.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut level = vec![self];
        loop {
            let next = level
                .iter()
                .copied()
                .flat_map(Node::children)
                .collect::<Vec<_>>();
            if next.is_empty() {
                return height;
            }
            height += 1;
            level = next;
        }
    }

    /// Copies this node's key and takes its already copied children off the top of `copied`. In
    /// post-order the right subtree finishes last so its copy is on top.
    fn copy_with_children(&self, copied: &mut Vec<Self>) -> Self
    where
        K: Clone,
    {
        let right = self.right.as_ref().and_then(|_| copied.pop()).map(Box::new);
        let left = self.left.as_ref().and_then(|_| copied.pop()).map(Box::new);
        Self {
            key: self.key.clone(),
            left,
            right,
        }
    }

    /// The existing children of this node, left before right.
    pub(crate) fn children(&self) -> impl Iterator<Item = &Self> {
        self.left().into_iter().chain(self.right())
    }
}

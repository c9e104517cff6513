//! A Binary Search Tree that is balanced on demand. Building a tree from a collection of keys
//! always produces a tree of minimal height. After that, `insert` and `delete` edit the nodes in
//! place without any rotations so the tree may drift out of balance. [`Tree::is_balanced`]
//! reports whether that happened and [`Tree::rebalance`] rebuilds the tree when it did.
//!
//! # Examples
//!
//! ```
//! use rebalance_bst::Tree;
//!
//! // Duplicates are dropped and the median becomes the root.
//! let mut tree = Tree::from_keys(vec![4, 3, 2, 5, 6, 4, 8, 9]);
//! assert_eq!(tree.len(), 7);
//! assert_eq!(tree.root().map(|root| *root.key()), Some(5));
//!
//! // Inserting ever larger keys grows a single path on the right.
//! for key in 10..15 {
//!     tree.insert(key);
//! }
//! assert!(!tree.is_balanced());
//!
//! // Rebuilding restores a minimal height without losing any keys.
//! tree.rebalance();
//! assert!(tree.is_balanced());
//! assert_eq!(tree.len(), 12);
//! ```

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;

use log::{debug, trace};

use crate::node::{subtree_height, Link, Node};

/// A Binary Search Tree of unique keys. Keys in a node's left subtree are always smaller than the
/// node's key and keys in its right subtree are always larger.
pub struct Tree<K> {
    root: Link<K>,
    /// The keys this tree was built from, as given.
    input: Vec<K>,
    /// How many nodes are in the tree.
    len: usize,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Drop for Tree<K> {
    // Dropping a `Box<Node>` recurses through its children which can blow the stack for a tree
    // that has degenerated into a long path. Detach every node first so each drop is shallow.
    fn drop(&mut self) {
        let mut stack = self.root.take().into_iter().collect::<Vec<_>>();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<K> Clone for Tree<K>
where
    K: Clone,
{
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            input: self.input.clone(),
            len: self.len,
        }
    }
}

impl<K> fmt::Debug for Tree<K>
where
    K: fmt::Debug,
{
    // The keys in order rather than the nested nodes, which would recurse once per level.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys = Vec::with_capacity(self.len);
        self.inorder_for_each(|node| keys.push(node.key()));
        f.debug_struct("Tree")
            .field("keys", &keys)
            .field("len", &self.len)
            .field("input", &self.input)
            .finish()
    }
}

impl<K> FromIterator<K> for Tree<K>
where
    K: Ord + Clone,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self::from_keys(iter.into_iter().collect())
    }
}

impl<K> Tree<K> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            root: None,
            input: Vec::new(),
            len: 0,
        }
    }

    /// Builds a balanced tree from the given keys. The keys may be in any order and may contain
    /// duplicates. They are kept as given and can be read back with [`Tree::input`].
    ///
    /// # Examples
    ///
    /// ```
    /// use rebalance_bst::Tree;
    ///
    /// let tree = Tree::from_keys(vec![3, 1, 2, 3]);
    ///
    /// assert_eq!(tree.input(), &[3, 1, 2, 3]);
    /// assert_eq!(tree.len(), 3);
    /// assert_eq!(tree.root().map(|root| *root.key()), Some(2));
    /// ```
    pub fn from_keys(keys: Vec<K>) -> Self
    where
        K: Ord + Clone,
    {
        let sorted = Self::sorted_unique(keys.clone());
        let len = sorted.len();
        let root = Self::build_balanced(&mut sorted.into_iter(), len);
        debug!("built tree of {} nodes from {} keys", len, keys.len());

        Self {
            root,
            input: keys,
            len,
        }
    }

    /// Sorts and deduplicates `keys`, then links them into a tree of minimal height and returns
    /// its root. An empty collection gives `None`.
    ///
    /// When a range of keys has an even length, the lower of the two middle keys becomes the
    /// subtree's root.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebalance_bst::Tree;
    ///
    /// let root = Tree::build_tree(vec![4, 1, 3, 2, 2]).unwrap();
    ///
    /// assert_eq!(root.key(), &2);
    /// assert_eq!(root.left().map(|n| *n.key()), Some(1));
    /// assert_eq!(root.right().map(|n| *n.key()), Some(3));
    /// assert!(Tree::<i32>::build_tree(Vec::new()).is_none());
    /// ```
    pub fn build_tree(keys: Vec<K>) -> Option<Box<Node<K>>>
    where
        K: Ord,
    {
        let sorted = Self::sorted_unique(keys);
        let len = sorted.len();
        Self::build_balanced(&mut sorted.into_iter(), len)
    }

    /// The root node, or `None` if the tree is empty.
    pub fn root(&self) -> Option<&Node<K>> {
        self.root.as_deref()
    }

    /// The keys this tree was originally built from, including any duplicates.
    pub fn input(&self) -> &[K] {
        &self.input
    }

    /// The number of keys in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree has no keys.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Adds `key` to the tree, returning `false` if it was already present. The new node is
    /// always added as a leaf - the tree is not rebalanced.
    ///
    /// Inserting into an empty tree makes `key` the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebalance_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> bool
    where
        K: Ord,
    {
        let mut link = &mut self.root;
        while let Some(ref mut node) = *link {
            link = match key.cmp(&node.key) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => {
                    trace!("key already present, skipping insert");
                    return false;
                }
            };
        }

        *link = Some(Box::new(Node::new(key)));
        self.len += 1;
        true
    }

    /// Finds the node holding `key`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebalance_bst::Tree;
    ///
    /// let tree = Tree::from_keys(vec![4, 3, 2, 5, 6, 4, 8, 9]);
    ///
    /// assert_eq!(tree.search(&5).map(|n| *n.key()), Some(5));
    /// assert!(tree.search(&1).is_none());
    /// ```
    pub fn search(&self, key: &K) -> Option<&Node<K>>
    where
        K: Ord,
    {
        let mut current = self.root();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return Some(node),
            };
        }

        None
    }

    /// Returns `true` if `key` is in the tree.
    pub fn contains(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.search(key).is_some()
    }

    /// The number of edges between the root and the node holding `key`, or `None` if `key` isn't
    /// in the tree. The root has a depth of 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebalance_bst::Tree;
    ///
    /// let tree = Tree::from_keys(vec![1, 7, 4, 23, 8, 9, 4, 3, 5, 7, 9, 67, 6345, 324]);
    ///
    /// assert_eq!(tree.depth(&8), Some(0));
    /// assert_eq!(tree.depth(&9), Some(2));
    /// assert_eq!(tree.depth(&2), None);
    /// ```
    pub fn depth(&self, key: &K) -> Option<usize>
    where
        K: Ord,
    {
        let mut depth = 0;
        let mut current = self.root();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return Some(depth),
            };
            depth += 1;
        }

        None
    }

    /// The height of the subtree rooted at the node holding `key`, or `None` if `key` isn't in the
    /// tree. A leaf has a height of 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebalance_bst::Tree;
    ///
    /// let tree = Tree::from_keys(vec![1, 2, 3, 4, 5, 6, 7]);
    ///
    /// assert_eq!(tree.height(&4), Some(2));
    /// assert_eq!(tree.height(&1), Some(0));
    /// assert_eq!(tree.height(&42), None);
    /// ```
    pub fn height(&self, key: &K) -> Option<usize>
    where
        K: Ord,
    {
        self.search(key).map(Node::height)
    }

    /// Removes `key` from the tree and returns it. If the tree doesn't contain `key`, nothing
    /// happens and `None` is returned. The tree is not rebalanced.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebalance_bst::Tree;
    ///
    /// let mut tree = Tree::from_keys(vec![1, 2, 3]);
    ///
    /// assert_eq!(tree.delete(&2), Some(2));
    /// assert_eq!(tree.delete(&2), None);
    /// assert!(tree.search(&2).is_none());
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn delete(&mut self, key: &K) -> Option<K>
    where
        K: Ord,
    {
        let mut link = &mut self.root;
        let removed = loop {
            let Some(node) = link.as_ref() else {
                trace!("key not found, skipping delete");
                return None;
            };
            link = match key.cmp(&node.key) {
                Ordering::Less => &mut link.as_mut()?.left,
                Ordering::Greater => &mut link.as_mut()?.right,
                Ordering::Equal => break Self::remove_node(link),
            };
        };

        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Visits every node breadth first: the root, then each level from left to right.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebalance_bst::Tree;
    ///
    /// let tree = Tree::from_keys(vec![1, 2, 3, 4, 5, 6, 7]);
    /// let mut keys = Vec::new();
    /// tree.level_order_for_each(|node| keys.push(*node.key()));
    ///
    /// assert_eq!(keys, vec![4, 2, 6, 1, 3, 5, 7]);
    /// ```
    pub fn level_order_for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&Node<K>),
    {
        let mut queue = self.root().into_iter().collect::<VecDeque<_>>();
        while let Some(node) = queue.pop_front() {
            visit(node);
            queue.extend(node.children());
        }
    }

    /// Visits the left subtree, then the node, then the right subtree. Keys are visited in
    /// ascending order.
    pub fn inorder_for_each<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(&'a Node<K>),
    {
        let mut stack = Vec::new();
        let mut current = self.root();
        loop {
            while let Some(node) = current {
                stack.push(node);
                current = node.left();
            }
            let Some(node) = stack.pop() else {
                break;
            };
            visit(node);
            current = node.right();
        }
    }

    /// Visits the node, then the left subtree, then the right subtree.
    pub fn preorder_for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&Node<K>),
    {
        let mut stack = self.root().into_iter().collect::<Vec<_>>();
        while let Some(node) = stack.pop() {
            visit(node);
            stack.extend(node.right());
            stack.extend(node.left());
        }
    }

    /// Visits the left subtree, then the right subtree, then the node.
    pub fn postorder_for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&Node<K>),
    {
        // The flag marks nodes whose children have already been pushed.
        let mut stack = self
            .root()
            .map(|root| (root, false))
            .into_iter()
            .collect::<Vec<_>>();
        while let Some((node, expanded)) = stack.pop() {
            if expanded {
                visit(node);
            } else {
                stack.push((node, true));
                stack.extend(node.right().map(|right| (right, false)));
                stack.extend(node.left().map(|left| (left, false)));
            }
        }
    }

    /// Returns `true` if, for every node, the heights of its two subtrees differ by at most one.
    /// An empty tree is balanced.
    ///
    /// Heights are computed bottom up in a single pass which stops at the first unbalanced node.
    pub fn is_balanced(&self) -> bool {
        // Subtree heights waiting for their parent, innermost last.
        let mut heights: Vec<isize> = Vec::new();
        let mut balanced = true;
        let mut stack = self
            .root()
            .map(|root| (root, false))
            .into_iter()
            .collect::<Vec<_>>();
        while let Some((node, expanded)) = stack.pop() {
            if !expanded {
                stack.push((node, true));
                stack.extend(node.right().map(|right| (right, false)));
                stack.extend(node.left().map(|left| (left, false)));
                continue;
            }

            // Post-order: the right subtree finished last so its height is on top. Empty subtrees
            // never pushed one.
            let right = node
                .right()
                .and_then(|_| heights.pop())
                .unwrap_or_else(|| subtree_height(node.right()));
            let left = node
                .left()
                .and_then(|_| heights.pop())
                .unwrap_or_else(|| subtree_height(node.left()));
            if (left - right).abs() > 1 {
                balanced = false;
                break;
            }
            heights.push(1 + left.max(right));
        }

        balanced
    }

    /// Rebuilds the tree into one of minimal height if it isn't balanced. A balanced tree is left
    /// untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebalance_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for key in 0..7 {
    ///     tree.insert(key);
    /// }
    /// assert_eq!(tree.height(&0), Some(6));
    ///
    /// tree.rebalance();
    /// assert_eq!(tree.root().map(|root| *root.key()), Some(3));
    /// assert_eq!(tree.height(&3), Some(2));
    /// ```
    pub fn rebalance(&mut self) {
        if self.is_balanced() {
            debug!("tree of {} nodes is already balanced", self.len);
            return;
        }

        debug!("rebuilding unbalanced tree of {} nodes", self.len);
        let keys = Self::drain_in_order(self.root.take(), self.len);
        let len = keys.len();
        self.root = Self::build_balanced(&mut keys.into_iter(), len);
        self.len = len;

        debug_assert!(self.is_balanced());
    }

    fn sorted_unique(mut keys: Vec<K>) -> Vec<K>
    where
        K: Ord,
    {
        keys.sort_unstable();
        keys.dedup();
        keys
    }

    /// Links the next `count` keys of an ascending iterator into a tree of minimal height. The
    /// left subtree takes the lower half of the keys, rounding down.
    fn build_balanced<I>(keys: &mut I, count: usize) -> Link<K>
    where
        I: Iterator<Item = K>,
    {
        if count == 0 {
            return None;
        }

        let left_count = (count - 1) / 2;
        let left = Self::build_balanced(keys, left_count);
        let mut node = Node::new(keys.next()?);
        node.left = left;
        node.right = Self::build_balanced(keys, count - 1 - left_count);

        Some(Box::new(node))
    }

    /// Takes apart the subtree in `link` and returns its keys in ascending order.
    fn drain_in_order(link: Link<K>, capacity: usize) -> Vec<K> {
        let mut keys = Vec::with_capacity(capacity);
        let mut stack = Vec::new();
        let mut current = link;
        loop {
            while let Some(mut node) = current {
                current = node.left.take();
                stack.push(node);
            }
            let Some(node) = stack.pop() else {
                break;
            };
            let Node { key, right, .. } = *node;
            keys.push(key);
            current = right;
        }

        keys
    }

    /// Removes the node in `link` and splices its children back into place, returning its key.
    ///
    /// A node with two children keeps its place in the tree. It takes the key of its in-order
    /// successor and the successor is removed from the right subtree instead.
    fn remove_node(link: &mut Link<K>) -> Option<K> {
        let mut node = link.take()?;
        match (node.left.take(), node.right.take()) {
            (None, right) => {
                *link = right;
                Some(node.key)
            }
            (left, None) => {
                *link = left;
                Some(node.key)
            }
            (left, right) => {
                node.left = left;
                node.right = right;
                let successor = Self::take_min(&mut node.right);
                let removed = successor.map(|successor| node.set_key(successor));
                *link = Some(node);
                removed
            }
        }
    }

    /// Detaches the leftmost node of the subtree in `link`, moving its right child up into its
    /// place, and returns its key.
    fn take_min(mut link: &mut Link<K>) -> Option<K> {
        while link.as_ref().is_some_and(|node| node.left.is_some()) {
            link = &mut link.as_mut()?.left;
        }

        let node = link.take()?;
        let Node { key, right, .. } = *node;
        *link = right;
        Some(key)
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and a `BTreeSet` so that, after a random smattering
    /// of inserts, deletes and rebuilds, they should hold the same keys in the same order.
    fn do_ops<K>(ops: &[Op<K>], bst: &mut Tree<K>, set: &mut BTreeSet<K>)
    where
        K: Ord + Clone + std::fmt::Debug,
    {
        for op in ops {
            match op {
                Op::Insert(k) => {
                    assert_eq!(bst.insert(k.clone()), set.insert(k.clone()));
                }
                Op::Delete(k) => {
                    assert_eq!(bst.delete(k), set.take(k));
                }
                Op::Rebalance => {
                    bst.rebalance();
                    assert!(bst.is_balanced());
                }
            }
        }
    }

    fn sorted_keys<K: Clone>(tree: &Tree<K>) -> Vec<K> {
        let mut keys = Vec::new();
        tree.inorder_for_each(|node| keys.push(node.key().clone()));
        keys
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut tree = Tree::new();
            let mut set = BTreeSet::new();

            do_ops(&ops, &mut tree, &mut set);
            tree.len() == set.len() && sorted_keys(&tree) == set.into_iter().collect::<Vec<_>>()
        }
    }

    quickcheck::quickcheck! {
        fn build_is_balanced_and_sorted(xs: Vec<i16>) -> bool {
            let tree = Tree::from_keys(xs.clone());
            let expected = xs.into_iter().collect::<BTreeSet<_>>();

            tree.is_balanced() && sorted_keys(&tree) == expected.into_iter().collect::<Vec<_>>()
        }
    }

    quickcheck::quickcheck! {
        fn depth_plus_height_bounded_by_root_height(xs: Vec<i8>) -> bool {
            let mut tree = Tree::new();
            for x in &xs {
                tree.insert(*x);
            }
            let Some(root_height) = tree.root().map(Node::height) else {
                return xs.is_empty();
            };

            xs.iter().all(|x| match (tree.depth(x), tree.height(x)) {
                (Some(depth), Some(height)) => depth + height <= root_height,
                _ => false,
            })
        }
    }
}

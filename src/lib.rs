//! This crate exposes a Binary Search Tree (BST) that is balanced on demand,
//! mostly for educational purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored keys. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key and
//! will sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for keys in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). Building the tree from a sorted run of keys
//! limits the height to `O(lg N)` where `N` is the number of nodes in the tree.
//!
//! ## Balancing on demand
//!
//! Unlike an AVL or Red-Black tree, [`Tree`] does not rotate nodes as it is edited. Inserts and
//! deletes are plain BST edits and can leave the tree lopsided. A tree is _balanced_ when, for
//! every node, the heights of its two subtrees differ by at most one. [`Tree::is_balanced`] checks
//! that and [`Tree::rebalance`] rebuilds the whole tree from its sorted keys when it fails.
//!
//! Visiting nodes is done with callbacks: [`Tree::level_order_for_each`],
//! [`Tree::inorder_for_each`], [`Tree::preorder_for_each`] and [`Tree::postorder_for_each`].
//! [`Tree`] implements `Display` (see [`pretty`]) and [`util`] has helpers to generate keys.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod node;
pub mod pretty;
pub mod tree;
pub mod util;

#[cfg(test)]
pub(crate) mod test;

pub use node::Node;
pub use tree::Tree;

//! Renders a [`Tree`] sideways for reading in a terminal. The right subtree is drawn above its
//! parent and the left subtree below, so the keys read in descending order from top to bottom.
//!
//! ```
//! use rebalance_bst::Tree;
//!
//! let tree = Tree::from_keys(vec![1, 2, 3]);
//!
//! assert_eq!(tree.to_string(), "│   ┌── 3\n└── 2\n    └── 1\n");
//! ```

use std::fmt;

use crate::node::Node;
use crate::tree::Tree;

impl<K> fmt::Display for Tree<K>
where
    K: fmt::Display,
{
    // Walks right, node, left from an explicit stack. All nodes share one prefix buffer: each
    // frame remembers how long the prefix was when it was pushed and cuts the buffer back to that
    // before using it, so the buffer only ever holds the path to the current node.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut prefix = String::new();
        let mut stack = self
            .root()
            .map(|root| Frame::new(root, true, 0))
            .into_iter()
            .collect::<Vec<_>>();
        while let Some(frame) = stack.pop() {
            prefix.truncate(frame.prefix_len);
            let node = frame.node;
            if !frame.right_done {
                stack.push(Frame {
                    right_done: true,
                    ..frame
                });
                if let Some(right) = node.right() {
                    prefix.push_str(if frame.is_left { "│   " } else { "    " });
                    stack.push(Frame::new(right, false, prefix.len()));
                }
                continue;
            }

            let connector = if frame.is_left { "└── " } else { "┌── " };
            writeln!(f, "{}{}{}", prefix, connector, node.key())?;

            if let Some(left) = node.left() {
                prefix.push_str(if frame.is_left { "    " } else { "│   " });
                stack.push(Frame::new(left, true, prefix.len()));
            }
        }

        Ok(())
    }
}

impl<K> Tree<K>
where
    K: fmt::Display,
{
    /// Prints the tree to stdout. See the [module docs][crate::pretty] for the layout.
    pub fn pretty_print(&self) {
        print!("{}", self);
    }
}

/// A node waiting to be drawn.
struct Frame<'a, K> {
    node: &'a Node<K>,
    /// Whether `node` hangs below its parent (or is the root).
    is_left: bool,
    /// Length of `node`'s prefix in the shared buffer.
    prefix_len: usize,
    /// Whether the right subtree, drawn above `node`, has been pushed.
    right_done: bool,
}

impl<'a, K> Frame<'a, K> {
    fn new(node: &'a Node<K>, is_left: bool, prefix_len: usize) -> Self {
        Self {
            node,
            is_left,
            prefix_len,
            right_done: false,
        }
    }
}

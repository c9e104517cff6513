//! Walks through the life of a [`Tree`]: build it from random keys, print it in every traversal
//! order, knock it out of balance with large keys and rebuild it.
//!
//! Set `RUST_LOG=debug` to see the tree's own logging.

use clap::Parser;
use rebalance_bst::{util, Tree};

/// Builds, unbalances and rebalances a binary search tree.
#[derive(Parser, Debug)]
#[clap(version)]
struct Args {
    /// How many random keys to build the tree from
    #[clap(short, long, default_value_t = 15)]
    count: usize,

    /// Random keys are drawn from 0..max
    #[clap(short, long, default_value_t = 100)]
    max: u32,

    /// Build from these keys instead of random ones, e.g. --keys 1 7 4 23
    #[clap(short, long, value_delimiter = ' ', num_args = 1..)]
    keys: Option<Vec<u32>>,

    /// How many keys above the largest key to insert to unbalance the tree
    #[clap(short, long, default_value_t = 5)]
    extra: u32,
}

fn joined(keys: &[u32]) -> String {
    keys.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_traversals(tree: &Tree<u32>) {
    let mut level = Vec::new();
    tree.level_order_for_each(|node| level.push(*node.key()));
    let mut pre = Vec::new();
    tree.preorder_for_each(|node| pre.push(*node.key()));
    let mut inorder = Vec::new();
    tree.inorder_for_each(|node| inorder.push(*node.key()));
    let mut post = Vec::new();
    tree.postorder_for_each(|node| post.push(*node.key()));

    println!("level order: {}", joined(&level));
    println!("preorder:    {}", joined(&pre));
    println!("inorder:     {}", joined(&inorder));
    println!("postorder:   {}", joined(&post));
}

fn main() {
    pretty_env_logger::init();
    let args = Args::parse();

    let keys = args
        .keys
        .unwrap_or_else(|| util::random_keys(args.count, args.max));
    let mut tree = Tree::from_keys(keys);
    println!("built from {:?}", tree.input());
    tree.pretty_print();
    println!("balanced: {}", tree.is_balanced());
    print_traversals(&tree);

    let mut largest = 0;
    tree.inorder_for_each(|node| largest = *node.key());
    for offset in 1..=args.extra {
        tree.insert(largest.saturating_add(offset.saturating_mul(100)));
    }
    println!();
    println!("after inserting {} large keys", args.extra);
    tree.pretty_print();
    println!("balanced: {}", tree.is_balanced());

    tree.rebalance();
    println!();
    println!("after rebalancing");
    tree.pretty_print();
    println!("balanced: {}", tree.is_balanced());
    print_traversals(&tree);
}

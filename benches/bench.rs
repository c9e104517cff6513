use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use rebalance_bst::Tree;

/// Returns how many nodes are needed to fill a binary tree with `num_levels` levels.
fn num_nodes_in_full_tree(num_levels: usize) -> usize {
    2usize.pow(num_levels as u32) - 1
}

/// Builds a tree by inserting values in an unbalanced manner. This adds elements in an
/// ascending manner so every node only has a right child.
fn get_unbalanced_tree(num_levels: usize) -> Tree<i32> {
    let mut tree = Tree::new();
    for x in (0..).take(num_nodes_in_full_tree(num_levels)) {
        tree.insert(x);
    }

    tree
}

/// Builds a tree of minimal height with `num_levels` of nodes, all full.
fn get_balanced_tree(num_levels: usize) -> Tree<i32> {
    Tree::from_keys((0..).take(num_nodes_in_full_tree(num_levels)).collect())
}

/// Helper to bench a function on a BST.
/// It creates a group for the given name and closure and runs tests for various sizes and
/// shapes of BSTs before finishing the group. The closure gets its own copy of the tree so it
/// may edit it.
fn bench_helper(c: &mut Criterion, name: &str, f: impl Fn(&mut Tree<i32>, i32)) {
    let mut group = c.benchmark_group(name);

    // Degenerate trees get expensive to build quickly so stop at 2^11.
    for num_levels in [3, 7, 11] {
        let tree_tests = [
            ("unbalanced", get_unbalanced_tree(num_levels)),
            ("balanced", get_balanced_tree(num_levels)),
        ];
        let largest_element_in_tree = num_nodes_in_full_tree(num_levels) - 1;
        for (name, tree) in tree_tests {
            let id = BenchmarkId::new(name, largest_element_in_tree);

            group.bench_function(id, |b| {
                b.iter_custom(|iters| {
                    let mut time = std::time::Duration::ZERO;
                    for _ in 0..iters {
                        let mut tree = black_box(tree.clone());
                        let instant = std::time::Instant::now();
                        f(&mut tree, black_box(largest_element_in_tree as i32));
                        time += instant.elapsed();
                    }
                    time
                })
            });
        }
    }

    group.finish();
}

/// Build trees from shuffled-looking input of various sizes.
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for num_levels in [3, 7, 11, 15] {
        let num_nodes = num_nodes_in_full_tree(num_levels);
        // Every key twice, descending, so both the sort and the dedup have work to do.
        let keys = (0..num_nodes as i32)
            .rev()
            .flat_map(|x| [x, x])
            .collect::<Vec<_>>();

        group.bench_with_input(BenchmarkId::from_parameter(num_nodes), &keys, |b, keys| {
            b.iter(|| Tree::build_tree(black_box(keys.clone())))
        });
    }

    group.finish();
}

/// Test BSTs. All tests are run against balanced and unbalanced trees of various sizes and test
/// successful and unsuccessful actions.
pub fn criterion_benchmark(c: &mut Criterion) {
    bench_build(c);

    bench_helper(c, "search", |tree, i| {
        let _node = black_box(tree.search(&i));
    });
    bench_helper(c, "depth", |tree, i| {
        let _depth = black_box(tree.depth(&i));
    });
    bench_helper(c, "delete", |tree, i| {
        tree.delete(&i);
    });
    bench_helper(c, "insert", |tree, i| {
        tree.insert(i + 1);
    });

    bench_helper(c, "search-miss", |tree, i| {
        let _node = black_box(tree.search(&(i + 1)));
    });
    bench_helper(c, "delete-miss", |tree, i| {
        tree.delete(&(i + 1));
    });

    bench_helper(c, "is-balanced", |tree, _| {
        let _balanced = black_box(tree.is_balanced());
    });
    bench_helper(c, "rebalance", |tree, _| {
        tree.rebalance();
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

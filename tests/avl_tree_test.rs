//! Behavioural tests for the AVL tree: rotations, deletion cases, traversals and queries.

use avlviz::domain::{AvlTree, TraversalKind};
use avlviz::util::testing;
use rstest::{fixture, rstest};

fn values(tree: &AvlTree<i64>, kind: TraversalKind) -> Vec<i64> {
    tree.values(kind).into_iter().copied().collect()
}

fn build(values: &[i64]) -> AvlTree<i64> {
    testing::init_test_setup();
    values.iter().copied().collect()
}

/// 5, 3, 8, 1, 4, 7, 9 inserted in this order needs no rotation.
#[fixture]
fn complete_tree() -> AvlTree<i64> {
    build(&[5, 3, 8, 1, 4, 7, 9])
}

// ============================================================
// Rotation scenarios
// ============================================================

#[rstest]
#[case::left_rotation(&[10, 20, 30])]
#[case::right_rotation(&[30, 20, 10])]
#[case::left_right(&[30, 10, 20])]
#[case::right_left(&[10, 30, 20])]
fn given_three_values_when_inserting_then_middle_value_becomes_root(#[case] input: &[i64]) {
    let tree = build(input);

    let root = tree.root().expect("root");
    assert_eq!(root.value(), &20);
    assert_eq!(root.left().map(|n| *n.value()), Some(10));
    assert_eq!(root.right().map(|n| *n.value()), Some(30));
    for node in tree.traversal(TraversalKind::Bfs) {
        assert_eq!(node.balance_factor(), 0, "node {}", node.value());
    }
    assert_eq!(root.height(), 2);
    assert_eq!(root.size(), 3);
}

#[test]
fn given_ascending_inserts_when_building_then_height_stays_logarithmic() {
    let tree = build(&(1..=1023).collect::<Vec<_>>());
    assert_eq!(tree.size(), 1023);
    assert_eq!(tree.height(), 10);
    assert!(tree.check_invariants().is_ok());
}

// ============================================================
// Traversals
// ============================================================

#[rstest]
#[case(TraversalKind::In, vec![1, 3, 4, 5, 7, 8, 9])]
#[case(TraversalKind::Pre, vec![5, 3, 1, 4, 8, 7, 9])]
#[case(TraversalKind::Post, vec![1, 4, 3, 7, 9, 8, 5])]
#[case(TraversalKind::Dfs, vec![5, 3, 1, 4, 8, 7, 9])]
#[case(TraversalKind::Bfs, vec![5, 3, 8, 1, 4, 7, 9])]
fn given_complete_tree_when_traversing_then_visits_in_order(
    complete_tree: AvlTree<i64>,
    #[case] kind: TraversalKind,
    #[case] expected: Vec<i64>,
) {
    assert_eq!(values(&complete_tree, kind), expected);
}

#[rstest]
fn given_traversal_when_requested_twice_then_results_are_identical(complete_tree: AvlTree<i64>) {
    let first = complete_tree.snapshot(TraversalKind::In);
    let second = complete_tree.snapshot(TraversalKind::In);
    assert_eq!(first, second);
    assert_eq!(first.len(), 7);
}

#[rstest]
fn given_snapshot_when_taken_then_exposes_node_caches(complete_tree: AvlTree<i64>) {
    let bfs = complete_tree.snapshot(TraversalKind::Bfs);
    let root = &bfs[0];
    assert_eq!((root.value, root.height, root.balance_factor, root.size), (5, 3, 0, 7));
    let leaf = &bfs[6];
    assert_eq!((leaf.value, leaf.height, leaf.balance_factor, leaf.size), (9, 1, 0, 1));
}

#[rstest]
fn given_complete_tree_when_querying_then_reports_shape(complete_tree: AvlTree<i64>) {
    assert_eq!(complete_tree.size(), 7);
    assert_eq!(complete_tree.height(), 3);
    assert_eq!(complete_tree.calculate_tree_height(), 3);
    assert_eq!(complete_tree.count_leaf_nodes(), 4);
    assert!(complete_tree.contains(&4));
    assert!(!complete_tree.contains(&6));
}

// ============================================================
// Deletion
// ============================================================

#[rstest]
fn given_leaf_when_deleting_then_it_is_detached(mut complete_tree: AvlTree<i64>) {
    assert!(complete_tree.delete(&9));
    assert_eq!(values(&complete_tree, TraversalKind::In), vec![1, 3, 4, 5, 7, 8]);
    assert_eq!(complete_tree.size(), 6);
    assert!(complete_tree.check_invariants().is_ok());
}

#[test]
fn given_single_child_node_when_deleting_then_child_is_spliced_in() {
    let mut tree = build(&[5, 3, 8, 1]);

    assert!(tree.delete(&3));

    let root = tree.root().unwrap();
    assert_eq!(root.value(), &5);
    assert_eq!(root.left().map(|n| *n.value()), Some(1));
    assert_eq!(root.right().map(|n| *n.value()), Some(8));
    assert!(tree.check_invariants().is_ok());
}

#[rstest]
fn given_two_child_root_when_deleting_then_successor_value_takes_its_place(
    mut complete_tree: AvlTree<i64>,
) {
    assert!(complete_tree.delete(&5));

    assert_eq!(complete_tree.root().map(|n| *n.value()), Some(7));
    assert_eq!(values(&complete_tree, TraversalKind::In), vec![1, 3, 4, 7, 8, 9]);
    assert!(complete_tree.check_invariants().is_ok());
}

#[test]
fn given_only_node_when_deleting_then_tree_is_empty() {
    let mut tree = build(&[42]);
    assert!(tree.delete(&42));
    assert!(tree.is_empty());
    assert_eq!(tree.height(), 0);
}

#[test]
fn given_deletion_unbalancing_root_when_deleting_then_root_rotates() {
    let mut tree = build(&[2, 1, 3, 4]);

    tree.delete(&1);

    let root = tree.root().unwrap();
    assert_eq!(root.value(), &3);
    assert_eq!(root.left().map(|n| *n.value()), Some(2));
    assert_eq!(root.right().map(|n| *n.value()), Some(4));
    assert!(tree.check_invariants().is_ok());
}

#[rstest]
fn given_deleted_value_when_deleting_again_then_nothing_changes(mut complete_tree: AvlTree<i64>) {
    assert!(complete_tree.delete(&4));
    assert!(!complete_tree.contains(&4));

    let before = complete_tree.clone();
    assert!(!complete_tree.delete(&4));
    assert_eq!(complete_tree, before);
    assert_eq!(complete_tree.size(), 6);
}

#[rstest]
fn given_duplicate_when_inserting_then_structure_is_unchanged(mut complete_tree: AvlTree<i64>) {
    let before = complete_tree.clone();
    assert!(!complete_tree.insert(4));
    assert_eq!(complete_tree, before);
}

#[test]
fn given_empty_tree_when_querying_then_returns_zero_values() {
    let tree = build(&[]);
    assert_eq!(tree.size(), 0);
    assert_eq!(tree.calculate_tree_height(), 0);
    assert_eq!(tree.count_leaf_nodes(), 0);
    for kind in TraversalKind::ALL {
        assert!(tree.traversal(kind).is_empty());
    }
}

#[test]
fn given_string_values_when_inserting_then_orders_lexicographically() {
    let tree: AvlTree<&str> = ["pear", "apple", "fig"].into_iter().collect();
    let order: Vec<&str> = tree.iter().copied().collect();
    assert_eq!(order, vec!["apple", "fig", "pear"]);
}

//! Property tests: search order, balance, height bound and size consistency
//! hold after every public operation.

use std::collections::BTreeSet;

use avlviz::domain::{AvlTree, TraversalKind};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Insert(i16),
    Delete(i16),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0i16..128).prop_map(Op::Insert),
        2 => (0i16..128).prop_map(Op::Delete),
    ]
}

fn height_bound(n: usize) -> usize {
    (1.44 * ((n + 2) as f64).log2()).ceil() as usize
}

proptest! {
    #[test]
    fn every_operation_keeps_tree_consistent(ops in prop::collection::vec(op(), 0..300)) {
        let mut tree = AvlTree::new();
        let mut model = BTreeSet::new();

        for op in ops {
            match op {
                Op::Insert(v) => prop_assert_eq!(tree.insert(v), model.insert(v)),
                Op::Delete(v) => prop_assert_eq!(tree.delete(&v), model.remove(&v)),
            }

            prop_assert!(tree.check_invariants().is_ok(), "{:?}", tree.check_invariants());
            prop_assert_eq!(tree.size(), model.len());
            prop_assert_eq!(tree.traversal(TraversalKind::Bfs).len(), model.len());
            prop_assert_eq!(tree.height(), tree.calculate_tree_height());
            prop_assert!(tree.height() <= height_bound(tree.size()));

            let in_order: Vec<i16> = tree.iter().copied().collect();
            let expected: Vec<i16> = model.iter().copied().collect();
            prop_assert_eq!(in_order, expected);
        }
    }

    #[test]
    fn duplicate_inserts_do_not_change_any_traversal(values in prop::collection::vec(any::<i32>(), 1..100)) {
        let once: AvlTree<i32> = values.iter().copied().collect();
        let mut twice = once.clone();
        twice.extend(values.iter().copied());

        for kind in TraversalKind::ALL {
            prop_assert_eq!(once.values(kind), twice.values(kind));
        }
    }

    #[test]
    fn deleted_values_are_absent_and_second_delete_is_noop(
        values in prop::collection::vec(0i32..500, 1..150),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut tree: AvlTree<i32> = values.iter().copied().collect();
        let target = values[pick.index(values.len())];

        prop_assert!(tree.delete(&target));
        prop_assert!(!tree.contains(&target));
        let size = tree.size();
        prop_assert!(!tree.delete(&target));
        prop_assert_eq!(tree.size(), size);
        prop_assert!(tree.check_invariants().is_ok());
    }

    #[test]
    fn in_order_is_strictly_increasing(values in prop::collection::vec(any::<i64>(), 0..200)) {
        let tree: AvlTree<i64> = values.into_iter().collect();
        let in_order = tree.values(TraversalKind::In);
        prop_assert!(in_order.windows(2).all(|pair| pair[0] < pair[1]));
    }
}

//! Rotations and the rebalancing rule applied after every height-changing mutation.
//!
//! All functions take ownership of a subtree root and hand back the (possibly
//! different) root of the restructured subtree. Callers store the returned box
//! in place of the one they passed in.

use tracing::trace;

use crate::domain::node::AvlNode;

type Subtree<T> = Box<AvlNode<T>>;

/// Left rotation on `z` with right child `y`.
///
/// `y.left` becomes `z.right`, `z` becomes `y.left`, `y` is the new root.
/// Returns `z` unchanged when it has no right child.
pub(crate) fn rotate_left<T>(mut z: Subtree<T>) -> Subtree<T> {
    let Some(mut y) = z.right.take() else {
        return z;
    };
    trace!("rotate left");
    z.right = y.left.take();
    z.refresh();
    y.left = Some(z);
    y.refresh();
    y
}

/// Right rotation on `y` with left child `x`; mirror of [`rotate_left`].
pub(crate) fn rotate_right<T>(mut y: Subtree<T>) -> Subtree<T> {
    let Some(mut x) = y.left.take() else {
        return y;
    };
    trace!("rotate right");
    y.left = x.right.take();
    y.refresh();
    x.right = Some(y);
    x.refresh();
    x
}

/// Refresh the caches of `node` and restore the AVL balance at it.
///
/// Assumes both child subtrees are already balanced with consistent caches.
pub(crate) fn rebalance<T>(mut node: Subtree<T>) -> Subtree<T> {
    node.refresh();

    if node.balance_factor > 1 {
        let left_bf = node.left.as_ref().map_or(0, |left| left.balance_factor);
        if left_bf < 0 {
            // left-right
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }

    if node.balance_factor < -1 {
        let right_bf = node.right.as_ref().map_or(0, |right| right.balance_factor);
        if right_bf > 0 {
            // right-left
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }

    node
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(value: i32) -> Subtree<i32> {
        Box::new(AvlNode::new(value))
    }

    fn join(value: i32, left: Option<Subtree<i32>>, right: Option<Subtree<i32>>) -> Subtree<i32> {
        let mut node = leaf(value);
        node.left = left;
        node.right = right;
        node.refresh();
        node
    }

    #[test]
    fn given_right_chain_when_rotating_left_then_middle_becomes_root() {
        let chain = join(10, None, Some(join(20, None, Some(leaf(30)))));

        let root = rotate_left(chain);

        assert_eq!(root.value, 20);
        assert_eq!(root.left().map(|n| n.value), Some(10));
        assert_eq!(root.right().map(|n| n.value), Some(30));
        assert_eq!(root.height, 2);
        assert_eq!(root.size, 3);
        assert_eq!(root.balance_factor, 0);
    }

    #[test]
    fn given_left_chain_when_rotating_right_then_middle_becomes_root() {
        let chain = join(30, Some(join(20, Some(leaf(10)), None)), None);

        let root = rotate_right(chain);

        assert_eq!(root.value, 20);
        assert_eq!(root.left().map(|n| n.value), Some(10));
        assert_eq!(root.right().map(|n| n.value), Some(30));
    }

    #[test]
    fn given_rotation_when_inner_subtree_exists_then_it_changes_sides() {
        // 10 -> right 20 (left 15, right 30)
        let tree = join(10, None, Some(join(20, Some(leaf(15)), Some(leaf(30)))));

        let root = rotate_left(tree);

        let left = root.left().unwrap();
        assert_eq!(left.value, 10);
        assert_eq!(left.right().map(|n| n.value), Some(15));
        assert_eq!(left.size, 2);
        assert_eq!(root.size, 4);
    }

    #[test]
    fn given_missing_child_when_rotating_then_node_is_returned_unchanged() {
        let root = rotate_left(leaf(1));
        assert_eq!(root.value, 1);
        let root = rotate_right(root);
        assert_eq!(root.value, 1);
    }

    #[test]
    fn given_left_right_shape_when_rebalancing_then_double_rotation_applies() {
        let tree = join(30, Some(join(10, None, Some(leaf(20)))), None);

        let root = rebalance(tree);

        assert_eq!(root.value, 20);
        assert_eq!(root.left().map(|n| n.value), Some(10));
        assert_eq!(root.right().map(|n| n.value), Some(30));
        assert_eq!(root.balance_factor, 0);
    }

    #[test]
    fn given_right_left_shape_when_rebalancing_then_double_rotation_applies() {
        let tree = join(10, None, Some(join(30, Some(leaf(20)), None)));

        let root = rebalance(tree);

        assert_eq!(root.value, 20);
        assert_eq!(root.left().map(|n| n.value), Some(10));
        assert_eq!(root.right().map(|n| n.value), Some(30));
    }

    #[test]
    fn given_balanced_node_when_rebalancing_then_shape_is_kept() {
        let tree = join(2, Some(leaf(1)), None);

        let root = rebalance(tree);

        assert_eq!(root.value, 2);
        assert_eq!(root.balance_factor, 1);
    }
}

//! Self-balancing binary search tree (AVL).
//!
//! The tree owns its root; every node owns its children and there are no
//! parent links. Mutations take the affected subtree out of its slot, rebuild
//! it on the way back up and store whatever root comes back, since a rotation
//! may replace the node that used to sit there.

use std::cmp::Ordering;
use std::fmt;

use tracing::{debug, instrument, trace};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::{AvlNode, Link};
use crate::domain::rotation::rebalance;
use crate::domain::traversal::{self, InOrderIter, NodeView, TraversalKind};

/// AVL tree over ordered, duplicate-free values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvlTree<T> {
    root: Link<T>,
}

impl<T> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AvlTree<T> {
    pub fn new() -> Self {
        Self { root: None }
    }

    pub fn root(&self) -> Option<&AvlNode<T>> {
        self.root.as_deref()
    }

    /// Number of stored values, 0 for an empty tree.
    pub fn size(&self) -> usize {
        self.root.as_ref().map_or(0, |root| root.size)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Cached height of the root, 0 for an empty tree.
    pub fn height(&self) -> usize {
        self.root.as_ref().map_or(0, |root| root.height)
    }

    /// Height computed by walking the tree, ignoring the cached `height` fields.
    pub fn calculate_tree_height(&self) -> usize {
        fn depth<T>(node: Option<&AvlNode<T>>) -> usize {
            match node {
                None => 0,
                Some(node) => 1 + depth(node.left()).max(depth(node.right())),
            }
        }
        depth(self.root())
    }

    /// Number of nodes without children.
    pub fn count_leaf_nodes(&self) -> usize {
        fn leaves<T>(node: Option<&AvlNode<T>>) -> usize {
            match node {
                None => 0,
                Some(node) if node.is_leaf() => 1,
                Some(node) => leaves(node.left()) + leaves(node.right()),
            }
        }
        leaves(self.root())
    }

    pub fn clear(&mut self) {
        self.root = None;
    }

    /// Nodes in the requested visit order, freshly collected on every call.
    pub fn traversal(&self, kind: TraversalKind) -> Vec<&AvlNode<T>> {
        traversal::collect(self.root(), kind)
    }

    /// Values in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        InOrderIter::new(self.root()).map(AvlNode::value)
    }

    /// Values in the requested visit order.
    pub fn values(&self, kind: TraversalKind) -> Vec<&T> {
        self.traversal(kind).into_iter().map(AvlNode::value).collect()
    }
}

impl<T: Clone> AvlTree<T> {
    /// Owned display snapshot of a traversal: value, height, balance factor and size per node.
    pub fn snapshot(&self, kind: TraversalKind) -> Vec<NodeView<T>> {
        self.traversal(kind).into_iter().map(NodeView::from).collect()
    }
}

impl<T: Ord + fmt::Debug> AvlTree<T> {
    /// Insert `value`, rebalancing every ancestor of the new leaf.
    ///
    /// Returns `false` and leaves the tree untouched when the value is already present.
    #[instrument(level = "debug", skip(self))]
    pub fn insert(&mut self, value: T) -> bool {
        if self.contains(&value) {
            debug!("value already present, insert ignored");
            return false;
        }
        let root = self.root.take();
        self.root = Some(insert_into(root, value));
        true
    }

    /// Remove `value`, rebalancing every ancestor of the removed node.
    ///
    /// A node with two children keeps its place and takes over the value of its
    /// in-order successor, whose node is removed instead.
    /// Returns `false` and leaves the tree untouched when the value is absent.
    #[instrument(level = "debug", skip(self))]
    pub fn delete(&mut self, value: &T) -> bool {
        if self.root.is_none() {
            return false;
        }
        let (root, removed) = remove_from(self.root.take(), value);
        self.root = root;
        if removed.is_none() {
            debug!("value not present, delete ignored");
        }
        removed.is_some()
    }

    pub fn contains(&self, value: &T) -> bool {
        fn find<T: Ord>(node: Option<&AvlNode<T>>, value: &T) -> bool {
            match node {
                None => false,
                Some(node) => match value.cmp(&node.value) {
                    Ordering::Equal => true,
                    Ordering::Less => find(node.left(), value),
                    Ordering::Greater => find(node.right(), value),
                },
            }
        }
        find(self.root(), value)
    }

    /// Node holding `value`, if any.
    pub fn search(&self, value: &T) -> Option<&AvlNode<T>> {
        let mut current = self.root();
        while let Some(node) = current {
            current = match value.cmp(&node.value) {
                Ordering::Equal => return Some(node),
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
            };
        }
        None
    }

    /// Verify search order, balance and the cached height, balance factor and size of every node.
    pub fn check_invariants(&self) -> DomainResult<()> {
        if let Some(root) = self.root() {
            check_node(root, None, None)?;
        }
        Ok(())
    }
}

impl<T: Ord + fmt::Debug> Extend<T> for AvlTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord + fmt::Debug> FromIterator<T> for AvlTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = AvlTree::new();
        tree.extend(iter);
        tree
    }
}

fn insert_into<T: Ord>(link: Link<T>, value: T) -> Box<AvlNode<T>> {
    match link {
        None => Box::new(AvlNode::new(value)),
        Some(mut node) => {
            if value < node.value {
                node.left = Some(insert_into(node.left.take(), value));
            } else {
                node.right = Some(insert_into(node.right.take(), value));
            }
            rebalance(node)
        }
    }
}

/// Returns the rebuilt subtree and the removed value, if it was found.
fn remove_from<T: Ord>(link: Link<T>, value: &T) -> (Link<T>, Option<T>) {
    let Some(mut node) = link else {
        return (None, None);
    };

    let removed = match value.cmp(&node.value) {
        Ordering::Less => {
            let (left, removed) = remove_from(node.left.take(), value);
            node.left = left;
            removed
        }
        Ordering::Greater => {
            let (right, removed) = remove_from(node.right.take(), value);
            node.right = right;
            removed
        }
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (None, None) => {
                trace!("removing leaf");
                let AvlNode { value, .. } = *node;
                return (None, Some(value));
            }
            (Some(child), None) | (None, Some(child)) => {
                trace!("splicing single child");
                let AvlNode { value, .. } = *node;
                return (Some(child), Some(value));
            }
            (Some(left), Some(right)) => {
                trace!("promoting in-order successor");
                let (right, successor) = take_min(right);
                node.left = Some(left);
                node.right = right;
                Some(std::mem::replace(&mut node.value, successor))
            }
        },
    };

    if removed.is_none() {
        // nothing changed below, caches are still valid
        return (Some(node), None);
    }
    (Some(rebalance(node)), removed)
}

/// Detach the minimum of a subtree, returning the rebuilt subtree and that value.
fn take_min<T>(mut node: Box<AvlNode<T>>) -> (Link<T>, T) {
    match node.left.take() {
        None => {
            let AvlNode { value, right, .. } = *node;
            (right, value)
        }
        Some(left) => {
            let (left, min) = take_min(left);
            node.left = left;
            (Some(rebalance(node)), min)
        }
    }
}

/// Returns `(height, size)` of a verified subtree.
fn check_node<T: Ord + fmt::Debug>(
    node: &AvlNode<T>,
    lower: Option<&T>,
    upper: Option<&T>,
) -> DomainResult<(usize, usize)> {
    let below = lower.is_some_and(|lower| node.value <= *lower);
    let above = upper.is_some_and(|upper| node.value >= *upper);
    if below || above {
        return Err(DomainError::InvariantViolation(format!(
            "value {:?} out of search order",
            node.value
        )));
    }

    let (left_height, left_size) = match node.left() {
        Some(left) => check_node(left, lower, Some(&node.value))?,
        None => (0, 0),
    };
    let (right_height, right_size) = match node.right() {
        Some(right) => check_node(right, Some(&node.value), upper)?,
        None => (0, 0),
    };

    let height = 1 + left_height.max(right_height);
    let balance_factor = left_height as i32 - right_height as i32;
    let size = 1 + left_size + right_size;

    if node.height != height {
        return Err(DomainError::InvariantViolation(format!(
            "node {:?} caches height {} but has height {}",
            node.value, node.height, height
        )));
    }
    if node.balance_factor != balance_factor {
        return Err(DomainError::InvariantViolation(format!(
            "node {:?} caches balance factor {} but has {}",
            node.value, node.balance_factor, balance_factor
        )));
    }
    if !(-1..=1).contains(&balance_factor) {
        return Err(DomainError::InvariantViolation(format!(
            "node {:?} is out of balance ({})",
            node.value, balance_factor
        )));
    }
    if node.size != size {
        return Err(DomainError::InvariantViolation(format!(
            "node {:?} caches size {} but has size {}",
            node.value, node.size, size
        )));
    }

    Ok((height, size))
}

//! AVL tree node with cached height, balance factor and subtree size.

use std::fmt;

/// Owning, possibly absent child reference.
pub type Link<T> = Option<Box<AvlNode<T>>>;

/// Binary tree vertex of an [`AvlTree`](crate::domain::AvlTree).
///
/// `height`, `balance_factor` and `size` are caches describing the subtree
/// rooted here. They may be stale while an operation is in progress, but every
/// public tree operation leaves them consistent with the subtree shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvlNode<T> {
    pub(crate) value: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
    pub(crate) height: usize,
    pub(crate) balance_factor: i32,
    pub(crate) size: usize,
}

impl<T> AvlNode<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
            height: 1,
            balance_factor: 0,
            size: 1,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn left(&self) -> Option<&AvlNode<T>> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&AvlNode<T>> {
        self.right.as_deref()
    }

    /// Number of levels in the subtree rooted here (a leaf has height 1).
    pub fn height(&self) -> usize {
        self.height
    }

    /// `height(left) - height(right)`.
    pub fn balance_factor(&self) -> i32 {
        self.balance_factor
    }

    /// Number of nodes in the subtree rooted here, including this node.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Recompute height, balance factor and size from the children's caches.
    pub(crate) fn refresh(&mut self) {
        let left_height = height(&self.left);
        let right_height = height(&self.right);
        self.height = 1 + left_height.max(right_height);
        self.balance_factor = left_height as i32 - right_height as i32;
        self.size = 1 + size(&self.left) + size(&self.right);
    }
}

impl<T: fmt::Display> fmt::Display for AvlNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Cached height of a link, 0 for an absent child.
pub(crate) fn height<T>(link: &Link<T>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

/// Cached subtree size of a link, 0 for an absent child.
pub(crate) fn size<T>(link: &Link<T>) -> usize {
    link.as_ref().map_or(0, |node| node.size)
}

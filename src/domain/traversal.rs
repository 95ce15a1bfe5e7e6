//! Traversal orders over an AVL tree.
//!
//! Every iterator borrows the tree and yields nodes lazily; nothing is
//! accumulated in the tree itself, so traversals can be requested repeatedly
//! (and interleaved) without leaking state between requests.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::error::DomainError;
use crate::domain::node::AvlNode;

/// Requested visit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraversalKind {
    /// left, node, right
    #[default]
    In,
    /// node, left, right
    Pre,
    /// left, right, node
    Post,
    /// Depth-first with an explicit stack, node before children.
    Dfs,
    /// Breadth-first, level by level, left to right.
    Bfs,
}

impl TraversalKind {
    pub const ALL: [TraversalKind; 5] = [
        TraversalKind::In,
        TraversalKind::Pre,
        TraversalKind::Post,
        TraversalKind::Dfs,
        TraversalKind::Bfs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TraversalKind::In => "in",
            TraversalKind::Pre => "pre",
            TraversalKind::Post => "post",
            TraversalKind::Dfs => "dfs",
            TraversalKind::Bfs => "bfs",
        }
    }
}

impl fmt::Display for TraversalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TraversalKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in" | "inorder" => Ok(TraversalKind::In),
            "pre" | "preorder" => Ok(TraversalKind::Pre),
            "post" | "postorder" => Ok(TraversalKind::Post),
            "dfs" => Ok(TraversalKind::Dfs),
            "bfs" | "level" => Ok(TraversalKind::Bfs),
            _ => Err(DomainError::UnknownTraversal(s.to_string())),
        }
    }
}

/// Display snapshot of a visited node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeView<T> {
    pub value: T,
    pub height: usize,
    pub balance_factor: i32,
    pub size: usize,
}

impl<T: Clone> From<&AvlNode<T>> for NodeView<T> {
    fn from(node: &AvlNode<T>) -> Self {
        Self {
            value: node.value.clone(),
            height: node.height,
            balance_factor: node.balance_factor,
            size: node.size,
        }
    }
}

/// Collect the nodes reachable from `root` in the requested order.
#[instrument(level = "trace", skip(root))]
pub(crate) fn collect<T>(root: Option<&AvlNode<T>>, kind: TraversalKind) -> Vec<&AvlNode<T>> {
    match kind {
        TraversalKind::In => InOrderIter::new(root).collect(),
        TraversalKind::Pre => {
            let mut out = Vec::new();
            preorder_recursive(root, &mut out);
            out
        }
        TraversalKind::Post => PostOrderIter::new(root).collect(),
        TraversalKind::Dfs => PreOrderIter::new(root).collect(),
        TraversalKind::Bfs => LevelOrderIter::new(root).collect(),
    }
}

fn preorder_recursive<'a, T>(node: Option<&'a AvlNode<T>>, out: &mut Vec<&'a AvlNode<T>>) {
    if let Some(node) = node {
        out.push(node);
        preorder_recursive(node.left(), out);
        preorder_recursive(node.right(), out);
    }
}

/// Left subtree, node, right subtree; yields values in ascending order.
pub struct InOrderIter<'a, T> {
    stack: Vec<&'a AvlNode<T>>,
}

impl<'a, T> InOrderIter<'a, T> {
    pub fn new(root: Option<&'a AvlNode<T>>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a AvlNode<T>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left();
        }
    }
}

impl<'a, T> Iterator for InOrderIter<'a, T> {
    type Item = &'a AvlNode<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some(node)
    }
}

/// Depth-first pre-order walk using an explicit stack.
pub struct PreOrderIter<'a, T> {
    stack: Vec<&'a AvlNode<T>>,
}

impl<'a, T> PreOrderIter<'a, T> {
    pub fn new(root: Option<&'a AvlNode<T>>) -> Self {
        Self {
            stack: root.into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for PreOrderIter<'a, T> {
    type Item = &'a AvlNode<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // right first so that left is visited first
        self.stack.extend(node.right());
        self.stack.extend(node.left());
        Some(node)
    }
}

/// Children before parent; each node is pushed twice, the second time marked visited.
pub struct PostOrderIter<'a, T> {
    stack: Vec<(&'a AvlNode<T>, bool)>,
}

impl<'a, T> PostOrderIter<'a, T> {
    pub fn new(root: Option<&'a AvlNode<T>>) -> Self {
        Self {
            stack: root.map(|node| (node, false)).into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for PostOrderIter<'a, T> {
    type Item = &'a AvlNode<T>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, visited)) = self.stack.pop() {
            if visited {
                return Some(node);
            }
            self.stack.push((node, true));
            if let Some(right) = node.right() {
                self.stack.push((right, false));
            }
            if let Some(left) = node.left() {
                self.stack.push((left, false));
            }
        }
        None
    }
}

/// Breadth-first walk, level by level from the root, left to right.
pub struct LevelOrderIter<'a, T> {
    queue: VecDeque<&'a AvlNode<T>>,
}

impl<'a, T> LevelOrderIter<'a, T> {
    pub fn new(root: Option<&'a AvlNode<T>>) -> Self {
        Self {
            queue: root.into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for LevelOrderIter<'a, T> {
    type Item = &'a AvlNode<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.queue.extend(node.left());
        self.queue.extend(node.right());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("in", TraversalKind::In)]
    #[case("PRE", TraversalKind::Pre)]
    #[case(" post ", TraversalKind::Post)]
    #[case("dfs", TraversalKind::Dfs)]
    #[case("bfs", TraversalKind::Bfs)]
    #[case("inorder", TraversalKind::In)]
    fn given_kind_literal_when_parsing_then_returns_kind(
        #[case] input: &str,
        #[case] expected: TraversalKind,
    ) {
        assert_eq!(input.parse::<TraversalKind>().unwrap(), expected);
    }

    #[test]
    fn given_unknown_literal_when_parsing_then_returns_error() {
        let err = "sideways".parse::<TraversalKind>().unwrap_err();
        assert!(err.to_string().contains("sideways"));
    }

    #[test]
    fn given_every_kind_when_displayed_then_parses_back() {
        for kind in TraversalKind::ALL {
            assert_eq!(kind.to_string().parse::<TraversalKind>().unwrap(), kind);
        }
    }

    #[test]
    fn given_empty_root_when_collecting_then_every_order_is_empty() {
        for kind in TraversalKind::ALL {
            assert!(collect::<i32>(None, kind).is_empty());
        }
    }
}

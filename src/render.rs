//! Box-drawing rendering of AVL trees via `termtree`.
//!
//! Children are listed left before right. When only one child exists the
//! missing side is shown as `∅` so left and right stay distinguishable.

use std::fmt;

use termtree::Tree;
use tracing::instrument;

use crate::domain::{AvlNode, AvlTree};

pub trait ToTermTree {
    fn to_term_tree(&self, annotate: bool) -> Tree<String>;
}

/// Node label, optionally with `h` (height), `bf` (balance factor) and `n` (subtree size).
pub fn label<T: fmt::Display>(node: &AvlNode<T>, annotate: bool) -> String {
    if annotate {
        format!(
            "{} (h={}, bf={}, n={})",
            node.value(),
            node.height(),
            node.balance_factor(),
            node.size()
        )
    } else {
        node.value().to_string()
    }
}

fn build<T: fmt::Display>(node: &AvlNode<T>, annotate: bool) -> Tree<String> {
    let mut tree = Tree::new(label(node, annotate));
    if node.is_leaf() {
        return tree;
    }
    for child in [node.left(), node.right()] {
        match child {
            Some(child) => tree.push(build(child, annotate)),
            None => tree.push(Tree::new("∅".to_string())),
        };
    }
    tree
}

impl<T: fmt::Display> ToTermTree for AvlTree<T> {
    #[instrument(level = "trace", skip(self))]
    fn to_term_tree(&self, annotate: bool) -> Tree<String> {
        match self.root() {
            Some(root) => build(root, annotate),
            None => Tree::new("(empty)".to_string()),
        }
    }
}

//! AVL tree core for data-structure visualizations.
//!
//! The [`domain`] layer holds the tree itself: insertion and deletion with
//! rotations, cached height, balance factor and subtree size per node, and the
//! in/pre/post-order, depth-first and breadth-first traversals. The remaining
//! layers drive it from operation scripts and the `avlviz` command line.
//!
//! ```
//! use avlviz::domain::{AvlTree, TraversalKind};
//!
//! let mut tree: AvlTree<i64> = [10, 20, 30].into_iter().collect();
//! assert_eq!(tree.root().map(|root| *root.value()), Some(20));
//!
//! tree.delete(&10);
//! let order: Vec<i64> = tree.values(TraversalKind::In).into_iter().copied().collect();
//! assert_eq!(order, vec![20, 30]);
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod render;
pub mod util;

pub use domain::{AvlNode, AvlTree, NodeView, TraversalKind};

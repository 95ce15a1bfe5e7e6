//! Domain layer: the AVL tree and its traversals
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod error;
pub mod node;
mod rotation;
pub mod traversal;
pub mod tree;

pub use error::{DomainError, DomainResult};
pub use node::AvlNode;
pub use traversal::{NodeView, TraversalKind};
pub use tree::AvlTree;

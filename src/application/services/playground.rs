//! Playground service
//!
//! Plays the role of the visualization layer: it feeds values into a tree,
//! asks for traversals and reports what each request did.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::application::script::{parse_script, Operation};
use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{AvlTree, NodeView, TraversalKind};
use crate::infrastructure::traits::ScriptSource;

/// Result of a single request against the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Outcome {
    Inserted {
        value: i64,
        created: bool,
    },
    Deleted {
        value: i64,
        removed: bool,
    },
    Contains {
        value: i64,
        found: bool,
    },
    Traversal {
        kind: TraversalKind,
        nodes: Vec<NodeView<i64>>,
    },
    Height {
        cached: usize,
        computed: usize,
    },
    Leaves {
        count: usize,
    },
    Size {
        size: usize,
    },
    Root {
        value: Option<i64>,
    },
    /// Level-order snapshot of the whole tree.
    Show {
        nodes: Vec<NodeView<i64>>,
    },
    Cleared {
        removed: usize,
    },
    Checked {
        ok: bool,
        message: Option<String>,
    },
}

/// Service owning one tree and applying operations to it in order.
pub struct PlaygroundService {
    tree: AvlTree<i64>,
    source: Arc<dyn ScriptSource>,
}

impl PlaygroundService {
    pub fn new(source: Arc<dyn ScriptSource>) -> Self {
        Self {
            tree: AvlTree::new(),
            source,
        }
    }

    pub fn tree(&self) -> &AvlTree<i64> {
        &self.tree
    }

    /// Insert every value in order, returning whether each one created a node.
    pub fn insert_all(&mut self, values: &[i64]) -> Vec<Outcome> {
        values
            .iter()
            .map(|&value| Outcome::Inserted {
                value,
                created: self.tree.insert(value),
            })
            .collect()
    }

    pub fn delete_all(&mut self, values: &[i64]) -> Vec<Outcome> {
        values
            .iter()
            .map(|&value| Outcome::Deleted {
                value,
                removed: self.tree.delete(&value),
            })
            .collect()
    }

    /// Apply one operation. Multi-value operations yield one outcome per value.
    #[instrument(level = "debug", skip(self), fields(op = %operation))]
    pub fn apply(&mut self, operation: &Operation) -> Vec<Outcome> {
        let outcome = match operation {
            Operation::Insert(values) => return self.insert_all(values),
            Operation::Delete(values) => return self.delete_all(values),
            Operation::Contains(value) => Outcome::Contains {
                value: *value,
                found: self.tree.contains(value),
            },
            Operation::Traverse(kind) => Outcome::Traversal {
                kind: *kind,
                nodes: self.tree.snapshot(*kind),
            },
            Operation::Height => Outcome::Height {
                cached: self.tree.height(),
                computed: self.tree.calculate_tree_height(),
            },
            Operation::Leaves => Outcome::Leaves {
                count: self.tree.count_leaf_nodes(),
            },
            Operation::Size => Outcome::Size {
                size: self.tree.size(),
            },
            Operation::Root => Outcome::Root {
                value: self.tree.root().map(|root| *root.value()),
            },
            Operation::Show => Outcome::Show {
                nodes: self.tree.snapshot(TraversalKind::Bfs),
            },
            Operation::Clear => {
                let removed = self.tree.size();
                self.tree.clear();
                Outcome::Cleared { removed }
            }
            Operation::Check => match self.tree.check_invariants() {
                Ok(()) => Outcome::Checked {
                    ok: true,
                    message: None,
                },
                Err(e) => Outcome::Checked {
                    ok: false,
                    message: Some(e.to_string()),
                },
            },
        };
        vec![outcome]
    }

    /// Read and parse a script from `path` (`-` for stdin).
    #[instrument(level = "debug", skip(self))]
    pub fn load_script(&self, path: &Path) -> ApplicationResult<Vec<Operation>> {
        let content = self
            .source
            .read_script(path)
            .with_path_context("read script", path)?;
        parse_script(&content)
    }

    /// Apply a parsed script, handing every outcome to `sink` as soon as it is produced
    /// so that the sink observes the tree in the state the operation left it.
    pub fn run<F>(&mut self, operations: &[Operation], mut sink: F)
    where
        F: FnMut(&Operation, &Outcome, &AvlTree<i64>),
    {
        info!("running {} operations", operations.len());
        for operation in operations {
            for outcome in self.apply(operation) {
                sink(operation, &outcome, &self.tree);
            }
        }
        debug!(size = self.tree.size(), "script finished");
    }
}

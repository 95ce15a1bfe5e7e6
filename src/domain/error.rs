//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors cover malformed requests and structural checks.
/// Tree mutations themselves never fail: duplicates and absent values are no-ops.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown traversal kind: {0} (expected in, pre, post, dfs or bfs)")]
    UnknownTraversal(String),

    #[error("invalid value: {0}")]
    InvalidValue(String),

    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

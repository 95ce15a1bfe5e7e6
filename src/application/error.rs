//! Application-level errors

use thiserror::Error;

/// Application errors carry the script line or file that caused them.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("script line {line}: {message}")]
    Script { line: usize, message: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

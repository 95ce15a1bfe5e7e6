//! Operation scripts: the button presses of a visualization session, one per line.
//!
//! ```text
//! # build a small tree
//! insert 10 20 30
//! delete 20
//! contains 10
//! traverse bfs
//! show
//! ```

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{DomainError, TraversalKind};

/// A single request against the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Insert(Vec<i64>),
    Delete(Vec<i64>),
    Contains(i64),
    Traverse(TraversalKind),
    Height,
    Leaves,
    Size,
    Root,
    Show,
    Clear,
    Check,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Insert(values) => write!(f, "insert {}", values.iter().join(" ")),
            Operation::Delete(values) => write!(f, "delete {}", values.iter().join(" ")),
            Operation::Contains(value) => write!(f, "contains {}", value),
            Operation::Traverse(kind) => write!(f, "traverse {}", kind),
            Operation::Height => f.write_str("height"),
            Operation::Leaves => f.write_str("leaves"),
            Operation::Size => f.write_str("size"),
            Operation::Root => f.write_str("root"),
            Operation::Show => f.write_str("show"),
            Operation::Clear => f.write_str("clear"),
            Operation::Check => f.write_str("check"),
        }
    }
}

/// Parse a value literal.
pub fn parse_value(literal: &str) -> Result<i64, DomainError> {
    literal
        .parse::<i64>()
        .map_err(|_| DomainError::InvalidValue(literal.to_string()))
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let keyword = words
            .next()
            .ok_or_else(|| "empty operation".to_string())?
            .to_ascii_lowercase();
        let args: Vec<&str> = words.collect();

        let values = || -> Result<Vec<i64>, String> {
            if args.is_empty() {
                return Err(format!("'{}' needs at least one value", keyword));
            }
            args.iter()
                .map(|arg| parse_value(arg).map_err(|e| e.to_string()))
                .collect()
        };
        let no_args = |op: Operation| -> Result<Operation, String> {
            if args.is_empty() {
                Ok(op)
            } else {
                Err(format!("'{}' takes no arguments", keyword))
            }
        };

        match keyword.as_str() {
            "insert" => Ok(Operation::Insert(values()?)),
            "delete" => Ok(Operation::Delete(values()?)),
            "contains" => match args.as_slice() {
                [value] => Ok(Operation::Contains(
                    parse_value(value).map_err(|e| e.to_string())?,
                )),
                _ => Err("'contains' takes exactly one value".to_string()),
            },
            "traverse" => match args.as_slice() {
                [kind] => Ok(Operation::Traverse(
                    kind.parse::<TraversalKind>().map_err(|e| e.to_string())?,
                )),
                _ => Err("'traverse' takes exactly one kind".to_string()),
            },
            "height" => no_args(Operation::Height),
            "leaves" => no_args(Operation::Leaves),
            "size" => no_args(Operation::Size),
            "root" => no_args(Operation::Root),
            "show" => no_args(Operation::Show),
            "clear" => no_args(Operation::Clear),
            "check" => no_args(Operation::Check),
            other => Err(format!("unknown operation '{}'", other)),
        }
    }
}

/// Parse a whole script. Blank lines and `#` comments are skipped.
///
/// Errors carry the 1-based line number of the offending line.
#[instrument(level = "debug", skip(content))]
pub fn parse_script(content: &str) -> ApplicationResult<Vec<Operation>> {
    let mut operations = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let line = match line.split_once('#') {
            Some((code, _comment)) => code,
            None => line,
        }
        .trim();
        if line.is_empty() {
            continue;
        }

        let operation = line
            .parse::<Operation>()
            .map_err(|message| ApplicationError::Script {
                line: index + 1,
                message,
            })?;
        operations.push(operation);
    }

    debug!("parsed {} operations", operations.len());
    Ok(operations)
}

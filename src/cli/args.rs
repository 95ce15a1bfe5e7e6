//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::config::OutputFormat;
use crate::domain::TraversalKind;

/// Build, rebalance and traverse AVL trees from the command line
#[derive(Parser, Debug)]
#[command(name = "avlviz")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Output format: tree, plain or json (overrides config)
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Config file layered over the global one
    #[arg(long, global = true, value_hint = ValueHint::FilePath, env = "AVLVIZ_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Insert values in order and show the resulting tree
    Build {
        /// Values to insert
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<i64>,
    },

    /// Insert values and print a traversal
    Traverse {
        /// Traversal kind: in, pre, post, dfs or bfs (default from config)
        #[arg(short, long)]
        kind: Option<TraversalKind>,
        /// Values to insert
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<i64>,
    },

    /// Insert values, then delete some and show the resulting tree
    Delete {
        /// Values to insert
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<i64>,
        /// Values to delete afterwards
        #[arg(short, long = "remove", required = true, num_args = 1.., allow_negative_numbers = true)]
        remove: Vec<i64>,
    },

    /// Insert values and report size, height, leaf count and root
    Stats {
        /// Values to insert
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<i64>,
    },

    /// Execute an operation script ("-" reads stdin)
    Run {
        /// Script file
        #[arg(value_hint = ValueHint::FilePath)]
        script: PathBuf,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Show global config file location
    Path,
}

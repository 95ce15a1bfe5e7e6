//! Command dispatch and result reporting

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use itertools::Itertools;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::application::script::Operation;
use crate::application::services::{Outcome, PlaygroundService};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, OutputFormat, Settings};
use crate::domain::{AvlTree, NodeView, TraversalKind};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;
use crate::render::ToTermTree;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Build { values }) => cmd_build(&container(cli)?, values),
        Some(Commands::Traverse { kind, values }) => {
            cmd_traverse(&container(cli)?, *kind, values)
        }
        Some(Commands::Delete { values, remove }) => {
            cmd_delete(&container(cli)?, values, remove)
        }
        Some(Commands::Stats { values }) => cmd_stats(&container(cli)?, values),
        Some(Commands::Run { script }) => cmd_run(&container(cli)?, script),
        Some(Commands::Config { command }) => cmd_config(&container(cli)?, command),
        // needs no settings: must work even with a broken config
        Some(Commands::Completion { shell }) => cmd_completion(*shell),
        None => Cli::command()
            .print_help()
            .map_err(|e| InfraError::io("print help", e).into()),
    }
}

/// Effective settings (files, env, then flags) wired into a container.
fn container(cli: &Cli) -> CliResult<ServiceContainer> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(format) = cli.format {
        settings.format = format;
    }
    if !settings.color {
        colored::control::set_override(false);
    }
    debug!(?settings, "effective settings");
    Ok(ServiceContainer::new(settings))
}

/// Writes tree states and operation outcomes in the configured format.
pub struct Reporter<'a> {
    settings: &'a Settings,
}

#[derive(Serialize)]
struct TreeDocument<'a> {
    size: usize,
    height: usize,
    leaves: usize,
    nodes: &'a [NodeView<i64>],
}

impl<'a> Reporter<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    fn json<T: Serialize>(&self, value: &T) -> CliResult<()> {
        let text = serde_json::to_string(value).map_err(|e| CliError::Output(e.to_string()))?;
        output::info(&text);
        Ok(())
    }

    /// Whole-tree view: box drawing, level-order values or a JSON document.
    pub fn tree(&self, tree: &AvlTree<i64>) -> CliResult<()> {
        match self.settings.format {
            OutputFormat::Tree => {
                output::info(&tree.to_term_tree(self.settings.annotate));
                Ok(())
            }
            OutputFormat::Plain => {
                output::info(&tree.values(TraversalKind::Bfs).into_iter().join(" "));
                Ok(())
            }
            OutputFormat::Json => {
                let nodes = tree.snapshot(TraversalKind::Bfs);
                self.json(&TreeDocument {
                    size: tree.size(),
                    height: tree.height(),
                    leaves: tree.count_leaf_nodes(),
                    nodes: &nodes,
                })
            }
        }
    }

    pub fn outcome(&self, outcome: &Outcome, tree: &AvlTree<i64>) -> CliResult<()> {
        match self.settings.format {
            OutputFormat::Json => self.json(outcome),
            OutputFormat::Plain => {
                output::info(&describe(outcome, false));
                Ok(())
            }
            OutputFormat::Tree => {
                match outcome {
                    Outcome::Show { .. } => return self.tree(tree),
                    Outcome::Inserted { created: false, value } => {
                        output::warning(&format!("{} already present, ignored", value))
                    }
                    Outcome::Deleted { removed: false, value } => {
                        output::warning(&format!("{} not present, ignored", value))
                    }
                    Outcome::Checked { ok: true, .. } => output::success("invariants hold"),
                    Outcome::Checked { ok: false, message } => {
                        output::failure(message.as_deref().unwrap_or("invariant violated"))
                    }
                    Outcome::Traversal { kind, .. } => {
                        output::action(kind.as_str(), &describe(outcome, self.settings.annotate))
                    }
                    _ => output::info(&describe(outcome, self.settings.annotate)),
                }
                Ok(())
            }
        }
    }
}

fn node_list(nodes: &[NodeView<i64>], annotate: bool) -> String {
    nodes
        .iter()
        .map(|node| {
            if annotate {
                format!("{}[h={},bf={},n={}]", node.value, node.height, node.balance_factor, node.size)
            } else {
                node.value.to_string()
            }
        })
        .join(" ")
}

/// One-line text rendering of an outcome.
pub fn describe(outcome: &Outcome, annotate: bool) -> String {
    match outcome {
        Outcome::Inserted { value, created } => {
            format!("insert {}: {}", value, if *created { "added" } else { "duplicate" })
        }
        Outcome::Deleted { value, removed } => {
            format!("delete {}: {}", value, if *removed { "removed" } else { "absent" })
        }
        Outcome::Contains { value, found } => format!("contains {}: {}", value, found),
        Outcome::Traversal { nodes, .. } => node_list(nodes, annotate),
        Outcome::Height { cached, computed } => {
            format!("height: {} (recomputed {})", cached, computed)
        }
        Outcome::Leaves { count } => format!("leaves: {}", count),
        Outcome::Size { size } => format!("size: {}", size),
        Outcome::Root { value } => match value {
            Some(value) => format!("root: {}", value),
            None => "root: none".to_string(),
        },
        Outcome::Show { nodes } => node_list(nodes, annotate),
        Outcome::Cleared { removed } => format!("cleared {} nodes", removed),
        Outcome::Checked { ok, message } => match message {
            Some(message) => format!("check: {}", message),
            None => format!("check: {}", if *ok { "ok" } else { "failed" }),
        },
    }
}

fn report_skipped(reporter: &Reporter, outcomes: &[Outcome], tree: &AvlTree<i64>) -> CliResult<()> {
    for outcome in outcomes {
        let skipped = matches!(
            outcome,
            Outcome::Inserted { created: false, .. } | Outcome::Deleted { removed: false, .. }
        );
        if skipped {
            reporter.outcome(outcome, tree)?;
        }
    }
    Ok(())
}

fn playground_with(container: &ServiceContainer, values: &[i64]) -> (PlaygroundService, Vec<Outcome>) {
    let mut playground = container.playground();
    let outcomes = playground.insert_all(values);
    (playground, outcomes)
}

#[instrument(skip(container))]
fn cmd_build(container: &ServiceContainer, values: &[i64]) -> CliResult<()> {
    let reporter = Reporter::new(&container.settings);
    let (playground, outcomes) = playground_with(container, values);
    if container.settings.format == OutputFormat::Tree {
        report_skipped(&reporter, &outcomes, playground.tree())?;
    }
    reporter.tree(playground.tree())
}

#[instrument(skip(container))]
fn cmd_traverse(
    container: &ServiceContainer,
    kind: Option<TraversalKind>,
    values: &[i64],
) -> CliResult<()> {
    let reporter = Reporter::new(&container.settings);
    let kind = kind.unwrap_or(container.settings.traversal);
    let (mut playground, _) = playground_with(container, values);
    for outcome in playground.apply(&Operation::Traverse(kind)) {
        reporter.outcome(&outcome, playground.tree())?;
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_delete(container: &ServiceContainer, values: &[i64], remove: &[i64]) -> CliResult<()> {
    let reporter = Reporter::new(&container.settings);
    let (mut playground, _) = playground_with(container, values);
    let outcomes = playground.delete_all(remove);
    if container.settings.format == OutputFormat::Tree {
        report_skipped(&reporter, &outcomes, playground.tree())?;
    }
    reporter.tree(playground.tree())
}

#[instrument(skip(container))]
fn cmd_stats(container: &ServiceContainer, values: &[i64]) -> CliResult<()> {
    let reporter = Reporter::new(&container.settings);
    let (mut playground, _) = playground_with(container, values);
    let queries = [
        Operation::Size,
        Operation::Height,
        Operation::Leaves,
        Operation::Root,
    ];
    for query in &queries {
        for outcome in playground.apply(query) {
            reporter.outcome(&outcome, playground.tree())?;
        }
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_run(container: &ServiceContainer, script: &std::path::Path) -> CliResult<()> {
    let reporter = Reporter::new(&container.settings);
    let mut playground = container.playground();
    let operations = playground.load_script(script)?;

    let mut result = Ok(());
    playground.run(&operations, |_, outcome, tree| {
        if result.is_ok() {
            result = reporter.outcome(outcome, tree);
        }
    });
    result
}

fn cmd_config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::header("# effective settings");
            output::info(&container.settings.to_toml()?);
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => {
                let state = if path.exists() { "exists" } else { "not created" };
                output::info(&path.display());
                output::detail(&state);
            }
            None => output::warning("no config directory available on this platform"),
        },
    }
    Ok(())
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn given_traversal_outcome_when_described_then_lists_values() {
        let tree: AvlTree<i64> = [5, 3, 8].into_iter().collect();
        let outcome = Outcome::Traversal {
            kind: TraversalKind::In,
            nodes: tree.snapshot(TraversalKind::In),
        };
        assert_eq!(describe(&outcome, false), "3 5 8");
        assert_eq!(
            describe(&outcome, true),
            "3[h=1,bf=0,n=1] 5[h=2,bf=0,n=3] 8[h=1,bf=0,n=1]"
        );
    }

    #[test]
    fn given_scalar_outcomes_when_described_then_reads_naturally() {
        assert_eq!(
            describe(&Outcome::Inserted { value: 4, created: false }, false),
            "insert 4: duplicate"
        );
        assert_eq!(describe(&Outcome::Root { value: None }, false), "root: none");
        assert_eq!(
            describe(&Outcome::Height { cached: 3, computed: 3 }, false),
            "height: 3 (recomputed 3)"
        );
    }

    #[test]
    fn given_missing_config_file_when_generating_completion_then_succeeds() {
        let cli = Cli::try_parse_from([
            "avlviz",
            "--config",
            "/nonexistent/avlviz.toml",
            "completion",
            "bash",
        ])
        .unwrap();
        assert!(execute_command(&cli).is_ok());
    }

    #[test]
    fn given_missing_config_file_when_running_tree_command_then_config_error() {
        let cli = Cli::try_parse_from([
            "avlviz",
            "--config",
            "/nonexistent/avlviz.toml",
            "stats",
            "1",
        ])
        .unwrap();
        let err = execute_command(&cli).unwrap_err();
        assert_eq!(err.exit_code(), crate::exitcode::CONFIG);
    }

    #[test]
    fn given_outcome_when_serialized_then_tags_operation() {
        let json = serde_json::to_string(&Outcome::Size { size: 2 }).unwrap();
        assert_eq!(json, r#"{"op":"size","size":2}"#);
    }
}

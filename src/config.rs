//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/avlviz/avlviz.toml`
//! 3. Explicit config: `--config <path>`
//! 4. Environment variables: `AVLVIZ_*` prefix

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::TraversalKind;

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Box-drawing tree for structures, one line per result otherwise
    #[default]
    Tree,
    /// Space separated values, no decoration
    Plain,
    /// One JSON document per result
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Tree => "tree",
            OutputFormat::Plain => "plain",
            OutputFormat::Json => "json",
        };
        f.write_str(name)
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tree" => Ok(OutputFormat::Tree),
            "plain" => Ok(OutputFormat::Plain),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "unknown output format: {} (expected tree, plain or json)",
                other
            )),
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit from base).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub traversal: Option<TraversalKind>,
    pub format: Option<OutputFormat>,
    pub annotate: Option<bool>,
    pub color: Option<bool>,
}

/// Unified configuration for avlviz.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Traversal used when a command does not name one (default: in)
    pub traversal: TraversalKind,
    /// Output format (default: tree)
    pub format: OutputFormat,
    /// Show height, balance factor and size next to each rendered node
    pub annotate: bool,
    /// Colorize terminal output (NO_COLOR still wins)
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            traversal: TraversalKind::In,
            format: OutputFormat::Tree,
            annotate: true,
            color: true,
        }
    }
}

/// Get the XDG config directory for avlviz.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "avlviz").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("avlviz.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

/// Boolean override; `None` when the variable is unset, an error when it is malformed.
fn env_bool(config: &Config, key: &str) -> Result<Option<bool>, ApplicationError> {
    match config.get_bool(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(ApplicationError::Config {
            message: format!("AVLVIZ_{}: {}", key.to_ascii_uppercase(), e),
        }),
    }
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            traversal: overlay.traversal.unwrap_or(self.traversal),
            format: overlay.format.unwrap_or(self.format),
            annotate: overlay.annotate.unwrap_or(self.annotate),
            color: overlay.color.unwrap_or(self.color),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file given on the command line; it must exist
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path().filter(|path| path.exists());
        let settings = Self::load_files(global.as_deref(), explicit)?;
        Self::apply_env_overrides(settings, Environment::with_prefix("AVLVIZ"))
    }

    /// Defaults, then the global file, then the explicit file. No environment.
    pub fn load_files(
        global: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(path) = global {
            debug!("global config: {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            debug!("explicit config: {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        Ok(current)
    }

    /// Apply `AVLVIZ_*` variables as explicit overrides.
    pub fn apply_env_overrides(
        mut settings: Self,
        environment: Environment,
    ) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(environment.prefix_separator("_"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("traversal") {
            settings.traversal = val.parse().map_err(|e: crate::domain::DomainError| {
                ApplicationError::Config {
                    message: format!("AVLVIZ_TRAVERSAL: {}", e),
                }
            })?;
        }
        if let Ok(val) = config.get_string("format") {
            settings.format = val.parse().map_err(|message: String| ApplicationError::Config {
                message: format!("AVLVIZ_FORMAT: {}", message),
            })?;
        }
        if let Some(val) = env_bool(&config, "annotate")? {
            settings.annotate = val;
        }
        if let Some(val) = env_bool(&config, "color")? {
            settings.color = val;
        }

        Ok(settings)
    }

    /// Render as TOML (for `config show`).
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}

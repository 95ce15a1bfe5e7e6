//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with in-memory implementations.

use std::collections::HashMap;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Source of operation scripts.
pub trait ScriptSource: Send + Sync {
    /// Read a whole script. The path `-` denotes standard input.
    fn read_script(&self, path: &Path) -> io::Result<String>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Reads scripts from the filesystem or stdin.
#[derive(Debug, Default)]
pub struct RealScriptSource;

impl ScriptSource for RealScriptSource {
    fn read_script(&self, path: &Path) -> io::Result<String> {
        if path == Path::new("-") {
            let mut content = String::new();
            io::stdin().lock().read_to_string(&mut content)?;
            return Ok(content);
        }
        std::fs::read_to_string(path)
    }
}

// ============================================================
// IN-MEMORY IMPLEMENTATION
// ============================================================

/// Scripts registered up front, keyed by path.
#[derive(Debug, Default)]
pub struct InMemoryScriptSource {
    scripts: RwLock<HashMap<PathBuf, String>>,
}

impl InMemoryScriptSource {
    pub fn with_script(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        if let Ok(mut scripts) = self.scripts.write() {
            scripts.insert(path.into(), content.into());
        }
        self
    }
}

impl ScriptSource for InMemoryScriptSource {
    fn read_script(&self, path: &Path) -> io::Result<String> {
        let scripts = self
            .scripts
            .read()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "script store poisoned"))?;
        scripts.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no script registered at {}", path.display()),
            )
        })
    }
}

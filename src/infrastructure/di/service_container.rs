//! Service container for dependency injection
//!
//! Wires up services with their dependencies.

use std::sync::Arc;

use crate::application::services::PlaygroundService;
use crate::config::Settings;
use crate::infrastructure::traits::{RealScriptSource, ScriptSource};

/// Container holding settings and I/O implementations shared by services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Script source abstraction
    pub source: Arc<dyn ScriptSource>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealScriptSource))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, source: Arc<dyn ScriptSource>) -> Self {
        let settings = Arc::new(settings);

        Self { settings, source }
    }

    /// Fresh playground with an empty tree.
    pub fn playground(&self) -> PlaygroundService {
        PlaygroundService::new(Arc::clone(&self.source))
    }
}

//! Capability modules registered after bootstrap

use tracing::{debug, warn};

/// Plugins registered by the host, in registration order
#[derive(Debug, Default)]
pub struct PluginRegistry {
    names: Vec<String>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin; duplicates are ignored
    pub fn register(&mut self, name: &str) -> bool {
        if self.contains(name) {
            warn!("Plugin {} already registered", name);
            return false;
        }
        self.names.push(name.to_string());
        debug!("Registered plugin {}", name);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.names.iter().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

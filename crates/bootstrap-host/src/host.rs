//! Startup chain orchestration

use std::sync::Arc;
use tracing::info;

use bootstrap_core::{
    BootstrapReport, BootstrapResult, BootstrapSettings, Bootstrapper, CredentialResolver,
    DependentService, KeySlot, LaunchContext, SourceChain,
};

use crate::plugins::PluginRegistry;

/// Reference host: bootstrap, then plugin registration, then hand back the signal
pub struct StartupHost {
    settings: BootstrapSettings,
    service: Arc<dyn DependentService>,
    /// Overrides the process-wide key slot
    slot: Option<Arc<KeySlot>>,
    plugins: Vec<String>,
}

/// Result of a host run
#[derive(Debug)]
pub struct StartupOutcome {
    pub result: BootstrapResult,
    pub report: BootstrapReport,
    pub registry: PluginRegistry,
}

impl StartupHost {
    /// Create a host writing through the process-wide key slot
    pub fn new(settings: BootstrapSettings, service: Arc<dyn DependentService>) -> Self {
        Self {
            settings,
            service,
            slot: None,
            plugins: Vec::new(),
        }
    }

    /// Use a dedicated key slot instead of the process-wide one
    pub fn with_slot(mut self, slot: Arc<KeySlot>) -> Self {
        self.slot = Some(slot);
        self
    }

    /// Set the plugins registered after bootstrap
    pub fn with_plugins<I, S>(mut self, plugins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.plugins = plugins.into_iter().map(Into::into).collect();
        self
    }

    /// Run the startup chain once
    pub fn run(&self, launch: &LaunchContext) -> StartupOutcome {
        let mut bootstrapper = match &self.slot {
            Some(slot) => Bootstrapper::new(
                CredentialResolver::new(self.service.clone(), slot.clone()),
                SourceChain::standard(&self.settings),
            ),
            None => Bootstrapper::from_settings(&self.settings, self.service.clone()),
        };
        let mut registry = PluginRegistry::new();

        let result = bootstrapper.launch(launch, |_| {
            for plugin in &self.plugins {
                registry.register(plugin);
            }
            info!("Registered {} plugins", registry.len());
            BootstrapResult::Continue
        });

        StartupOutcome {
            result,
            report: bootstrapper.report().clone(),
            registry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bootstrap_core::RecordingService;
    use tempfile::TempDir;

    fn host(dir: &TempDir, service: Arc<RecordingService>) -> StartupHost {
        let settings = BootstrapSettings::default().with_resource_dir(dir.path());
        StartupHost::new(settings, service)
            .with_slot(Arc::new(KeySlot::new()))
            .with_plugins(["maps", "geolocation"])
    }

    #[test]
    fn test_runs_chain_with_bundled_key() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("GoogleService-Info.json"),
            r#"{"API_KEY": "ABC"}"#,
        )
        .unwrap();
        let service = Arc::new(RecordingService::new("maps"));

        let outcome = host(&dir, service.clone()).run(&LaunchContext::new());

        assert_eq!(outcome.result, BootstrapResult::Continue);
        assert!(outcome.report.configured);
        assert_eq!(service.api_key().unwrap().expose(), "ABC");
        assert_eq!(outcome.registry.names(), vec!["maps", "geolocation"]);
    }

    #[test]
    fn test_default_host_writes_process_slot() {
        let dir = TempDir::new().unwrap();
        let settings = BootstrapSettings {
            literal_default: Some("KEY123".to_string()),
            ..Default::default()
        }
        .with_resource_dir(dir.path());
        let service = Arc::new(RecordingService::new("maps"));

        // Only test in this binary that touches the process-wide slot
        let outcome = StartupHost::new(settings, service.clone()).run(&LaunchContext::new());

        assert!(outcome.report.configured);
        assert_eq!(service.api_key().unwrap().expose(), "KEY123");
        assert!(KeySlot::process().is_claimed());
        assert_eq!(KeySlot::process().configured_source(), Some("literal-default"));
    }

    #[test]
    fn test_plugins_registered_without_key() {
        let dir = TempDir::new().unwrap();
        let service = Arc::new(RecordingService::rejecting("maps", "unused"));
        let settings = BootstrapSettings {
            literal_default: Some(String::new()),
            ..Default::default()
        }
        .with_resource_dir(dir.path());

        let outcome = StartupHost::new(settings, service.clone())
            .with_slot(Arc::new(KeySlot::new()))
            .with_plugins(["maps"])
            .run(&LaunchContext::new());

        assert!(outcome.result.should_continue());
        assert!(!outcome.report.configured);
        assert_eq!(service.call_count(), 0);
        assert_eq!(outcome.registry.len(), 1);
    }
}

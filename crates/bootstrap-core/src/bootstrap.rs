//! Bootstrap sequencing
//!
//! One linear pass, run once at process start:
//! `NotStarted -> Resolving -> (Configured | Unconfigured) -> Done`.
//! Nothing here aborts startup; a missing or rejected key leaves the
//! dependent service unconfigured and is reported as a diagnostic.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::credential::{CredentialResolver, ResolvedCredential};
use crate::error::{ConfigError, Result};
use crate::service::DependentService;
use crate::settings::BootstrapSettings;
use crate::source::SourceChain;

/// Continuation signal handed back to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapResult {
    /// Proceed with the rest of startup
    Continue,
    /// Stop startup
    Abort,
}

impl BootstrapResult {
    pub fn should_continue(self) -> bool {
        self == BootstrapResult::Continue
    }
}

impl From<BootstrapResult> for bool {
    fn from(result: BootstrapResult) -> Self {
        result.should_continue()
    }
}

impl From<bool> for BootstrapResult {
    fn from(proceed: bool) -> Self {
        if proceed {
            BootstrapResult::Continue
        } else {
            BootstrapResult::Abort
        }
    }
}

/// Bootstrap state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapState {
    /// Bootstrap has not run yet
    NotStarted,
    /// Consulting credential sources
    Resolving,
    /// The dependent service accepted a key
    Configured,
    /// No usable key, or the service refused it
    Unconfigured,
    /// Finished; terminal
    Done,
}

/// Launch options supplied by the host
///
/// Opaque to the bootstrap: carried through to the host's continuation
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LaunchContext {
    options: Map<String, Value>,
}

impl LaunchContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style option insert
    pub fn with_option(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.options.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// What the bootstrap pass did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    /// Name of the source that produced the key, if any
    pub source: Option<String>,
    /// Whether the dependent service accepted the key
    pub configured: bool,
    /// Why the key was not applied, if it was resolved but not applied
    pub apply_error: Option<String>,
}

/// One-shot startup sequencer
pub struct Bootstrapper {
    resolver: CredentialResolver,
    /// Consumed by the first run
    sources: Option<SourceChain>,
    state: BootstrapState,
    report: BootstrapReport,
}

impl Bootstrapper {
    /// Create a bootstrapper over an explicit source chain
    pub fn new(resolver: CredentialResolver, sources: SourceChain) -> Self {
        Self {
            resolver,
            sources: Some(sources),
            state: BootstrapState::NotStarted,
            report: BootstrapReport::default(),
        }
    }

    /// Standard chain from `settings`, writing through the process-wide slot
    pub fn from_settings(settings: &BootstrapSettings, service: Arc<dyn DependentService>) -> Self {
        Self::new(
            CredentialResolver::for_process(service),
            SourceChain::standard(settings),
        )
    }

    /// Get the current state
    pub fn state(&self) -> BootstrapState {
        self.state
    }

    /// Outcome of the last run
    pub fn report(&self) -> &BootstrapReport {
        &self.report
    }

    /// Run the bootstrap pass
    ///
    /// Always returns `Continue`. Runs at most once; later calls do nothing.
    pub fn bootstrap(&mut self, launch: &LaunchContext) -> BootstrapResult {
        let Some(sources) = self.sources.take() else {
            debug!("Bootstrap already ran ({:?}), not re-entering", self.state);
            return BootstrapResult::Continue;
        };

        debug!("Bootstrapping with {} launch options", launch.len());
        self.transition(BootstrapState::Resolving);

        let outcome = match CredentialResolver::resolve(&sources) {
            Some(credential) => {
                self.report.source = Some(credential.source.clone());
                match self.apply_guarded(&credential) {
                    Ok(()) => BootstrapState::Configured,
                    Err(e) => {
                        warn!(
                            "{} left unconfigured: key from {} not applied: {}",
                            self.resolver.service_name(),
                            credential.source,
                            e
                        );
                        self.report.apply_error = Some(e.to_string());
                        BootstrapState::Unconfigured
                    }
                }
            }
            None => {
                warn!(
                    "No API key found in {} sources ({:?}); {} left unconfigured",
                    sources.len(),
                    sources.names(),
                    self.resolver.service_name()
                );
                BootstrapState::Unconfigured
            }
        };
        drop(sources);

        self.report.configured = outcome == BootstrapState::Configured;
        self.transition(outcome);
        self.transition(BootstrapState::Done);

        BootstrapResult::Continue
    }

    /// Run the bootstrap pass, then hand over to the host's own startup chain
    ///
    /// The host's signal is what gets returned.
    pub fn launch<F>(&mut self, launch: &LaunchContext, next: F) -> BootstrapResult
    where
        F: FnOnce(&LaunchContext) -> BootstrapResult,
    {
        self.bootstrap(launch);
        let result = next(launch);
        info!("Startup chain returned {:?}", result);
        result
    }

    /// Apply, turning a panic in the service's entry point into an error
    fn apply_guarded(&self, credential: &ResolvedCredential) -> Result<()> {
        panic::catch_unwind(AssertUnwindSafe(|| self.resolver.apply(credential))).unwrap_or_else(
            |_| {
                Err(ConfigError::ServiceRejected(
                    "configuration entry point panicked".to_string(),
                ))
            },
        )
    }

    fn transition(&mut self, next: BootstrapState) {
        debug!("Bootstrap state {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

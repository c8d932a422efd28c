//! Credential resolver: ordered fallback lookup and one-time apply

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, info};

use super::types::ResolvedCredential;
use crate::error::{ConfigError, Result};
use crate::service::{DependentService, KeySlot};
use crate::secret::ApiKey;
use crate::source::{CredentialSource, SourceChain};

/// Resolves the API key and hands it to the dependent service once
pub struct CredentialResolver {
    /// Service that receives the key
    service: Arc<dyn DependentService>,
    /// Write-once guard for the service's configuration entry point
    slot: Arc<KeySlot>,
}

impl CredentialResolver {
    /// Create a resolver writing through `slot`
    pub fn new(service: Arc<dyn DependentService>, slot: Arc<KeySlot>) -> Self {
        Self { service, slot }
    }

    /// Create a resolver bound to the process-wide slot
    pub fn for_process(service: Arc<dyn DependentService>) -> Self {
        Self::new(service, KeySlot::process())
    }

    /// Return the first non-empty key in priority order
    ///
    /// Stops at the first hit; later sources are never consulted. A source
    /// that fails to read, or panics, counts as having no value.
    pub fn resolve(sources: &SourceChain) -> Option<ResolvedCredential> {
        for source in sources.iter() {
            match Self::lookup_guarded(source) {
                Ok(Some(key)) if !key.is_empty() => {
                    info!("Resolved API key from {}", source.name());
                    return Some(ResolvedCredential::new(key, source.name()));
                }
                Ok(Some(_)) => debug!("Source {} returned an empty value", source.name()),
                Ok(None) => debug!("Source {} has no value", source.name()),
                Err(e) => debug!("Skipping source {}: {}", source.name(), e),
            }
        }

        None
    }

    /// Look up one source, turning a panic into `SourceUnavailable`
    fn lookup_guarded(source: &dyn CredentialSource) -> Result<Option<ApiKey>> {
        panic::catch_unwind(AssertUnwindSafe(|| source.lookup()))
            .unwrap_or_else(|_| Err(ConfigError::unavailable(source.name(), "lookup panicked")))
    }

    /// Pass the key to the dependent service's configuration entry point
    ///
    /// A blank key is rejected before the slot is touched. Any later call
    /// fails with `AlreadyConfigured` and has no side effect.
    pub fn apply(&self, credential: &ResolvedCredential) -> Result<()> {
        if credential.value.is_blank() {
            return Err(ConfigError::EmptyKey);
        }

        self.slot.claim()?;
        self.service.provide_api_key(credential.value.expose())?;
        self.slot.mark_configured(&credential.source);

        info!(
            "Configured {} with key from {}",
            self.service.name(),
            credential.source
        );
        Ok(())
    }

    /// The slot this resolver writes through
    pub fn slot(&self) -> &KeySlot {
        &self.slot
    }

    pub fn service_name(&self) -> &str {
        self.service.name()
    }
}

//! Dependent service boundary
//!
//! The dependent service (e.g. a maps SDK) exposes a one-time global
//! configuration entry point. [`KeySlot`] is the write-once cell that guards
//! it: once claimed, it stays claimed for the lifetime of the process.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::secret::ApiKey;

/// A third-party capability that needs an API key before it works
pub trait DependentService: Send + Sync {
    /// Service name for diagnostics
    fn name(&self) -> &str;

    /// The service's global configuration entry point
    ///
    /// Calling this more than once is undefined by the service, so callers
    /// must go through a [`KeySlot`].
    fn provide_api_key(&self, key: &str) -> Result<()>;
}

/// Process-wide write-once key slot
#[derive(Debug, Default)]
pub struct KeySlot {
    /// Set once the entry point has been (or is about to be) invoked
    claimed: AtomicBool,
    /// Name of the source whose key was accepted
    source: OnceLock<String>,
}

static PROCESS_SLOT: OnceLock<Arc<KeySlot>> = OnceLock::new();

impl KeySlot {
    /// Create an unclaimed slot
    pub const fn new() -> Self {
        Self {
            claimed: AtomicBool::new(false),
            source: OnceLock::new(),
        }
    }

    /// The slot shared by everything in this process
    pub fn process() -> Arc<KeySlot> {
        PROCESS_SLOT.get_or_init(|| Arc::new(KeySlot::new())).clone()
    }

    /// Claim the slot; fails with `AlreadyConfigured` if it was claimed before
    pub fn claim(&self) -> Result<()> {
        self.claimed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
            .map_err(|_| ConfigError::AlreadyConfigured)
    }

    /// Record which source's key the service accepted
    pub(crate) fn mark_configured(&self, source: &str) {
        if self.source.set(source.to_string()).is_err() {
            debug!("Key slot already records a source");
        }
    }

    /// True once the entry point has been invoked, whatever the outcome
    pub fn is_claimed(&self) -> bool {
        self.claimed.load(Ordering::Acquire)
    }

    /// True if the service accepted a key
    pub fn is_configured(&self) -> bool {
        self.source.get().is_some()
    }

    /// Name of the source whose key was accepted
    pub fn configured_source(&self) -> Option<&str> {
        self.source.get().map(String::as_str)
    }
}

/// In-memory dependent service that records what it was given
#[derive(Debug)]
pub struct RecordingService {
    name: String,
    key: OnceLock<ApiKey>,
    calls: AtomicUsize,
    reject_with: Option<String>,
}

impl RecordingService {
    /// Create a service that accepts the first key it is given
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            key: OnceLock::new(),
            calls: AtomicUsize::new(0),
            reject_with: None,
        }
    }

    /// Create a service that refuses every key with `reason`
    pub fn rejecting(name: &str, reason: &str) -> Self {
        Self {
            reject_with: Some(reason.to_string()),
            ..Self::new(name)
        }
    }

    /// Number of times the entry point was invoked
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::Acquire)
    }

    /// The key the service holds, if any
    pub fn api_key(&self) -> Option<&ApiKey> {
        self.key.get()
    }

    pub fn is_configured(&self) -> bool {
        self.key.get().is_some()
    }
}

impl DependentService for RecordingService {
    fn name(&self) -> &str {
        &self.name
    }

    fn provide_api_key(&self, key: &str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::AcqRel);

        if let Some(reason) = &self.reject_with {
            return Err(ConfigError::ServiceRejected(reason.clone()));
        }

        self.key
            .set(ApiKey::new(key))
            .map_err(|_| ConfigError::ServiceRejected("key already provided".to_string()))?;

        debug!("{} received API key ({} bytes)", self.name, key.len());
        Ok(())
    }
}

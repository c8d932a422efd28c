//! # bootstrap-core
//!
//! Startup bootstrap sequencer including:
//! - Ordered API key sources (bundled resource, metadata store, literal default)
//! - First-hit resolution with non-fatal fallback
//! - Write-once key slot so the dependent service is configured at most once
//! - A single linear bootstrap pass that never aborts the host

pub mod source;
pub mod credential;
pub mod service;
pub mod error;
pub mod settings;
mod secret;
mod bootstrap;

pub use error::{ConfigError, Result};
pub use secret::ApiKey;
pub use bootstrap::{BootstrapReport, BootstrapResult, BootstrapState, Bootstrapper, LaunchContext};
pub use credential::{CredentialResolver, ResolvedCredential};
pub use service::{DependentService, KeySlot, RecordingService};
pub use source::{
    AppMetadata, BundledResourceSource, CredentialSource, LiteralSource, MetadataStoreSource,
    SourceChain,
};
pub use settings::{BootstrapSettings, SettingsLoader};

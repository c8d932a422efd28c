//! Error types for bootstrap-core

use thiserror::Error;

/// Result type alias for bootstrap operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Bootstrap error types
///
/// None of these are fatal to the host: the sequencer logs them and keeps
/// going. They exist so each layer can say precisely what went wrong.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Credential source '{source_name}' unavailable: {reason}")]
    SourceUnavailable { source_name: String, reason: String },

    #[error("Resolved API key is empty")]
    EmptyKey,

    #[error("Dependent service is already configured")]
    AlreadyConfigured,

    #[error("Dependent service rejected the API key: {0}")]
    ServiceRejected(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ConfigError {
    /// Build a `SourceUnavailable` error for the named source
    pub fn unavailable(source_name: &str, reason: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            source_name: source_name.to_string(),
            reason: reason.into(),
        }
    }
}

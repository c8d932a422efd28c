//! Credential type definitions

use crate::secret::ApiKey;

/// The winning key and the source that produced it
///
/// Only `source` is safe to log.
#[derive(Clone)]
pub struct ResolvedCredential {
    /// The key value
    pub value: ApiKey,
    /// Name of the source that produced it
    pub source: String,
}

impl ResolvedCredential {
    pub fn new(value: ApiKey, source: &str) -> Self {
        Self {
            value,
            source: source.to_string(),
        }
    }
}

impl std::fmt::Debug for ResolvedCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedCredential")
            .field("value", &"[REDACTED]")
            .field("source", &self.source)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_shows_source_only() {
        let credential = ResolvedCredential::new(ApiKey::new("KEY123"), "literal-default");
        let debug = format!("{:?}", credential);

        assert!(debug.contains("literal-default"));
        assert!(!debug.contains("KEY123"));
    }
}

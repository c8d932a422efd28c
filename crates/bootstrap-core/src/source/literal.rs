//! Literal default source - the last tier of the chain

use super::CredentialSource;
use crate::error::Result;
use crate::secret::ApiKey;

/// Name reported in diagnostics
const SOURCE_NAME: &str = "literal-default";

/// Key embedded at build time via `BOOTSTRAP_EMBEDDED_API_KEY`, if any
pub const EMBEDDED_DEFAULT_KEY: Option<&str> = option_env!("BOOTSTRAP_EMBEDDED_API_KEY");

/// Source that always yields the same literal (or nothing)
#[derive(Clone)]
pub struct LiteralSource {
    value: Option<ApiKey>,
}

impl LiteralSource {
    /// Yield `value` on every lookup
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(ApiKey::new(value)),
        }
    }

    /// A literal tier with nothing to offer
    pub fn empty() -> Self {
        Self { value: None }
    }

    /// The key compiled into this binary
    pub fn embedded() -> Self {
        match EMBEDDED_DEFAULT_KEY {
            Some(value) => Self::new(value),
            None => Self::empty(),
        }
    }
}

impl CredentialSource for LiteralSource {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    fn lookup(&self) -> Result<Option<ApiKey>> {
        Ok(self.value.clone())
    }
}

impl std::fmt::Debug for LiteralSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiteralSource")
            .field("present", &self.value.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_lookup() {
        let source = LiteralSource::new("KEY123");
        assert_eq!(source.name(), "literal-default");
        assert_eq!(source.lookup().unwrap().unwrap().expose(), "KEY123");
    }

    #[test]
    fn test_empty_literal() {
        assert!(LiteralSource::empty().lookup().unwrap().is_none());
    }

    #[test]
    fn test_embedded_matches_build() {
        let found = LiteralSource::embedded().lookup().unwrap();
        assert_eq!(found.as_ref().map(ApiKey::expose), EMBEDDED_DEFAULT_KEY);
    }

    #[test]
    fn test_debug_hides_value() {
        let debug = format!("{:?}", LiteralSource::new("KEY123"));
        assert!(!debug.contains("KEY123"));
    }
}

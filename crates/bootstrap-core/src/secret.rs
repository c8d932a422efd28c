//! Secret value handling with automatic zeroization

use zeroize::{Zeroize, ZeroizeOnDrop};

/// API key candidate - automatically zeroed when dropped
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ApiKey {
    value: String,
}

impl ApiKey {
    /// Wrap a raw key value
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Get the secret value (use carefully)
    pub fn expose(&self) -> &str {
        &self.value
    }

    /// True if the value is empty or whitespace-only
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// Length in bytes, safe to log
    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl From<&str> for ApiKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKey")
            .field("value", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expose() {
        let key = ApiKey::new("KEY123");
        assert_eq!(key.expose(), "KEY123");
        assert_eq!(key.len(), 6);
    }

    #[test]
    fn test_blank_detection() {
        assert!(ApiKey::new("").is_blank());
        assert!(ApiKey::new("  \t\n").is_blank());
        assert!(!ApiKey::new(" k ").is_blank());
    }

    #[test]
    fn test_debug_redacted() {
        let key = ApiKey::new("super-secret-value");
        let debug = format!("{:?}", key);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("super-secret-value"));
    }
}

//! Credential source trait definitions

use crate::error::Result;
use crate::secret::ApiKey;

/// A named provider of a candidate API key
///
/// Implementations are stateless and cheap; they only read local data.
pub trait CredentialSource: Send + Sync {
    /// Name used in diagnostics (never the key itself)
    fn name(&self) -> &str;

    /// Look up a candidate key
    ///
    /// Returns `Ok(Some(key))` if found, `Ok(None)` if this source has no
    /// value, or `Err` if the backing data could not be read. Callers treat
    /// `Err` the same as `Ok(None)`.
    fn lookup(&self) -> Result<Option<ApiKey>>;
}

impl<T: CredentialSource + ?Sized> CredentialSource for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn lookup(&self) -> Result<Option<ApiKey>> {
        (**self).lookup()
    }
}

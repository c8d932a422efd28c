//! Credential resolution and one-time application

mod resolver;
mod types;

pub use resolver::CredentialResolver;
pub use types::ResolvedCredential;

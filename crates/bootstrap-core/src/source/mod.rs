//! Credential sources for API key resolution
//!
//! Three tiers, consulted in this order by the standard chain:
//! 1. Bundled resource file (structured document shipped with the app)
//! 2. Application metadata store
//! 3. Literal default compiled into the binary

mod traits;
mod bundled;
mod metadata;
mod literal;
mod chain;

pub use traits::CredentialSource;
pub use bundled::{
    BundledResourceSource, ResourceFormat, DEFAULT_RESOURCE_FIELD, DEFAULT_RESOURCE_NAME,
};
pub use metadata::{
    AppMetadata, MetadataStoreSource, DEFAULT_METADATA_FILE, DEFAULT_METADATA_KEY,
};
pub use literal::{LiteralSource, EMBEDDED_DEFAULT_KEY};
pub use chain::SourceChain;

//! Application metadata store source
//!
//! The metadata store is the app's general key/value configuration document
//! (the equivalent of a bundle's info dictionary). It is read-only here.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use super::CredentialSource;
use crate::error::{ConfigError, Result};
use crate::secret::ApiKey;

/// Name reported in diagnostics
const SOURCE_NAME: &str = "metadata-store";

/// Default metadata file name inside the resource directory
pub const DEFAULT_METADATA_FILE: &str = "Info.json";

/// Default metadata key holding the API key
pub const DEFAULT_METADATA_KEY: &str = "GMSApiKey";

/// Read-only application metadata
#[derive(Debug, Clone, Default)]
pub struct AppMetadata {
    entries: Map<String, Value>,
}

impl AppMetadata {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from key/value pairs
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Load from a JSON file; a missing file yields an empty store
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No metadata file found at {:?}", path);
            return Ok(Self::new());
        }

        let contents = std::fs::read_to_string(path)?;
        let entries: Map<String, Value> = serde_json::from_str(&contents)?;
        debug!("Loaded {} metadata entries from {:?}", entries.len(), path);
        Ok(Self { entries })
    }

    /// Get a string value; values of any other type are treated as absent
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    /// Get a raw value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone)]
enum Store {
    Loaded(Arc<AppMetadata>),
    /// Read when the source is consulted, so a bad file only disables this tier
    File(PathBuf),
}

/// Source backed by the application metadata store
#[derive(Debug, Clone)]
pub struct MetadataStoreSource {
    store: Store,
    key: String,
}

impl MetadataStoreSource {
    /// Query an already-loaded store
    pub fn new(metadata: Arc<AppMetadata>, key: &str) -> Self {
        Self {
            store: Store::Loaded(metadata),
            key: key.to_string(),
        }
    }

    /// Query the metadata file at `path`, loaded on lookup
    pub fn from_file(path: impl Into<PathBuf>, key: &str) -> Self {
        Self {
            store: Store::File(path.into()),
            key: key.to_string(),
        }
    }

    fn find(&self, metadata: &AppMetadata) -> Result<Option<ApiKey>> {
        match metadata.get(&self.key) {
            None => Ok(None),
            Some(Value::String(value)) => Ok(Some(ApiKey::new(value.as_str()))),
            Some(_) => {
                // Non-string entries are ignored rather than coerced
                debug!("Metadata key {} is not a string", self.key);
                Ok(None)
            }
        }
    }
}

impl CredentialSource for MetadataStoreSource {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    fn lookup(&self) -> Result<Option<ApiKey>> {
        match &self.store {
            Store::Loaded(metadata) => self.find(metadata),
            Store::File(path) => {
                let metadata = AppMetadata::load(path)
                    .map_err(|e| ConfigError::unavailable(SOURCE_NAME, e.to_string()))?;
                self.find(&metadata)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_get_string() {
        let metadata = AppMetadata::from_entries([
            ("GMSApiKey", json!("XYZ")),
            ("CFBundleVersion", json!(7)),
        ]);

        assert_eq!(metadata.get_string("GMSApiKey"), Some("XYZ"));
        assert_eq!(metadata.get_string("CFBundleVersion"), None);
        assert_eq!(metadata.get_string("missing"), None);
        assert_eq!(metadata.len(), 2);
    }

    #[test]
    fn test_source_lookup() {
        let metadata = Arc::new(AppMetadata::from_entries([("GMSApiKey", json!("XYZ"))]));
        let source = MetadataStoreSource::new(metadata, DEFAULT_METADATA_KEY);

        assert_eq!(source.name(), "metadata-store");
        assert_eq!(source.lookup().unwrap().unwrap().expose(), "XYZ");
    }

    #[test]
    fn test_non_string_is_absent() {
        let metadata = Arc::new(AppMetadata::from_entries([("GMSApiKey", json!(["a"]))]));
        let source = MetadataStoreSource::new(metadata, DEFAULT_METADATA_KEY);

        assert!(source.lookup().unwrap().is_none());
    }

    #[test]
    fn test_file_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_METADATA_FILE);
        std::fs::write(&path, r#"{"GMSApiKey": "from-file", "Other": true}"#).unwrap();

        let source = MetadataStoreSource::from_file(&path, DEFAULT_METADATA_KEY);
        assert_eq!(source.lookup().unwrap().unwrap().expose(), "from-file");
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let source =
            MetadataStoreSource::from_file(dir.path().join("Info.json"), DEFAULT_METADATA_KEY);

        assert!(source.lookup().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_METADATA_FILE);
        std::fs::write(&path, "not json").unwrap();

        let source = MetadataStoreSource::from_file(&path, DEFAULT_METADATA_KEY);
        assert!(matches!(
            source.lookup(),
            Err(ConfigError::SourceUnavailable { .. })
        ));
    }
}

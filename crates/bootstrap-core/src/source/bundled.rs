//! Bundled resource file source
//!
//! Reads a structured document shipped alongside the application and pulls a
//! single string field out of its top-level map. The document is located by a
//! well-known base name; the extension decides the format.

use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::CredentialSource;
use crate::error::{ConfigError, Result};
use crate::secret::ApiKey;

/// Name reported in diagnostics
const SOURCE_NAME: &str = "bundled-file";

/// Default base name of the bundled resource
pub const DEFAULT_RESOURCE_NAME: &str = "GoogleService-Info";

/// Default field holding the API key
pub const DEFAULT_RESOURCE_FIELD: &str = "API_KEY";

/// Supported resource formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceFormat {
    Json,
    Yaml,
}

impl ResourceFormat {
    /// Extensions probed when locating a resource by base name, in order
    const PROBE_ORDER: [(&'static str, ResourceFormat); 3] = [
        ("json", ResourceFormat::Json),
        ("yaml", ResourceFormat::Yaml),
        ("yml", ResourceFormat::Yaml),
    ];

    /// Infer the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        Self::PROBE_ORDER
            .iter()
            .find(|(candidate, _)| *candidate == ext)
            .map(|(_, format)| *format)
    }

    fn parse(self, contents: &str) -> Result<Value> {
        match self {
            ResourceFormat::Json => Ok(serde_json::from_str(contents)?),
            ResourceFormat::Yaml => Ok(serde_yaml::from_str(contents)?),
        }
    }
}

#[derive(Debug, Clone)]
enum ResourceLocation {
    /// Probe `dir/name.{json,yaml,yml}`
    ByName { dir: PathBuf, name: String },
    /// Explicit file
    File(PathBuf),
}

/// Source backed by the bundled resource file
#[derive(Debug, Clone)]
pub struct BundledResourceSource {
    location: ResourceLocation,
    field: String,
}

impl BundledResourceSource {
    /// Locate `name` inside `resource_dir`, reading `field`
    pub fn new(resource_dir: impl Into<PathBuf>, name: &str, field: &str) -> Self {
        Self {
            location: ResourceLocation::ByName {
                dir: resource_dir.into(),
                name: name.to_string(),
            },
            field: field.to_string(),
        }
    }

    /// Use the default resource name and field inside `resource_dir`
    pub fn in_dir(resource_dir: impl Into<PathBuf>) -> Self {
        Self::new(resource_dir, DEFAULT_RESOURCE_NAME, DEFAULT_RESOURCE_FIELD)
    }

    /// Read `field` from an explicit file path
    pub fn with_file(path: impl Into<PathBuf>, field: &str) -> Self {
        Self {
            location: ResourceLocation::File(path.into()),
            field: field.to_string(),
        }
    }

    /// Find the resource on disk and its format
    fn locate(&self) -> Result<Option<(PathBuf, ResourceFormat)>> {
        match &self.location {
            ResourceLocation::File(path) => {
                if !path.exists() {
                    return Ok(None);
                }
                let format = ResourceFormat::from_path(path).ok_or_else(|| {
                    ConfigError::unavailable(
                        SOURCE_NAME,
                        format!("unsupported resource format: {:?}", path),
                    )
                })?;
                Ok(Some((path.clone(), format)))
            }
            ResourceLocation::ByName { dir, name } => Ok(ResourceFormat::PROBE_ORDER
                .iter()
                .map(|(ext, format)| (dir.join(format!("{}.{}", name, ext)), *format))
                .find(|(path, _)| path.is_file())),
        }
    }
}

impl CredentialSource for BundledResourceSource {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    fn lookup(&self) -> Result<Option<ApiKey>> {
        let Some((path, format)) = self.locate()? else {
            debug!("No bundled resource found");
            return Ok(None);
        };

        let contents = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::unavailable(SOURCE_NAME, e.to_string()))?;
        let document = format
            .parse(&contents)
            .map_err(|e| ConfigError::unavailable(SOURCE_NAME, e.to_string()))?;

        let map = document.as_object().ok_or_else(|| {
            ConfigError::unavailable(SOURCE_NAME, "resource root is not a map")
        })?;

        match map.get(&self.field) {
            None => {
                debug!("Field {} missing from {:?}", self.field, path);
                Ok(None)
            }
            Some(Value::String(value)) => Ok(Some(ApiKey::new(value.as_str()))),
            Some(other) => Err(ConfigError::unavailable(
                SOURCE_NAME,
                format!("field {} is not a string ({})", self.field, value_kind(other)),
            )),
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "map",
    }
}

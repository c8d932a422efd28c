//! Bootstrap settings
//!
//! Where to look for the API key: resource directory, resource name and
//! field, metadata file and key, and an optional literal override. Settings
//! live in a plain JSON file and are only ever read by the bootstrap.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{ConfigError, Result};
use crate::source::{
    DEFAULT_METADATA_FILE, DEFAULT_METADATA_KEY, DEFAULT_RESOURCE_FIELD, DEFAULT_RESOURCE_NAME,
};

/// Settings file name used by [`SettingsLoader::new`]
pub const SETTINGS_FILE: &str = "bootstrap.json";

/// Bootstrap settings
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BootstrapSettings {
    /// Settings file version
    pub version: u32,
    /// Directory holding the bundled resource and metadata file
    pub resource_dir: Option<PathBuf>,
    /// Base name of the bundled resource (extension is probed)
    pub resource_name: String,
    /// Field in the bundled resource holding the key
    pub resource_field: String,
    /// Metadata file name, relative to the resource directory
    pub metadata_file: String,
    /// Metadata key holding the fallback key
    pub metadata_key: String,
    /// Overrides the key embedded at build time
    pub literal_default: Option<String>,
}

impl Default for BootstrapSettings {
    fn default() -> Self {
        Self {
            version: 1,
            resource_dir: None,
            resource_name: DEFAULT_RESOURCE_NAME.to_string(),
            resource_field: DEFAULT_RESOURCE_FIELD.to_string(),
            metadata_file: DEFAULT_METADATA_FILE.to_string(),
            metadata_key: DEFAULT_METADATA_KEY.to_string(),
            literal_default: None,
        }
    }
}

impl BootstrapSettings {
    /// Effective resource directory (current directory if unset)
    pub fn resource_dir(&self) -> PathBuf {
        self.resource_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Full path of the metadata file
    pub fn metadata_path(&self) -> PathBuf {
        self.resource_dir().join(&self.metadata_file)
    }

    /// Builder-style override of the resource directory
    pub fn with_resource_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.resource_dir = Some(dir.into());
        self
    }

    /// Check that every lookup name is usable
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("resourceName", &self.resource_name),
            ("resourceField", &self.resource_field),
            ("metadataFile", &self.metadata_file),
            ("metadataKey", &self.metadata_key),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidSettings(format!("{} must not be empty", field)));
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for BootstrapSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapSettings")
            .field("version", &self.version)
            .field("resource_dir", &self.resource_dir)
            .field("resource_name", &self.resource_name)
            .field("resource_field", &self.resource_field)
            .field("metadata_file", &self.metadata_file)
            .field("metadata_key", &self.metadata_key)
            .field(
                "literal_default",
                &self.literal_default.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Settings loader
pub struct SettingsLoader {
    settings_file: PathBuf,
    settings: BootstrapSettings,
}

impl SettingsLoader {
    /// Load `bootstrap.json` from `config_dir`, falling back to defaults
    pub fn new(config_dir: &Path) -> Self {
        let settings_file = config_dir.join(SETTINGS_FILE);
        let settings = Self::load_from_file(&settings_file).unwrap_or_else(|e| {
            warn!("Ignoring unreadable settings file {:?}: {}", settings_file, e);
            BootstrapSettings::default()
        });

        Self {
            settings_file,
            settings,
        }
    }

    /// Load an explicit settings file; a missing or bad file is an error
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("settings file not found: {}", path.display()),
            )));
        }

        let settings = Self::load_from_file(path)?;
        Ok(Self {
            settings_file: path.to_path_buf(),
            settings,
        })
    }

    /// Load settings from file
    fn load_from_file(path: &Path) -> Result<BootstrapSettings> {
        if !path.exists() {
            debug!("No settings file found, using defaults");
            return Ok(BootstrapSettings::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let settings: BootstrapSettings = serde_json::from_str(&contents)?;
        settings.validate()?;
        debug!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Get current settings
    pub fn get(&self) -> &BootstrapSettings {
        &self.settings
    }

    /// Consume the loader
    pub fn into_settings(self) -> BootstrapSettings {
        self.settings
    }

    /// Path the settings were (or would be) read from
    pub fn settings_file(&self) -> &Path {
        &self.settings_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_settings_default() {
        let temp_dir = TempDir::new().unwrap();
        let loader = SettingsLoader::new(temp_dir.path());

        let settings = loader.get();
        assert_eq!(settings.resource_name, "GoogleService-Info");
        assert_eq!(settings.resource_field, "API_KEY");
        assert_eq!(settings.metadata_key, "GMSApiKey");
        assert!(settings.literal_default.is_none());
        assert_eq!(loader.settings_file(), temp_dir.path().join("bootstrap.json"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(SETTINGS_FILE),
            r#"{"metadataKey": "MapsKey", "resourceDir": "/opt/app"}"#,
        )
        .unwrap();

        let settings = SettingsLoader::new(temp_dir.path()).into_settings();
        assert_eq!(settings.metadata_key, "MapsKey");
        assert_eq!(settings.resource_field, "API_KEY");
        assert_eq!(settings.resource_dir(), PathBuf::from("/opt/app"));
        assert_eq!(settings.metadata_path(), PathBuf::from("/opt/app/Info.json"));
    }

    #[test]
    fn test_corrupt_file_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(SETTINGS_FILE), "{").unwrap();

        let loader = SettingsLoader::new(temp_dir.path());
        assert_eq!(loader.get().resource_name, DEFAULT_RESOURCE_NAME);
    }

    #[test]
    fn test_open_reports_errors() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.json");
        std::fs::write(&path, r#"{"resourceField": "  "}"#).unwrap();

        let result = SettingsLoader::open(&path);
        assert!(matches!(result, Err(ConfigError::InvalidSettings(_))));
    }

    #[test]
    fn test_open_missing_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = SettingsLoader::open(&temp_dir.path().join("typo.json"));

        match result {
            Err(ConfigError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected NotFound, got {:?}", other.map(|l| l.into_settings())),
        }
    }

    #[test]
    fn test_debug_redacts_literal() {
        let settings = BootstrapSettings {
            literal_default: Some("KEY123".to_string()),
            ..Default::default()
        };

        let debug = format!("{:?}", settings);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("KEY123"));
    }
}

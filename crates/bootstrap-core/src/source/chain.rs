//! Ordered list of credential sources

use super::{BundledResourceSource, CredentialSource, LiteralSource, MetadataStoreSource};
use crate::settings::BootstrapSettings;

/// Credential sources in priority order (first = highest)
#[derive(Default)]
pub struct SourceChain {
    sources: Vec<Box<dyn CredentialSource>>,
}

impl SourceChain {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard three-tier chain: bundled file, metadata store, literal
    pub fn standard(settings: &BootstrapSettings) -> Self {
        let resource_dir = settings.resource_dir();

        let literal = match &settings.literal_default {
            Some(value) => LiteralSource::new(value.as_str()),
            None => LiteralSource::embedded(),
        };

        Self::new()
            .with(BundledResourceSource::new(
                resource_dir,
                &settings.resource_name,
                &settings.resource_field,
            ))
            .with(MetadataStoreSource::from_file(
                settings.metadata_path(),
                &settings.metadata_key,
            ))
            .with(literal)
    }

    /// Append a source at the lowest priority
    pub fn push(&mut self, source: impl CredentialSource + 'static) {
        self.sources.push(Box::new(source));
    }

    /// Builder-style [`push`](Self::push)
    pub fn with(mut self, source: impl CredentialSource + 'static) -> Self {
        self.push(source);
        self
    }

    /// Source names in priority order
    pub fn names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn CredentialSource> {
        self.sources.iter().map(|s| &**s as &dyn CredentialSource)
    }
}

impl std::fmt::Debug for SourceChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_standard_order() {
        let chain = SourceChain::standard(&BootstrapSettings::default());
        assert_eq!(
            chain.names(),
            vec!["bundled-file", "metadata-store", "literal-default"]
        );
        assert_eq!(chain.len(), 3);
    }

    #[test]
    fn test_literal_override() {
        let temp_dir = TempDir::new().unwrap();
        let settings = BootstrapSettings {
            literal_default: Some("override".to_string()),
            ..Default::default()
        }
        .with_resource_dir(temp_dir.path());

        let chain = SourceChain::standard(&settings);
        let last = chain.iter().last().unwrap();
        assert_eq!(last.lookup().unwrap().unwrap().expose(), "override");
    }

    #[test]
    fn test_push_appends_lowest_priority() {
        let mut chain = SourceChain::new();
        assert!(chain.is_empty());

        chain.push(LiteralSource::new("a"));
        chain.push(LiteralSource::empty());
        assert_eq!(chain.len(), 2);

        let first = chain.iter().next().unwrap();
        assert_eq!(first.lookup().unwrap().unwrap().expose(), "a");
    }
}

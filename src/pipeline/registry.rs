//! Lookup from document kind tags to element factories.
//!
//! The built-in catalog is registered up front. Plugins register a factory
//! under their own tag; the checker never consults the registry, it only
//! dispatches on the elements it is handed.

use crate::pipeline::element::{AnyElement, BuiltinElement, ElementPlugin};
use crate::pipeline::element_kind::ElementKind;
use crate::pipeline::error::{ConfigurationError, RegistryError};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Builds a plugin element from its persisted attributes.
pub type PluginFactory =
    Arc<dyn Fn(&Value) -> Result<Arc<dyn ElementPlugin>, ConfigurationError> + Send + Sync>;

/// Registered plugin kinds, keyed by tag.
#[derive(Clone, Default)]
pub struct ElementRegistry {
    plugins: BTreeMap<String, PluginFactory>,
}

impl fmt::Debug for ElementRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRegistry")
            .field("plugins", &self.plugins.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ElementRegistry {
    /// A registry holding only the built-in catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin kind. Tags must not clash with built-ins or other plugins.
    pub fn register_plugin<F>(
        &mut self,
        tag: impl Into<String>,
        factory: F,
    ) -> Result<(), RegistryError>
    where
        F: Fn(&Value) -> Result<Arc<dyn ElementPlugin>, ConfigurationError> + Send + Sync + 'static,
    {
        let tag = tag.into();
        if self.contains(&tag) {
            return Err(RegistryError::DuplicateKind(tag));
        }
        tracing::debug!("Registered element plugin '{}'", tag);
        self.plugins.insert(tag, Arc::new(factory));
        Ok(())
    }

    pub fn contains(&self, tag: &str) -> bool {
        ElementKind::from_tag(tag).is_some() || self.plugins.contains_key(tag)
    }

    /// Every known tag: built-ins in palette order, then plugins alphabetically.
    pub fn tags(&self) -> Vec<&str> {
        ElementKind::all()
            .iter()
            .map(|k| k.tag())
            .chain(self.plugins.keys().map(String::as_str))
            .collect()
    }

    /// Build an element kind from a tag and its persisted attributes.
    ///
    /// A plugin must report the tag it was registered under, since that is the
    /// tag its records are saved with.
    pub fn create(&self, tag: &str, attributes: &Value) -> Result<AnyElement, RegistryError> {
        let with_tag = |source| RegistryError::Attributes {
            tag: tag.to_string(),
            source,
        };

        if let Some(kind) = ElementKind::from_tag(tag) {
            return BuiltinElement::from_attributes(kind, attributes)
                .map(AnyElement::Builtin)
                .map_err(with_tag);
        }

        let factory = self
            .plugins
            .get(tag)
            .ok_or_else(|| RegistryError::UnknownKind(tag.to_string()))?;
        let plugin = factory(attributes).map_err(with_tag)?;
        if plugin.kind_tag() != tag {
            return Err(RegistryError::TagMismatch {
                tag: tag.to_string(),
                actual: plugin.kind_tag().to_string(),
            });
        }
        Ok(AnyElement::Plugin(plugin))
    }
}

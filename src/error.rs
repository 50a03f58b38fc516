//! Error handling for Fyre
//!
//! This module defines the top-level error type and a Result alias used by
//! the document, configuration and CLI layers. The pipeline module keeps its
//! own narrower error types; they convert into [`FyreError`] with `?`.

use crate::pipeline::error::{ConfigurationError, GraphError, RegistryError};
use thiserror::Error;

/// Main error type for Fyre operations
#[derive(Error, Debug)]
pub enum FyreError {
    /// A graph mutation was rejected
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// An element kind could not be looked up or registered
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// A type descriptor or element attribute was malformed
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    /// A pipeline document was structurally invalid
    #[error("Document error: {0}")]
    Document(String),

    /// Errors related to configuration loading/saving
    #[error("Config error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<FyreError>,
    },
}

impl FyreError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        FyreError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with any context layers peeled off.
    pub fn root(&self) -> &FyreError {
        match self {
            FyreError::WithContext { source, .. } => source.root(),
            other => other,
        }
    }
}

impl From<serde_json::Error> for FyreError {
    fn from(err: serde_json::Error) -> Self {
        FyreError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for FyreError {
    fn from(err: toml::de::Error) -> Self {
        FyreError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for FyreError {
    fn from(err: toml::ser::Error) -> Self {
        FyreError::Config(err.to_string())
    }
}

/// Result type alias for Fyre operations
pub type Result<T> = std::result::Result<T, FyreError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<FyreError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::ElementId;

    #[test]
    fn test_error_display() {
        let err = FyreError::Document("missing elements".to_string());
        assert_eq!(err.to_string(), "Document error: missing elements");
    }

    #[test]
    fn test_error_with_context() {
        let err = FyreError::Config("bad filter".to_string());
        let with_ctx = err.with_context("Failed to load config");
        assert!(with_ctx.to_string().contains("Failed to load config"));
        assert!(matches!(with_ctx.root(), FyreError::Config(_)));
    }

    #[test]
    fn test_graph_error_converts() {
        let id = ElementId::new();
        let result: std::result::Result<(), GraphError> = Err(GraphError::NotFound(id));
        let err = result.context("Removing element").unwrap_err();
        assert!(err.to_string().starts_with("Removing element: "));
        assert!(matches!(
            err.root(),
            FyreError::Graph(GraphError::NotFound(found)) if *found == id
        ));
    }

    #[test]
    fn test_json_error_converts() {
        let err: FyreError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, FyreError::Serialization(_)));
    }
}

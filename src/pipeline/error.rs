//! Pipeline-specific error types.

use crate::pipeline::id::{ElementId, PadRef};
use thiserror::Error;

/// A malformed type descriptor was constructed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Matrix rank must be at least 1")]
    ZeroRank,

    #[error("Matrix of rank {rank} given a shape of {shape_len} dimensions")]
    ShapeMismatch { rank: usize, shape_len: usize },

    #[error("Invalid attribute '{key}': {message}")]
    Attribute { key: String, message: String },
}

/// Raised by an element's `check` when an input pad carries an unacceptable type.
///
/// The pad index is local to the element; the checker attaches the element id.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Pad {pad}: {message}")]
pub struct PadTypeError {
    pub pad: usize,
    pub message: String,
}

impl PadTypeError {
    pub fn new(pad: usize, message: impl Into<String>) -> Self {
        Self {
            pad,
            message: message.into(),
        }
    }
}

/// Graph mutation contract violations. A failed mutation leaves the graph untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Element {0} is already in the pipeline")]
    DuplicateId(ElementId),

    #[error("Element {0} not found")]
    NotFound(ElementId),

    #[error("Connection {from} -> {to} not found")]
    ConnectionNotFound { from: PadRef, to: PadRef },

    #[error("Invalid endpoint {endpoint}: {reason}")]
    InvalidEndpoint { endpoint: PadRef, reason: String },

    #[error("Input pad {0} already has an incoming connection")]
    SinkAlreadyConnected(PadRef),

    #[error("Element {0} is not a built-in Input element")]
    NotAnInput(ElementId),
}

/// Errors raised while looking up or registering element kinds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Unknown element kind '{0}'")]
    UnknownKind(String),

    #[error("Element kind '{0}' is already registered")]
    DuplicateKind(String),

    #[error("Element kind '{tag}' built an element tagged '{actual}'")]
    TagMismatch { tag: String, actual: String },

    #[error("Element kind '{tag}': {source}")]
    Attributes {
        tag: String,
        #[source]
        source: ConfigurationError,
    },
}

pub type GraphResult<T> = std::result::Result<T, GraphError>;

//! Element abstraction for the pipeline graph.
//!
//! Two-layer design:
//! - **`ElementPlugin` trait**: for element kinds registered at runtime.
//! - **`BuiltinElement` enum**: for the built-in catalog. Checks dispatch
//!   through a match, no trait objects involved.
//!
//! `AnyElement` wraps either variant so the graph and the checker handle both
//! uniformly. `Element` pairs a kind with its identity, comment and pads.

use crate::pipeline::data_type::DataType;
use crate::pipeline::element_kind::ElementKind;
use crate::pipeline::elements::{
    CartesianProductElement, HistogramImagerElement, InputElement, IterativeElement,
    MatrixMultiplyElement, PixelRendererElement,
};
use crate::pipeline::error::{ConfigurationError, PadTypeError};
use crate::pipeline::id::ElementId;
use crate::pipeline::pad::{Pad, PadDescriptor, PadDirection};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Outcome of an element's type check.
///
/// - `Ok(Some(types))`: one type per output pad, in pad order.
/// - `Ok(None)`: the element imposes no typing.
/// - `Err(_)`: an input pad carries an unacceptable type.
pub type CheckResult = Result<Option<Vec<DataType>>, PadTypeError>;

/// Trait for element kinds supplied outside the built-in catalog.
///
/// `check` receives one entry per input pad in pad order; `None` marks an
/// unconnected (unconstrained) pad.
pub trait ElementPlugin: Send + Sync + fmt::Debug {
    /// Tag used in documents. Must be unique across the registry.
    fn kind_tag(&self) -> &str;

    /// Human-readable name of this kind.
    fn name(&self) -> &str;

    fn category(&self) -> &str {
        "Plugins"
    }

    fn description(&self) -> &str {
        ""
    }

    fn icon(&self) -> &str {
        "fyre-plugin"
    }

    fn inputs(&self) -> &[PadDescriptor];

    fn outputs(&self) -> &[PadDescriptor];

    /// Whether this is a user-configured value source.
    fn is_input(&self) -> bool {
        false
    }

    fn check(&self, inputs: &[Option<DataType>]) -> CheckResult;

    /// Kind-specific attributes to persist.
    fn attributes(&self) -> Value {
        Value::Null
    }
}

/// Enum dispatch for built-in element kinds.
#[derive(Debug, Clone)]
pub enum BuiltinElement {
    Input(InputElement),
    CartesianProduct(CartesianProductElement),
    MatrixMultiply(MatrixMultiplyElement),
    HistogramImager(HistogramImagerElement),
    PixelRenderer(PixelRendererElement),
    Iterative(IterativeElement),
}

impl BuiltinElement {
    /// A fresh element of `kind` with default attributes.
    pub fn new(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Input => BuiltinElement::Input(InputElement::default()),
            ElementKind::CartesianProduct => {
                BuiltinElement::CartesianProduct(CartesianProductElement::new())
            }
            ElementKind::MatrixMultiply => {
                BuiltinElement::MatrixMultiply(MatrixMultiplyElement::new())
            }
            ElementKind::HistogramImager => {
                BuiltinElement::HistogramImager(HistogramImagerElement::new())
            }
            ElementKind::PixelRenderer => {
                BuiltinElement::PixelRenderer(PixelRendererElement::new())
            }
            ElementKind::Iterative => BuiltinElement::Iterative(IterativeElement::new()),
        }
    }

    /// Rebuild an element of `kind` from persisted attributes.
    pub fn from_attributes(
        kind: ElementKind,
        attributes: &Value,
    ) -> Result<Self, ConfigurationError> {
        match kind {
            ElementKind::Input => {
                InputElement::from_attributes(attributes).map(BuiltinElement::Input)
            }
            other => Ok(Self::new(other)),
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            BuiltinElement::Input(_) => ElementKind::Input,
            BuiltinElement::CartesianProduct(_) => ElementKind::CartesianProduct,
            BuiltinElement::MatrixMultiply(_) => ElementKind::MatrixMultiply,
            BuiltinElement::HistogramImager(_) => ElementKind::HistogramImager,
            BuiltinElement::PixelRenderer(_) => ElementKind::PixelRenderer,
            BuiltinElement::Iterative(_) => ElementKind::Iterative,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            BuiltinElement::Input(e) => e.name(),
            BuiltinElement::CartesianProduct(e) => e.name(),
            BuiltinElement::MatrixMultiply(e) => e.name(),
            BuiltinElement::HistogramImager(e) => e.name(),
            BuiltinElement::PixelRenderer(e) => e.name(),
            BuiltinElement::Iterative(e) => e.name(),
        }
    }

    pub fn inputs(&self) -> &[PadDescriptor] {
        match self {
            BuiltinElement::Input(e) => e.inputs(),
            BuiltinElement::CartesianProduct(e) => e.inputs(),
            BuiltinElement::MatrixMultiply(e) => e.inputs(),
            BuiltinElement::HistogramImager(e) => e.inputs(),
            BuiltinElement::PixelRenderer(e) => e.inputs(),
            BuiltinElement::Iterative(e) => e.inputs(),
        }
    }

    pub fn outputs(&self) -> &[PadDescriptor] {
        match self {
            BuiltinElement::Input(e) => e.outputs(),
            BuiltinElement::CartesianProduct(e) => e.outputs(),
            BuiltinElement::MatrixMultiply(e) => e.outputs(),
            BuiltinElement::HistogramImager(e) => e.outputs(),
            BuiltinElement::PixelRenderer(e) => e.outputs(),
            BuiltinElement::Iterative(e) => e.outputs(),
        }
    }

    pub fn check(&self, inputs: &[Option<DataType>]) -> CheckResult {
        match self {
            BuiltinElement::Input(e) => e.check(inputs),
            BuiltinElement::CartesianProduct(e) => e.check(inputs),
            BuiltinElement::MatrixMultiply(e) => e.check(inputs),
            BuiltinElement::HistogramImager(e) => e.check(inputs),
            BuiltinElement::PixelRenderer(e) => e.check(inputs),
            BuiltinElement::Iterative(e) => e.check(inputs),
        }
    }

    pub fn attributes(&self) -> Value {
        match self {
            BuiltinElement::Input(e) => e.attributes(),
            _ => Value::Null,
        }
    }
}

/// Wrapper that holds either a built-in element or a plugin.
#[derive(Debug, Clone)]
pub enum AnyElement {
    Builtin(BuiltinElement),
    Plugin(Arc<dyn ElementPlugin>),
}

impl AnyElement {
    pub fn kind_tag(&self) -> &str {
        match self {
            AnyElement::Builtin(e) => e.kind().tag(),
            AnyElement::Plugin(p) => p.kind_tag(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            AnyElement::Builtin(e) => e.name(),
            AnyElement::Plugin(p) => p.name(),
        }
    }

    pub fn category(&self) -> &str {
        match self {
            AnyElement::Builtin(e) => e.kind().category(),
            AnyElement::Plugin(p) => p.category(),
        }
    }

    pub fn description(&self) -> &str {
        match self {
            AnyElement::Builtin(e) => e.kind().description(),
            AnyElement::Plugin(p) => p.description(),
        }
    }

    pub fn icon(&self) -> &str {
        match self {
            AnyElement::Builtin(e) => e.kind().icon(),
            AnyElement::Plugin(p) => p.icon(),
        }
    }

    pub fn inputs(&self) -> &[PadDescriptor] {
        match self {
            AnyElement::Builtin(e) => e.inputs(),
            AnyElement::Plugin(p) => p.inputs(),
        }
    }

    pub fn outputs(&self) -> &[PadDescriptor] {
        match self {
            AnyElement::Builtin(e) => e.outputs(),
            AnyElement::Plugin(p) => p.outputs(),
        }
    }

    pub fn is_input(&self) -> bool {
        match self {
            AnyElement::Builtin(e) => e.kind().is_input(),
            AnyElement::Plugin(p) => p.is_input(),
        }
    }

    pub fn check(&self, inputs: &[Option<DataType>]) -> CheckResult {
        match self {
            AnyElement::Builtin(e) => e.check(inputs),
            AnyElement::Plugin(p) => p.check(inputs),
        }
    }

    pub fn attributes(&self) -> Value {
        match self {
            AnyElement::Builtin(e) => e.attributes(),
            AnyElement::Plugin(p) => p.attributes(),
        }
    }
}

impl From<BuiltinElement> for AnyElement {
    fn from(element: BuiltinElement) -> Self {
        AnyElement::Builtin(element)
    }
}

impl From<ElementKind> for AnyElement {
    fn from(kind: ElementKind) -> Self {
        AnyElement::Builtin(BuiltinElement::new(kind))
    }
}

impl From<Arc<dyn ElementPlugin>> for AnyElement {
    fn from(plugin: Arc<dyn ElementPlugin>) -> Self {
        AnyElement::Plugin(plugin)
    }
}

/// A processing unit in the pipeline graph.
///
/// Pads are built from the kind's descriptors once, at construction, and are
/// never reordered afterwards.
#[derive(Debug, Clone)]
pub struct Element {
    id: ElementId,
    comment: Option<String>,
    inputs: Vec<Pad>,
    outputs: Vec<Pad>,
    kind: AnyElement,
}

impl Element {
    /// Create an element with a freshly generated id.
    pub fn new(kind: impl Into<AnyElement>) -> Self {
        Self::with_id(ElementId::new(), kind)
    }

    /// Create an element with a known id, e.g. when loading a document.
    pub fn with_id(id: ElementId, kind: impl Into<AnyElement>) -> Self {
        let kind = kind.into();
        Self {
            id,
            comment: None,
            inputs: Pad::collection(PadDirection::Input, kind.inputs()),
            outputs: Pad::collection(PadDirection::Output, kind.outputs()),
            kind,
        }
    }

    /// Shorthand for an Input element emitting `value`.
    pub fn input(value: DataType) -> Self {
        Self::new(BuiltinElement::Input(InputElement::new(value)))
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    #[inline]
    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn set_comment(&mut self, comment: Option<String>) {
        self.comment = comment;
    }

    pub fn kind(&self) -> &AnyElement {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut AnyElement {
        &mut self.kind
    }

    pub fn name(&self) -> &str {
        self.kind.name()
    }

    pub fn inputs(&self) -> &[Pad] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Pad] {
        &self.outputs
    }

    pub fn input_pad(&self, index: usize) -> Option<&Pad> {
        self.inputs.get(index)
    }

    pub fn output_pad(&self, index: usize) -> Option<&Pad> {
        self.outputs.get(index)
    }

    pub fn is_input(&self) -> bool {
        self.kind.is_input()
    }

    /// Sources start the checker's work queue: Input-flagged or no input pads.
    pub fn is_source(&self) -> bool {
        self.is_input() || self.inputs.is_empty()
    }

    /// Run the kind's check. `inputs` must hold one entry per input pad.
    pub fn check(&self, inputs: &[Option<DataType>]) -> CheckResult {
        if inputs.len() != self.inputs.len() {
            return Err(PadTypeError::new(
                inputs.len().min(self.inputs.len()),
                format!(
                    "Expected {} input types, got {}",
                    self.inputs.len(),
                    inputs.len()
                ),
            ));
        }
        self.kind.check(inputs)
    }
}

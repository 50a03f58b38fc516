//! Typed element graph and static type checker.
//!
//! A pipeline is a directed graph of elements joined pad-to-pad. Each element
//! declares how the types arriving on its input pads determine the types on
//! its output pads; the checker propagates types from the sources downstream
//! and collects every violation instead of stopping at the first.
//!
//! # Architecture
//!
//! ```text
//! [Input] ──► [Cartesian Product] ──► [Matrix Multiply] ──► [Histogram Imager]
//!                                  [Input] ─┘      [Input] ─┘ [Input] ─┘  │
//!                                                   [Pixel Renderer] ◄──┘
//! ```
//!
//! # Design
//!
//! - **Enum dispatch for built-ins**: `BuiltinElement` covers the fixed catalog,
//!   `ElementPlugin` trait objects cover everything else.
//! - **Structural types**: `DataType` equality ignores runtime values.
//! - **Work-list propagation**: an element is checked once, after all of its
//!   connected inputs have resolved.
//! - **Change notification**: graph mutations are announced over crossbeam channels.

pub mod bridge;
pub mod checker;
pub mod connection;
pub mod data_type;
pub mod element;
pub mod element_kind;
pub mod elements;
pub mod error;
pub mod graph;
pub mod id;
pub mod pad;
pub mod registry;

pub use bridge::{ChangeNotifier, ElementSnapshot, GraphChanged, TopologySnapshot};
pub use checker::{CheckReport, CheckStats, PipelineChecker, Violation, ViolationKind};
pub use connection::PadConnection;
pub use data_type::{types_equal, DataType, MatrixType};
pub use element::{AnyElement, BuiltinElement, CheckResult, Element, ElementPlugin};
pub use element_kind::ElementKind;
pub use error::{ConfigurationError, GraphError, GraphResult, PadTypeError, RegistryError};
pub use graph::{Pipeline, PipelineSnapshot};
pub use id::{ElementId, PadRef, ParsePadRefError};
pub use pad::{Pad, PadDescriptor, PadDirection};
pub use registry::{ElementRegistry, PluginFactory};

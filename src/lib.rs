//! # Fyre pipeline core
//!
//! The typed element graph behind Fyre's computational art pipelines, and the
//! static checker that propagates types through it before anything runs.
//!
//! ## Architecture
//!
//! - **Pipeline**: elements joined pad-to-pad, mutated only through `Pipeline`
//! - **Checker**: a work-list pass that resolves every connection's type and
//!   collects all violations in one run
//! - **Document**: the JSON form of a pipeline, rebuilt through an `ElementRegistry`
//! - **Config**: TOML settings for the `fyre` binary
//!
//! ## Example
//!
//! ```ignore
//! use fyre_pipeline::pipeline::{
//!     DataType, Element, ElementKind, PadConnection, Pipeline, PipelineChecker,
//! };
//!
//! let mut pipeline = Pipeline::new();
//! let x = pipeline.add_element(Element::input(DataType::int_pair()))?;
//! let y = pipeline.add_element(Element::input(DataType::int_pair()))?;
//! let grid = pipeline.add_element(Element::new(ElementKind::CartesianProduct))?;
//! pipeline.add_connection(PadConnection::new(x, 0, grid, 0))?;
//! pipeline.add_connection(PadConnection::new(y, 0, grid, 1))?;
//!
//! let report = PipelineChecker::check(&pipeline);
//! assert!(report.is_valid());
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod pipeline;

// Re-export commonly used types
pub use config::{AppConfig, ReportConfig, ReportFormat};
pub use document::PipelineDocument;
pub use error::{FyreError, Result, ResultExt};
pub use pipeline::{CheckReport, DataType, Element, ElementRegistry, Pipeline, PipelineChecker};

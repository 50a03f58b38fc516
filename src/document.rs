//! Persisted form of a pipeline.
//!
//! A document is an ordered list of element records plus an ordered list of
//! connection records, written as JSON. Loading replays the records through
//! the normal graph mutations, so a document that would break a graph
//! invariant (duplicate ids, a doubly-fed input pad) is rejected.

use crate::error::{FyreError, Result, ResultExt};
use crate::pipeline::{
    DataType, Element, ElementId, ElementKind, ElementRegistry, PadConnection, PadRef, Pipeline,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Current document format version
pub const DOCUMENT_VERSION: u32 = 1;

fn default_version() -> u32 {
    DOCUMENT_VERSION
}

/// One element: its catalog tag, identity and kind-specific attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    pub kind_tag: String,
    pub id: ElementId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub attributes: Value,
}

impl From<&Element> for ElementRecord {
    fn from(element: &Element) -> Self {
        Self {
            kind_tag: element.kind().kind_tag().to_string(),
            id: element.id(),
            comment: element.comment().map(str::to_string),
            attributes: element.kind().attributes(),
        }
    }
}

/// One connection, endpoints written as `"<uuid>:<pad index>"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    pub from: String,
    pub to: String,
}

impl From<&PadConnection> for ConnectionRecord {
    fn from(connection: &PadConnection) -> Self {
        Self {
            from: connection.source.to_string(),
            to: connection.sink.to_string(),
        }
    }
}

impl ConnectionRecord {
    fn to_connection(&self) -> Result<PadConnection> {
        let parse = |endpoint: &str| {
            endpoint
                .parse::<PadRef>()
                .map_err(|e| FyreError::Document(e.to_string()))
        };
        Ok(PadConnection {
            source: parse(&self.from)?,
            sink: parse(&self.to)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineDocument {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub elements: Vec<ElementRecord>,
    #[serde(default)]
    pub connections: Vec<ConnectionRecord>,
}

impl Default for PipelineDocument {
    fn default() -> Self {
        Self {
            version: DOCUMENT_VERSION,
            elements: Vec::new(),
            connections: Vec::new(),
        }
    }
}

impl PipelineDocument {
    /// Capture a pipeline, keeping its element and connection order.
    pub fn from_pipeline(pipeline: &Pipeline) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            elements: pipeline.elements().iter().map(ElementRecord::from).collect(),
            connections: pipeline
                .connections()
                .iter()
                .map(ConnectionRecord::from)
                .collect(),
        }
    }

    /// Rebuild the graph, resolving kind tags through `registry`.
    pub fn into_pipeline(self, registry: &ElementRegistry) -> Result<Pipeline> {
        if self.version > DOCUMENT_VERSION {
            return Err(FyreError::Document(format!(
                "Document version {} is newer than supported version {}",
                self.version, DOCUMENT_VERSION
            )));
        }

        let mut pipeline = Pipeline::new();

        for record in self.elements {
            let kind = registry
                .create(&record.kind_tag, &record.attributes)
                .with_context(|| format!("Element {}", record.id))?;
            let mut element = Element::with_id(record.id, kind);
            element.set_comment(record.comment);
            pipeline.add_element(element)?;
        }

        for record in &self.connections {
            let connection = record
                .to_connection()
                .with_context(|| format!("Connection {} -> {}", record.from, record.to))?;
            pipeline.add_connection(connection)?;
        }

        tracing::debug!(
            "Loaded document with {} element(s) and {} connection(s)",
            pipeline.len(),
            pipeline.connection_count()
        );
        Ok(pipeline)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a document from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read document {:?}", path))?;

        Self::from_json(&content).with_context(|| format!("Failed to parse document {:?}", path))
    }

    /// Save the document to disk as JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).context("Failed to create document directory")?;
        }

        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("Failed to write document {:?}", path))
    }

    /// A small, fully typed pipeline: two ranges feeding a cartesian product,
    /// and a point plus image size feeding a histogram that is rendered to pixels.
    pub fn example() -> Result<Self> {
        let mut pipeline = Pipeline::new();
        build_example(&mut pipeline).context("Failed to build example pipeline")?;
        Ok(Self::from_pipeline(&pipeline))
    }
}

fn labelled_input(pipeline: &mut Pipeline, value: DataType, label: &str) -> Result<ElementId> {
    Ok(pipeline.add_element(Element::input(value).with_comment(label))?)
}

fn build_example(pipeline: &mut Pipeline) -> Result<()> {
    let x_range = labelled_input(pipeline, DataType::int_pair(), "x range")?;
    let y_range = labelled_input(pipeline, DataType::int_pair(), "y range")?;
    let grid = pipeline.add_element(Element::new(ElementKind::CartesianProduct))?;
    pipeline.add_connection(PadConnection::new(x_range, 0, grid, 0))?;
    pipeline.add_connection(PadConnection::new(y_range, 0, grid, 1))?;

    let point = labelled_input(pipeline, DataType::int_pair(), "point")?;
    let width = labelled_input(pipeline, DataType::Int(Some(640)), "width")?;
    let height = labelled_input(pipeline, DataType::Int(Some(480)), "height")?;
    let histogram = pipeline.add_element(Element::new(ElementKind::HistogramImager))?;
    pipeline.add_connection(PadConnection::new(point, 0, histogram, 0))?;
    pipeline.add_connection(PadConnection::new(width, 0, histogram, 1))?;
    pipeline.add_connection(PadConnection::new(height, 0, histogram, 2))?;

    let renderer = pipeline.add_element(Element::new(ElementKind::PixelRenderer))?;
    pipeline.add_connection(PadConnection::new(histogram, 0, renderer, 0))?;
    Ok(())
}

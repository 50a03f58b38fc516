//! The pipeline graph: elements keyed by id plus the connections between them.
//!
//! Owned by a single editing session. All mutations go through the methods
//! here; each either succeeds and notifies subscribers once, or fails and
//! leaves the graph untouched.
//!
//! Elements and connections are kept in insertion order so that anything
//! iterating the graph (the checker, the serializer) sees a stable order.

use crate::pipeline::bridge::{ChangeNotifier, ElementSnapshot, GraphChanged, TopologySnapshot};
use crate::pipeline::connection::PadConnection;
use crate::pipeline::data_type::DataType;
use crate::pipeline::element::{AnyElement, BuiltinElement, Element};
use crate::pipeline::error::{GraphError, GraphResult};
use crate::pipeline::id::{ElementId, PadRef};
use crossbeam_channel::Receiver;
use std::collections::HashMap;

/// Immutable copy of a graph, for validating away from the editing session.
#[derive(Debug, Clone, Default)]
pub struct PipelineSnapshot {
    pub elements: Vec<Element>,
    pub connections: Vec<PadConnection>,
}

/// The pipeline document graph.
#[derive(Debug, Default)]
pub struct Pipeline {
    elements: Vec<Element>,
    /// Position of each element in `elements`.
    index: HashMap<ElementId, usize>,
    connections: Vec<PadConnection>,
    notifier: ChangeNotifier,
    /// Bumped on every successful mutation.
    generation: u64,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Mutation ──

    /// Add an element. Fails if its id is already present.
    pub fn add_element(&mut self, element: Element) -> GraphResult<ElementId> {
        let id = element.id();
        if self.index.contains_key(&id) {
            return Err(GraphError::DuplicateId(id));
        }

        tracing::debug!("Adding element {} ({})", id, element.name());
        self.index.insert(id, self.elements.len());
        self.elements.push(element);
        self.changed();
        Ok(id)
    }

    /// Remove an element along with every connection touching it.
    ///
    /// Returns the element and the removed connections, in their original order.
    pub fn remove_element(
        &mut self,
        id: ElementId,
    ) -> GraphResult<(Element, Vec<PadConnection>)> {
        let position = self.position(id).ok_or(GraphError::NotFound(id))?;

        let (removed, kept): (Vec<PadConnection>, Vec<PadConnection>) =
            std::mem::take(&mut self.connections)
                .into_iter()
                .partition(|c| c.touches(id));
        self.connections = kept;

        let element = self.elements.remove(position);
        self.reindex();

        tracing::debug!(
            "Removed element {} ({}) and {} connection(s)",
            id,
            element.name(),
            removed.len()
        );
        self.changed();
        Ok((element, removed))
    }

    /// Connect an output pad to an input pad.
    ///
    /// Each input pad accepts at most one incoming connection; output pads may
    /// fan out freely.
    pub fn add_connection(&mut self, connection: PadConnection) -> GraphResult<()> {
        self.validate_endpoint(connection.source, |e| e.outputs().len(), "output")?;
        self.validate_endpoint(connection.sink, |e| e.inputs().len(), "input")?;

        if self.incoming(connection.sink).is_some() {
            return Err(GraphError::SinkAlreadyConnected(connection.sink));
        }

        tracing::debug!("Connecting {}", connection);
        self.connections.push(connection);
        self.changed();
        Ok(())
    }

    pub fn remove_connection(&mut self, connection: &PadConnection) -> GraphResult<()> {
        let position = self
            .connections
            .iter()
            .position(|c| c == connection)
            .ok_or(GraphError::ConnectionNotFound {
                from: connection.source,
                to: connection.sink,
            })?;

        self.connections.remove(position);
        tracing::debug!("Disconnected {}", connection);
        self.changed();
        Ok(())
    }

    /// Replace an element's free-text comment.
    pub fn set_comment(&mut self, id: ElementId, comment: Option<String>) -> GraphResult<()> {
        let position = self.position(id).ok_or(GraphError::NotFound(id))?;
        self.elements[position].set_comment(comment);
        self.changed();
        Ok(())
    }

    /// Reconfigure the value emitted by a built-in Input element.
    pub fn set_input_value(&mut self, id: ElementId, value: DataType) -> GraphResult<()> {
        let position = self.position(id).ok_or(GraphError::NotFound(id))?;
        match self.elements[position].kind_mut() {
            AnyElement::Builtin(BuiltinElement::Input(input)) => input.set_value(value),
            _ => return Err(GraphError::NotAnInput(id)),
        }
        self.changed();
        Ok(())
    }

    /// Drop every element and connection ("new document").
    pub fn clear(&mut self) {
        self.elements.clear();
        self.index.clear();
        self.connections.clear();
        self.changed();
    }

    fn validate_endpoint(
        &self,
        endpoint: PadRef,
        pad_count: impl Fn(&Element) -> usize,
        direction: &str,
    ) -> GraphResult<()> {
        let element = self
            .element(endpoint.element)
            .ok_or_else(|| GraphError::InvalidEndpoint {
                endpoint,
                reason: "no such element".to_string(),
            })?;

        let count = pad_count(element);
        if endpoint.pad >= count {
            return Err(GraphError::InvalidEndpoint {
                endpoint,
                reason: format!("{} has {} {} pad(s)", element.name(), count, direction),
            });
        }
        Ok(())
    }

    fn reindex(&mut self) {
        self.index = self
            .elements
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id(), i))
            .collect();
    }

    fn changed(&mut self) {
        self.generation += 1;
        self.notifier.notify();
    }

    // ── Queries ──

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.position(id).map(|i| &self.elements[i])
    }

    /// Insertion position of an element.
    pub fn position(&self, id: ElementId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.index.contains_key(&id)
    }

    /// All elements, in insertion order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// All connections, in insertion order.
    pub fn connections(&self) -> &[PadConnection] {
        &self.connections
    }

    /// The connection feeding an input pad, if any.
    pub fn incoming(&self, sink: PadRef) -> Option<&PadConnection> {
        self.connections.iter().find(|c| c.sink == sink)
    }

    /// Every connection leaving an output pad.
    pub fn outgoing(&self, source: PadRef) -> impl Iterator<Item = &PadConnection> {
        self.connections.iter().filter(move |c| c.source == source)
    }

    /// Every connection touching an element.
    pub fn connections_of(&self, id: ElementId) -> impl Iterator<Item = &PadConnection> {
        self.connections.iter().filter(move |c| c.touches(id))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    // ── Observers ──

    /// Receive a `GraphChanged` after every successful mutation.
    pub fn subscribe(&mut self) -> Receiver<GraphChanged> {
        self.notifier.subscribe()
    }

    pub fn snapshot(&self) -> PipelineSnapshot {
        PipelineSnapshot {
            elements: self.elements.clone(),
            connections: self.connections.clone(),
        }
    }

    pub fn topology(&self) -> TopologySnapshot {
        TopologySnapshot {
            elements: self.elements.iter().map(ElementSnapshot::from).collect(),
            connections: self.connections.clone(),
        }
    }
}

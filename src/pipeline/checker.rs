use crate::pipeline::connection::PadConnection;
use crate::pipeline::data_type::DataType;
use crate::pipeline::element::Element;
use crate::pipeline::graph::{Pipeline, PipelineSnapshot};
use crate::pipeline::id::{ElementId, PadRef};
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::fmt;

/// What went wrong at a pad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    /// The element's check rejected the type on this input pad.
    PadType { message: String },
    /// The check returned a different number of types than the element has outputs.
    OutputArity { expected: usize, actual: usize },
    /// A connection names a missing element or pad, or doubles up on an input pad.
    /// Only reachable through hand-built snapshots.
    InvalidConnection { connection: String },
}

/// A single diagnostic, located at an element's pad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub element: ElementId,
    pub pad: usize,
    #[serde(flatten)]
    pub kind: ViolationKind,
}

impl Violation {
    pub fn message(&self) -> String {
        match &self.kind {
            ViolationKind::PadType { message } => message.clone(),
            ViolationKind::OutputArity { expected, actual } => format!(
                "Check produced {} output type(s) for {} output pad(s)",
                actual, expected
            ),
            ViolationKind::InvalidConnection { connection } => {
                format!("Invalid connection {}", connection)
            }
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.element, self.pad, self.message())
    }
}

/// Counters gathered during a pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckStats {
    pub total_elements: usize,
    pub source_elements: usize,
    pub checked_elements: usize,
    pub unresolved_elements: usize,
    pub resolved_connections: usize,
    pub total_connections: usize,
    pub violations: usize,
    pub check_time_us: u64,
}

/// Result of a validation pass.
///
/// Holds the resolved type of every output pad that could be typed, the type
/// flowing along each connection, and every violation found.
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    violations: Vec<Violation>,
    output_types: HashMap<PadRef, DataType>,
    connection_types: Vec<(PadConnection, Option<DataType>)>,
    checked: Vec<ElementId>,
    unresolved: Vec<ElementId>,
    unresolved_outputs: Vec<PadRef>,
    pub stats: CheckStats,
}

impl CheckReport {
    /// Every violation, ordered by element insertion position then pad index.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn violations_for(&self, element: ElementId) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.element == element)
    }

    /// Resolved type of an output pad.
    pub fn output_type(&self, pad: PadRef) -> Option<&DataType> {
        self.output_types.get(&pad)
    }

    /// Type carried by a connection, if its source pad resolved.
    pub fn connection_type(&self, connection: &PadConnection) -> Option<&DataType> {
        self.connection_types
            .iter()
            .find(|(c, _)| c == connection)
            .and_then(|(_, ty)| ty.as_ref())
    }

    /// Every connection with its resolved type, in graph order.
    pub fn connection_types(&self) -> &[(PadConnection, Option<DataType>)] {
        &self.connection_types
    }

    /// Type arriving at an input pad, if it is connected and resolved.
    pub fn input_type(&self, pad: PadRef) -> Option<&DataType> {
        self.connection_types
            .iter()
            .find(|(c, _)| c.sink == pad)
            .and_then(|(_, ty)| ty.as_ref())
    }

    /// Elements whose check ran, in the order they ran.
    pub fn checked(&self) -> &[ElementId] {
        &self.checked
    }

    pub fn was_checked(&self, element: ElementId) -> bool {
        self.checked.contains(&element)
    }

    /// Elements never reached by propagation. Not an error by itself.
    pub fn unresolved(&self) -> &[ElementId] {
        &self.unresolved
    }

    /// Output pads left without a type, in graph order.
    pub fn unresolved_outputs(&self) -> &[PadRef] {
        &self.unresolved_outputs
    }

    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// No violations and every element reached.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty() && self.unresolved.is_empty()
    }
}

/// Propagates types through a pipeline graph and collects violations.
pub struct PipelineChecker;

impl PipelineChecker {
    pub fn check(pipeline: &Pipeline) -> CheckReport {
        Self::check_parts(pipeline.elements(), pipeline.connections())
    }

    pub fn check_snapshot(snapshot: &PipelineSnapshot) -> CheckReport {
        Self::check_parts(&snapshot.elements, &snapshot.connections)
    }

    /// Run a validation pass.
    ///
    /// Propagation starts from the source elements (Input-flagged, or without
    /// input pads). An element is checked once all of its connected input pads
    /// carry a resolved type; unconnected pads are passed to its check as `None`.
    /// Each element is queued at most once, so the pass terminates on cyclic
    /// graphs. Elements never reached stay unresolved.
    ///
    /// Never fails: every problem is recorded in the returned report.
    pub fn check_parts(elements: &[Element], connections: &[PadConnection]) -> CheckReport {
        let start_time = std::time::Instant::now();
        let n = elements.len();

        let positions: HashMap<ElementId, usize> = elements
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id(), i))
            .collect();

        let mut violations = Vec::new();

        // Index well-formed connections
        let (incoming, outgoing) =
            Self::build_adjacency(elements, connections, &positions, &mut violations);

        // Identify sources
        let sources: Vec<usize> = (0..n).filter(|&i| elements[i].is_source()).collect();

        let mut output_types: HashMap<PadRef, DataType> = HashMap::new();
        let mut queued = vec![false; n];
        let mut was_checked = vec![false; n];
        let mut checked = Vec::new();
        let mut queue = VecDeque::new();

        for &src in &sources {
            queued[src] = true;
            queue.push_back(src);
        }

        while let Some(idx) = queue.pop_front() {
            let element = &elements[idx];
            let id = element.id();

            let inputs: Vec<Option<DataType>> = (0..element.inputs().len())
                .map(|pad| {
                    incoming
                        .get(&PadRef::new(id, pad))
                        .and_then(|&ci| output_types.get(&connections[ci].source))
                        .cloned()
                })
                .collect();

            was_checked[idx] = true;
            checked.push(id);

            let types = match element.check(&inputs) {
                Ok(Some(types)) => types,
                Ok(None) => {
                    tracing::debug!("{} ({}) imposes no typing", element.name(), id);
                    continue;
                }
                Err(e) => {
                    tracing::warn!(
                        "{} ({}) rejected pad {}: {}",
                        element.name(),
                        id,
                        e.pad,
                        e.message
                    );
                    violations.push(Violation {
                        element: id,
                        pad: e.pad,
                        kind: ViolationKind::PadType { message: e.message },
                    });
                    continue;
                }
            };

            if types.len() != element.outputs().len() {
                tracing::warn!(
                    "{} ({}) returned {} output types for {} pads",
                    element.name(),
                    id,
                    types.len(),
                    element.outputs().len()
                );
                violations.push(Violation {
                    element: id,
                    pad: 0,
                    kind: ViolationKind::OutputArity {
                        expected: element.outputs().len(),
                        actual: types.len(),
                    },
                });
                continue;
            }

            tracing::debug!(
                "{} ({}) resolved outputs: {}",
                element.name(),
                id,
                types
                    .iter()
                    .map(|t| t.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            for (pad, ty) in types.into_iter().enumerate() {
                output_types.insert(PadRef::new(id, pad), ty);
            }

            // Wake downstream elements whose inputs are now all resolved
            for &ci in outgoing.get(&id).map(Vec::as_slice).unwrap_or(&[]) {
                let sink_idx = positions[&connections[ci].sink.element];
                if queued[sink_idx] {
                    continue;
                }
                let sink = &elements[sink_idx];
                if Self::inputs_resolved(sink, &incoming, connections, &output_types) {
                    queued[sink_idx] = true;
                    queue.push_back(sink_idx);
                }
            }
        }

        let unresolved: Vec<ElementId> = elements
            .iter()
            .zip(&was_checked)
            .filter(|(_, &done)| !done)
            .map(|(e, _)| e.id())
            .collect();

        let unresolved_outputs: Vec<PadRef> = elements
            .iter()
            .flat_map(|e| (0..e.outputs().len()).map(move |pad| PadRef::new(e.id(), pad)))
            .filter(|pad| !output_types.contains_key(pad))
            .collect();

        let connection_types: Vec<(PadConnection, Option<DataType>)> = connections
            .iter()
            .map(|c| (*c, output_types.get(&c.source).cloned()))
            .collect();

        violations.sort_by_key(|v| {
            let position = positions.get(&v.element).copied().unwrap_or(usize::MAX);
            (position, v.pad)
        });

        let stats = CheckStats {
            total_elements: n,
            source_elements: sources.len(),
            checked_elements: checked.len(),
            unresolved_elements: unresolved.len(),
            resolved_connections: connection_types
                .iter()
                .filter(|(_, ty)| ty.is_some())
                .count(),
            total_connections: connections.len(),
            violations: violations.len(),
            check_time_us: start_time.elapsed().as_micros() as u64,
        };

        tracing::info!(
            "Pipeline checked: {} / {} elements, {} violation(s), {} unresolved",
            stats.checked_elements,
            stats.total_elements,
            stats.violations,
            stats.unresolved_elements,
        );

        CheckReport {
            violations,
            output_types,
            connection_types,
            checked,
            unresolved,
            unresolved_outputs,
            stats,
        }
    }

    /// Index connections by sink pad and by source element.
    ///
    /// Connections with a missing endpoint, an out-of-range pad, or a second
    /// connection into the same input pad are reported and left out.
    fn build_adjacency(
        elements: &[Element],
        connections: &[PadConnection],
        positions: &HashMap<ElementId, usize>,
        violations: &mut Vec<Violation>,
    ) -> (HashMap<PadRef, usize>, HashMap<ElementId, Vec<usize>>) {
        let mut incoming: HashMap<PadRef, usize> = HashMap::new();
        let mut outgoing: HashMap<ElementId, Vec<usize>> = HashMap::new();

        for (ci, connection) in connections.iter().enumerate() {
            let source_ok = positions
                .get(&connection.source.element)
                .is_some_and(|&i| connection.source.pad < elements[i].outputs().len());
            let sink_ok = positions
                .get(&connection.sink.element)
                .is_some_and(|&i| connection.sink.pad < elements[i].inputs().len());

            if !source_ok || !sink_ok || incoming.contains_key(&connection.sink) {
                tracing::warn!("Ignoring invalid connection {}", connection);
                violations.push(Violation {
                    element: connection.sink.element,
                    pad: connection.sink.pad,
                    kind: ViolationKind::InvalidConnection {
                        connection: connection.to_string(),
                    },
                });
                continue;
            }

            incoming.insert(connection.sink, ci);
            outgoing
                .entry(connection.source.element)
                .or_default()
                .push(ci);
        }

        (incoming, outgoing)
    }

    /// Every input pad is either unconnected or fed by a resolved output pad.
    fn inputs_resolved(
        element: &Element,
        incoming: &HashMap<PadRef, usize>,
        connections: &[PadConnection],
        output_types: &HashMap<PadRef, DataType>,
    ) -> bool {
        (0..element.inputs().len()).all(|pad| {
            match incoming.get(&PadRef::new(element.id(), pad)) {
                Some(&ci) => output_types.contains_key(&connections[ci].source),
                None => true,
            }
        })
    }
}

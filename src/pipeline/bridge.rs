//! Boundary between the graph owner and its observers.
//!
//! The undo/redo layer and the canvas subscribe to `GraphChanged` over
//! crossbeam channels. The notification carries no payload; observers that
//! need detail read a `TopologySnapshot`.

use crate::pipeline::connection::PadConnection;
use crate::pipeline::element::Element;
use crate::pipeline::id::ElementId;
use crossbeam_channel::{unbounded, Receiver, Sender};

/// Sent after every successful graph mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphChanged;

/// Fan-out of change notifications to every live subscriber.
#[derive(Debug, Default)]
pub struct ChangeNotifier {
    subscribers: Vec<Sender<GraphChanged>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Receiver<GraphChanged> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Notify all subscribers, pruning those whose receiver was dropped.
    pub fn notify(&mut self) {
        self.subscribers.retain(|tx| tx.send(GraphChanged).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

/// Snapshot of a single element for presentation.
#[derive(Debug, Clone)]
pub struct ElementSnapshot {
    pub id: ElementId,
    pub kind_tag: String,
    pub name: String,
    pub category: String,
    pub icon: String,
    pub comment: Option<String>,
    pub input_names: Vec<String>,
    pub output_names: Vec<String>,
}

impl From<&Element> for ElementSnapshot {
    fn from(element: &Element) -> Self {
        Self {
            id: element.id(),
            kind_tag: element.kind().kind_tag().to_string(),
            name: element.name().to_string(),
            category: element.kind().category().to_string(),
            icon: element.kind().icon().to_string(),
            comment: element.comment().map(str::to_string),
            input_names: element.inputs().iter().map(|p| p.name().to_string()).collect(),
            output_names: element.outputs().iter().map(|p| p.name().to_string()).collect(),
        }
    }
}

/// Complete topology snapshot of the pipeline graph.
#[derive(Debug, Clone, Default)]
pub struct TopologySnapshot {
    pub elements: Vec<ElementSnapshot>,
    pub connections: Vec<PadConnection>,
}

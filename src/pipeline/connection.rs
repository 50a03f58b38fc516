//! Directed edges between an output pad and an input pad.

use crate::pipeline::id::{ElementId, PadRef};
use std::fmt;

/// A connection from a source element's output pad to a sink element's input pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PadConnection {
    pub source: PadRef,
    pub sink: PadRef,
}

impl PadConnection {
    pub fn new(
        source_element: ElementId,
        source_pad: usize,
        sink_element: ElementId,
        sink_pad: usize,
    ) -> Self {
        Self {
            source: PadRef::new(source_element, source_pad),
            sink: PadRef::new(sink_element, sink_pad),
        }
    }

    #[inline]
    pub fn source_element(&self) -> ElementId {
        self.source.element
    }

    #[inline]
    pub fn source_pad(&self) -> usize {
        self.source.pad
    }

    #[inline]
    pub fn sink_element(&self) -> ElementId {
        self.sink.element
    }

    #[inline]
    pub fn sink_pad(&self) -> usize {
        self.sink.pad
    }

    /// Whether either end is on `element`.
    pub fn touches(&self, element: ElementId) -> bool {
        self.source.element == element || self.sink.element == element
    }
}

impl fmt::Display for PadConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.sink)
    }
}

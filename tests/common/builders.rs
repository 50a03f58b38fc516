//! Test data builders for creating pipelines

use fyre_pipeline::pipeline::{
    DataType, Element, ElementId, ElementKind, PadConnection, Pipeline,
};

/// Builder for wiring up test pipelines without repeating `unwrap`s.
#[derive(Default)]
pub struct PipelineBuilder {
    pipeline: Pipeline,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an Input element emitting `value`.
    pub fn input(&mut self, value: DataType) -> ElementId {
        self.pipeline
            .add_element(Element::input(value))
            .expect("fresh id")
    }

    /// Add a built-in element.
    pub fn element(&mut self, kind: ElementKind) -> ElementId {
        self.pipeline
            .add_element(Element::new(kind))
            .expect("fresh id")
    }

    /// Connect `source` output 0 to `sink` input `sink_pad`.
    pub fn wire(&mut self, source: ElementId, sink: ElementId, sink_pad: usize) -> &mut Self {
        self.connect(source, 0, sink, sink_pad)
    }

    pub fn connect(
        &mut self,
        source: ElementId,
        source_pad: usize,
        sink: ElementId,
        sink_pad: usize,
    ) -> &mut Self {
        self.pipeline
            .add_connection(PadConnection::new(source, source_pad, sink, sink_pad))
            .expect("valid connection");
        self
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn build(self) -> Pipeline {
        self.pipeline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_builder() {
        let mut builder = PipelineBuilder::new();
        let a = builder.input(DataType::int_pair());
        let b = builder.input(DataType::int_pair());
        let grid = builder.element(ElementKind::CartesianProduct);
        builder.wire(a, grid, 0).wire(b, grid, 1);

        let pipeline = builder.build();
        assert_eq!(pipeline.len(), 3);
        assert_eq!(pipeline.connection_count(), 2);
    }
}

//! Integration tests for the validation pass over built-in element graphs

mod common;

use common::builders::PipelineBuilder;
use common::{matrix, violation_set};
use fyre_pipeline::pipeline::{
    DataType, ElementKind, GraphError, PadConnection, PadRef, PipelineChecker, ViolationKind,
};

// ============================================================================
// Cartesian Product
// ============================================================================

#[test]
fn test_cartesian_product_of_two_ranges() {
    let mut builder = PipelineBuilder::new();
    let x = builder.input(DataType::int_pair());
    let y = builder.input(DataType::int_pair());
    let grid = builder.element(ElementKind::CartesianProduct);
    builder.wire(x, grid, 0).wire(y, grid, 1);

    let report = PipelineChecker::check(builder.pipeline());

    assert!(report.violations().is_empty());
    assert_eq!(
        report.output_type(PadRef::new(grid, 0)),
        Some(&matrix(DataType::int_pair(), &[20, 20]))
    );
    assert!(report.is_valid());
}

#[test]
fn test_cartesian_product_rejects_float_range() {
    let mut builder = PipelineBuilder::new();
    let x = builder.input(DataType::FLOAT);
    let y = builder.input(DataType::int_pair());
    let grid = builder.element(ElementKind::CartesianProduct);
    builder.wire(x, grid, 0).wire(y, grid, 1);

    let report = PipelineChecker::check(builder.pipeline());

    assert_eq!(report.violations().len(), 1);
    let violation = &report.violations()[0];
    assert_eq!(violation.element, grid);
    assert_eq!(violation.pad, 0);
    assert!(matches!(violation.kind, ViolationKind::PadType { .. }));
    assert_eq!(report.output_type(PadRef::new(grid, 0)), None);
    assert!(report.unresolved_outputs().contains(&PadRef::new(grid, 0)));
}

#[test]
fn test_fan_out_carries_one_type() {
    let mut builder = PipelineBuilder::new();
    let range = builder.input(DataType::int_pair());
    let grid = builder.element(ElementKind::CartesianProduct);
    builder.wire(range, grid, 0).wire(range, grid, 1);
    let pipeline = builder.build();

    let report = PipelineChecker::check(&pipeline);

    let types: Vec<_> = report.connection_types().iter().map(|(_, ty)| ty).collect();
    assert_eq!(types.len(), 2);
    assert_eq!(types[0], types[1]);
    assert_eq!(types[0].as_ref(), Some(&DataType::int_pair()));
    assert!(report.violations().is_empty());
}

// ============================================================================
// Matrix Multiply
// ============================================================================

#[test]
fn test_matrix_multiply_int() {
    let mut builder = PipelineBuilder::new();
    let a = builder.input(matrix(DataType::INT, &[3, 4]));
    let x = builder.input(matrix(DataType::INT, &[4]));
    let product = builder.element(ElementKind::MatrixMultiply);
    builder.wire(a, product, 0).wire(x, product, 1);

    let report = PipelineChecker::check(builder.pipeline());

    assert!(report.violations().is_empty());
    assert_eq!(
        report.output_type(PadRef::new(product, 0)),
        Some(&matrix(DataType::INT, &[4]))
    );
}

#[test]
fn test_matrix_multiply_rejects_mixed_element_types() {
    let mut builder = PipelineBuilder::new();
    let a = builder.input(matrix(DataType::INT, &[3, 4]));
    let x = builder.input(matrix(DataType::FLOAT, &[4]));
    let product = builder.element(ElementKind::MatrixMultiply);
    builder.wire(a, product, 0).wire(x, product, 1);

    let report = PipelineChecker::check(builder.pipeline());

    assert_eq!(report.violations().len(), 1);
    let violation = &report.violations()[0];
    assert_eq!(violation.pad, 1);
    let message = violation.message();
    assert!(message.contains("Int") && message.contains("Float"), "{}", message);
}

#[test]
fn test_matrix_multiply_inner_dimension_mismatch() {
    let mut builder = PipelineBuilder::new();
    let a = builder.input(matrix(DataType::FLOAT, &[3, 4]));
    let x = builder.input(matrix(DataType::FLOAT, &[3]));
    let product = builder.element(ElementKind::MatrixMultiply);
    builder.wire(a, product, 0).wire(x, product, 1);

    let report = PipelineChecker::check(builder.pipeline());

    assert_eq!(report.violations().len(), 1);
    assert!(report.violations()[0].message().contains('4'));
    assert!(report.violations()[0].message().contains('3'));
}

// ============================================================================
// Full chain
// ============================================================================

#[test]
fn test_histogram_to_pixels_chain() {
    let mut builder = PipelineBuilder::new();
    let point = builder.input(DataType::int_pair());
    let width = builder.input(DataType::Int(Some(320)));
    let height = builder.input(DataType::Int(Some(200)));
    let histogram = builder.element(ElementKind::HistogramImager);
    let renderer = builder.element(ElementKind::PixelRenderer);
    builder
        .wire(point, histogram, 0)
        .wire(width, histogram, 1)
        .wire(height, histogram, 2)
        .wire(histogram, renderer, 0);

    let report = PipelineChecker::check(builder.pipeline());

    assert!(report.is_valid(), "{:?}", report.violations());
    assert_eq!(
        report.input_type(PadRef::new(renderer, 0)),
        Some(&matrix(DataType::FLOAT, &[320, 200]))
    );
    assert_eq!(
        report.output_type(PadRef::new(renderer, 0)),
        Some(&matrix(DataType::INT, &[320, 200, 4]))
    );
}

#[test]
fn test_failure_stops_downstream_propagation() {
    let mut builder = PipelineBuilder::new();
    let point = builder.input(DataType::int_pair());
    let width = builder.input(DataType::FLOAT);
    let height = builder.input(DataType::Int(Some(200)));
    let histogram = builder.element(ElementKind::HistogramImager);
    let renderer = builder.element(ElementKind::PixelRenderer);
    builder
        .wire(point, histogram, 0)
        .wire(width, histogram, 1)
        .wire(height, histogram, 2)
        .wire(histogram, renderer, 0);

    let report = PipelineChecker::check(builder.pipeline());

    assert_eq!(report.violations().len(), 1);
    assert_eq!(report.violations()[0].element, histogram);
    assert_eq!(report.violations()[0].pad, 1);
    // The renderer is unresolved, not invalid.
    assert_eq!(report.unresolved(), &[renderer]);
    assert!(report.violations_for(renderer).next().is_none());
}

// ============================================================================
// Unconnected pads and cycles
// ============================================================================

#[test]
fn test_unconnected_pad_reaches_check_as_unconstrained() {
    let mut builder = PipelineBuilder::new();
    let y = builder.input(DataType::int_pair());
    let grid = builder.element(ElementKind::CartesianProduct);
    builder.wire(y, grid, 1);

    let report = PipelineChecker::check(builder.pipeline());

    // Cartesian Product does not accept an unconstrained range.
    assert!(report.was_checked(grid));
    assert_eq!(report.violations().len(), 1);
    assert_eq!(report.violations()[0].pad, 0);
}

#[test]
fn test_disconnected_element_is_unresolved() {
    let mut builder = PipelineBuilder::new();
    let product = builder.element(ElementKind::MatrixMultiply);

    let report = PipelineChecker::check(builder.pipeline());

    assert!(report.violations().is_empty());
    assert_eq!(report.unresolved(), &[product]);
    assert!(!report.is_valid());
}

#[test]
fn test_sourceless_cycle_is_unresolved() {
    let mut builder = PipelineBuilder::new();
    let a = builder.element(ElementKind::MatrixMultiply);
    let b = builder.element(ElementKind::MatrixMultiply);
    builder.wire(a, b, 0).wire(b, a, 1);

    let report = PipelineChecker::check(builder.pipeline());

    assert!(report.violations().is_empty());
    assert!(report.checked().is_empty());
    assert_eq!(report.unresolved(), &[a, b]);
    assert_eq!(
        report.unresolved_outputs(),
        &[PadRef::new(a, 0), PadRef::new(b, 0)]
    );
    assert!(report.connection_types().iter().all(|(_, ty)| ty.is_none()));
}

#[test]
fn test_feedback_loop_through_iterative_is_not_resolved() {
    let mut builder = PipelineBuilder::new();
    let enable = builder.input(DataType::BOOL);
    let gate = builder.element(ElementKind::Iterative);
    let a = builder.input(matrix(DataType::INT, &[2, 2]));
    let product = builder.element(ElementKind::MatrixMultiply);
    builder
        .wire(enable, gate, 1)
        .wire(a, product, 0)
        .wire(gate, product, 1)
        .wire(product, gate, 0);

    let report = PipelineChecker::check(builder.pipeline());

    // Neither element in the loop ever has all of its inputs resolved.
    assert!(report.violations().is_empty());
    assert_eq!(report.unresolved(), &[gate, product]);
}

#[test]
fn test_iterative_passes_value_through() {
    let mut builder = PipelineBuilder::new();
    let value = builder.input(matrix(DataType::FLOAT, &[8]));
    let enable = builder.input(DataType::Bool(Some(true)));
    let gate = builder.element(ElementKind::Iterative);
    builder.wire(value, gate, 0).wire(enable, gate, 1);

    let report = PipelineChecker::check(builder.pipeline());

    assert!(report.is_valid());
    assert_eq!(
        report.output_type(PadRef::new(gate, 0)),
        Some(&matrix(DataType::FLOAT, &[8]))
    );
}

// ============================================================================
// Exhaustiveness and determinism
// ============================================================================

#[test]
fn test_independent_violations_all_reported() {
    let mut builder = PipelineBuilder::new();
    let bad_range = builder.input(DataType::BOOL);
    let range = builder.input(DataType::int_pair());
    let grid = builder.element(ElementKind::CartesianProduct);
    builder.wire(bad_range, grid, 0).wire(range, grid, 1);

    let a = builder.input(matrix(DataType::BOOL, &[2, 2]));
    let x = builder.input(matrix(DataType::BOOL, &[2]));
    let product = builder.element(ElementKind::MatrixMultiply);
    builder.wire(a, product, 0).wire(x, product, 1);

    let report = PipelineChecker::check(builder.pipeline());

    assert_eq!(report.violations().len(), 2);
    assert_eq!(report.violations()[0].element, grid);
    assert_eq!(report.violations()[1].element, product);
    assert_eq!(report.stats.violations, 2);
}

#[test]
fn test_repeated_passes_agree() {
    let mut builder = PipelineBuilder::new();
    let bad = builder.input(DataType::FLOAT);
    let range = builder.input(DataType::int_pair());
    let grid = builder.element(ElementKind::CartesianProduct);
    builder.wire(bad, grid, 0).wire(range, grid, 1);
    let snapshot = builder.pipeline().snapshot();

    let first = PipelineChecker::check_snapshot(&snapshot);
    let second = PipelineChecker::check_snapshot(&snapshot);
    assert_eq!(violation_set(&first), violation_set(&second));
    assert_eq!(first.violations(), second.violations());
}

// ============================================================================
// Graph mutation contract
// ============================================================================

#[test]
fn test_second_connection_to_sink_rejected() {
    let mut builder = PipelineBuilder::new();
    let x = builder.input(DataType::int_pair());
    let y = builder.input(DataType::int_pair());
    let grid = builder.element(ElementKind::CartesianProduct);
    builder.wire(x, grid, 0);
    let mut pipeline = builder.build();

    let before = pipeline.connection_count();
    let err = pipeline
        .add_connection(PadConnection::new(y, 0, grid, 0))
        .unwrap_err();

    assert_eq!(err, GraphError::SinkAlreadyConnected(PadRef::new(grid, 0)));
    assert_eq!(pipeline.connection_count(), before);
}

#[test]
fn test_recheck_after_edit() {
    let mut builder = PipelineBuilder::new();
    let x = builder.input(DataType::FLOAT);
    let y = builder.input(DataType::int_pair());
    let grid = builder.element(ElementKind::CartesianProduct);
    builder.wire(x, grid, 0).wire(y, grid, 1);
    let mut pipeline = builder.build();
    let changes = pipeline.subscribe();

    assert!(PipelineChecker::check(&pipeline).has_violations());

    pipeline.set_input_value(x, DataType::int_pair()).unwrap();
    assert!(changes.try_recv().is_ok());
    assert!(PipelineChecker::check(&pipeline).is_valid());
}

//! Property-based tests for type equality, graph invariants and checker determinism

mod common;

use common::violation_set;
use fyre_pipeline::pipeline::{
    types_equal, DataType, Element, ElementId, ElementKind, PadConnection, PadRef, Pipeline,
    PipelineChecker,
};
use proptest::prelude::*;
use std::collections::HashSet;

fn scalar() -> impl Strategy<Value = DataType> {
    prop_oneof![
        prop::option::of(any::<i64>()).prop_map(DataType::Int),
        prop::option::of(any::<f64>()).prop_map(DataType::Float),
        prop::option::of(any::<bool>()).prop_map(DataType::Bool),
    ]
}

fn data_type() -> impl Strategy<Value = DataType> {
    scalar().prop_recursive(3, 8, 1, |inner| {
        (inner, prop::collection::vec(1usize..6, 1..4)).prop_map(|(element, shape)| {
            DataType::matrix(element, shape.len(), shape).expect("rank matches shape")
        })
    })
}

fn kind() -> impl Strategy<Value = ElementKind> {
    prop::sample::select(ElementKind::all().to_vec())
}

/// Build a graph from element kinds and `(source, sink, sink pad)` edge attempts.
/// Attempts that break a graph rule are skipped.
fn build(kinds: &[ElementKind], edges: &[(usize, usize, usize)]) -> (Pipeline, Vec<ElementId>) {
    let mut pipeline = Pipeline::new();
    let ids: Vec<ElementId> = kinds
        .iter()
        .map(|&kind| pipeline.add_element(Element::new(kind)).unwrap())
        .collect();

    for &(source, sink, pad) in edges {
        let source = ids[source % ids.len()];
        let sink = ids[sink % ids.len()];
        let inputs = pipeline.element(sink).unwrap().inputs().len();
        if inputs == 0 {
            continue;
        }
        let _ = pipeline.add_connection(PadConnection::new(source, 0, sink, pad % inputs));
    }

    (pipeline, ids)
}

fn edges() -> impl Strategy<Value = Vec<(usize, usize, usize)>> {
    prop::collection::vec((0usize..16, 0usize..16, 0usize..3), 0..40)
}

proptest! {
    #[test]
    fn test_type_equal_to_itself(ty in data_type()) {
        prop_assert!(types_equal(&ty, &ty));
        prop_assert!(types_equal(&ty, &ty.clone()));
    }

    #[test]
    fn test_matrix_shape_change_breaks_equality(
        element in scalar(),
        shape in prop::collection::vec(1usize..6, 1..4),
        which in any::<prop::sample::Index>(),
    ) {
        let original = DataType::matrix(element.clone(), shape.len(), shape.clone()).unwrap();

        let mut resized = shape.clone();
        let i = which.index(resized.len());
        resized[i] += 1;
        let resized = DataType::matrix(element.clone(), resized.len(), resized).unwrap();
        prop_assert!(!types_equal(&original, &resized));

        let mut extended = shape;
        extended.push(1);
        let extended = DataType::matrix(element, extended.len(), extended).unwrap();
        prop_assert!(!types_equal(&original, &extended));
    }

    #[test]
    fn test_sinks_never_doubly_fed(
        kinds in prop::collection::vec(kind(), 1..10),
        edges in edges(),
        removals in prop::collection::vec(any::<prop::sample::Index>(), 0..10),
    ) {
        let (mut pipeline, ids) = build(&kinds, &edges);

        for removal in removals {
            if pipeline.connection_count() == 0 {
                break;
            }
            let connection = pipeline.connections()[removal.index(pipeline.connection_count())];
            pipeline.remove_connection(&connection).unwrap();

            // Refill the freed pad from somewhere else
            let _ = pipeline.add_connection(PadConnection {
                source: PadRef::new(ids[0], 0),
                sink: connection.sink,
            });
        }

        let mut sinks = HashSet::new();
        for connection in pipeline.connections() {
            prop_assert!(sinks.insert(connection.sink), "{} fed twice", connection.sink);
        }
    }

    #[test]
    fn test_check_is_deterministic(
        kinds in prop::collection::vec(kind(), 1..12),
        edges in edges(),
    ) {
        let (pipeline, _) = build(&kinds, &edges);
        let snapshot = pipeline.snapshot();

        let first = PipelineChecker::check_snapshot(&snapshot);
        let second = PipelineChecker::check_snapshot(&snapshot);

        prop_assert_eq!(violation_set(&first), violation_set(&second));
        prop_assert_eq!(first.unresolved(), second.unresolved());
    }

    #[test]
    fn test_each_element_checked_at_most_once(
        kinds in prop::collection::vec(kind(), 1..12),
        edges in edges(),
    ) {
        let (pipeline, _) = build(&kinds, &edges);
        let report = PipelineChecker::check(&pipeline);

        let unique: HashSet<_> = report.checked().iter().collect();
        prop_assert_eq!(unique.len(), report.checked().len());
        prop_assert_eq!(
            report.checked().len() + report.unresolved().len(),
            pipeline.len()
        );
    }

    #[test]
    fn test_remove_element_drops_incident_connections(
        kinds in prop::collection::vec(kind(), 1..10),
        edges in edges(),
        victim in any::<prop::sample::Index>(),
    ) {
        let (mut pipeline, ids) = build(&kinds, &edges);
        let victim = ids[victim.index(ids.len())];

        let before = pipeline.connection_count();
        let incident = pipeline.connections_of(victim).count();

        let (element, removed) = pipeline.remove_element(victim).unwrap();

        prop_assert_eq!(element.id(), victim);
        prop_assert_eq!(removed.len(), incident);
        prop_assert_eq!(pipeline.connection_count(), before - incident);
        prop_assert!(pipeline.connections().iter().all(|c| !c.touches(victim)));
        prop_assert!(!pipeline.contains(victim));
    }
}

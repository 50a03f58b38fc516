//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;

use fyre_pipeline::pipeline::{CheckReport, ElementId, Violation};

/// Shorthand for `Matrix(element, shape.len(), shape)`.
pub fn matrix(element: fyre_pipeline::DataType, shape: &[usize]) -> fyre_pipeline::DataType {
    fyre_pipeline::DataType::matrix(element, shape.len(), shape.to_vec())
        .expect("test matrix shapes are well formed")
}

/// Violations as `(element, pad, message)` tuples, for order-insensitive comparison.
pub fn violation_set(report: &CheckReport) -> Vec<(ElementId, usize, String)> {
    let mut set: Vec<_> = report
        .violations()
        .iter()
        .map(|v: &Violation| (v.element, v.pad, v.message()))
        .collect();
    set.sort();
    set
}

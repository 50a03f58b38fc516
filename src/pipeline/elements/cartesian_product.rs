//! CartesianProductElement: builds a grid of integer coordinate pairs.
//!
//! Takes two integer ranges (each a `Matrix<Int>[2]` holding start and end) and
//! produces a rank-2 matrix whose cells are the coordinate pairs.
//!
//! The output grid size is fixed at 20x20 until constant propagation can carry
//! the range bounds through the graph.

use crate::pipeline::data_type::DataType;
use crate::pipeline::element::CheckResult;
use crate::pipeline::error::PadTypeError;
use crate::pipeline::pad::PadDescriptor;

/// Placeholder grid dimensions used for the output shape.
pub const GRID_WIDTH: usize = 20;
pub const GRID_HEIGHT: usize = 20;

static INPUTS: &[PadDescriptor] = &[
    PadDescriptor::new("x", "Horizontal range (start, end)"),
    PadDescriptor::new("y", "Vertical range (start, end)"),
];

static OUTPUTS: &[PadDescriptor] = &[PadDescriptor::new(
    "grid",
    "Every (x, y) pair in the two ranges",
)];

#[derive(Debug, Clone, Default)]
pub struct CartesianProductElement;

impl CartesianProductElement {
    pub fn new() -> Self {
        Self
    }

    pub fn name(&self) -> &str {
        "Cartesian Product"
    }

    pub fn inputs(&self) -> &[PadDescriptor] {
        INPUTS
    }

    pub fn outputs(&self) -> &[PadDescriptor] {
        OUTPUTS
    }

    pub fn check(&self, inputs: &[Option<DataType>]) -> CheckResult {
        let range = DataType::int_pair();
        for (pad, input) in inputs.iter().enumerate() {
            if input.as_ref() != Some(&range) {
                return Err(PadTypeError::new(
                    pad,
                    format!("Expected a range of type {}", range),
                ));
            }
        }

        let grid = DataType::matrix(range, 2, vec![GRID_WIDTH, GRID_HEIGHT])
            .map_err(|e| PadTypeError::new(0, e.to_string()))?;
        Ok(Some(vec![grid]))
    }
}

//! MatrixMultiplyElement: multiplies a matrix by a vector.
//!
//! Input 0 is an `m x n` matrix, input 1 a vector of length `n`. Both must share
//! the same numeric element type; mixing Int and Float is rejected. The output
//! carries input 1's type unchanged.

use crate::pipeline::data_type::{DataType, MatrixType};
use crate::pipeline::element::CheckResult;
use crate::pipeline::error::PadTypeError;
use crate::pipeline::pad::PadDescriptor;

static INPUTS: &[PadDescriptor] = &[
    PadDescriptor::new("A", "Matrix (m x n)"),
    PadDescriptor::new("x", "Vector (n)"),
];

static OUTPUTS: &[PadDescriptor] = &[PadDescriptor::new("Ax", "Product of A and x")];

#[derive(Debug, Clone, Default)]
pub struct MatrixMultiplyElement;

impl MatrixMultiplyElement {
    pub fn new() -> Self {
        Self
    }

    pub fn name(&self) -> &str {
        "Matrix Multiply"
    }

    pub fn inputs(&self) -> &[PadDescriptor] {
        INPUTS
    }

    pub fn outputs(&self) -> &[PadDescriptor] {
        OUTPUTS
    }

    pub fn check(&self, inputs: &[Option<DataType>]) -> CheckResult {
        let matrix = expect_matrix(inputs.first(), 0, 2, "a rank-2 matrix")?;
        let vector = expect_matrix(inputs.get(1), 1, 1, "a rank-1 vector")?;

        if !matrix.element().is_numeric() {
            return Err(PadTypeError::new(
                0,
                format!(
                    "Matrix elements must be Int or Float, got {}",
                    matrix.element()
                ),
            ));
        }

        if matrix.element() != vector.element() {
            return Err(PadTypeError::new(
                1,
                format!(
                    "Cannot multiply a matrix of {} by a vector of {}",
                    matrix.element(),
                    vector.element()
                ),
            ));
        }

        let inner = matrix.shape()[1];
        let len = vector.shape()[0];
        if inner != len {
            return Err(PadTypeError::new(
                1,
                format!(
                    "Matrix has {} columns but vector has {} elements",
                    inner, len
                ),
            ));
        }

        Ok(Some(vec![DataType::Matrix(vector.clone())]))
    }
}

fn expect_matrix<'a>(
    input: Option<&'a Option<DataType>>,
    pad: usize,
    rank: usize,
    what: &str,
) -> Result<&'a MatrixType, PadTypeError> {
    match input.and_then(|ty| ty.as_ref()).and_then(DataType::as_matrix) {
        Some(m) if m.rank() == rank => Ok(m),
        Some(m) => Err(PadTypeError::new(
            pad,
            format!("Expected {}, got {}", what, m),
        )),
        None => Err(PadTypeError::new(pad, format!("Expected {}", what))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(element: DataType, shape: Vec<usize>) -> Option<DataType> {
        Some(DataType::matrix(element, shape.len(), shape).unwrap())
    }

    #[test]
    fn test_int_matrix_times_int_vector() {
        let element = MatrixMultiplyElement::new();
        let out = element
            .check(&[
                matrix(DataType::INT, vec![3, 4]),
                matrix(DataType::INT, vec![4]),
            ])
            .unwrap()
            .unwrap();
        assert_eq!(out, vec![DataType::vector(DataType::INT, 4)]);
    }

    #[test]
    fn test_mixed_int_float_rejected() {
        let element = MatrixMultiplyElement::new();
        let err = element
            .check(&[
                matrix(DataType::INT, vec![3, 4]),
                matrix(DataType::FLOAT, vec![4]),
            ])
            .unwrap_err();
        assert_eq!(err.pad, 1);
        assert!(err.message.contains("Int"));
        assert!(err.message.contains("Float"));
    }

    #[test]
    fn test_inner_dimension_mismatch_reports_sizes() {
        let element = MatrixMultiplyElement::new();
        let err = element
            .check(&[
                matrix(DataType::FLOAT, vec![3, 4]),
                matrix(DataType::FLOAT, vec![5]),
            ])
            .unwrap_err();
        assert_eq!(err.pad, 1);
        assert!(err.message.contains('4'));
        assert!(err.message.contains('5'));
    }

    #[test]
    fn test_rank_checked_per_pad() {
        let element = MatrixMultiplyElement::new();
        let err = element
            .check(&[matrix(DataType::INT, vec![4]), matrix(DataType::INT, vec![4])])
            .unwrap_err();
        assert_eq!(err.pad, 0);

        let err = element
            .check(&[
                matrix(DataType::INT, vec![3, 4]),
                matrix(DataType::INT, vec![4, 1]),
            ])
            .unwrap_err();
        assert_eq!(err.pad, 1);
    }

    #[test]
    fn test_non_numeric_elements_rejected() {
        let element = MatrixMultiplyElement::new();
        let err = element
            .check(&[
                matrix(DataType::BOOL, vec![2, 2]),
                matrix(DataType::BOOL, vec![2]),
            ])
            .unwrap_err();
        assert_eq!(err.pad, 0);
    }

    #[test]
    fn test_scalar_input_rejected() {
        let element = MatrixMultiplyElement::new();
        let err = element
            .check(&[Some(DataType::INT), matrix(DataType::INT, vec![4])])
            .unwrap_err();
        assert_eq!(err.pad, 0);
    }
}

//! Type descriptors for values flowing between element pads.
//!
//! The set is closed: `Int`, `Float`, `Bool` and a recursively typed `Matrix`.
//! Scalars may carry the runtime value an Input element was configured with;
//! that value is visible to checks (see the histogram imager) but never takes
//! part in type equality.
//!
//! Matrix shape is validated on construction, so a `MatrixType` in hand always
//! satisfies `shape.len() == rank` and `rank >= 1`.

use crate::pipeline::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A value type carried on a pad.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "DataTypeRecord", into = "DataTypeRecord")]
pub enum DataType {
    Int(Option<i64>),
    Float(Option<f64>),
    Bool(Option<bool>),
    Matrix(MatrixType),
}

/// A tensor of `element` values with a fixed shape.
#[derive(Debug, Clone)]
pub struct MatrixType {
    element: Box<DataType>,
    shape: Vec<usize>,
}

impl MatrixType {
    pub fn new(
        element: DataType,
        rank: usize,
        shape: Vec<usize>,
    ) -> Result<Self, ConfigurationError> {
        if rank == 0 {
            return Err(ConfigurationError::ZeroRank);
        }
        if shape.len() != rank {
            return Err(ConfigurationError::ShapeMismatch {
                rank,
                shape_len: shape.len(),
            });
        }
        Ok(Self {
            element: Box::new(element),
            shape,
        })
    }

    #[inline]
    pub fn element(&self) -> &DataType {
        &self.element
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }
}

impl PartialEq for MatrixType {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && types_equal(&self.element, &other.element)
    }
}

/// Structural type equality. Runtime scalar values are ignored.
pub fn types_equal(a: &DataType, b: &DataType) -> bool {
    match (a, b) {
        (DataType::Int(_), DataType::Int(_)) => true,
        (DataType::Float(_), DataType::Float(_)) => true,
        (DataType::Bool(_), DataType::Bool(_)) => true,
        (DataType::Matrix(a), DataType::Matrix(b)) => a == b,
        _ => false,
    }
}

impl PartialEq for DataType {
    fn eq(&self, other: &Self) -> bool {
        types_equal(self, other)
    }
}

impl DataType {
    /// Untyped-value `Int`.
    pub const INT: DataType = DataType::Int(None);
    /// Untyped-value `Float`.
    pub const FLOAT: DataType = DataType::Float(None);
    /// Untyped-value `Bool`.
    pub const BOOL: DataType = DataType::Bool(None);

    /// Build a matrix type, rejecting rank/shape mismatches.
    pub fn matrix(
        element: DataType,
        rank: usize,
        shape: Vec<usize>,
    ) -> Result<Self, ConfigurationError> {
        MatrixType::new(element, rank, shape).map(DataType::Matrix)
    }

    /// A rank-1 matrix of length `len`.
    pub fn vector(element: DataType, len: usize) -> Self {
        DataType::Matrix(MatrixType {
            element: Box::new(element),
            shape: vec![len],
        })
    }

    /// `Matrix(Int, 1, [2])`: an integer point or an integer range.
    pub fn int_pair() -> Self {
        Self::vector(DataType::INT, 2)
    }

    pub fn is_int(&self) -> bool {
        matches!(self, DataType::Int(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, DataType::Float(_))
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, DataType::Bool(_))
    }

    pub fn is_matrix(&self) -> bool {
        matches!(self, DataType::Matrix(_))
    }

    /// Int or Float.
    pub fn is_numeric(&self) -> bool {
        self.is_int() || self.is_float()
    }

    pub fn as_matrix(&self) -> Option<&MatrixType> {
        match self {
            DataType::Matrix(m) => Some(m),
            _ => None,
        }
    }

    /// The runtime value carried by an `Int`, if any.
    pub fn int_value(&self) -> Option<i64> {
        match self {
            DataType::Int(v) => *v,
            _ => None,
        }
    }

    /// Short variant name, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            DataType::Int(_) => "Int",
            DataType::Float(_) => "Float",
            DataType::Bool(_) => "Bool",
            DataType::Matrix(_) => "Matrix",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Matrix(m) => write!(f, "{}", m),
            other => write!(f, "{}", other.kind_name()),
        }
    }
}

impl fmt::Display for MatrixType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dims: Vec<String> = self.shape.iter().map(|d| d.to_string()).collect();
        write!(f, "Matrix<{}>[{}]", self.element, dims.join("x"))
    }
}

/// On-disk form of a `DataType`. Matrices are re-validated when read back.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum DataTypeRecord {
    Int {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<i64>,
    },
    Float {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<f64>,
    },
    Bool {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<bool>,
    },
    Matrix {
        element: Box<DataType>,
        shape: Vec<usize>,
    },
}

impl TryFrom<DataTypeRecord> for DataType {
    type Error = ConfigurationError;

    fn try_from(record: DataTypeRecord) -> Result<Self, Self::Error> {
        Ok(match record {
            DataTypeRecord::Int { value } => DataType::Int(value),
            DataTypeRecord::Float { value } => DataType::Float(value),
            DataTypeRecord::Bool { value } => DataType::Bool(value),
            DataTypeRecord::Matrix { element, shape } => {
                DataType::matrix(*element, shape.len(), shape)?
            }
        })
    }
}

impl From<DataType> for DataTypeRecord {
    fn from(ty: DataType) -> Self {
        match ty {
            DataType::Int(value) => DataTypeRecord::Int { value },
            DataType::Float(value) => DataTypeRecord::Float { value },
            DataType::Bool(value) => DataTypeRecord::Bool { value },
            DataType::Matrix(m) => DataTypeRecord::Matrix {
                element: m.element,
                shape: m.shape,
            },
        }
    }
}

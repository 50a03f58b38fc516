//! Catalog of built-in element kinds.
//!
//! Each kind has a stable string tag used in documents, plus the metadata an
//! editor shows in its palette. Plugin kinds registered at runtime live in the
//! [`ElementRegistry`](crate::pipeline::registry::ElementRegistry) instead.

use serde::{Deserialize, Serialize};

/// Built-in element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    // Sources
    /// A user-configured value.
    Input,

    // Math
    /// Grid of coordinate pairs from two ranges.
    CartesianProduct,
    /// Matrix times vector.
    MatrixMultiply,

    // Imaging
    /// 2-D histogram of a point stream.
    HistogramImager,
    /// Histogram to RGBA pixels.
    PixelRenderer,

    // Flow control
    /// Feedback gate.
    Iterative,
}

impl ElementKind {
    /// Get all built-in kinds, in palette order.
    pub fn all() -> &'static [ElementKind] {
        &[
            ElementKind::Input,
            ElementKind::CartesianProduct,
            ElementKind::MatrixMultiply,
            ElementKind::HistogramImager,
            ElementKind::PixelRenderer,
            ElementKind::Iterative,
        ]
    }

    /// Stable tag written to documents.
    pub fn tag(&self) -> &'static str {
        match self {
            ElementKind::Input => "input",
            ElementKind::CartesianProduct => "cartesian-product",
            ElementKind::MatrixMultiply => "matrix-multiply",
            ElementKind::HistogramImager => "histogram-imager",
            ElementKind::PixelRenderer => "pixel-renderer",
            ElementKind::Iterative => "iterative",
        }
    }

    pub fn from_tag(tag: &str) -> Option<ElementKind> {
        Self::all().iter().copied().find(|kind| kind.tag() == tag)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ElementKind::Input => "Input",
            ElementKind::CartesianProduct => "Cartesian Product",
            ElementKind::MatrixMultiply => "Matrix Multiply",
            ElementKind::HistogramImager => "Histogram Imager",
            ElementKind::PixelRenderer => "Pixel Renderer",
            ElementKind::Iterative => "Iterative",
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            ElementKind::Input => "Sources",
            ElementKind::CartesianProduct | ElementKind::MatrixMultiply => "Math",
            ElementKind::HistogramImager | ElementKind::PixelRenderer => "Imaging",
            ElementKind::Iterative => "Flow Control",
        }
    }

    /// Icon reference resolved by the presentation layer.
    pub fn icon(&self) -> &'static str {
        match self {
            ElementKind::Input => "fyre-input",
            ElementKind::CartesianProduct => "fyre-cartesian-product",
            ElementKind::MatrixMultiply => "fyre-matrix-multiply",
            ElementKind::HistogramImager => "fyre-histogram-imager",
            ElementKind::PixelRenderer => "fyre-pixel-renderer",
            ElementKind::Iterative => "fyre-iterative",
        }
    }

    /// Whether elements of this kind carry the Input capability flag.
    pub fn is_input(&self) -> bool {
        matches!(self, ElementKind::Input)
    }

    /// Get a detailed description of what this kind does.
    pub fn description(&self) -> &'static str {
        match self {
            ElementKind::Input =>
                "Emits a value configured by the user.\n\
                 Can be an Int, Float, Bool or matrix.\n\
                 Scalar inputs may carry a constant value.",

            ElementKind::CartesianProduct =>
                "Produces a matrix of coordinate pairs.\n\
                 Takes two integer ranges as (start, end).\n\
                 Output grid is currently fixed at 20x20.",

            ElementKind::MatrixMultiply =>
                "Multiplies a matrix by a vector.\n\
                 Both must share an Int or Float element type.\n\
                 Columns must match the vector length.",

            ElementKind::HistogramImager =>
                "Accumulates a 2-D histogram from points.\n\
                 Width and height must be constant Ints.\n\
                 Outputs a matrix of Float densities.",

            ElementKind::PixelRenderer =>
                "Renders a histogram into RGBA pixels.\n\
                 Takes a rank-2 matrix of Float densities.\n\
                 Outputs width x height x 4 Int channels.",

            ElementKind::Iterative =>
                "Passes its input through while enabled.\n\
                 Enable must be a Bool.\n\
                 Output mirrors the input type for feedback loops.",
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

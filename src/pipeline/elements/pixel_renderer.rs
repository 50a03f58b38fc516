//! PixelRendererElement: renders accumulated points into an RGBA pixel buffer.

use crate::pipeline::data_type::DataType;
use crate::pipeline::element::CheckResult;
use crate::pipeline::error::PadTypeError;
use crate::pipeline::pad::PadDescriptor;

/// Channels per output pixel (RGBA).
pub const CHANNELS: usize = 4;

static INPUTS: &[PadDescriptor] = &[PadDescriptor::new(
    "histogram",
    "Bin densities from a histogram imager",
)];

static OUTPUTS: &[PadDescriptor] = &[PadDescriptor::new(
    "pixels",
    "RGBA pixel buffer (width x height x 4)",
)];

#[derive(Debug, Clone, Default)]
pub struct PixelRendererElement;

impl PixelRendererElement {
    pub fn new() -> Self {
        Self
    }

    pub fn name(&self) -> &str {
        "Pixel Renderer"
    }

    pub fn inputs(&self) -> &[PadDescriptor] {
        INPUTS
    }

    pub fn outputs(&self) -> &[PadDescriptor] {
        OUTPUTS
    }

    pub fn check(&self, inputs: &[Option<DataType>]) -> CheckResult {
        let histogram = inputs
            .first()
            .and_then(Option::as_ref)
            .and_then(DataType::as_matrix)
            .filter(|m| m.rank() == 2 && m.element().is_float())
            .ok_or_else(|| PadTypeError::new(0, "Expected a rank-2 matrix of Float"))?;

        let (width, height) = (histogram.shape()[0], histogram.shape()[1]);
        let pixels = DataType::matrix(DataType::INT, 3, vec![width, height, CHANNELS])
            .map_err(|e| PadTypeError::new(0, e.to_string()))?;
        Ok(Some(vec![pixels]))
    }
}

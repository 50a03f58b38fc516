//! HistogramImagerElement: accumulates a stream of points into a 2-D histogram.
//!
//! Unlike the other checks this one reads concrete values: the output shape is
//! taken from the runtime values carried by the width and height `Int`s.

use crate::pipeline::data_type::DataType;
use crate::pipeline::element::CheckResult;
use crate::pipeline::error::PadTypeError;
use crate::pipeline::pad::PadDescriptor;

static INPUTS: &[PadDescriptor] = &[
    PadDescriptor::new("point", "Integer point to accumulate"),
    PadDescriptor::new("width", "Histogram width in bins"),
    PadDescriptor::new("height", "Histogram height in bins"),
];

static OUTPUTS: &[PadDescriptor] = &[PadDescriptor::new(
    "histogram",
    "Bin densities (width x height)",
)];

#[derive(Debug, Clone, Default)]
pub struct HistogramImagerElement;

impl HistogramImagerElement {
    pub fn new() -> Self {
        Self
    }

    pub fn name(&self) -> &str {
        "Histogram Imager"
    }

    pub fn inputs(&self) -> &[PadDescriptor] {
        INPUTS
    }

    pub fn outputs(&self) -> &[PadDescriptor] {
        OUTPUTS
    }

    pub fn check(&self, inputs: &[Option<DataType>]) -> CheckResult {
        let point = DataType::int_pair();
        if inputs.first().and_then(Option::as_ref) != Some(&point) {
            return Err(PadTypeError::new(
                0,
                format!("Expected a point of type {}", point),
            ));
        }

        let width = dimension(inputs.get(1), 1, "width")?;
        let height = dimension(inputs.get(2), 2, "height")?;

        let histogram = DataType::matrix(DataType::FLOAT, 2, vec![width, height])
            .map_err(|e| PadTypeError::new(0, e.to_string()))?;
        Ok(Some(vec![histogram]))
    }
}

fn dimension(
    input: Option<&Option<DataType>>,
    pad: usize,
    what: &str,
) -> Result<usize, PadTypeError> {
    let ty = input
        .and_then(Option::as_ref)
        .ok_or_else(|| PadTypeError::new(pad, format!("Expected Int {}", what)))?;
    if !ty.is_int() {
        return Err(PadTypeError::new(
            pad,
            format!("Expected Int {}, got {}", what, ty),
        ));
    }
    let value = ty.int_value().ok_or_else(|| {
        PadTypeError::new(pad, format!("The {} must be a known constant", what))
    })?;
    usize::try_from(value).map_err(|_| {
        PadTypeError::new(pad, format!("The {} cannot be negative ({})", what, value))
    })
}

//! IterativeElement: a feedback gate.
//!
//! Passes input 0 through while the boolean "enable" input allows it. The
//! output mirrors input 0's type, so an element downstream may feed its result
//! back into input 0 to form a loop. While input 0 is still unconstrained the
//! gate imposes no typing at all.

use crate::pipeline::data_type::DataType;
use crate::pipeline::element::CheckResult;
use crate::pipeline::error::PadTypeError;
use crate::pipeline::pad::PadDescriptor;

static INPUTS: &[PadDescriptor] = &[
    PadDescriptor::new("value", "Value to pass through"),
    PadDescriptor::new("enable", "Stops iterating when false"),
];

static OUTPUTS: &[PadDescriptor] = &[PadDescriptor::new("value", "The input value")];

#[derive(Debug, Clone, Default)]
pub struct IterativeElement;

impl IterativeElement {
    pub fn new() -> Self {
        Self
    }

    pub fn name(&self) -> &str {
        "Iterative"
    }

    pub fn inputs(&self) -> &[PadDescriptor] {
        INPUTS
    }

    pub fn outputs(&self) -> &[PadDescriptor] {
        OUTPUTS
    }

    pub fn check(&self, inputs: &[Option<DataType>]) -> CheckResult {
        match inputs.get(1).and_then(Option::as_ref) {
            Some(ty) if ty.is_bool() => {}
            Some(ty) => {
                return Err(PadTypeError::new(
                    1,
                    format!("Enable must be Bool, got {}", ty),
                ))
            }
            None => return Err(PadTypeError::new(1, "Enable must be Bool")),
        }

        Ok(inputs
            .first()
            .and_then(Option::as_ref)
            .map(|value| vec![value.clone()]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_mirrors_value() {
        let element = IterativeElement::new();
        let value = DataType::vector(DataType::FLOAT, 3);
        let out = element
            .check(&[Some(value.clone()), Some(DataType::BOOL)])
            .unwrap()
            .unwrap();
        assert_eq!(out, vec![value]);
    }

    #[test]
    fn test_enable_must_be_bool() {
        let element = IterativeElement::new();
        let err = element
            .check(&[Some(DataType::INT), Some(DataType::INT)])
            .unwrap_err();
        assert_eq!(err.pad, 1);
    }

    #[test]
    fn test_unconstrained_value_imposes_nothing() {
        let element = IterativeElement::new();
        assert_eq!(element.check(&[None, Some(DataType::BOOL)]).unwrap(), None);
    }
}

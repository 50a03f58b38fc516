//! InputElement: a user-configured value source.
//!
//! Re-emits whatever scalar or matrix type the user configured, including any
//! runtime value it carries. Input elements have no input pads and carry the
//! Input capability flag, so the checker always starts from them.

use crate::pipeline::data_type::DataType;
use crate::pipeline::element::CheckResult;
use crate::pipeline::error::ConfigurationError;
use crate::pipeline::pad::PadDescriptor;
use serde_json::{json, Value};

static OUTPUTS: &[PadDescriptor] = &[PadDescriptor::new("value", "The configured value")];

/// Attribute key holding the configured `DataType`.
pub const VALUE_ATTRIBUTE: &str = "value";

#[derive(Debug, Clone)]
pub struct InputElement {
    value: DataType,
}

impl InputElement {
    pub fn new(value: DataType) -> Self {
        Self { value }
    }

    /// Rebuild from persisted attributes. A missing value falls back to `Int(0)`.
    pub fn from_attributes(attributes: &Value) -> Result<Self, ConfigurationError> {
        match attributes.get(VALUE_ATTRIBUTE) {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(raw) => serde_json::from_value(raw.clone())
                .map(Self::new)
                .map_err(|e| ConfigurationError::Attribute {
                    key: VALUE_ATTRIBUTE.to_string(),
                    message: e.to_string(),
                }),
        }
    }

    pub fn attributes(&self) -> Value {
        json!({ VALUE_ATTRIBUTE: self.value })
    }

    pub fn value(&self) -> &DataType {
        &self.value
    }

    pub fn set_value(&mut self, value: DataType) {
        self.value = value;
    }

    pub fn name(&self) -> &str {
        "Input"
    }

    pub fn inputs(&self) -> &[PadDescriptor] {
        &[]
    }

    pub fn outputs(&self) -> &[PadDescriptor] {
        OUTPUTS
    }

    pub fn check(&self, _inputs: &[Option<DataType>]) -> CheckResult {
        Ok(Some(vec![self.value.clone()]))
    }
}

impl Default for InputElement {
    fn default() -> Self {
        Self::new(DataType::Int(Some(0)))
    }
}

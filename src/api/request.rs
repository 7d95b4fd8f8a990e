//! Request types for the Net Pay Engine API.
//!
//! The `/calculate` body is read as untyped JSON and validated field by
//! field, so a boolean gross or a fractional dependent count is reported as
//! an input error rather than a generic deserialization failure.

use serde_json::{Map, Value};

use crate::error::{EngineError, EngineResult};
use crate::models::PayrollInput;

/// A validated request to the `/calculate` endpoint.
///
/// ```text
/// {
///   "employee_id": "emp_001",      // optional
///   "rule_set": "default",         // optional
///   "gross": 3000.00,              // JSON number
///   "dependents": 0,               // optional, defaults to 0
///   "wants_transport": false       // optional, defaults to false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculationRequest {
    /// Caller supplied identifier echoed back in the response.
    pub employee_id: Option<String>,
    /// Name of the rule table to apply, `None` for the default table.
    pub rule_set: Option<String>,
    /// The validated payroll input.
    pub input: PayrollInput,
}

impl CalculationRequest {
    /// Validates a JSON request body.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] if the body is not an object,
    /// an optional string field has another type, or the payroll fields
    /// fail [`PayrollInput::from_json_object`].
    pub fn from_json(body: &Value) -> EngineResult<Self> {
        let object = body
            .as_object()
            .ok_or_else(|| EngineError::invalid_input("payload", "expected a JSON object"))?;

        let employee_id = optional_string(object, "employee_id")?;
        let rule_set = optional_string(object, "rule_set")?;
        let input = PayrollInput::from_json_object(object)?;

        Ok(Self {
            employee_id,
            rule_set,
            input,
        })
    }
}

fn optional_string(object: &Map<String, Value>, field: &str) -> EngineResult<Option<String>> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(EngineError::invalid_input(field, "must be a string")),
    }
}

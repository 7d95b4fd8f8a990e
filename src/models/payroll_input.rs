//! Validated payroll input.
//!
//! A [`PayrollInput`] can only be obtained through validation, so the
//! calculation pipeline never sees a non-positive gross or a negative
//! dependent count.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::error::{EngineError, EngineResult};

/// Largest accepted gross pay, 10^24.
///
/// Keeps every deduction sum and the net pay within the range where
/// `rust_decimal` can still represent two decimal places.
pub const MAX_GROSS: Decimal = Decimal::from_parts(2_701_131_776, 466_537_709, 54_210, false, 0);

const GROSS_FIELD: &str = "gross";
const DEPENDENTS_FIELD: &str = "dependents";
const TRANSPORT_FIELD: &str = "wants_transport";

/// The validated inputs of a single net pay calculation.
///
/// # Example
///
/// ```
/// use net_pay_engine::models::PayrollInput;
/// use rust_decimal::Decimal;
///
/// let input = PayrollInput::new(Decimal::new(300000, 2), 2, true).unwrap();
/// assert_eq!(input.dependents(), 2);
/// assert!(input.wants_transport());
///
/// assert!(PayrollInput::new(Decimal::ZERO, 0, false).is_err());
/// assert!(PayrollInput::new(Decimal::ONE, -1, false).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayrollInput {
    gross: Decimal,
    dependents: u32,
    wants_transport: bool,
}

impl PayrollInput {
    /// Validates and creates a payroll input.
    ///
    /// Dependent counts above `u32::MAX` are saturated; the abatement is
    /// already clamped to 100% long before that point.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] if `gross` is not greater than
    /// zero or exceeds [`MAX_GROSS`], or if `dependents` is negative.
    pub fn new(gross: Decimal, dependents: i64, wants_transport: bool) -> EngineResult<Self> {
        let gross = validate_gross(gross)?;
        if dependents < 0 {
            return Err(EngineError::invalid_input(
                DEPENDENTS_FIELD,
                format!("must be >= 0, got {}", dependents),
            ));
        }

        Ok(Self {
            gross,
            dependents: u32::try_from(dependents).unwrap_or(u32::MAX),
            wants_transport,
        })
    }

    /// Validates an untyped JSON object of the form
    /// `{"gross": ..., "dependents": ..., "wants_transport": ...}`.
    ///
    /// `gross` must be a JSON number; booleans and strings are rejected.
    /// `dependents` defaults to 0 when absent and must be a JSON integer.
    /// `wants_transport` defaults to `false` when absent and must be a JSON
    /// boolean. An explicit `null` is not a default. Numbers are converted
    /// through their textual form, never through `f64` arithmetic.
    ///
    /// ```
    /// use net_pay_engine::models::PayrollInput;
    /// use serde_json::json;
    ///
    /// let input = PayrollInput::from_json(&json!({"gross": 3333.33})).unwrap();
    /// assert_eq!(input.gross().to_string(), "3333.33");
    ///
    /// assert!(PayrollInput::from_json(&json!({"gross": true})).is_err());
    /// assert!(PayrollInput::from_json(&json!({"gross": 1000, "wants_transport": 1})).is_err());
    /// ```
    pub fn from_json(value: &Value) -> EngineResult<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| EngineError::invalid_input("payload", "expected a JSON object"))?;
        Self::from_json_object(object)
    }

    /// Validates the payroll fields of an already-destructured JSON object.
    ///
    /// Fields other than the three payroll fields are ignored.
    pub fn from_json_object(object: &Map<String, Value>) -> EngineResult<Self> {
        let gross = validate_gross(parse_gross(object.get(GROSS_FIELD))?)?;
        let dependents = parse_dependents(object.get(DEPENDENTS_FIELD))?;
        let wants_transport = parse_transport(object.get(TRANSPORT_FIELD))?;

        Ok(Self {
            gross,
            dependents,
            wants_transport,
        })
    }

    /// Gross pay, always greater than zero.
    pub fn gross(&self) -> Decimal {
        self.gross
    }

    /// Number of declared dependents.
    pub fn dependents(&self) -> u32 {
        self.dependents
    }

    /// Whether the employee opted into the transportation benefit.
    pub fn wants_transport(&self) -> bool {
        self.wants_transport
    }
}

fn validate_gross(gross: Decimal) -> EngineResult<Decimal> {
    if gross <= Decimal::ZERO {
        return Err(EngineError::invalid_input(
            GROSS_FIELD,
            format!("must be greater than zero, got {}", gross),
        ));
    }
    if gross > MAX_GROSS {
        return Err(EngineError::invalid_input(
            GROSS_FIELD,
            format!("must not exceed {}, got {}", MAX_GROSS, gross),
        ));
    }
    Ok(gross)
}

fn parse_gross(value: Option<&Value>) -> EngineResult<Decimal> {
    match value {
        None | Some(Value::Null) => Err(EngineError::invalid_input(GROSS_FIELD, "is required")),
        Some(Value::Bool(_)) => Err(EngineError::invalid_input(
            GROSS_FIELD,
            "must be numeric, got a boolean",
        )),
        Some(Value::Number(number)) => parse_decimal_text(&number.to_string()),
        Some(Value::String(_)) => Err(EngineError::invalid_input(
            GROSS_FIELD,
            "must be numeric, got a string",
        )),
        Some(_) => Err(EngineError::invalid_input(GROSS_FIELD, "must be numeric")),
    }
}

fn parse_decimal_text(text: &str) -> EngineResult<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| {
            EngineError::invalid_input(
                GROSS_FIELD,
                format!("'{}' is not a decimal number", text),
            )
        })
}

fn parse_dependents(value: Option<&Value>) -> EngineResult<u32> {
    match value {
        None => Ok(0),
        Some(Value::Number(number)) => {
            if let Some(count) = number.as_u64() {
                Ok(u32::try_from(count).unwrap_or(u32::MAX))
            } else if let Some(count) = number.as_i64() {
                Err(EngineError::invalid_input(
                    DEPENDENTS_FIELD,
                    format!("must be >= 0, got {}", count),
                ))
            } else {
                Err(EngineError::invalid_input(
                    DEPENDENTS_FIELD,
                    format!("must be a whole number, got {}", number),
                ))
            }
        }
        Some(_) => Err(EngineError::invalid_input(
            DEPENDENTS_FIELD,
            "must be a whole number",
        )),
    }
}

fn parse_transport(value: Option<&Value>) -> EngineResult<bool> {
    match value {
        None => Ok(false),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(_) => Err(EngineError::invalid_input(
            TRANSPORT_FIELD,
            "must be a boolean",
        )),
    }
}

//! Payroll result models for the Net Pay Engine.
//!
//! This module contains the [`PayrollResult`] type and its associated
//! structures that capture the outputs of a net pay calculation, including
//! the deduction breakdown and the audit trace.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The deductions subtracted from gross pay.
///
/// Under [`RoundingPolicy::FinalOnly`](crate::config::RoundingPolicy) these
/// keep full precision; under `PerDeduction` each is rounded to cents.
///
/// # Example
///
/// ```
/// use net_pay_engine::models::DeductionBreakdown;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let deductions = DeductionBreakdown {
///     social_security: Decimal::from_str("240.00").unwrap(),
///     income_tax_base: Decimal::from_str("300.00").unwrap(),
///     income_tax: Decimal::from_str("300.00").unwrap(),
///     transport: Decimal::ZERO,
///     total: Decimal::from_str("540.00").unwrap(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionBreakdown {
    /// Social-security contribution, never above the cap.
    pub social_security: Decimal,
    /// Income tax before dependent abatement.
    pub income_tax_base: Decimal,
    /// Income tax after dependent abatement.
    pub income_tax: Decimal,
    /// Transportation-benefit deduction, zero when not opted in.
    pub transport: Decimal,
    /// Sum of social security, income tax and transport.
    pub total: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag rules that limited a value, such as the social-security
/// cap or a fully abated income tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// The result of a net pay calculation.
///
/// Identical inputs against the same rule set always produce an equal
/// `PayrollResult`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// The gross pay the calculation started from.
    pub gross_pay: Decimal,
    /// Number of declared dependents.
    pub dependents: u32,
    /// Whether the transportation benefit was opted into.
    pub wants_transport: bool,
    /// The individual deductions.
    pub deductions: DeductionBreakdown,
    /// Net pay, rounded half-up to exactly two decimal places.
    pub net_pay: Decimal,
    /// Audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_result() -> PayrollResult {
        PayrollResult {
            gross_pay: dec("3000.00"),
            dependents: 0,
            wants_transport: true,
            deductions: DeductionBreakdown {
                social_security: dec("240.0000"),
                income_tax_base: dec("300.0000"),
                income_tax: dec("300.0000"),
                transport: dec("180.0000"),
                total: dec("720.0000"),
            },
            net_pay: dec("2280.00"),
            audit_trace: AuditTrace {
                steps: vec![AuditStep {
                    step_number: 1,
                    rule_id: "social_security".to_string(),
                    rule_name: "Social Security Contribution".to_string(),
                    input: serde_json::json!({"gross": "3000.00"}),
                    output: serde_json::json!({"deduction": "240.0000"}),
                    reasoning: "3000.00 x 0.08 = 240.0000".to_string(),
                }],
                warnings: vec![],
            },
        }
    }

    #[test]
    fn test_money_serializes_as_string() {
        let json = serde_json::to_value(sample_result()).unwrap();
        assert_eq!(json["net_pay"], "2280.00");
        assert_eq!(json["gross_pay"], "3000.00");
        assert_eq!(json["deductions"]["transport"], "180.0000");
    }

    #[test]
    fn test_result_deserializes_from_api_json() {
        let json = serde_json::to_string(&sample_result()).unwrap();
        let parsed: PayrollResult = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.net_pay, dec("2280.00"));
        assert_eq!(parsed.audit_trace.steps.len(), 1);
        assert_eq!(parsed.audit_trace.steps[0].rule_id, "social_security");
    }

    #[test]
    fn test_audit_trace_default_is_empty() {
        let trace = AuditTrace::default();
        assert!(trace.steps.is_empty());
        assert!(trace.warnings.is_empty());
    }

    #[test]
    fn test_warning_serialization() {
        let warning = AuditWarning {
            code: "SOCIAL_SECURITY_CAP_APPLIED".to_string(),
            message: "capped".to_string(),
            severity: "low".to_string(),
        };
        let json = serde_json::to_string(&warning).unwrap();
        assert!(json.contains("\"code\":\"SOCIAL_SECURITY_CAP_APPLIED\""));
        assert!(json.contains("\"severity\":\"low\""));
    }
}

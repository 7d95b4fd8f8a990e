//! Transportation-benefit deduction.
//!
//! Employees who opt into subsidized transport contribute a fixed
//! percentage of their gross pay.

use rust_decimal::Decimal;

use crate::config::RuleSet;
use crate::models::AuditStep;

/// The result of the transport deduction, including the audit step.
#[derive(Debug, Clone)]
pub struct TransportDeductionResult {
    /// The deduction, zero when the employee did not opt in.
    pub deduction: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates `gross x transport_rate` if the employee opted in.
///
/// # Examples
///
/// ```
/// use net_pay_engine::calculation::calculate_transport_deduction;
/// use net_pay_engine::config::RuleSet;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rules = RuleSet::default();
/// let gross = Decimal::from_str("3000.00").unwrap();
///
/// let result = calculate_transport_deduction(gross, true, &rules, 4);
/// assert_eq!(result.deduction, Decimal::from_str("180.00").unwrap());
///
/// let result = calculate_transport_deduction(gross, false, &rules, 4);
/// assert_eq!(result.deduction, Decimal::ZERO);
/// ```
pub fn calculate_transport_deduction(
    gross: Decimal,
    wants_transport: bool,
    rules: &RuleSet,
    step_number: u32,
) -> TransportDeductionResult {
    let rate = rules.transport_rate();

    let (deduction, reasoning) = if wants_transport {
        let deduction = gross * rate;
        (deduction, format!("{} x {} = {}", gross, rate, deduction))
    } else {
        (
            Decimal::ZERO,
            "No transport deduction - employee did not opt in".to_string(),
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "transport".to_string(),
        rule_name: "Transportation Benefit".to_string(),
        input: serde_json::json!({
            "gross": gross.to_string(),
            "wants_transport": wants_transport,
            "rate": rate.to_string()
        }),
        output: serde_json::json!({
            "deduction": deduction.to_string()
        }),
        reasoning,
    };

    TransportDeductionResult {
        deduction,
        audit_step,
    }
}

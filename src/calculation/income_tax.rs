//! Income tax withholding calculation.
//!
//! The tax bracket is chosen by scanning the rule set's brackets in
//! ascending order and taking the first whose upper bound is greater than
//! or equal to the gross pay. The bracket's rate is applied flat to the
//! whole gross.

use rust_decimal::Decimal;

use crate::config::{RuleSet, TaxBracket};
use crate::models::AuditStep;

/// The result of the base income tax calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct BaseIncomeTaxResult {
    /// Tax before dependent abatement.
    pub base_tax: Decimal,
    /// Zero-based position of the selected bracket.
    pub bracket_index: usize,
    /// The selected bracket's rate.
    pub rate: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Finds the bracket a gross pay falls into.
///
/// A gross equal to a bracket's bound belongs to that bracket, not the
/// next one.
///
/// # Panics
///
/// Never for a validated [`RuleSet`]: its last bracket is always unbounded.
///
/// # Examples
///
/// ```
/// use net_pay_engine::calculation::find_tax_bracket;
/// use net_pay_engine::config::RuleSet;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rules = RuleSet::default();
/// let (index, bracket) = find_tax_bracket(Decimal::from_str("2000.00").unwrap(), &rules);
/// assert_eq!(index, 0);
/// assert_eq!(bracket.rate, Decimal::ZERO);
///
/// let (index, _) = find_tax_bracket(Decimal::from_str("2000.01").unwrap(), &rules);
/// assert_eq!(index, 1);
/// ```
pub fn find_tax_bracket(gross: Decimal, rules: &RuleSet) -> (usize, &TaxBracket) {
    rules
        .tax_brackets()
        .iter()
        .enumerate()
        .find(|(_, bracket)| bracket.contains(gross))
        .unwrap_or_else(|| unreachable!("validated rule sets end with an unbounded tax bracket"))
}

/// Calculates income tax as `gross x rate` of the bracket gross falls into.
///
/// # Examples
///
/// ```
/// use net_pay_engine::calculation::calculate_base_income_tax;
/// use net_pay_engine::config::RuleSet;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = calculate_base_income_tax(Decimal::from_str("3000.00").unwrap(), &RuleSet::default(), 2);
/// assert_eq!(result.base_tax, Decimal::from_str("300.00").unwrap());
/// ```
pub fn calculate_base_income_tax(
    gross: Decimal,
    rules: &RuleSet,
    step_number: u32,
) -> BaseIncomeTaxResult {
    let (bracket_index, bracket) = find_tax_bracket(gross, rules);
    let rate = bracket.rate;
    let base_tax = gross * rate;

    let bound = bracket
        .upper_bound
        .map_or_else(|| "unbounded".to_string(), |bound| bound.to_string());

    let reasoning = match bracket.upper_bound {
        Some(upper) => format!(
            "{} falls in bracket {} (up to {}): {} x {} = {}",
            gross,
            bracket_index + 1,
            upper,
            gross,
            rate,
            base_tax
        ),
        None => format!(
            "{} falls in top bracket {}: {} x {} = {}",
            gross,
            bracket_index + 1,
            gross,
            rate,
            base_tax
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "income_tax_base".to_string(),
        rule_name: "Income Tax Bracket".to_string(),
        input: serde_json::json!({
            "gross": gross.to_string()
        }),
        output: serde_json::json!({
            "bracket": bracket_index + 1,
            "upper_bound": bound,
            "rate": rate.to_string(),
            "base_tax": base_tax.to_string()
        }),
        reasoning,
    };

    BaseIncomeTaxResult {
        base_tax,
        bracket_index,
        rate,
        audit_step,
    }
}

//! Dependent abatement of income tax.
//!
//! Each declared dependent reduces the income tax by a fixed percentage of
//! the tax. The total reduction is clamped to 100% so the tax never goes
//! negative.

use rust_decimal::Decimal;

use crate::config::RuleSet;
use crate::models::AuditStep;

/// The result of applying dependent abatement, including the audit step.
#[derive(Debug, Clone)]
pub struct DependentAbatementResult {
    /// Income tax after abatement, never negative.
    pub tax: Decimal,
    /// The fraction of the base tax removed, within `[0, 1]`.
    pub reduction: Decimal,
    /// True when the uncapped reduction exceeded 100%.
    pub clamped: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Reduces `base_tax` by `abatement_rate x dependents`, clamped to 100%.
///
/// A non-positive base tax or zero dependents leaves the tax unchanged.
///
/// # Examples
///
/// ```
/// use net_pay_engine::calculation::apply_dependent_abatement;
/// use net_pay_engine::config::RuleSet;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rules = RuleSet::default();
/// let result = apply_dependent_abatement(Decimal::from_str("400.00").unwrap(), 2, &rules, 3);
/// assert_eq!(result.tax, Decimal::from_str("360.00").unwrap());
///
/// let result = apply_dependent_abatement(Decimal::from_str("300.00").unwrap(), 20, &rules, 3);
/// assert_eq!(result.tax, Decimal::ZERO);
/// ```
pub fn apply_dependent_abatement(
    base_tax: Decimal,
    dependents: u32,
    rules: &RuleSet,
    step_number: u32,
) -> DependentAbatementResult {
    let rate = rules.dependent_abatement_rate();
    let input = serde_json::json!({
        "base_tax": base_tax.to_string(),
        "dependents": dependents,
        "rate_per_dependent": rate.to_string()
    });

    if base_tax <= Decimal::ZERO || dependents == 0 {
        let reasoning = if dependents == 0 {
            "No abatement applied - no dependents declared".to_string()
        } else {
            format!("No abatement applied - base tax is {}", base_tax)
        };

        return DependentAbatementResult {
            tax: base_tax,
            reduction: Decimal::ZERO,
            clamped: false,
            audit_step: AuditStep {
                step_number,
                rule_id: "dependent_abatement".to_string(),
                rule_name: "Dependent Abatement".to_string(),
                input,
                output: serde_json::json!({
                    "tax": base_tax.to_string(),
                    "reduction": Decimal::ZERO.to_string(),
                    "abatement_applied": false
                }),
                reasoning,
            },
        };
    }

    let uncapped = rate * Decimal::from(dependents);
    let clamped = uncapped > Decimal::ONE;
    let reduction = uncapped.min(Decimal::ONE);
    let tax = (base_tax * (Decimal::ONE - reduction)).max(Decimal::ZERO);

    let reasoning = if clamped {
        format!(
            "{} dependents x {} = {} exceeds 100%, tax fully abated to {}",
            dependents, rate, uncapped, tax
        )
    } else {
        format!(
            "{} dependents x {} = {} reduction: {} x (1 - {}) = {}",
            dependents, rate, reduction, base_tax, reduction, tax
        )
    };

    DependentAbatementResult {
        tax,
        reduction,
        clamped,
        audit_step: AuditStep {
            step_number,
            rule_id: "dependent_abatement".to_string(),
            rule_name: "Dependent Abatement".to_string(),
            input,
            output: serde_json::json!({
                "tax": tax.to_string(),
                "reduction": reduction.to_string(),
                "abatement_applied": true
            }),
            reasoning,
        },
    }
}

//! The net pay calculation pipeline.
//!
//! [`PayrollCalculator`] runs the deduction steps in a fixed order against
//! one immutable [`RuleSet`]: social security, base income tax, dependent
//! abatement, transport, then aggregation and rounding.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::RuleSet;
use crate::error::EngineResult;
use crate::models::{AuditTrace, AuditWarning, DeductionBreakdown, PayrollInput, PayrollResult};

use super::dependent_abatement::apply_dependent_abatement;
use super::income_tax::calculate_base_income_tax;
use super::rounding::{round_deduction, settle_net_pay};
use super::social_security::calculate_social_security;
use super::transport::calculate_transport_deduction;

/// Calculates net pay against a shared, immutable rule set.
///
/// The calculator holds no mutable state; cloning it only clones an
/// [`Arc`], and one instance may be used from many threads at once.
///
/// # Example
///
/// ```
/// use net_pay_engine::calculation::PayrollCalculator;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let calculator = PayrollCalculator::default();
/// let result = calculator
///     .calculate(Decimal::from_str("4000.00").unwrap(), 2, false)
///     .unwrap();
///
/// assert_eq!(result.deductions.income_tax, Decimal::from_str("360.00").unwrap());
/// assert_eq!(result.net_pay.to_string(), "3320.00");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PayrollCalculator {
    rules: Arc<RuleSet>,
}

impl PayrollCalculator {
    /// Creates a calculator that owns the given rule set.
    pub fn new(rules: RuleSet) -> Self {
        Self::from_shared(Arc::new(rules))
    }

    /// Creates a calculator sharing an already loaded rule set.
    pub fn from_shared(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    /// Returns the rule set this calculator applies.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Validates the inputs and calculates net pay with its breakdown.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`](crate::error::EngineError) if
    /// `gross` is not positive or `dependents` is negative. Nothing is
    /// computed in that case.
    pub fn calculate(
        &self,
        gross: Decimal,
        dependents: i64,
        wants_transport: bool,
    ) -> EngineResult<PayrollResult> {
        let input = PayrollInput::new(gross, dependents, wants_transport)?;
        Ok(self.calculate_input(&input))
    }

    /// Validates the inputs and returns only the net pay.
    pub fn net_pay(
        &self,
        gross: Decimal,
        dependents: i64,
        wants_transport: bool,
    ) -> EngineResult<Decimal> {
        Ok(self.calculate(gross, dependents, wants_transport)?.net_pay)
    }

    /// Calculates net pay for an already validated input.
    pub fn calculate_input(&self, input: &PayrollInput) -> PayrollResult {
        let rules = self.rules();
        let policy = rules.rounding();
        let gross = input.gross();
        let mut trace = AuditTrace::default();

        let social_security_result = calculate_social_security(gross, rules, 1);
        if social_security_result.cap_applied {
            trace.warnings.push(AuditWarning {
                code: "SOCIAL_SECURITY_CAP_APPLIED".to_string(),
                message: format!(
                    "Social security limited to the cap of {}",
                    rules.social_security_cap()
                ),
                severity: "low".to_string(),
            });
        }
        let social_security = round_deduction(social_security_result.deduction, policy);
        trace.steps.push(social_security_result.audit_step);

        let base_tax_result = calculate_base_income_tax(gross, rules, 2);
        let income_tax_base = round_deduction(base_tax_result.base_tax, policy);
        trace.steps.push(base_tax_result.audit_step);

        let abatement_result =
            apply_dependent_abatement(income_tax_base, input.dependents(), rules, 3);
        if abatement_result.clamped {
            trace.warnings.push(AuditWarning {
                code: "DEPENDENT_ABATEMENT_CLAMPED".to_string(),
                message: format!(
                    "Abatement for {} dependents exceeds 100% and was limited to the full tax",
                    input.dependents()
                ),
                severity: "low".to_string(),
            });
        }
        let income_tax = round_deduction(abatement_result.tax, policy);
        trace.steps.push(abatement_result.audit_step);

        let transport_result =
            calculate_transport_deduction(gross, input.wants_transport(), rules, 4);
        let transport = round_deduction(transport_result.deduction, policy);
        trace.steps.push(transport_result.audit_step);

        let total = social_security + income_tax + transport;
        let net_pay_result = settle_net_pay(gross, total, policy, 5);
        trace.steps.push(net_pay_result.audit_step);

        debug!(
            gross = %gross,
            dependents = input.dependents(),
            wants_transport = input.wants_transport(),
            net_pay = %net_pay_result.net_pay,
            "Calculated net pay"
        );

        PayrollResult {
            gross_pay: gross,
            dependents: input.dependents(),
            wants_transport: input.wants_transport(),
            deductions: DeductionBreakdown {
                social_security,
                income_tax_base,
                income_tax,
                transport,
                total,
            },
            net_pay: net_pay_result.net_pay,
            audit_trace: trace,
        }
    }
}

/// Calculates net pay against the default rule table.
///
/// # Examples
///
/// ```
/// use net_pay_engine::calculation::calculate_net_pay;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let net = calculate_net_pay(Decimal::from_str("3000.00").unwrap(), 0, true).unwrap();
/// assert_eq!(net, Decimal::from_str("2280.00").unwrap());
///
/// assert!(calculate_net_pay(Decimal::ZERO, 0, false).is_err());
/// ```
pub fn calculate_net_pay(
    gross: Decimal,
    dependents: i64,
    transport: bool,
) -> EngineResult<Decimal> {
    PayrollCalculator::default().net_pay(gross, dependents, transport)
}

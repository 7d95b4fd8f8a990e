//! Monetary rounding and net pay aggregation.
//!
//! Money is rounded to cents with commercial rounding: a midpoint is
//! rounded away from zero (`2.345` becomes `2.35`), never to even.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::RoundingPolicy;
use crate::models::AuditStep;

/// Number of decimal places monetary amounts are rounded to.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Rounds an amount half-up to exactly two decimal places.
///
/// The result has a scale of two, so `920` is returned as `920.00`. Amounts
/// with more than 26 integer digits cannot carry two decimal places in a
/// `Decimal` and keep their smaller scale; gross pay is capped at
/// [`MAX_GROSS`](crate::models::MAX_GROSS) so net pay never reaches that range.
///
/// # Examples
///
/// ```
/// use net_pay_engine::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("2.345").unwrap()).to_string(), "2.35");
/// assert_eq!(round_money(Decimal::from_str("2.344").unwrap()).to_string(), "2.34");
/// assert_eq!(round_money(Decimal::from(920)).to_string(), "920.00");
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_DECIMAL_PLACES);
    rounded
}

/// Rounds a deduction if the policy asks for per-deduction rounding.
pub fn round_deduction(amount: Decimal, policy: RoundingPolicy) -> Decimal {
    match policy {
        RoundingPolicy::FinalOnly => amount,
        RoundingPolicy::PerDeduction => round_money(amount),
    }
}

/// The result of the final aggregation step.
#[derive(Debug, Clone)]
pub struct NetPayResult {
    /// Net pay rounded to cents.
    pub net_pay: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Subtracts the total deductions from gross pay and rounds the result.
pub fn settle_net_pay(
    gross: Decimal,
    total_deductions: Decimal,
    policy: RoundingPolicy,
    step_number: u32,
) -> NetPayResult {
    let unrounded = gross - total_deductions;
    let net_pay = round_money(unrounded);

    let audit_step = AuditStep {
        step_number,
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay".to_string(),
        input: serde_json::json!({
            "gross": gross.to_string(),
            "total_deductions": total_deductions.to_string(),
            "rounding": policy
        }),
        output: serde_json::json!({
            "unrounded": unrounded.to_string(),
            "net_pay": net_pay.to_string()
        }),
        reasoning: format!(
            "{} - {} = {}, rounded half-up to {}",
            gross, total_deductions, unrounded, net_pay
        ),
    };

    NetPayResult {
        net_pay,
        audit_step,
    }
}

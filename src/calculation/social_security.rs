//! Social-security contribution calculation.
//!
//! The contribution is a fixed percentage of gross pay, limited to the
//! cap configured in the [`RuleSet`].

use rust_decimal::Decimal;

use crate::config::RuleSet;
use crate::models::AuditStep;

/// The result of the social-security calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct SocialSecurityResult {
    /// The deduction, never above the cap.
    pub deduction: Decimal,
    /// True when the uncapped percentage exceeded the cap.
    pub cap_applied: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the social-security deduction as `min(gross x rate, cap)`.
///
/// # Examples
///
/// ```
/// use net_pay_engine::calculation::calculate_social_security;
/// use net_pay_engine::config::RuleSet;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rules = RuleSet::default();
///
/// let result = calculate_social_security(Decimal::from_str("1000.00").unwrap(), &rules, 1);
/// assert_eq!(result.deduction, Decimal::from_str("80.00").unwrap());
/// assert!(!result.cap_applied);
///
/// let result = calculate_social_security(Decimal::from_str("7000.00").unwrap(), &rules, 1);
/// assert_eq!(result.deduction, Decimal::from_str("500.00").unwrap());
/// assert!(result.cap_applied);
/// ```
pub fn calculate_social_security(
    gross: Decimal,
    rules: &RuleSet,
    step_number: u32,
) -> SocialSecurityResult {
    let rate = rules.social_security_rate();
    let cap = rules.social_security_cap();
    let uncapped = gross * rate;
    let cap_applied = uncapped > cap;
    let deduction = if cap_applied { cap } else { uncapped };

    let reasoning = if cap_applied {
        format!(
            "{} x {} = {} exceeds cap, deduction limited to {}",
            gross, rate, uncapped, cap
        )
    } else {
        format!("{} x {} = {}", gross, rate, uncapped)
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "social_security".to_string(),
        rule_name: "Social Security Contribution".to_string(),
        input: serde_json::json!({
            "gross": gross.to_string(),
            "rate": rate.to_string(),
            "cap": cap.to_string()
        }),
        output: serde_json::json!({
            "deduction": deduction.to_string(),
            "cap_applied": cap_applied
        }),
        reasoning,
    };

    SocialSecurityResult {
        deduction,
        cap_applied,
        audit_step,
    }
}

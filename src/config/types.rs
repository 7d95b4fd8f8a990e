//! Rule table types for net pay calculation.
//!
//! This module contains the immutable [`RuleSet`] that parameterizes every
//! calculation, its [`TaxBracket`]s, and the structures deserialized from
//! YAML rule table files.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Name used in validation errors for rule sets built in code.
const UNNAMED_RULE_SET: &str = "unnamed";

/// A single income tax bracket.
///
/// The rate applies to the *entire* gross pay when the gross falls within
/// the bracket; taxation is flat per bracket, not marginal. A bracket with
/// no upper bound is the open-ended top bracket.
///
/// # Example
///
/// ```
/// use net_pay_engine::config::TaxBracket;
/// use rust_decimal::Decimal;
///
/// let exempt = TaxBracket::up_to(Decimal::new(200000, 2), Decimal::ZERO);
/// assert!(exempt.contains(Decimal::new(200000, 2)));
/// assert!(!exempt.contains(Decimal::new(200001, 2)));
///
/// let top = TaxBracket::unbounded(Decimal::new(20, 2));
/// assert!(top.contains(Decimal::new(1_000_000_00, 2)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Inclusive upper bound of the bracket, `None` for the top bracket.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub upper_bound: Option<Decimal>,
    /// Flat rate applied to the whole gross pay, as a fraction.
    #[serde(with = "rust_decimal::serde::str")]
    pub rate: Decimal,
}

impl TaxBracket {
    /// Creates a bracket covering gross pay up to and including `upper_bound`.
    pub fn up_to(upper_bound: Decimal, rate: Decimal) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            rate,
        }
    }

    /// Creates the open-ended top bracket.
    pub fn unbounded(rate: Decimal) -> Self {
        Self {
            upper_bound: None,
            rate,
        }
    }

    /// Returns true if `gross` does not exceed this bracket's upper bound.
    ///
    /// A gross equal to the bound belongs to this bracket.
    pub fn contains(&self, gross: Decimal) -> bool {
        self.upper_bound.is_none_or(|bound| gross <= bound)
    }
}

/// When monetary amounts are rounded to cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingPolicy {
    /// Deductions keep full precision; only the net pay is rounded.
    #[default]
    FinalOnly,
    /// Each deduction is rounded before summation, then the net pay.
    PerDeduction,
}

/// The immutable set of rules a calculation is performed against.
///
/// Fields are private so a `RuleSet` cannot change once validated. Several
/// rule sets (for example, different tax years) can live side by side and
/// be shared between threads without locking.
///
/// # Example
///
/// ```
/// use net_pay_engine::config::RuleSet;
/// use rust_decimal::Decimal;
///
/// let rules = RuleSet::default();
/// assert_eq!(rules.social_security_rate(), Decimal::new(8, 2));
/// assert_eq!(rules.social_security_cap(), Decimal::new(50000, 2));
/// assert_eq!(rules.tax_brackets().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSet {
    social_security_rate: Decimal,
    social_security_cap: Decimal,
    transport_rate: Decimal,
    dependent_abatement_rate: Decimal,
    tax_brackets: Vec<TaxBracket>,
    rounding: RoundingPolicy,
}

impl RuleSet {
    /// Creates and validates a rule set using [`RoundingPolicy::FinalOnly`].
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRuleSet`] if any rate or the abatement
    /// rate lies outside `[0, 1]`, the cap is negative, or the brackets are
    /// empty, not strictly ascending, or do not end with exactly one
    /// unbounded bracket.
    pub fn new(
        social_security_rate: Decimal,
        social_security_cap: Decimal,
        transport_rate: Decimal,
        dependent_abatement_rate: Decimal,
        tax_brackets: Vec<TaxBracket>,
    ) -> EngineResult<Self> {
        Self::builder()
            .social_security_rate(social_security_rate)
            .social_security_cap(social_security_cap)
            .transport_rate(transport_rate)
            .dependent_abatement_rate(dependent_abatement_rate)
            .tax_brackets(tax_brackets)
            .build()
    }

    /// Returns a builder pre-populated with the default rule table.
    ///
    /// ```
    /// use net_pay_engine::config::RuleSet;
    /// use rust_decimal::Decimal;
    ///
    /// let rules = RuleSet::builder()
    ///     .social_security_rate(Decimal::new(16, 2))
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(rules.social_security_rate(), Decimal::new(16, 2));
    /// assert_eq!(rules.transport_rate(), Decimal::new(6, 2));
    /// ```
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::default()
    }

    /// Social-security rate as a fraction of gross pay.
    pub fn social_security_rate(&self) -> Decimal {
        self.social_security_rate
    }

    /// Maximum social-security deduction.
    pub fn social_security_cap(&self) -> Decimal {
        self.social_security_cap
    }

    /// Transportation-benefit rate as a fraction of gross pay.
    pub fn transport_rate(&self) -> Decimal {
        self.transport_rate
    }

    /// Income tax reduction per declared dependent, as a fraction of the tax.
    pub fn dependent_abatement_rate(&self) -> Decimal {
        self.dependent_abatement_rate
    }

    /// Tax brackets, ascending by upper bound, ending with the unbounded one.
    pub fn tax_brackets(&self) -> &[TaxBracket] {
        &self.tax_brackets
    }

    /// The rounding policy for monetary amounts.
    pub fn rounding(&self) -> RoundingPolicy {
        self.rounding
    }

    fn validate(&self, name: &str) -> EngineResult<()> {
        check_fraction(name, "social_security_rate", self.social_security_rate)?;
        check_fraction(name, "transport_rate", self.transport_rate)?;
        check_fraction(
            name,
            "dependent_abatement_rate",
            self.dependent_abatement_rate,
        )?;

        if self.social_security_cap < Decimal::ZERO {
            return Err(EngineError::invalid_rule_set(
                name,
                format!(
                    "social_security_cap must not be negative, got {}",
                    self.social_security_cap
                ),
            ));
        }

        let Some((top, lower)) = self.tax_brackets.split_last() else {
            return Err(EngineError::invalid_rule_set(
                name,
                "at least one tax bracket is required",
            ));
        };

        if top.upper_bound.is_some() {
            return Err(EngineError::invalid_rule_set(
                name,
                "the last tax bracket must be unbounded",
            ));
        }

        let mut previous: Option<Decimal> = None;
        for (index, bracket) in lower.iter().enumerate() {
            let Some(bound) = bracket.upper_bound else {
                return Err(EngineError::invalid_rule_set(
                    name,
                    format!(
                        "tax bracket {} is unbounded but is not the last bracket",
                        index + 1
                    ),
                ));
            };
            if previous.is_some_and(|prev| bound <= prev) {
                return Err(EngineError::invalid_rule_set(
                    name,
                    format!(
                        "tax bracket bounds must be strictly ascending ({} follows {})",
                        bound,
                        previous.unwrap_or_default()
                    ),
                ));
            }
            check_fraction(name, "tax bracket rate", bracket.rate)?;
            previous = Some(bound);
        }

        check_fraction(name, "tax bracket rate", top.rate)
    }
}

impl Default for RuleSet {
    /// The reference rule table: 8% social security capped at 500.00,
    /// 6% transport, 5% abatement per dependent, and brackets of
    /// 0% up to 2000.00, 10% up to 4000.00, 20% above.
    fn default() -> Self {
        Self {
            social_security_rate: Decimal::new(8, 2),
            social_security_cap: Decimal::new(50000, 2),
            transport_rate: Decimal::new(6, 2),
            dependent_abatement_rate: Decimal::new(5, 2),
            tax_brackets: vec![
                TaxBracket::up_to(Decimal::new(200000, 2), Decimal::new(0, 2)),
                TaxBracket::up_to(Decimal::new(400000, 2), Decimal::new(10, 2)),
                TaxBracket::unbounded(Decimal::new(20, 2)),
            ],
            rounding: RoundingPolicy::FinalOnly,
        }
    }
}

fn check_fraction(name: &str, field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(EngineError::invalid_rule_set(
            name,
            format!("{} must be between 0 and 1, got {}", field, value),
        ));
    }
    Ok(())
}

/// Builder for [`RuleSet`], starting from the default rule table.
///
/// Only the parameters that differ from the defaults need to be set.
#[derive(Debug, Clone)]
pub struct RuleSetBuilder {
    name: String,
    rules: RuleSet,
}

impl Default for RuleSetBuilder {
    fn default() -> Self {
        Self {
            name: UNNAMED_RULE_SET.to_string(),
            rules: RuleSet::default(),
        }
    }
}

impl RuleSetBuilder {
    /// Sets the name reported in validation errors.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the social-security rate.
    pub fn social_security_rate(mut self, rate: Decimal) -> Self {
        self.rules.social_security_rate = rate;
        self
    }

    /// Sets the social-security cap.
    pub fn social_security_cap(mut self, cap: Decimal) -> Self {
        self.rules.social_security_cap = cap;
        self
    }

    /// Sets the transportation-benefit rate.
    pub fn transport_rate(mut self, rate: Decimal) -> Self {
        self.rules.transport_rate = rate;
        self
    }

    /// Sets the per-dependent abatement rate.
    pub fn dependent_abatement_rate(mut self, rate: Decimal) -> Self {
        self.rules.dependent_abatement_rate = rate;
        self
    }

    /// Replaces the tax brackets.
    pub fn tax_brackets(mut self, brackets: Vec<TaxBracket>) -> Self {
        self.rules.tax_brackets = brackets;
        self
    }

    /// Sets the rounding policy.
    pub fn rounding(mut self, rounding: RoundingPolicy) -> Self {
        self.rules.rounding = rounding;
        self
    }

    /// Validates and returns the rule set.
    pub fn build(self) -> EngineResult<RuleSet> {
        self.rules.validate(&self.name)?;
        Ok(self.rules)
    }
}

/// A rule table as written in a YAML file.
///
/// Decimal values must be quoted strings so they are parsed from their
/// exact textual form.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleSetConfig {
    /// Unique name used to select the rule table.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Social-security rate as a fraction.
    #[serde(with = "rust_decimal::serde::str")]
    pub social_security_rate: Decimal,
    /// Social-security cap.
    #[serde(with = "rust_decimal::serde::str")]
    pub social_security_cap: Decimal,
    /// Transportation-benefit rate as a fraction.
    #[serde(with = "rust_decimal::serde::str")]
    pub transport_rate: Decimal,
    /// Abatement per dependent as a fraction of the tax.
    #[serde(with = "rust_decimal::serde::str")]
    pub dependent_abatement_rate: Decimal,
    /// Rounding policy, defaults to final-only.
    #[serde(default)]
    pub rounding: RoundingPolicy,
    /// Tax brackets in ascending order.
    pub tax_brackets: Vec<TaxBracket>,
}

impl RuleSetConfig {
    /// Validates the file contents and converts them into a [`RuleSetEntry`].
    pub fn into_entry(self) -> EngineResult<RuleSetEntry> {
        let rules = RuleSet::builder()
            .name(self.name.clone())
            .social_security_rate(self.social_security_rate)
            .social_security_cap(self.social_security_cap)
            .transport_rate(self.transport_rate)
            .dependent_abatement_rate(self.dependent_abatement_rate)
            .tax_brackets(self.tax_brackets)
            .rounding(self.rounding)
            .build()?;

        Ok(RuleSetEntry {
            name: self.name,
            description: self.description,
            rules: Arc::new(rules),
        })
    }
}

/// A loaded, named rule set.
#[derive(Debug, Clone)]
pub struct RuleSetEntry {
    /// The rule table name.
    pub name: String,
    /// The rule table description.
    pub description: String,
    /// The validated rules, shared with calculators.
    pub rules: Arc<RuleSet>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_default_rule_table_values() {
        let rules = RuleSet::default();

        assert_eq!(rules.social_security_rate(), dec("0.08"));
        assert_eq!(rules.social_security_cap(), dec("500.00"));
        assert_eq!(rules.transport_rate(), dec("0.06"));
        assert_eq!(rules.dependent_abatement_rate(), dec("0.05"));
        assert_eq!(rules.rounding(), RoundingPolicy::FinalOnly);
        assert_eq!(
            rules.tax_brackets(),
            &[
                TaxBracket::up_to(dec("2000.00"), dec("0.00")),
                TaxBracket::up_to(dec("4000.00"), dec("0.10")),
                TaxBracket::unbounded(dec("0.20")),
            ]
        );
    }

    #[test]
    fn test_default_rule_table_passes_validation() {
        assert!(RuleSet::default().validate("default").is_ok());
    }

    #[test]
    fn test_default_values_keep_textual_scale() {
        let rules = RuleSet::default();
        assert_eq!(rules.social_security_cap().to_string(), "500.00");
        assert_eq!(rules.social_security_rate().to_string(), "0.08");
    }

    #[test]
    fn test_new_builds_equivalent_of_default() {
        let rules = RuleSet::new(
            dec("0.08"),
            dec("500.00"),
            dec("0.06"),
            dec("0.05"),
            vec![
                TaxBracket::up_to(dec("2000.00"), dec("0.00")),
                TaxBracket::up_to(dec("4000.00"), dec("0.10")),
                TaxBracket::unbounded(dec("0.20")),
            ],
        )
        .unwrap();

        assert_eq!(rules, RuleSet::default());
    }

    #[test]
    fn test_builder_overrides_single_parameter() {
        let rules = RuleSet::builder()
            .social_security_rate(dec("0.16"))
            .build()
            .unwrap();

        assert_eq!(rules.social_security_rate(), dec("0.16"));
        assert_eq!(rules.social_security_cap(), dec("500.00"));
        assert_eq!(rules.tax_brackets().len(), 3);
    }

    #[test]
    fn test_rate_above_one_is_rejected() {
        let result = RuleSet::builder().transport_rate(dec("1.5")).build();

        match result {
            Err(EngineError::InvalidRuleSet { name, message }) => {
                assert_eq!(name, "unnamed");
                assert!(message.contains("transport_rate"));
            }
            other => panic!("Expected InvalidRuleSet, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_rate_is_rejected() {
        let result = RuleSet::builder()
            .dependent_abatement_rate(dec("-0.05"))
            .build();
        assert!(matches!(result, Err(EngineError::InvalidRuleSet { .. })));
    }

    #[test]
    fn test_negative_cap_is_rejected() {
        let result = RuleSet::builder()
            .social_security_cap(dec("-1"))
            .name("broken")
            .build();

        match result {
            Err(EngineError::InvalidRuleSet { name, message }) => {
                assert_eq!(name, "broken");
                assert!(message.contains("social_security_cap"));
            }
            other => panic!("Expected InvalidRuleSet, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_brackets_are_rejected() {
        let result = RuleSet::builder().tax_brackets(vec![]).build();
        assert!(matches!(result, Err(EngineError::InvalidRuleSet { .. })));
    }

    #[test]
    fn test_bounded_top_bracket_is_rejected() {
        let result = RuleSet::builder()
            .tax_brackets(vec![
                TaxBracket::up_to(dec("2000.00"), dec("0.00")),
                TaxBracket::up_to(dec("4000.00"), dec("0.10")),
            ])
            .build();

        match result {
            Err(EngineError::InvalidRuleSet { message, .. }) => {
                assert!(message.contains("must be unbounded"));
            }
            other => panic!("Expected InvalidRuleSet, got {:?}", other),
        }
    }

    #[test]
    fn test_unbounded_middle_bracket_is_rejected() {
        let result = RuleSet::builder()
            .tax_brackets(vec![
                TaxBracket::unbounded(dec("0.10")),
                TaxBracket::unbounded(dec("0.20")),
            ])
            .build();

        match result {
            Err(EngineError::InvalidRuleSet { message, .. }) => {
                assert!(message.contains("tax bracket 1"));
            }
            other => panic!("Expected InvalidRuleSet, got {:?}", other),
        }
    }

    #[test]
    fn test_descending_brackets_are_rejected() {
        let result = RuleSet::builder()
            .tax_brackets(vec![
                TaxBracket::up_to(dec("4000.00"), dec("0.10")),
                TaxBracket::up_to(dec("2000.00"), dec("0.00")),
                TaxBracket::unbounded(dec("0.20")),
            ])
            .build();

        match result {
            Err(EngineError::InvalidRuleSet { message, .. }) => {
                assert!(message.contains("strictly ascending"));
            }
            other => panic!("Expected InvalidRuleSet, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_bracket_bounds_are_rejected() {
        let result = RuleSet::builder()
            .tax_brackets(vec![
                TaxBracket::up_to(dec("2000.00"), dec("0.00")),
                TaxBracket::up_to(dec("2000"), dec("0.10")),
                TaxBracket::unbounded(dec("0.20")),
            ])
            .build();
        assert!(matches!(result, Err(EngineError::InvalidRuleSet { .. })));
    }

    #[test]
    fn test_single_unbounded_bracket_is_valid() {
        let rules = RuleSet::builder()
            .tax_brackets(vec![TaxBracket::unbounded(dec("0.15"))])
            .build()
            .unwrap();
        assert_eq!(rules.tax_brackets().len(), 1);
    }

    #[test]
    fn test_bracket_contains_is_inclusive_at_bound() {
        let bracket = TaxBracket::up_to(dec("2000.00"), dec("0.00"));
        assert!(bracket.contains(dec("2000.00")));
        assert!(bracket.contains(dec("2000")));
        assert!(!bracket.contains(dec("2000.01")));
    }

    #[test]
    fn test_rounding_policy_serialization() {
        assert_eq!(
            serde_json::to_string(&RoundingPolicy::FinalOnly).unwrap(),
            "\"final_only\""
        );
        assert_eq!(
            serde_json::to_string(&RoundingPolicy::PerDeduction).unwrap(),
            "\"per_deduction\""
        );
    }

    #[test]
    fn test_rule_set_config_from_yaml() {
        let yaml = r#"
name: test
social_security_rate: "0.08"
social_security_cap: "500.00"
transport_rate: "0.06"
dependent_abatement_rate: "0.05"
rounding: per_deduction
tax_brackets:
  - upper_bound: "2000.00"
    rate: "0.00"
  - rate: "0.10"
"#;
        let config: RuleSetConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.description, "");

        let entry = config.into_entry().unwrap();
        assert_eq!(entry.name, "test");
        assert_eq!(entry.rules.rounding(), RoundingPolicy::PerDeduction);
        assert_eq!(
            entry.rules.tax_brackets()[1],
            TaxBracket::unbounded(dec("0.10"))
        );
    }

    #[test]
    fn test_rule_set_config_reports_its_name_on_invalid_values() {
        let yaml = r#"
name: bad_table
social_security_rate: "0.08"
social_security_cap: "500.00"
transport_rate: "0.06"
dependent_abatement_rate: "0.05"
tax_brackets:
  - upper_bound: "2000.00"
    rate: "0.00"
"#;
        let config: RuleSetConfig = serde_yaml::from_str(yaml).unwrap();
        match config.into_entry() {
            Err(EngineError::InvalidRuleSet { name, .. }) => assert_eq!(name, "bad_table"),
            other => panic!("Expected InvalidRuleSet, got {:?}", other),
        }
    }

    #[test]
    fn test_rule_set_serializes_brackets_with_null_top_bound() {
        let json = serde_json::to_value(RuleSet::default()).unwrap();
        assert_eq!(json["social_security_cap"], "500.00");
        assert_eq!(json["tax_brackets"][0]["upper_bound"], "2000.00");
        assert!(json["tax_brackets"][2]["upper_bound"].is_null());
        assert_eq!(json["rounding"], "final_only");
    }
}

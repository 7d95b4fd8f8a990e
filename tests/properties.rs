//! Property tests for the net pay pipeline against the default rule table.

use proptest::prelude::*;
use rust_decimal::Decimal;

use net_pay_engine::calculation::{PayrollCalculator, calculate_net_pay, round_money};
use net_pay_engine::error::EngineError;

fn cents(value: i64) -> Decimal {
    Decimal::new(value, 2)
}

fn gross_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=2_000_000_00).prop_map(cents)
}

proptest! {
    #[test]
    fn non_positive_gross_is_rejected(value in -1_000_000_00i64..=0) {
        let result = calculate_net_pay(cents(value), 0, false);
        let is_gross_error = matches!(result, Err(EngineError::InvalidInput { ref field, .. }) if field == "gross");
        prop_assert!(is_gross_error);
    }

    #[test]
    fn negative_dependents_are_rejected(gross in gross_strategy(), dependents in i64::MIN..0) {
        let result = calculate_net_pay(gross, dependents, false);
        let is_dependents_error = matches!(result, Err(EngineError::InvalidInput { ref field, .. }) if field == "dependents");
        prop_assert!(is_dependents_error);
    }

    #[test]
    fn social_security_is_capped_percentage(gross in gross_strategy()) {
        let result = PayrollCalculator::default().calculate(gross, 0, false).unwrap();
        let expected = (gross * Decimal::new(8, 2)).min(Decimal::new(50000, 2));

        prop_assert_eq!(result.deductions.social_security, expected);
        prop_assert!(result.deductions.social_security <= Decimal::new(50000, 2));
    }

    #[test]
    fn base_tax_follows_brackets(gross in gross_strategy()) {
        let result = PayrollCalculator::default().calculate(gross, 0, false).unwrap();
        let rate = if gross <= Decimal::new(200000, 2) {
            Decimal::ZERO
        } else if gross <= Decimal::new(400000, 2) {
            Decimal::new(10, 2)
        } else {
            Decimal::new(20, 2)
        };

        prop_assert_eq!(result.deductions.income_tax_base, gross * rate);
    }

    #[test]
    fn abatement_never_increases_tax(gross in gross_strategy(), dependents in 0i64..40) {
        let calculator = PayrollCalculator::default();
        let fewer = calculator.calculate(gross, dependents, false).unwrap();
        let more = calculator.calculate(gross, dependents + 1, false).unwrap();

        prop_assert!(more.deductions.income_tax <= fewer.deductions.income_tax);
        prop_assert!(more.deductions.income_tax >= Decimal::ZERO);
    }

    #[test]
    fn tax_is_zero_once_abatement_reaches_one_hundred_percent(gross in gross_strategy(), dependents in 20i64..1000) {
        let result = PayrollCalculator::default().calculate(gross, dependents, false).unwrap();
        prop_assert_eq!(result.deductions.income_tax, Decimal::ZERO);
    }

    #[test]
    fn net_pay_has_exactly_two_decimal_places(gross in gross_strategy(), dependents in 0i64..30, transport in any::<bool>()) {
        let net = calculate_net_pay(gross, dependents, transport).unwrap();
        prop_assert_eq!(net.scale(), 2);
    }

    #[test]
    fn net_pay_is_rounded_exact_difference(gross in gross_strategy(), dependents in 0i64..30, transport in any::<bool>()) {
        let result = PayrollCalculator::default().calculate(gross, dependents, transport).unwrap();
        let exact = gross - result.deductions.total;

        prop_assert_eq!(result.net_pay, round_money(exact));
        prop_assert!((result.net_pay - exact).abs() <= Decimal::new(5, 3));
    }

    #[test]
    fn identical_inputs_give_identical_results(gross in gross_strategy(), dependents in 0i64..30, transport in any::<bool>()) {
        let calculator = PayrollCalculator::default();
        let first = calculator.calculate(gross, dependents, transport).unwrap();
        let second = calculator.calculate(gross, dependents, transport).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn transport_costs_six_percent(gross in gross_strategy()) {
        let calculator = PayrollCalculator::default();
        let without = calculator.calculate(gross, 0, false).unwrap();
        let with = calculator.calculate(gross, 0, true).unwrap();

        prop_assert_eq!(
            with.deductions.total - without.deductions.total,
            gross * Decimal::new(6, 2)
        );
    }
}

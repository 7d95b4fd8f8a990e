//! Calculation logic for the Net Pay Engine.
//!
//! This module contains the deduction steps, each returning its value with
//! an audit step: the capped social-security contribution, the bracket
//! based income tax, dependent abatement of that tax, the optional
//! transportation-benefit deduction, and rounding of the net pay. The
//! [`PayrollCalculator`] runs them as one pipeline.

mod calculator;
mod dependent_abatement;
mod income_tax;
mod rounding;
mod social_security;
mod transport;

pub use calculator::{PayrollCalculator, calculate_net_pay};
pub use dependent_abatement::{DependentAbatementResult, apply_dependent_abatement};
pub use income_tax::{BaseIncomeTaxResult, calculate_base_income_tax, find_tax_bracket};
pub use rounding::{
    MONEY_DECIMAL_PLACES, NetPayResult, round_deduction, round_money, settle_net_pay,
};
pub use social_security::{SocialSecurityResult, calculate_social_security};
pub use transport::{TransportDeductionResult, calculate_transport_deduction};

//! Core data models for the Net Pay Engine.
//!
//! This module contains the validated calculation input and the result
//! types returned by the calculation pipeline.

mod payroll_input;
mod payroll_result;

pub use payroll_input::{MAX_GROSS, PayrollInput};
pub use payroll_result::{AuditStep, AuditTrace, AuditWarning, DeductionBreakdown, PayrollResult};

//! Net Pay Engine
//!
//! This crate computes an employee's net pay from gross pay by applying a
//! capped social-security contribution, a bracket based income tax reduced
//! per dependent, and an optional transportation-benefit deduction, all in
//! exact decimal arithmetic against a pluggable rule table.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;

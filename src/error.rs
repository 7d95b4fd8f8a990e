//! Error types for the Net Pay Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading rule tables or
//! calculating net pay.

use thiserror::Error;

/// The main error type for the Net Pay Engine.
///
/// The calculation core only ever produces [`EngineError::InvalidInput`];
/// the remaining variants belong to the rule-table configuration layer.
///
/// # Example
///
/// ```
/// use net_pay_engine::error::EngineError;
///
/// let error = EngineError::InvalidInput {
///     field: "gross".to_string(),
///     message: "must be greater than zero".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid input 'gross': must be greater than zero");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A calculation input failed validation. No deduction was computed.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The input field that was rejected.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Configuration file or directory was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A rule table parsed correctly but its values are inconsistent.
    #[error("Invalid rule set '{name}': {message}")]
    InvalidRuleSet {
        /// The name of the rule set.
        name: String,
        /// A description of the inconsistency.
        message: String,
    },

    /// No rule set with the requested name has been loaded.
    #[error("Rule set not found: {name}")]
    RuleSetNotFound {
        /// The rule set name that was requested.
        name: String,
    },
}

impl EngineError {
    /// Shorthand for building an [`EngineError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for building an [`EngineError::InvalidRuleSet`].
    pub fn invalid_rule_set(name: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidRuleSet {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

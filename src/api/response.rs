//! Response types for the Net Pay Engine API.
//!
//! This module defines the success envelope, the rule table listing, and
//! the error response structures for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{RuleSet, RuleSetEntry};
use crate::error::EngineError;
use crate::models::PayrollResult;

/// Successful response body of the `/calculate` endpoint.
///
/// The envelope carries per-request metadata; `result` itself is a pure
/// function of the request and the rule table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The caller supplied employee identifier, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    /// The rule table that was applied.
    pub rule_set: String,
    /// Calculation time in microseconds.
    pub duration_us: u64,
    /// The calculation result.
    pub result: PayrollResult,
}

/// One entry of the `/rule-sets` listing.
#[derive(Debug, Clone, Serialize)]
pub struct RuleSetSummary {
    /// The rule table name.
    pub name: String,
    /// The rule table description.
    pub description: String,
    /// The rules themselves.
    pub rules: RuleSet,
}

impl From<&RuleSetEntry> for RuleSetSummary {
    fn from(entry: &RuleSetEntry) -> Self {
        Self {
            name: entry.name.clone(),
            description: entry.description.clone(),
            rules: (*entry.rules).clone(),
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates an invalid input error response.
    pub fn invalid_input(field: &str, message: &str) -> Self {
        Self::with_details(
            "INVALID_INPUT",
            format!("Invalid input '{}': {}", field, message),
            format!("The '{}' field was rejected before any deduction was computed", field),
        )
    }

    /// Creates a rule set not found error response.
    pub fn rule_set_not_found(name: &str) -> Self {
        Self::with_details(
            "RULE_SET_NOT_FOUND",
            format!("Rule set not found: {}", name),
            format!("No rule table named '{}' is loaded by this engine", name),
        )
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::InvalidInput { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::invalid_input(&field, &message),
            },
            EngineError::RuleSetNotFound { name } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::rule_set_not_found(&name),
            },
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidRuleSet { name, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Invalid rule set",
                    format!("Rule set '{}': {}", name, message),
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_invalid_input_maps_to_bad_request() {
        let api_error: ApiErrorResponse =
            EngineError::invalid_input("gross", "must be greater than zero, got 0").into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_INPUT");
        assert!(api_error.error.message.contains("gross"));
    }

    #[test]
    fn test_rule_set_not_found_maps_to_bad_request() {
        let api_error: ApiErrorResponse = EngineError::RuleSetNotFound {
            name: "2031".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "RULE_SET_NOT_FOUND");
        assert!(api_error.error.message.contains("2031"));
    }

    #[test]
    fn test_config_errors_map_to_internal_error() {
        let api_error: ApiErrorResponse =
            EngineError::invalid_rule_set("default", "no tax brackets").into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
    }

    #[test]
    fn test_rule_set_summary_from_entry() {
        let entry = crate::config::ConfigLoader::with_defaults()
            .get_rule_set("default")
            .unwrap()
            .clone();
        let summary = RuleSetSummary::from(&entry);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["name"], "default");
        assert_eq!(json["rules"]["transport_rate"], "0.06");
    }
}

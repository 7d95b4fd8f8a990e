//! HTTP request handlers for the Net Pay Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::DEFAULT_RULE_SET;

use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse, CalculationResponse, RuleSetSummary};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/rule-sets", get(list_rule_sets_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Validates the request, applies the requested rule table, and returns the
/// net pay with its deduction breakdown.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    warn!(correlation_id = %correlation_id, "Missing JSON content type");
                    ApiError::new(
                        "MISSING_CONTENT_TYPE",
                        "Content-Type must be application/json",
                    )
                }
                other => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %other.body_text(),
                        "Unreadable request body"
                    );
                    ApiError::malformed_json("Failed to parse request body")
                }
            };
            return ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error,
            }
            .into_response();
        }
    };

    let request = match CalculationRequest::from_json(&body) {
        Ok(request) => request,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Request validation failed"
            );
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let rule_set = request
        .rule_set
        .clone()
        .unwrap_or_else(|| DEFAULT_RULE_SET.to_string());

    let calculator = match state.config().calculator(&rule_set) {
        Ok(calculator) => calculator,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                rule_set = %rule_set,
                "Rule set not found"
            );
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let start_time = Instant::now();
    let result = calculator.calculate_input(&request.input);
    let duration_us = start_time.elapsed().as_micros() as u64;

    info!(
        correlation_id = %correlation_id,
        employee_id = request.employee_id.as_deref().unwrap_or("-"),
        rule_set = %rule_set,
        net_pay = %result.net_pay,
        duration_us,
        "Calculation completed successfully"
    );

    let response = CalculationResponse {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        employee_id: request.employee_id,
        rule_set,
        duration_us,
        result,
    };

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(response),
    )
        .into_response()
}

/// Handler for GET /rule-sets endpoint.
///
/// Lists every loaded rule table with its parameters.
async fn list_rule_sets_handler(State(state): State<AppState>) -> Json<Vec<RuleSetSummary>> {
    let summaries = state
        .config()
        .rule_sets()
        .into_iter()
        .map(RuleSetSummary::from)
        .collect();
    Json(summaries)
}

//! HTTP API module for the Net Pay Engine.
//!
//! This module provides the REST API endpoints for calculating net pay
//! and listing the loaded rule tables.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::CalculationRequest;
pub use response::{ApiError, CalculationResponse, RuleSetSummary};
pub use state::AppState;

//! Response types for the Payslip Engine API.
//!
//! This module defines the success envelopes, the error response structures,
//! and the mapping from engine errors to HTTP statuses.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::SalaryCycle;

/// Version reported in every calculation envelope.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Wraps a computed payslip with request metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationEnvelope<T> {
    /// Identifier of this calculation, also used as the log correlation id.
    pub calculation_id: Uuid,
    /// When the response was produced.
    pub generated_at: DateTime<Utc>,
    /// Engine version that produced the payslip.
    pub engine_version: String,
    /// The payslip.
    pub payslip: T,
}

impl<T> CalculationEnvelope<T> {
    /// Wraps `payslip`, stamping it with the current time.
    pub fn new(calculation_id: Uuid, payslip: T) -> Self {
        Self {
            calculation_id,
            generated_at: Utc::now(),
            engine_version: ENGINE_VERSION.to_string(),
            payslip,
        }
    }
}

/// Response body for `/cycles` and `/cycles/recent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CyclesResponse {
    /// Start day the cycles were built with.
    pub cycle_start_day: u32,
    /// The cycles, oldest first.
    pub cycles: Vec<SalaryCycle>,
}

/// Response body for `/cycles/current`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentCycleResponse {
    /// Start day the cycle was built with.
    pub cycle_start_day: u32,
    /// The date the cycle was resolved for.
    pub today: NaiveDate,
    /// The active cycle.
    pub cycle: SalaryCycle,
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

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
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

impl ApiErrorResponse {
    /// A 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
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
            EngineError::InvalidCycle { message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_CYCLE",
                    format!("Invalid salary cycle: {}", message),
                    "Cycle start days must be between 1 and 28 and months between 1 and 12",
                ),
            },
            EngineError::CalculationError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            },
        }
    }
}

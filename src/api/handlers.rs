//! HTTP request handlers for the Payslip Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    calculate_pay_slip, current_salary_cycle, generate_payslip_from_entries, last_n_cycles,
    yearly_salary_cycles,
};
use crate::models::PaySlipInput;

use super::request::{
    CurrentCycleQuery, GeneratePayslipRequest, MAX_RECENT_CYCLES, RecentCyclesQuery,
    YearlyCyclesQuery,
};
use super::response::{
    ApiError, ApiErrorResponse, CalculationEnvelope, CurrentCycleResponse, CyclesResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payslip/calculate", post(calculate_handler))
        .route("/payslip/generate", post(generate_handler))
        .route("/cycles", get(yearly_cycles_handler))
        .route("/cycles/recent", get(recent_cycles_handler))
        .route("/cycles/current", get(current_cycle_handler))
        .with_state(state)
}

fn json_ok<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Maps a JSON body rejection to an API error.
fn json_rejection_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

fn query_rejection_error(rejection: QueryRejection) -> ApiErrorResponse {
    warn!(error = %rejection.body_text(), "Invalid query string");
    ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
}

/// Handler for POST /payslip/calculate.
///
/// Accepts a [`PaySlipInput`] and returns the itemized payslip.
async fn calculate_handler(
    payload: Result<Json<PaySlipInput>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payslip calculation request");

    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => {
            return ApiErrorResponse::bad_request(json_rejection_error(rejection, correlation_id))
                .into_response();
        }
    };

    if let (Some(join), Some(leave)) = (input.join_date, input.leave_date) {
        if leave < join {
            warn!(correlation_id = %correlation_id, %join, %leave, "Leave date before join date");
            return ApiErrorResponse::bad_request(ApiError::with_details(
                "VALIDATION_ERROR",
                format!("leave_date {} is before join_date {}", leave, join),
                "An employee cannot leave before joining",
            ))
            .into_response();
        }
    }

    let start_time = Instant::now();
    match calculate_pay_slip(&input) {
        Ok(payslip) => {
            info!(
                correlation_id = %correlation_id,
                cycle = %input.cycle,
                gross = %payslip.gross_earnings,
                net = %payslip.net_salary,
                duration_us = start_time.elapsed().as_micros(),
                "Payslip calculated"
            );
            json_ok(CalculationEnvelope::new(correlation_id, payslip))
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Payslip calculation failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /payslip/generate.
///
/// Generates a payslip from time entries. The loaded payment configuration
/// and the current cycle fill in whatever the request omits.
async fn generate_handler(
    State(state): State<AppState>,
    payload: Result<Json<GeneratePayslipRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payslip generation request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return ApiErrorResponse::bad_request(json_rejection_error(rejection, correlation_id))
                .into_response();
        }
    };

    let config = request
        .payment_config
        .unwrap_or_else(|| state.config().payment_config().clone());

    let cycle = match request.cycle {
        Some(cycle) => cycle,
        None => match current_salary_cycle(config.cycle_start_day, state.today()) {
            Ok(cycle) => cycle,
            Err(err) => {
                warn!(correlation_id = %correlation_id, error = %err, "Cycle resolution failed");
                return ApiErrorResponse::from(err).into_response();
            }
        },
    };

    let start_time = Instant::now();
    match generate_payslip_from_entries(
        &request.salary,
        &config,
        &cycle,
        &request.entries,
        &request.user_id,
    ) {
        Ok(data) => {
            info!(
                correlation_id = %correlation_id,
                user_id = %data.user_id,
                cycle = %cycle,
                entries = request.entries.len(),
                net = %data.payslip.net_salary,
                duration_us = start_time.elapsed().as_micros(),
                "Payslip generated"
            );
            json_ok(CalculationEnvelope::new(correlation_id, data))
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Payslip generation failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /cycles.
async fn yearly_cycles_handler(
    State(state): State<AppState>,
    query: Result<Query<YearlyCyclesQuery>, QueryRejection>,
) -> impl IntoResponse {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection_error(rejection).into_response(),
    };
    let cycle_start_day = query
        .cycle_start_day
        .unwrap_or(state.config().payment_config().cycle_start_day);

    match yearly_salary_cycles(query.year, cycle_start_day) {
        Ok(cycles) => json_ok(CyclesResponse {
            cycle_start_day,
            cycles,
        }),
        Err(err) => {
            warn!(year = query.year, cycle_start_day, error = %err, "Yearly cycles failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /cycles/recent.
async fn recent_cycles_handler(
    State(state): State<AppState>,
    query: Result<Query<RecentCyclesQuery>, QueryRejection>,
) -> impl IntoResponse {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection_error(rejection).into_response(),
    };
    if !(1..=MAX_RECENT_CYCLES).contains(&query.count) {
        return ApiErrorResponse::bad_request(ApiError::validation_error(format!(
            "count must be between 1 and {}",
            MAX_RECENT_CYCLES
        )))
        .into_response();
    }
    let cycle_start_day = query
        .cycle_start_day
        .unwrap_or(state.config().payment_config().cycle_start_day);

    match last_n_cycles(query.count, cycle_start_day, state.today()) {
        Ok(cycles) => json_ok(CyclesResponse {
            cycle_start_day,
            cycles,
        }),
        Err(err) => {
            warn!(count = query.count, cycle_start_day, error = %err, "Recent cycles failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /cycles/current.
async fn current_cycle_handler(
    State(state): State<AppState>,
    query: Result<Query<CurrentCycleQuery>, QueryRejection>,
) -> impl IntoResponse {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection_error(rejection).into_response(),
    };
    let cycle_start_day = query
        .cycle_start_day
        .unwrap_or(state.config().payment_config().cycle_start_day);
    let today = state.today();

    match current_salary_cycle(cycle_start_day, today) {
        Ok(cycle) => json_ok(CurrentCycleResponse {
            cycle_start_day,
            today,
            cycle,
        }),
        Err(err) => {
            warn!(cycle_start_day, error = %err, "Current cycle failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::PaySlipOutput;
    use axum::{body::Body, http::Request};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/default").expect("Failed to load config");
        AppState::new(config).with_today(NaiveDate::from_ymd_opt(2024, 5, 20).unwrap())
    }

    fn json_post(uri: &str, body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(body.into())
            .unwrap()
    }

    async fn body_bytes(response: Response) -> axum::body::Bytes {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_calculate_valid_request_returns_200() {
        let router = create_router(create_test_state());
        let body = r#"{
            "salary_amount": "30000",
            "cycle": { "start_date": "2024-05-01", "end_date": "2024-05-31" }
        }"#;

        let response = router.oneshot(json_post("/payslip/calculate", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let envelope: CalculationEnvelope<PaySlipOutput> =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(envelope.payslip.net_salary, Decimal::new(30000, 0));
        assert_eq!(envelope.engine_version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(json_post("/payslip/calculate", "{invalid json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_field_returns_validation_error() {
        let router = create_router(create_test_state());
        let body = r#"{ "salary_amount": "30000" }"#;

        let response = router.oneshot(json_post("/payslip/calculate", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("cycle"));
    }

    #[tokio::test]
    async fn test_leave_before_join_returns_validation_error() {
        let router = create_router(create_test_state());
        let body = r#"{
            "salary_amount": "30000",
            "cycle": { "start_date": "2024-05-01", "end_date": "2024-05-31" },
            "join_date": "2024-05-20",
            "leave_date": "2024-05-10"
        }"#;

        let response = router.oneshot(json_post("/payslip/calculate", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_current_cycle_uses_pinned_today() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/cycles/current?cycle_start_day=19")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let current: CurrentCycleResponse =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(current.cycle.start_date.to_string(), "2024-05-19");
        assert_eq!(current.cycle.end_date.to_string(), "2024-06-18");
    }

    #[tokio::test]
    async fn test_invalid_start_day_returns_invalid_cycle() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/cycles?year=2024&cycle_start_day=31")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "INVALID_CYCLE");
    }
}

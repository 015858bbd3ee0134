//! HTTP API module for the Payslip Engine.
//!
//! This module provides REST endpoints for calculating payslips and
//! resolving salary cycles.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CurrentCycleQuery, GeneratePayslipRequest, MAX_RECENT_CYCLES, RecentCyclesQuery,
    YearlyCyclesQuery,
};
pub use response::{ApiError, CalculationEnvelope, CurrentCycleResponse, CyclesResponse};
pub use state::AppState;

//! Request types for the Payslip Engine API.
//!
//! `POST /payslip/calculate` takes a [`PaySlipInput`](crate::models::PaySlipInput)
//! directly. The types here cover the attendance-driven endpoint and the
//! cycle query strings.

use serde::{Deserialize, Serialize};

use crate::models::{PaymentConfig, SalaryCycle, SalaryRecord, TimeEntry};

/// Largest number of cycles `/cycles/recent` returns.
pub const MAX_RECENT_CYCLES: usize = 120;

/// Request body for the `/payslip/generate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratePayslipRequest {
    /// The user the payslip is for.
    pub user_id: String,
    /// The user's salary record.
    pub salary: SalaryRecord,
    /// Payment configuration; the server's loaded configuration when omitted.
    #[serde(default)]
    pub payment_config: Option<PaymentConfig>,
    /// The cycle to pay; the current cycle when omitted.
    #[serde(default)]
    pub cycle: Option<SalaryCycle>,
    /// Time entries recorded in the cycle.
    #[serde(default)]
    pub entries: Vec<TimeEntry>,
}

/// Query string for `GET /cycles`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearlyCyclesQuery {
    /// Calendar year.
    pub year: i32,
    /// Cycle start day; the configured one when omitted.
    #[serde(default)]
    pub cycle_start_day: Option<u32>,
}

/// Query string for `GET /cycles/recent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentCyclesQuery {
    /// Number of cycles, including the current one.
    #[serde(default = "default_recent_count")]
    pub count: usize,
    /// Cycle start day; the configured one when omitted.
    #[serde(default)]
    pub cycle_start_day: Option<u32>,
}

fn default_recent_count() -> usize {
    6
}

/// Query string for `GET /cycles/current`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrentCycleQuery {
    /// Cycle start day; the configured one when omitted.
    #[serde(default)]
    pub cycle_start_day: Option<u32>,
}

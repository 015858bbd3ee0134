//! Payslip Engine for time-tracked salaries
//!
//! This crate computes payslips for fixed monthly, daily-wage and hourly
//! salaries over calendar-month or custom-start-day pay cycles. It resolves
//! cycles, classifies working days under configurable Saturday policies,
//! analyzes attendance from raw time entries, and produces itemized earnings
//! and deductions with an audit trail of every rule applied.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;

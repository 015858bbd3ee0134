//! Calculation logic for the Payslip Engine.
//!
//! This module contains the salary cycle resolver, the working-day calendar,
//! the attendance analyzer, and the two payslip entry points: the
//! configuration-driven [`calculate_pay_slip`] and the attendance-driven
//! [`generate_payslip_from_entries`]. Every function here is a pure transform;
//! the current date is always passed in.

mod attendance;
mod payslip;
mod payslip_from_entries;
mod rounding;
mod salary_cycle;
mod working_days;

pub use attendance::{TimeEntryAnalysis, analyze_time_entries, group_entries_by_date};
pub use payslip::{CALENDAR_MONTH_DAYS, calculate_overtime_pay, calculate_pay_slip};
pub use payslip_from_entries::generate_payslip_from_entries;
pub use rounding::{MONEY_DECIMAL_PLACES, round_money};
pub use salary_cycle::{
    MAX_CYCLE_START_DAY, create_monthly_cycle, current_salary_cycle, cycle_containing,
    last_n_cycles, yearly_salary_cycles,
};
pub use working_days::{
    WorkingDaysSummary, calculate_working_days, classify_date, is_off_day,
    nth_weekday_of_month, working_day_factor,
};

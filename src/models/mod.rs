//! Core data models for the Payslip Engine.
//!
//! Every type here is an immutable value built fresh for each calculation.

mod audit;
mod pay_components;
mod payslip;
mod salary_cycle;
mod time_entry;
mod working_days;

pub use audit::{AuditStep, AuditTrail};
pub use pay_components::{
    AllowanceConfig, BonusConfig, DeductionConfig, ExtraItem, LeaveConfig, OvertimeRules,
    PayType, PaymentConfig, RateBasis, SalaryRecord,
};
pub use payslip::{
    AllowanceBreakdown, AttendanceSummary, BonusBreakdown, DeductionsBreakdown,
    EarningsBreakdown, LineItem, OvertimeBreakdown, PaySlipInput, PaySlipOutput, PayslipData,
    PeriodSummary,
};
pub use salary_cycle::SalaryCycle;
pub use time_entry::{LeaveType, TimeEntry};
pub use working_days::{DayClassification, SaturdayMode, WorkingDaysConfig};

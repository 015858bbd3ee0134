//! Payslip input and output models.
//!
//! [`PaySlipInput`] bundles everything the configuration-driven calculator
//! needs. [`PaySlipOutput`] is the itemized result shared by both entry points;
//! [`PayslipData`] wraps it with the user and attendance summary produced by
//! the attendance-driven path.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    AllowanceConfig, AuditStep, BonusConfig, DeductionConfig, LeaveConfig, OvertimeRules, PayType,
    RateBasis, SalaryCycle, WorkingDaysConfig,
};

/// Everything the configuration-driven calculation consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaySlipInput {
    /// The salary amount, interpreted according to `pay_type`.
    pub salary_amount: Decimal,
    /// How the salary is expressed.
    #[serde(default)]
    pub pay_type: PayType,
    /// Divisor strategy for fixed monthly salaries.
    #[serde(default)]
    pub rate_basis: RateBasis,
    /// The pay period.
    pub cycle: SalaryCycle,
    /// Working-day rules.
    #[serde(default)]
    pub working_days: WorkingDaysConfig,
    /// Leave taken in the cycle.
    #[serde(default)]
    pub leave: LeaveConfig,
    /// Overtime rules and hours.
    #[serde(default)]
    pub overtime: OvertimeRules,
    /// Deductions.
    #[serde(default)]
    pub deductions: DeductionConfig,
    /// Allowances.
    #[serde(default)]
    pub allowances: AllowanceConfig,
    /// Bonuses.
    #[serde(default)]
    pub bonuses: BonusConfig,
    /// First day of employment, when it falls inside the cycle.
    #[serde(default)]
    pub join_date: Option<NaiveDate>,
    /// Last day of employment, when it falls inside the cycle.
    #[serde(default)]
    pub leave_date: Option<NaiveDate>,
    /// Late arrivals in the cycle, for the late-arrival penalty.
    #[serde(default)]
    pub late_arrivals: u32,
    /// ISO 4217 currency code.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    crate::config::DEFAULT_CURRENCY.to_string()
}

/// A named amount on the payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Label shown on the payslip.
    pub description: String,
    /// The amount, rounded to 2 decimal places.
    pub amount: Decimal,
}

/// Day counts and ratios describing the period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// The pay period.
    pub cycle: SalaryCycle,
    /// Calendar days in the cycle.
    pub total_days: u32,
    /// Days inside the cycle between the join and leave dates.
    pub effective_days: u32,
    /// Working days in the effective period (half days count 0.5).
    pub working_days: Decimal,
    /// Off days in the effective period.
    pub weekly_offs: u32,
    /// Half working days in the effective period.
    pub half_days: u32,
    /// Share of the cycle actually employed, between 0 and 1.
    pub pro_rata_factor: Decimal,
    /// Days paid as worked (working days less unpaid days).
    pub days_worked: Decimal,
    /// Paid leave days.
    pub paid_leave_days: Decimal,
    /// Unpaid days, half days counting 0.5.
    pub unpaid_leave_days: Decimal,
}

/// Allowance lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceBreakdown {
    /// House rent allowance.
    pub hra: Decimal,
    /// Dearness allowance.
    pub da: Decimal,
    /// Transport allowance.
    pub transport: Decimal,
    /// Medical allowance.
    pub medical: Decimal,
    /// Special allowance.
    pub special: Decimal,
    /// Additional named allowances.
    pub others: Vec<LineItem>,
    /// Sum of all allowances.
    pub total: Decimal,
}

/// Overtime pay by tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeBreakdown {
    /// Regular overtime hours.
    pub regular_hours: Decimal,
    /// Regular overtime pay.
    pub regular_pay: Decimal,
    /// Off-day hours.
    pub weekend_hours: Decimal,
    /// Off-day overtime pay.
    pub weekend_pay: Decimal,
    /// Holiday hours.
    pub holiday_hours: Decimal,
    /// Holiday overtime pay.
    pub holiday_pay: Decimal,
    /// Sum of all tiers.
    pub total: Decimal,
}

/// Bonus lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusBreakdown {
    /// Performance bonus.
    pub performance: Decimal,
    /// Attendance bonus.
    pub attendance: Decimal,
    /// Additional named bonuses.
    pub others: Vec<LineItem>,
    /// Sum of all bonuses.
    pub total: Decimal,
}

/// Everything earned in the period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsBreakdown {
    /// Salary scaled by the pro-rata factor (fixed monthly only, otherwise 0).
    pub prorated_salary: Decimal,
    /// Derived daily rate.
    pub daily_rate: Decimal,
    /// Derived hourly rate.
    pub hourly_rate: Decimal,
    /// Amount withheld for unpaid days.
    pub unpaid_leave_deduction: Decimal,
    /// Base pay after unpaid days.
    pub base_pay: Decimal,
    /// Allowances.
    pub allowances: AllowanceBreakdown,
    /// Overtime.
    pub overtime: OvertimeBreakdown,
    /// Bonuses.
    pub bonuses: BonusBreakdown,
    /// Base pay plus allowances, overtime and bonuses.
    pub gross_earnings: Decimal,
}

/// Deduction lines, in the order they are applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionsBreakdown {
    /// Flat deduction.
    pub fixed: Decimal,
    /// Percentage-of-gross deduction.
    pub percentage: Decimal,
    /// Late-arrival penalties.
    pub late_arrival: Decimal,
    /// Professional tax.
    pub professional_tax: Decimal,
    /// Provident fund contribution.
    pub provident_fund: Decimal,
    /// Income tax.
    pub income_tax: Decimal,
    /// Health insurance premium.
    pub health_insurance: Decimal,
    /// Additional named deductions.
    pub others: Vec<LineItem>,
    /// Sum of all deductions.
    pub total: Decimal,
}

/// The itemized result of a payslip calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaySlipOutput {
    /// Period summary.
    pub period: PeriodSummary,
    /// Earnings.
    pub earnings: EarningsBreakdown,
    /// Deductions.
    pub deductions: DeductionsBreakdown,
    /// Gross earnings.
    pub gross_earnings: Decimal,
    /// Total deductions.
    pub total_deductions: Decimal,
    /// Net salary, never negative.
    pub net_salary: Decimal,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Ordered record of every rule applied.
    pub audit_trail: Vec<AuditStep>,
}

/// Attendance counters carried on an attendance-driven payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// Working dates walked in the cycle.
    pub expected_working_days: u32,
    /// Days with recorded work.
    pub days_worked: u32,
    /// Hours recorded on working days.
    pub total_hours_worked: Decimal,
    /// Hours beyond the daily threshold.
    pub overtime_hours: Decimal,
    /// Hours recorded on off days.
    pub weekend_hours: Decimal,
    /// Hours flagged as holiday work.
    pub holiday_hours: Decimal,
    /// Days starting after the expected start time.
    pub late_arrivals: u32,
    /// Short days.
    pub half_days: u32,
    /// Working days with no entries.
    pub absences: u32,
    /// Paid leave days.
    pub paid_leaves: u32,
    /// Unpaid leave days.
    pub unpaid_leaves: u32,
    /// Days worked over expected working days, capped at 1.
    pub attendance_ratio: Decimal,
}

/// An attendance-driven payslip for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipData {
    /// The user the payslip belongs to.
    pub user_id: String,
    /// The computed payslip.
    pub payslip: PaySlipOutput,
    /// The attendance statistics it was derived from.
    pub attendance: AttendanceSummary,
}

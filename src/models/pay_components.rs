//! Salary definitions and pay component configuration.
//!
//! This module holds the configuration-side value types consumed by the
//! payslip calculators: how the salary is expressed ([`PayType`], [`RateBasis`]),
//! the salary record and payment configuration supplied by persistence, and
//! the leave, overtime, deduction, allowance and bonus configurations.
//!
//! Every struct here is `#[serde(default)]`; the defaults come from
//! [`crate::config`] so partially specified documents are accepted.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::WorkingDaysConfig;

/// How the salary amount is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayType {
    /// A fixed amount per cycle.
    #[default]
    FixedMonthly,
    /// An amount per working day.
    DailyWage,
    /// An amount per hour.
    Hourly,
}

/// Divisor used to turn a fixed monthly salary into a daily rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateBasis {
    /// Divide by a flat 30 days.
    CalendarMonth,
    /// Divide by the number of days in the cycle.
    CycleDays,
    /// Divide by the number of working days in the cycle.
    #[default]
    WorkingDaysOnly,
}

/// Leave taken during a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaveConfig {
    /// Paid leave days taken.
    pub paid_leave_taken: Decimal,
    /// Unpaid leave days taken.
    pub unpaid_leave_taken: Decimal,
    /// Half days taken; each counts as half an unpaid day.
    pub half_days_taken: Decimal,
}

/// Overtime multipliers and the hours worked in each tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OvertimeRules {
    /// Whether overtime is paid at all.
    pub enabled: bool,
    /// Daily hours beyond which work counts as overtime.
    pub threshold_hours_per_day: Decimal,
    /// Multiplier for regular overtime.
    pub regular_multiplier: Decimal,
    /// Multiplier for work on off days.
    pub weekend_multiplier: Decimal,
    /// Multiplier for work on holidays.
    pub holiday_multiplier: Decimal,
    /// Regular overtime hours in the period.
    pub regular_hours: Decimal,
    /// Off-day hours in the period.
    pub weekend_hours: Decimal,
    /// Holiday hours in the period.
    pub holiday_hours: Decimal,
}

/// An arbitrary named pay item.
///
/// When `is_percentage` is set, `amount` is a percentage of the item's base
/// (base pay for allowances and bonuses, gross earnings for deductions).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraItem {
    /// Label shown on the payslip.
    pub description: String,
    /// Fixed amount, or percentage when `is_percentage` is set.
    pub amount: Decimal,
    /// Whether `amount` is a percentage.
    #[serde(default)]
    pub is_percentage: bool,
}

/// Deductions applied against gross earnings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeductionConfig {
    /// Flat amount deducted every cycle.
    pub fixed_amount: Decimal,
    /// Percentage of gross deducted every cycle.
    pub percentage: Decimal,
    /// Penalty per late arrival.
    pub late_arrival_penalty: Decimal,
    /// Professional tax (fixed).
    pub professional_tax: Decimal,
    /// Provident fund percentage.
    pub provident_fund_percentage: Decimal,
    /// Whether income tax is deducted.
    pub calculate_tax: bool,
    /// Income tax percentage of gross.
    pub income_tax_percentage: Decimal,
    /// Health insurance premium (fixed).
    pub health_insurance: Decimal,
    /// Additional named deductions.
    pub others: Vec<ExtraItem>,
}

/// Allowances paid on top of base pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllowanceConfig {
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
    pub others: Vec<ExtraItem>,
}

/// Bonuses paid on top of base pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusConfig {
    /// Performance bonus.
    pub performance: Decimal,
    /// Attendance bonus.
    pub attendance: Decimal,
    /// Additional named bonuses.
    pub others: Vec<ExtraItem>,
}

/// A salary as stored by persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRecord {
    /// The salary amount, interpreted according to `pay_type`.
    pub amount: Decimal,
    /// How the amount is expressed.
    #[serde(default)]
    pub pay_type: PayType,
    /// When the salary became effective.
    #[serde(default)]
    pub effective_date: Option<NaiveDate>,
    /// Working hours per day captured when the salary was recorded.
    /// Overrides the payment configuration when present.
    #[serde(default)]
    pub hours_per_day: Option<Decimal>,
}

/// Payment configuration for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentConfig {
    /// Day of month cycles start on (1 = calendar month).
    pub cycle_start_day: u32,
    /// Divisor used for the daily rate of fixed salaries.
    pub rate_basis: RateBasis,
    /// Working-day rules.
    pub working_days: WorkingDaysConfig,
    /// Overtime rules. Hour totals are ignored; they come from attendance.
    pub overtime: OvertimeRules,
    /// Deductions.
    pub deductions: DeductionConfig,
    /// Allowances.
    pub allowances: AllowanceConfig,
    /// Bonuses.
    pub bonuses: BonusConfig,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Locale used by display formatting downstream.
    pub locale: String,
}

//! Baseline configuration objects.
//!
//! Configuration-driven callers start from these and override specific
//! fields. Everything monetary is zero and overtime is disabled.

use rust_decimal::Decimal;

use crate::models::{
    AllowanceConfig, BonusConfig, DeductionConfig, LeaveConfig, OvertimeRules, PaymentConfig,
    RateBasis, SaturdayMode, WorkingDaysConfig,
};

/// Currency used when none is configured.
pub const DEFAULT_CURRENCY: &str = "INR";

/// Locale used when none is configured.
pub const DEFAULT_LOCALE: &str = "en-IN";

/// Ordinary hours in a working day.
pub const DEFAULT_HOURS_PER_DAY: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// A 6-day week with Sunday off.
pub fn six_day_week() -> WorkingDaysConfig {
    WorkingDaysConfig {
        hours_per_day: DEFAULT_HOURS_PER_DAY,
        weekly_offs: vec![0],
        saturday_mode: SaturdayMode::Working,
        second_saturday_off: false,
        fourth_saturday_off: false,
        expected_start_time: None,
    }
}

/// A 5-day week with Saturday and Sunday off.
pub fn five_day_week() -> WorkingDaysConfig {
    WorkingDaysConfig {
        weekly_offs: vec![0, 6],
        saturday_mode: SaturdayMode::AllOff,
        ..six_day_week()
    }
}

/// No leave taken.
pub fn default_leave_config() -> LeaveConfig {
    LeaveConfig {
        paid_leave_taken: Decimal::ZERO,
        unpaid_leave_taken: Decimal::ZERO,
        half_days_taken: Decimal::ZERO,
    }
}

/// Overtime disabled, with conventional multipliers ready for when it is enabled.
pub fn default_overtime_rules() -> OvertimeRules {
    OvertimeRules {
        enabled: false,
        threshold_hours_per_day: DEFAULT_HOURS_PER_DAY,
        regular_multiplier: Decimal::new(15, 1),
        weekend_multiplier: Decimal::new(2, 0),
        holiday_multiplier: Decimal::new(25, 1),
        regular_hours: Decimal::ZERO,
        weekend_hours: Decimal::ZERO,
        holiday_hours: Decimal::ZERO,
    }
}

/// No deductions.
pub fn default_deduction_config() -> DeductionConfig {
    DeductionConfig {
        fixed_amount: Decimal::ZERO,
        percentage: Decimal::ZERO,
        late_arrival_penalty: Decimal::ZERO,
        professional_tax: Decimal::ZERO,
        provident_fund_percentage: Decimal::ZERO,
        calculate_tax: false,
        income_tax_percentage: Decimal::ZERO,
        health_insurance: Decimal::ZERO,
        others: Vec::new(),
    }
}

/// No allowances.
pub fn default_allowance_config() -> AllowanceConfig {
    AllowanceConfig {
        hra: Decimal::ZERO,
        da: Decimal::ZERO,
        transport: Decimal::ZERO,
        medical: Decimal::ZERO,
        special: Decimal::ZERO,
        others: Vec::new(),
    }
}

/// No bonuses.
pub fn default_bonus_config() -> BonusConfig {
    BonusConfig {
        performance: Decimal::ZERO,
        attendance: Decimal::ZERO,
        others: Vec::new(),
    }
}

/// Calendar-month cycles, working-days basis, 6-day week, nothing else configured.
pub fn default_payment_config() -> PaymentConfig {
    PaymentConfig {
        cycle_start_day: 1,
        rate_basis: RateBasis::WorkingDaysOnly,
        working_days: six_day_week(),
        overtime: default_overtime_rules(),
        deductions: default_deduction_config(),
        allowances: default_allowance_config(),
        bonuses: default_bonus_config(),
        currency: DEFAULT_CURRENCY.to_string(),
        locale: DEFAULT_LOCALE.to_string(),
    }
}

impl Default for WorkingDaysConfig {
    fn default() -> Self {
        six_day_week()
    }
}

impl Default for LeaveConfig {
    fn default() -> Self {
        default_leave_config()
    }
}

impl Default for OvertimeRules {
    fn default() -> Self {
        default_overtime_rules()
    }
}

impl Default for DeductionConfig {
    fn default() -> Self {
        default_deduction_config()
    }
}

impl Default for AllowanceConfig {
    fn default() -> Self {
        default_allowance_config()
    }
}

impl Default for BonusConfig {
    fn default() -> Self {
        default_bonus_config()
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        default_payment_config()
    }
}

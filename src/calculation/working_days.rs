//! Working-day calendar.
//!
//! This module classifies calendar dates as full working days, off days or
//! half days under a [`WorkingDaysConfig`], and counts them over a date range.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{DayClassification, SaturdayMode, WorkingDaysConfig};

/// Working-day counts over an inclusive date range.
///
/// `full_days + half_days + weekly_offs == total_days` always holds, and
/// `working_days == full_days + half_days / 2`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingDaysSummary {
    /// Working days, half days contributing 0.5.
    pub working_days: Decimal,
    /// Off days.
    pub weekly_offs: u32,
    /// Half working days.
    pub half_days: u32,
    /// Full working days.
    pub full_days: u32,
    /// Calendar days in the range.
    pub total_days: u32,
}

/// Which occurrence of its weekday a date is within its month (1 to 5).
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::nth_weekday_of_month;
/// use chrono::NaiveDate;
///
/// // 2024-05-11 is the second Saturday of May 2024.
/// assert_eq!(nth_weekday_of_month(NaiveDate::from_ymd_opt(2024, 5, 11).unwrap()), 2);
/// ```
pub fn nth_weekday_of_month(date: NaiveDate) -> u32 {
    date.day().div_ceil(7)
}

fn is_saturday_off(nth: u32, config: &WorkingDaysConfig) -> bool {
    if (config.second_saturday_off && nth == 2) || (config.fourth_saturday_off && nth == 4) {
        return true;
    }
    match config.saturday_mode {
        SaturdayMode::AllOff => true,
        SaturdayMode::Alternate13 => nth == 1 || nth == 3,
        SaturdayMode::Alternate24 => nth == 2 || nth == 4,
        SaturdayMode::Working | SaturdayMode::HalfDay => false,
    }
}

/// Classifies a single date.
///
/// A date is off if its weekday is a weekly off or it is a Saturday matched by
/// the Saturday policy (including the legacy second/fourth Saturday flags).
/// Remaining Saturdays are half days under [`SaturdayMode::HalfDay`]; every
/// other date is a full working day.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::classify_date;
/// use payslip_engine::config::six_day_week;
/// use payslip_engine::models::{DayClassification, SaturdayMode};
/// use chrono::NaiveDate;
///
/// let config = six_day_week().with_saturday_mode(SaturdayMode::Alternate24);
/// let sunday = NaiveDate::from_ymd_opt(2024, 5, 5).unwrap();
/// let second_saturday = NaiveDate::from_ymd_opt(2024, 5, 11).unwrap();
/// let third_saturday = NaiveDate::from_ymd_opt(2024, 5, 18).unwrap();
///
/// assert_eq!(classify_date(sunday, &config), DayClassification::OffDay);
/// assert_eq!(classify_date(second_saturday, &config), DayClassification::OffDay);
/// assert_eq!(classify_date(third_saturday, &config), DayClassification::FullDay);
/// ```
pub fn classify_date(date: NaiveDate, config: &WorkingDaysConfig) -> DayClassification {
    let weekday = date.weekday();
    if config.is_weekly_off(weekday.num_days_from_sunday()) {
        return DayClassification::OffDay;
    }
    if weekday != Weekday::Sat {
        return DayClassification::FullDay;
    }
    if is_saturday_off(nth_weekday_of_month(date), config) {
        DayClassification::OffDay
    } else if config.saturday_mode == SaturdayMode::HalfDay {
        DayClassification::HalfDay
    } else {
        DayClassification::FullDay
    }
}

/// Returns true if the date is an off day.
pub fn is_off_day(date: NaiveDate, config: &WorkingDaysConfig) -> bool {
    !classify_date(date, config).is_working()
}

/// The working-day factor of a date: 1, 0.5 or 0.
pub fn working_day_factor(date: NaiveDate, config: &WorkingDaysConfig) -> Decimal {
    classify_date(date, config).factor()
}

/// Counts working days, off days and half days in `[start, end]`.
///
/// An inverted range yields all-zero counts.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::calculate_working_days;
/// use payslip_engine::config::six_day_week;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// // May 2024 has 31 days and 4 Sundays.
/// let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();
/// let summary = calculate_working_days(start, end, &six_day_week());
///
/// assert_eq!(summary.working_days, Decimal::new(27, 0));
/// assert_eq!(summary.weekly_offs, 4);
/// ```
pub fn calculate_working_days(
    start: NaiveDate,
    end: NaiveDate,
    config: &WorkingDaysConfig,
) -> WorkingDaysSummary {
    let mut summary = WorkingDaysSummary {
        working_days: Decimal::ZERO,
        weekly_offs: 0,
        half_days: 0,
        full_days: 0,
        total_days: 0,
    };

    for date in start.iter_days().take_while(|d| *d <= end) {
        let classification = classify_date(date, config);
        summary.total_days += 1;
        summary.working_days += classification.factor();
        match classification {
            DayClassification::FullDay => summary.full_days += 1,
            DayClassification::HalfDay => summary.half_days += 1,
            DayClassification::OffDay => summary.weekly_offs += 1,
        }
    }

    summary
}

//! Working-day rules.
//!
//! This module defines [`WorkingDaysConfig`], the [`SaturdayMode`] policy and
//! the [`DayClassification`] every calendar date resolves to.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Policy governing which Saturdays are off days or half days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SaturdayMode {
    /// Every Saturday is a full working day.
    #[default]
    #[serde(rename = "working")]
    Working,
    /// Every Saturday is off.
    #[serde(rename = "all-off")]
    AllOff,
    /// The 1st and 3rd Saturday of each month are off.
    #[serde(rename = "alternate-1-3")]
    Alternate13,
    /// The 2nd and 4th Saturday of each month are off.
    #[serde(rename = "alternate-2-4")]
    Alternate24,
    /// Every Saturday counts as half a working day.
    #[serde(rename = "half-day")]
    HalfDay,
}

/// How a single calendar date counts toward working time.
///
/// The three variants are mutually exclusive and cover every date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayClassification {
    /// A full working day.
    FullDay,
    /// A weekly off day (or an off Saturday).
    OffDay,
    /// A Saturday worked as half a day.
    HalfDay,
}

impl DayClassification {
    /// The working-day factor: 1 for a full day, 0.5 for a half day, 0 when off.
    pub fn factor(self) -> Decimal {
        match self {
            DayClassification::FullDay => Decimal::ONE,
            DayClassification::HalfDay => Decimal::new(5, 1),
            DayClassification::OffDay => Decimal::ZERO,
        }
    }

    /// Whether the day is expected to carry attendance.
    pub fn is_working(self) -> bool {
        !matches!(self, DayClassification::OffDay)
    }
}

/// Working-day rules for an employee.
///
/// Weekday indices run from 0 (Sunday) to 6 (Saturday).
///
/// # Example
///
/// ```
/// use payslip_engine::models::{SaturdayMode, WorkingDaysConfig};
/// use rust_decimal::Decimal;
///
/// let config = WorkingDaysConfig {
///     hours_per_day: Decimal::new(8, 0),
///     weekly_offs: vec![0],
///     saturday_mode: SaturdayMode::Alternate24,
///     second_saturday_off: false,
///     fourth_saturday_off: false,
///     expected_start_time: None,
/// };
/// assert!(config.is_weekly_off(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkingDaysConfig {
    /// Ordinary hours in a full working day.
    pub hours_per_day: Decimal,
    /// Weekdays that are always off (0 = Sunday .. 6 = Saturday).
    pub weekly_offs: Vec<u32>,
    /// Saturday policy.
    pub saturday_mode: SaturdayMode,
    /// Legacy flag: the 2nd Saturday of each month is off.
    pub second_saturday_off: bool,
    /// Legacy flag: the 4th Saturday of each month is off.
    pub fourth_saturday_off: bool,
    /// Start of the working day; arrivals after it count as late.
    pub expected_start_time: Option<NaiveTime>,
}

impl WorkingDaysConfig {
    /// Returns true if the weekday index is a weekly off day.
    pub fn is_weekly_off(&self, weekday_index: u32) -> bool {
        self.weekly_offs.contains(&weekday_index)
    }

    /// Returns a copy of this configuration under a different Saturday policy.
    pub fn with_saturday_mode(&self, saturday_mode: SaturdayMode) -> Self {
        Self {
            saturday_mode,
            ..self.clone()
        }
    }
}

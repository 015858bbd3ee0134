//! Time entry model and related types.
//!
//! A [`TimeEntry`] is a finished attendance record produced by the timer
//! outside the engine. Several entries may share a date.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The kind of leave an entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeaveType {
    /// Sick leave (paid).
    Sick,
    /// Vacation leave (paid).
    Vacation,
    /// Personal leave (unpaid).
    Personal,
    /// Explicitly unpaid leave.
    Unpaid,
    /// Any other leave type (unpaid).
    Other,
}

impl LeaveType {
    /// Returns true for leave types that keep the day paid.
    ///
    /// # Examples
    ///
    /// ```
    /// use payslip_engine::models::LeaveType;
    ///
    /// assert!(LeaveType::Sick.is_paid());
    /// assert!(!LeaveType::Personal.is_paid());
    /// ```
    pub fn is_paid(self) -> bool {
        matches!(self, LeaveType::Sick | LeaveType::Vacation)
    }
}

/// A single attendance record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    /// Unique identifier for the entry.
    pub id: String,
    /// The date the entry belongs to.
    pub date: NaiveDate,
    /// Clock-in time, if recorded.
    #[serde(default)]
    pub time_in: Option<NaiveTime>,
    /// Clock-out time, if recorded.
    #[serde(default)]
    pub time_out: Option<NaiveTime>,
    /// Hours worked for this entry.
    #[serde(default)]
    pub total_hours: Decimal,
    /// Leave recorded by this entry, if any.
    #[serde(default)]
    pub leave: Option<LeaveType>,
    /// Whether the hours were worked on a holiday.
    #[serde(default)]
    pub is_holiday_work: bool,
    /// Free-form note attached by the user.
    #[serde(default)]
    pub description: Option<String>,
}

impl TimeEntry {
    /// Returns true if the entry records leave rather than work.
    pub fn is_leave(&self) -> bool {
        self.leave.is_some()
    }

    /// Hours worked, with negative values treated as zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use payslip_engine::models::TimeEntry;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let entry = TimeEntry {
    ///     id: "te_001".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(),
    ///     time_in: None,
    ///     time_out: None,
    ///     total_hours: Decimal::new(-3, 0),
    ///     leave: None,
    ///     is_holiday_work: false,
    ///     description: None,
    /// };
    /// assert_eq!(entry.worked_hours(), Decimal::ZERO);
    /// ```
    pub fn worked_hours(&self) -> Decimal {
        self.total_hours.max(Decimal::ZERO)
    }

    /// The ISO `YYYY-MM-DD` key used to index entries by date.
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

//! Salary cycle model.
//!
//! This module contains the [`SalaryCycle`] type: the inclusive date range a
//! payslip is computed over.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// An inclusive pay period, either a calendar month or a rolling month that
/// starts on a configured day.
///
/// # Example
///
/// ```
/// use payslip_engine::models::SalaryCycle;
/// use chrono::NaiveDate;
///
/// let cycle = SalaryCycle {
///     start_date: NaiveDate::from_ymd_opt(2024, 3, 19).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2024, 4, 18).unwrap(),
/// };
///
/// assert!(cycle.contains_date(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
/// assert_eq!(cycle.total_days(), 31);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SalaryCycle {
    /// The first day of the cycle (inclusive).
    pub start_date: NaiveDate,
    /// The last day of the cycle (inclusive).
    pub end_date: NaiveDate,
}

impl SalaryCycle {
    /// Checks if a given date falls within this cycle, inclusive of both ends.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Number of calendar days in the cycle, counting both ends.
    ///
    /// Returns 0 for an inverted range.
    pub fn total_days(&self) -> u32 {
        let days = (self.end_date - self.start_date).num_days() + 1;
        u32::try_from(days).unwrap_or(0)
    }

    /// Iterates every date of the cycle in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end_date;
        self.start_date.iter_days().take_while(move |d| *d <= end)
    }

    /// The day the following cycle starts on.
    pub fn next_cycle_start(&self) -> Option<NaiveDate> {
        self.end_date.checked_add_days(Days::new(1))
    }
}

impl std::fmt::Display for SalaryCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start_date, self.end_date)
    }
}

//! Attendance analysis.
//!
//! This module reconciles raw [`TimeEntry`] records against the working days
//! of a date range and produces a [`TimeEntryAnalysis`]. The analysis does not
//! depend on any salary configuration, so it can be used on its own.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{AttendanceSummary, TimeEntry, WorkingDaysConfig};

use super::rounding::safe_div;
use super::working_days::classify_date;

/// Aggregate attendance statistics for a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntryAnalysis {
    /// Working dates walked in the range.
    pub expected_working_days: u32,
    /// Hours recorded on working days.
    pub total_hours_worked: Decimal,
    /// Working days with recorded work.
    pub total_days_worked: u32,
    /// Hours beyond the daily threshold on working days.
    pub overtime_hours: Decimal,
    /// Hours recorded on off days.
    pub weekend_hours: Decimal,
    /// Hours on entries flagged as holiday work.
    pub holiday_hours: Decimal,
    /// Working days whose first clock-in was after the expected start time.
    pub late_arrivals: u32,
    /// Worked days shorter than the half-day threshold.
    pub half_days: u32,
    /// Working days with no entries.
    pub absences: u32,
    /// Working days covered by paid leave.
    pub paid_leaves: u32,
    /// Working days covered by unpaid leave.
    pub unpaid_leaves: u32,
    /// Worked days weighted by their working-day factor.
    pub worked_day_units: Decimal,
    /// Absences and unpaid leave weighted by their working-day factor.
    pub unpaid_day_units: Decimal,
    /// Half days weighted by their working-day factor.
    pub half_day_units: Decimal,
    /// In-range entries keyed by ISO date, in their original order.
    pub entries_by_date: BTreeMap<String, Vec<TimeEntry>>,
}

impl TimeEntryAnalysis {
    fn empty() -> Self {
        Self {
            expected_working_days: 0,
            total_hours_worked: Decimal::ZERO,
            total_days_worked: 0,
            overtime_hours: Decimal::ZERO,
            weekend_hours: Decimal::ZERO,
            holiday_hours: Decimal::ZERO,
            late_arrivals: 0,
            half_days: 0,
            absences: 0,
            paid_leaves: 0,
            unpaid_leaves: 0,
            worked_day_units: Decimal::ZERO,
            unpaid_day_units: Decimal::ZERO,
            half_day_units: Decimal::ZERO,
            entries_by_date: BTreeMap::new(),
        }
    }

    /// Weighted days worked divided by `working_days`, capped at 1 (0 when
    /// there are no working days).
    pub fn attendance_ratio(&self, working_days: Decimal) -> Decimal {
        safe_div(self.worked_day_units, working_days).min(Decimal::ONE)
    }

    /// The counters without the entry index, for inclusion in a payslip.
    pub fn summary(&self, working_days: Decimal) -> AttendanceSummary {
        AttendanceSummary {
            expected_working_days: self.expected_working_days,
            days_worked: self.total_days_worked,
            total_hours_worked: self.total_hours_worked,
            overtime_hours: self.overtime_hours,
            weekend_hours: self.weekend_hours,
            holiday_hours: self.holiday_hours,
            late_arrivals: self.late_arrivals,
            half_days: self.half_days,
            absences: self.absences,
            paid_leaves: self.paid_leaves,
            unpaid_leaves: self.unpaid_leaves,
            attendance_ratio: self.attendance_ratio(working_days),
        }
    }
}

/// Groups entries dated within `[start, end]` by ISO date, keeping their order.
pub fn group_entries_by_date(
    entries: &[TimeEntry],
    start: NaiveDate,
    end: NaiveDate,
) -> BTreeMap<String, Vec<TimeEntry>> {
    let mut grouped: BTreeMap<String, Vec<TimeEntry>> = BTreeMap::new();
    for entry in entries
        .iter()
        .filter(|e| e.date >= start && e.date <= end)
    {
        grouped.entry(entry.date_key()).or_default().push(entry.clone());
    }
    grouped
}

fn work_hours<'a>(entries: impl IntoIterator<Item = &'a TimeEntry>) -> Decimal {
    entries
        .into_iter()
        .filter(|e| !e.is_leave())
        .map(TimeEntry::worked_hours)
        .sum()
}

/// Analyzes attendance over `[start, end]`.
///
/// For every working date (full or half day):
/// - no entries is an absence;
/// - an entry carrying leave makes the day paid leave (sick, vacation) or
///   unpaid leave (any other type);
/// - otherwise the day is worked. Its hours are summed, it is a half day when
///   `0 < hours < hours_per_day / 2 + 1`, hours beyond the overtime threshold
///   are overtime, and it is a late arrival when the earliest clock-in is after
///   the configured expected start time.
///
/// On a half-day Saturday the half-day band and the overtime threshold are
/// halved, and an absence or short day weighs half as much in the
/// `*_day_units` totals.
///
/// Each hour lands in at most one overtime tier. Hours on entries flagged as
/// holiday work go to `holiday_hours` regardless of the day; the remaining
/// work on off days goes to `weekend_hours`, and only the remaining work on
/// working days counts toward daily overtime.
///
/// `overtime_threshold` defaults to the configured hours per day.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::analyze_time_entries;
/// use payslip_engine::config::six_day_week;
/// use payslip_engine::models::TimeEntry;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let monday = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
/// let entry = TimeEntry {
///     id: "te_001".to_string(),
///     date: monday,
///     time_in: None,
///     time_out: None,
///     total_hours: Decimal::new(10, 0),
///     leave: None,
///     is_holiday_work: false,
///     description: None,
/// };
///
/// let analysis = analyze_time_entries(&[entry], monday, monday, &six_day_week(), None);
/// assert_eq!(analysis.total_days_worked, 1);
/// assert_eq!(analysis.overtime_hours, Decimal::new(2, 0));
/// ```
pub fn analyze_time_entries(
    entries: &[TimeEntry],
    start: NaiveDate,
    end: NaiveDate,
    config: &WorkingDaysConfig,
    overtime_threshold: Option<Decimal>,
) -> TimeEntryAnalysis {
    let mut analysis = TimeEntryAnalysis::empty();
    let grouped = group_entries_by_date(entries, start, end);

    let hours_per_day = config.hours_per_day;
    let half_day_limit = hours_per_day / Decimal::TWO + Decimal::ONE;
    let overtime_threshold = overtime_threshold.unwrap_or(hours_per_day);

    for date in start.iter_days().take_while(|d| *d <= end) {
        let day_entries = grouped
            .get(&date.format("%Y-%m-%d").to_string())
            .map(Vec::as_slice)
            .unwrap_or_default();
        let (holiday, regular): (Vec<&TimeEntry>, Vec<&TimeEntry>) =
            day_entries.iter().partition(|e| e.is_holiday_work);

        analysis.holiday_hours += work_hours(holiday);

        let factor = classify_date(date, config).factor();
        if factor.is_zero() {
            analysis.weekend_hours += work_hours(regular);
            continue;
        }

        analysis.expected_working_days += 1;

        if day_entries.is_empty() {
            analysis.absences += 1;
            analysis.unpaid_day_units += factor;
            continue;
        }

        if let Some(leave) = day_entries.iter().find_map(|e| e.leave) {
            if leave.is_paid() {
                analysis.paid_leaves += 1;
            } else {
                analysis.unpaid_leaves += 1;
                analysis.unpaid_day_units += factor;
            }
            continue;
        }

        let day_hours = work_hours(day_entries);
        analysis.total_days_worked += 1;
        analysis.worked_day_units += factor;
        analysis.total_hours_worked += day_hours;

        if day_hours > Decimal::ZERO && day_hours < half_day_limit * factor {
            analysis.half_days += 1;
            analysis.half_day_units += factor;
        }

        analysis.overtime_hours +=
            (work_hours(regular) - overtime_threshold * factor).max(Decimal::ZERO);

        if let Some(expected_start) = config.expected_start_time {
            let first_in = day_entries.iter().filter_map(|e| e.time_in).min();
            if first_in.is_some_and(|t| t > expected_start) {
                analysis.late_arrivals += 1;
            }
        }
    }

    debug!(
        start = %start,
        end = %end,
        days_worked = analysis.total_days_worked,
        absences = analysis.absences,
        overtime_hours = %analysis.overtime_hours,
        "Analyzed time entries"
    );

    analysis.entries_by_date = grouped;
    analysis
}

//! Pay cycle resolution.
//!
//! A cycle is either the calendar month (`cycle_start_day == 1`) or a rolling
//! month running from `cycle_start_day` to the day before it in the following
//! month. Start days are limited to 1-28 so every month contains them.
//!
//! Nothing here reads the clock: "today" is always passed in.

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::error::{EngineError, EngineResult};
use crate::models::SalaryCycle;

/// Largest cycle start day; every month has a 28th.
pub const MAX_CYCLE_START_DAY: u32 = 28;

fn validate(year: i32, month: u32, cycle_start_day: u32) -> EngineResult<()> {
    if !(1..=12).contains(&month) {
        return Err(EngineError::InvalidCycle {
            message: format!("month {} is outside 1-12", month),
        });
    }
    if !(1..=MAX_CYCLE_START_DAY).contains(&cycle_start_day) {
        return Err(EngineError::InvalidCycle {
            message: format!(
                "cycle start day {} is outside 1-{}",
                cycle_start_day, MAX_CYCLE_START_DAY
            ),
        });
    }
    if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
        return Err(EngineError::InvalidCycle {
            message: format!("year {} is out of range", year),
        });
    }
    Ok(())
}

fn out_of_range(year: i32, month: u32) -> EngineError {
    EngineError::InvalidCycle {
        message: format!("cycle for {}-{:02} is out of range", year, month),
    }
}

/// The (year, month) immediately before the given one.
fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// The (year, month) immediately after the given one.
fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

/// Builds the cycle that starts in `month` of `year`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidCycle`] if `month` is outside 1-12,
/// `cycle_start_day` is outside 1-28, or the dates are beyond chrono's range.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::create_monthly_cycle;
///
/// let calendar = create_monthly_cycle(2024, 3, 1).unwrap();
/// assert_eq!(calendar.start_date.to_string(), "2024-03-01");
/// assert_eq!(calendar.end_date.to_string(), "2024-03-31");
///
/// let rolling = create_monthly_cycle(2024, 3, 19).unwrap();
/// assert_eq!(rolling.start_date.to_string(), "2024-03-19");
/// assert_eq!(rolling.end_date.to_string(), "2024-04-18");
/// ```
pub fn create_monthly_cycle(
    year: i32,
    month: u32,
    cycle_start_day: u32,
) -> EngineResult<SalaryCycle> {
    validate(year, month, cycle_start_day)?;

    let start_date = NaiveDate::from_ymd_opt(year, month, cycle_start_day)
        .ok_or_else(|| out_of_range(year, month))?;

    let end_date = if cycle_start_day == 1 {
        // Day 0 of the next month: the last day of this one.
        start_date
            .checked_add_months(Months::new(1))
            .and_then(|d| d.checked_sub_days(Days::new(1)))
    } else {
        let (end_year, end_month) = next_month(year, month);
        NaiveDate::from_ymd_opt(end_year, end_month, cycle_start_day - 1)
    }
    .ok_or_else(|| out_of_range(year, month))?;

    Ok(SalaryCycle {
        start_date,
        end_date,
    })
}

/// The (year, month) in which the cycle containing `date` started.
fn cycle_anchor(date: NaiveDate, cycle_start_day: u32) -> (i32, u32) {
    if cycle_start_day <= 1 || date.day() >= cycle_start_day {
        (date.year(), date.month())
    } else {
        previous_month(date.year(), date.month())
    }
}

/// Returns the cycle that contains `date`.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::cycle_containing;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
/// let cycle = cycle_containing(date, 19).unwrap();
/// assert_eq!(cycle.start_date.to_string(), "2023-12-19");
/// assert_eq!(cycle.end_date.to_string(), "2024-01-18");
/// ```
pub fn cycle_containing(date: NaiveDate, cycle_start_day: u32) -> EngineResult<SalaryCycle> {
    let (year, month) = cycle_anchor(date, cycle_start_day);
    create_monthly_cycle(year, month, cycle_start_day)
}

/// Returns the cycle active on `today`.
///
/// For custom start days the active cycle began this month once today's day
/// of month has reached the start day, otherwise it began last month.
pub fn current_salary_cycle(cycle_start_day: u32, today: NaiveDate) -> EngineResult<SalaryCycle> {
    cycle_containing(today, cycle_start_day)
}

/// Returns the twelve cycles that start in each month of `year`.
pub fn yearly_salary_cycles(year: i32, cycle_start_day: u32) -> EngineResult<Vec<SalaryCycle>> {
    (1..=12)
        .map(|month| create_monthly_cycle(year, month, cycle_start_day))
        .collect()
}

/// Returns the last `count` cycles up to and including the current one,
/// oldest first.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::last_n_cycles;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
/// let cycles = last_n_cycles(3, 1, today).unwrap();
/// let starts: Vec<String> = cycles.iter().map(|c| c.start_date.to_string()).collect();
/// assert_eq!(starts, vec!["2024-01-01", "2024-02-01", "2024-03-01"]);
/// ```
pub fn last_n_cycles(
    count: usize,
    cycle_start_day: u32,
    today: NaiveDate,
) -> EngineResult<Vec<SalaryCycle>> {
    let (mut year, mut month) = cycle_anchor(today, cycle_start_day);
    let mut cycles = Vec::new();

    for _ in 0..count {
        cycles.push(create_monthly_cycle(year, month, cycle_start_day)?);
        (year, month) = previous_month(year, month);
    }

    cycles.reverse();
    Ok(cycles)
}

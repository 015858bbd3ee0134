//! Attendance-driven payslip generation.
//!
//! Derives the attendance inputs from raw time entries and runs the same
//! pipeline as [`calculate_pay_slip`](super::calculate_pay_slip). Two things
//! differ: allowances are scaled by the attendance ratio instead of a
//! pro-rata factor, and the provident fund is a percentage of base pay rather
//! than gross earnings.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{
    OvertimeRules, PaymentConfig, PayslipData, SalaryCycle, SalaryRecord, TimeEntry,
    WorkingDaysConfig,
};

use super::attendance::analyze_time_entries;
use super::payslip::{
    AllowanceBasis, PayContext, ProvidentFundBase, compute_payslip, resolve_period,
};

/// The daily overtime threshold in effect for `rules`, if it differs from
/// the ordinary working day.
fn overtime_threshold(rules: &OvertimeRules) -> Option<Decimal> {
    (rules.enabled && rules.threshold_hours_per_day > Decimal::ZERO)
        .then_some(rules.threshold_hours_per_day)
}

/// Generates a payslip for `user_id` from their time entries over `cycle`.
///
/// The salary record's hours per day, when present, overrides the payment
/// configuration's. Working days with no entries count as unpaid leave, short
/// days count as half-day leave, and the analyzer's overtime, off-day and
/// holiday hours feed the three overtime tiers. A half-day Saturday counts
/// for half as much as a full day in each of these.
///
/// # Errors
///
/// Returns [`EngineError::InvalidCycle`](crate::error::EngineError::InvalidCycle)
/// if the cycle ends before it starts.
pub fn generate_payslip_from_entries(
    salary: &SalaryRecord,
    config: &PaymentConfig,
    cycle: &SalaryCycle,
    entries: &[TimeEntry],
    user_id: &str,
) -> EngineResult<PayslipData> {
    let working_days = WorkingDaysConfig {
        hours_per_day: salary
            .hours_per_day
            .unwrap_or(config.working_days.hours_per_day),
        ..config.working_days.clone()
    };

    let period = resolve_period(cycle, None, None, &working_days)?;
    let analysis = analyze_time_entries(
        entries,
        cycle.start_date,
        cycle.end_date,
        &working_days,
        overtime_threshold(&config.overtime),
    );

    let overtime = OvertimeRules {
        regular_hours: analysis.overtime_hours,
        weekend_hours: analysis.weekend_hours,
        holiday_hours: analysis.holiday_hours,
        ..config.overtime.clone()
    };

    let working_day_count = period.working.working_days;
    let attendance = analysis.summary(working_day_count);

    debug!(
        user_id,
        cycle = %cycle,
        days_worked = attendance.days_worked,
        attendance_ratio = %attendance.attendance_ratio,
        "Generating payslip from time entries"
    );

    let ctx = PayContext {
        salary_amount: salary.amount,
        pay_type: salary.pay_type,
        rate_basis: config.rate_basis,
        hours_per_day: working_days.hours_per_day,
        period,
        paid_leave_days: Decimal::from(analysis.paid_leaves),
        unpaid_leave_taken: analysis.unpaid_day_units,
        half_days_taken: analysis.half_day_units,
        allowance_basis: AllowanceBasis::Attendance(attendance.attendance_ratio),
        provident_fund_base: ProvidentFundBase::BasePay,
        overtime: &overtime,
        deductions: &config.deductions,
        allowances: &config.allowances,
        bonuses: &config.bonuses,
        late_arrivals: analysis.late_arrivals,
        currency: &config.currency,
    };

    Ok(PayslipData {
        user_id: user_id.to_string(),
        payslip: compute_payslip(&ctx),
        attendance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_payment_config;
    use crate::error::EngineError;
    use crate::models::{LeaveType, PayType, SaturdayMode};
    use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn may_2024() -> SalaryCycle {
        SalaryCycle {
            start_date: make_date("2024-05-01"),
            end_date: make_date("2024-05-31"),
        }
    }

    fn salary(amount: &str) -> SalaryRecord {
        SalaryRecord {
            amount: dec(amount),
            pay_type: PayType::FixedMonthly,
            effective_date: None,
            hours_per_day: None,
        }
    }

    fn entry(date: NaiveDate, hours: &str) -> TimeEntry {
        TimeEntry {
            id: format!("te_{}", date),
            date,
            time_in: NaiveTime::from_hms_opt(9, 0, 0),
            time_out: None,
            total_hours: dec(hours),
            leave: None,
            is_holiday_work: false,
            description: None,
        }
    }

    /// Eight hours on every working day of May 2024 under a 6-day week.
    fn full_attendance() -> Vec<TimeEntry> {
        may_2024()
            .dates()
            .filter(|d| d.weekday() != Weekday::Sun)
            .map(|d| entry(d, "8"))
            .collect()
    }

    #[test]
    fn test_full_attendance_pays_full_salary() {
        let mut config = default_payment_config();
        config.allowances.hra = dec("5000");

        let data = generate_payslip_from_entries(
            &salary("30000"),
            &config,
            &may_2024(),
            &full_attendance(),
            "user_1",
        )
        .unwrap();

        assert_eq!(data.user_id, "user_1");
        assert_eq!(data.attendance.days_worked, 27);
        assert_eq!(data.attendance.absences, 0);
        assert_eq!(data.attendance.attendance_ratio, Decimal::ONE);
        assert_eq!(data.payslip.earnings.base_pay, dec("30000"));
        assert_eq!(data.payslip.earnings.allowances.hra, dec("5000"));
        assert_eq!(data.payslip.gross_earnings, dec("35000"));
        assert_eq!(data.payslip.period.pro_rata_factor, Decimal::ONE);
    }

    #[test]
    fn test_absences_are_unpaid_and_reduce_allowances() {
        let mut config = default_payment_config();
        config.allowances.hra = dec("2700");
        // Drop the first three working days (1, 2, 3 May).
        let entries: Vec<TimeEntry> = full_attendance().into_iter().skip(3).collect();

        let data =
            generate_payslip_from_entries(&salary("30000"), &config, &may_2024(), &entries, "u")
                .unwrap();

        assert_eq!(data.attendance.absences, 3);
        assert_eq!(data.payslip.period.unpaid_leave_days, dec("3"));
        assert_eq!(data.payslip.earnings.unpaid_leave_deduction, dec("3333.33"));
        assert_eq!(data.payslip.earnings.base_pay, dec("26666.67"));
        // 24 of 27 days worked.
        assert_eq!(data.payslip.earnings.allowances.hra, dec("2400.00"));
    }

    #[test]
    fn test_paid_and_unpaid_leave_entries() {
        let mut entries = full_attendance();
        entries[0].leave = Some(LeaveType::Sick);
        entries[1].leave = Some(LeaveType::Personal);

        let data = generate_payslip_from_entries(
            &salary("30000"),
            &default_payment_config(),
            &may_2024(),
            &entries,
            "u",
        )
        .unwrap();

        assert_eq!(data.attendance.paid_leaves, 1);
        assert_eq!(data.attendance.unpaid_leaves, 1);
        assert_eq!(data.payslip.period.paid_leave_days, dec("1"));
        assert_eq!(data.payslip.period.unpaid_leave_days, dec("1"));
        assert_eq!(data.payslip.earnings.base_pay, dec("28888.89"));
    }

    #[test]
    fn test_short_day_counts_as_half_day_leave() {
        let mut entries = full_attendance();
        entries[0].total_hours = dec("3");

        let data = generate_payslip_from_entries(
            &salary("30000"),
            &default_payment_config(),
            &may_2024(),
            &entries,
            "u",
        )
        .unwrap();

        assert_eq!(data.attendance.half_days, 1);
        assert_eq!(data.payslip.period.unpaid_leave_days, dec("0.5"));
        assert_eq!(data.payslip.earnings.unpaid_leave_deduction, dec("555.56"));
    }

    #[test]
    fn test_overtime_hours_feed_tiers() {
        let mut config = default_payment_config();
        config.overtime.enabled = true;

        let mut entries = full_attendance();
        entries[0].total_hours = dec("10");
        entries.push(entry(make_date("2024-05-05"), "4"));
        entries.push(TimeEntry {
            is_holiday_work: true,
            id: "holiday".to_string(),
            ..entry(make_date("2024-05-12"), "2")
        });

        let data =
            generate_payslip_from_entries(&salary("30000"), &config, &may_2024(), &entries, "u")
                .unwrap();
        let ot = &data.payslip.earnings.overtime;

        assert_eq!(ot.regular_hours, dec("2"));
        assert_eq!(ot.weekend_hours, dec("4"));
        assert_eq!(ot.holiday_hours, dec("2"));
        // Hourly rate 138.89.
        assert_eq!(ot.regular_pay, dec("416.67"));
        assert_eq!(ot.weekend_pay, dec("1111.12"));
        assert_eq!(ot.holiday_pay, dec("694.45"));
    }

    #[test]
    fn test_holiday_work_on_off_day_paid_once() {
        let mut config = default_payment_config();
        config.overtime.enabled = true;

        let mut entries = full_attendance();
        entries.push(TimeEntry {
            is_holiday_work: true,
            ..entry(make_date("2024-05-12"), "8")
        });

        let data =
            generate_payslip_from_entries(&salary("30000"), &config, &may_2024(), &entries, "u")
                .unwrap();
        let ot = &data.payslip.earnings.overtime;

        assert_eq!(ot.weekend_hours, Decimal::ZERO);
        assert_eq!(ot.weekend_pay, Decimal::ZERO);
        assert_eq!(ot.holiday_hours, dec("8"));
        assert_eq!(ot.holiday_pay, dec("2777.80"));
        assert_eq!(ot.total, dec("2777.80"));
    }

    #[test]
    fn test_holiday_work_on_working_day_not_daily_overtime() {
        let mut config = default_payment_config();
        config.overtime.enabled = true;

        let mut entries = full_attendance();
        entries[0].total_hours = dec("6");
        entries.push(TimeEntry {
            is_holiday_work: true,
            id: "holiday".to_string(),
            ..entries[0].clone()
        });

        let data =
            generate_payslip_from_entries(&salary("30000"), &config, &may_2024(), &entries, "u")
                .unwrap();
        let ot = &data.payslip.earnings.overtime;

        // 12 hours on 1 May: 6 ordinary, 6 holiday.
        assert_eq!(data.attendance.total_hours_worked, dec("220"));
        assert_eq!(ot.regular_hours, Decimal::ZERO);
        assert_eq!(ot.holiday_hours, dec("6"));
    }

    /// Eight hours Monday to Friday and four on every Saturday of May 2024.
    fn half_day_saturday_attendance() -> Vec<TimeEntry> {
        may_2024()
            .dates()
            .filter(|d| d.weekday() != Weekday::Sun)
            .map(|d| {
                let hours = if d.weekday() == Weekday::Sat { "4" } else { "8" };
                entry(d, hours)
            })
            .collect()
    }

    fn half_day_saturday_config() -> PaymentConfig {
        let mut config = default_payment_config();
        config.working_days = config.working_days.with_saturday_mode(SaturdayMode::HalfDay);
        config
    }

    #[test]
    fn test_half_day_saturdays_worked_in_full_pay_full_salary() {
        let mut config = half_day_saturday_config();
        config.overtime.enabled = true;
        config.allowances.hra = dec("5000");
        let entries = half_day_saturday_attendance();

        let data =
            generate_payslip_from_entries(&salary("30000"), &config, &may_2024(), &entries, "u")
                .unwrap();

        // 23 full days plus 4 half-day Saturdays.
        assert_eq!(data.payslip.period.working_days, dec("25"));
        assert_eq!(data.attendance.half_days, 0);
        assert_eq!(data.attendance.overtime_hours, Decimal::ZERO);
        assert_eq!(data.attendance.attendance_ratio, Decimal::ONE);
        assert_eq!(data.payslip.period.unpaid_leave_days, Decimal::ZERO);
        assert_eq!(data.payslip.earnings.unpaid_leave_deduction, Decimal::ZERO);
        assert_eq!(data.payslip.earnings.base_pay, dec("30000"));
        assert_eq!(data.payslip.earnings.allowances.hra, dec("5000"));
    }

    #[test]
    fn test_missed_half_day_saturday_costs_half_a_day() {
        let config = half_day_saturday_config();
        let entries: Vec<TimeEntry> = half_day_saturday_attendance()
            .into_iter()
            .filter(|e| e.date != make_date("2024-05-04"))
            .collect();

        let data =
            generate_payslip_from_entries(&salary("30000"), &config, &may_2024(), &entries, "u")
                .unwrap();

        assert_eq!(data.attendance.absences, 1);
        assert_eq!(data.payslip.period.unpaid_leave_days, dec("0.5"));
        // Daily rate 30000 / 25 = 1200.
        assert_eq!(data.payslip.earnings.unpaid_leave_deduction, dec("600.00"));
        assert_eq!(data.payslip.earnings.base_pay, dec("29400.00"));
    }

    #[test]
    fn test_short_half_day_saturday_and_saturday_overtime() {
        let mut config = half_day_saturday_config();
        config.overtime.enabled = true;
        let mut entries = half_day_saturday_attendance();
        for e in entries.iter_mut() {
            if e.date == make_date("2024-05-04") {
                e.total_hours = dec("2");
            } else if e.date == make_date("2024-05-11") {
                e.total_hours = dec("5");
            }
        }

        let data =
            generate_payslip_from_entries(&salary("30000"), &config, &may_2024(), &entries, "u")
                .unwrap();

        // 2h is under the halved band of 2.5h; 5h is 1h past the halved threshold.
        assert_eq!(data.attendance.half_days, 1);
        assert_eq!(data.payslip.period.unpaid_leave_days, dec("0.25"));
        assert_eq!(data.payslip.earnings.unpaid_leave_deduction, dec("300.00"));
        assert_eq!(data.attendance.overtime_hours, dec("1"));
    }

    #[test]
    fn test_overtime_threshold_from_rules() {
        let mut config = default_payment_config();
        config.overtime.enabled = true;
        config.overtime.threshold_hours_per_day = dec("9");

        let mut entries = full_attendance();
        entries[0].total_hours = dec("10");

        let data =
            generate_payslip_from_entries(&salary("30000"), &config, &may_2024(), &entries, "u")
                .unwrap();
        assert_eq!(data.attendance.overtime_hours, dec("1"));
    }

    #[test]
    fn test_salary_hours_per_day_overrides_config() {
        let record = SalaryRecord {
            hours_per_day: Some(dec("6")),
            ..salary("30000")
        };
        let entries: Vec<TimeEntry> = full_attendance()
            .into_iter()
            .map(|e| TimeEntry {
                total_hours: dec("6"),
                ..e
            })
            .collect();

        let data = generate_payslip_from_entries(
            &record,
            &default_payment_config(),
            &may_2024(),
            &entries,
            "u",
        )
        .unwrap();

        assert_eq!(data.attendance.half_days, 0);
        assert_eq!(data.payslip.earnings.hourly_rate, dec("185.19"));
    }

    #[test]
    fn test_provident_fund_on_base_pay() {
        let mut config = default_payment_config();
        config.allowances.hra = dec("5000");
        config.deductions.provident_fund_percentage = dec("12");

        let data = generate_payslip_from_entries(
            &salary("30000"),
            &config,
            &may_2024(),
            &full_attendance(),
            "u",
        )
        .unwrap();

        assert_eq!(data.payslip.deductions.provident_fund, dec("3600.00"));
    }

    #[test]
    fn test_late_arrivals_penalized() {
        let mut config = default_payment_config();
        config.working_days.expected_start_time = NaiveTime::from_hms_opt(9, 0, 0);
        config.deductions.late_arrival_penalty = dec("100");

        let mut entries = full_attendance();
        entries[0].time_in = NaiveTime::from_hms_opt(9, 30, 0);
        entries[1].time_in = NaiveTime::from_hms_opt(10, 0, 0);

        let data =
            generate_payslip_from_entries(&salary("30000"), &config, &may_2024(), &entries, "u")
                .unwrap();
        assert_eq!(data.attendance.late_arrivals, 2);
        assert_eq!(data.payslip.deductions.late_arrival, dec("200"));
    }

    #[test]
    fn test_daily_wage_from_entries() {
        let record = SalaryRecord {
            pay_type: PayType::DailyWage,
            ..salary("1000")
        };
        let entries: Vec<TimeEntry> = full_attendance().into_iter().take(20).collect();

        let data = generate_payslip_from_entries(
            &record,
            &default_payment_config(),
            &may_2024(),
            &entries,
            "u",
        )
        .unwrap();

        assert_eq!(data.attendance.absences, 7);
        assert_eq!(data.payslip.earnings.base_pay, dec("20000"));
    }

    #[test]
    fn test_no_entries_deducts_every_working_day() {
        let data = generate_payslip_from_entries(
            &salary("30000"),
            &default_payment_config(),
            &may_2024(),
            &[],
            "u",
        )
        .unwrap();
        assert_eq!(data.attendance.absences, 27);
        assert_eq!(data.attendance.attendance_ratio, Decimal::ZERO);
        // 27 x 1111.11 = 29999.97; the rounded daily rate leaves a residue.
        assert_eq!(data.payslip.earnings.base_pay, dec("0.03"));
    }

    #[test]
    fn test_inverted_cycle_rejected() {
        let cycle = SalaryCycle {
            start_date: make_date("2024-05-31"),
            end_date: make_date("2024-05-01"),
        };
        let result = generate_payslip_from_entries(
            &salary("30000"),
            &default_payment_config(),
            &cycle,
            &[],
            "u",
        );
        assert!(matches!(result, Err(EngineError::InvalidCycle { .. })));
    }
}

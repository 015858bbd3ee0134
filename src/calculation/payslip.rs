//! Configuration-driven payslip calculation.
//!
//! [`calculate_pay_slip`] turns a [`PaySlipInput`] into an itemized
//! [`PaySlipOutput`]. The pipeline itself ([`compute_payslip`]) is shared with
//! the attendance-driven calculator in
//! [`payslip_from_entries`](super::payslip_from_entries), which feeds it the
//! counts it derives from time entries instead.
//!
//! The steps run in a fixed order, each recorded in the audit trail:
//!
//! 1. Pro-rata factor from join/leave dates
//! 2. Daily and hourly rate derivation
//! 3. Unpaid-leave deduction
//! 4. Base pay
//! 5. Allowances
//! 6. Overtime
//! 7. Bonuses
//! 8. Gross earnings
//! 9. Deductions
//! 10. Net salary, floored at zero
//!
//! Every monetary leaf is rounded to 2 decimal places where it is computed.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AllowanceBreakdown, AllowanceConfig, AuditTrail, BonusBreakdown, BonusConfig,
    DeductionConfig, DeductionsBreakdown, EarningsBreakdown, ExtraItem, LineItem,
    OvertimeBreakdown, OvertimeRules, PaySlipInput, PaySlipOutput, PayType, PeriodSummary,
    RateBasis, SalaryCycle, WorkingDaysConfig,
};

use super::rounding::{percent_of, round_money, safe_div};
use super::working_days::{WorkingDaysSummary, calculate_working_days};

/// Days assumed in a month under [`RateBasis::CalendarMonth`].
pub const CALENDAR_MONTH_DAYS: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// The cycle narrowed to the employment dates, with its working-day counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedPeriod {
    pub cycle: SalaryCycle,
    pub total_days: u32,
    pub effective_days: u32,
    pub pro_rata_factor: Decimal,
    pub working: WorkingDaysSummary,
}

/// Narrows `cycle` to `[max(start, join), min(end, leave)]`.
///
/// The pro-rata factor is `effective_days / total_days`, 1 for an untruncated
/// cycle and 0 when the employment dates do not overlap the cycle.
pub(crate) fn resolve_period(
    cycle: &SalaryCycle,
    join_date: Option<NaiveDate>,
    leave_date: Option<NaiveDate>,
    working_days: &WorkingDaysConfig,
) -> EngineResult<ResolvedPeriod> {
    if cycle.end_date < cycle.start_date {
        return Err(EngineError::InvalidCycle {
            message: format!("cycle {} ends before it starts", cycle),
        });
    }
    if let (Some(join), Some(leave)) = (join_date, leave_date) {
        if leave < join {
            return Err(EngineError::CalculationError {
                message: format!("leave date {} is before join date {}", leave, join),
            });
        }
    }

    let start = join_date.map_or(cycle.start_date, |d| d.max(cycle.start_date));
    let end = leave_date.map_or(cycle.end_date, |d| d.min(cycle.end_date));
    let effective = SalaryCycle {
        start_date: start,
        end_date: end,
    };

    let total_days = cycle.total_days();
    let effective_days = effective.total_days();
    let pro_rata_factor = safe_div(Decimal::from(effective_days), Decimal::from(total_days));
    let working = calculate_working_days(start, end, working_days);

    Ok(ResolvedPeriod {
        cycle: *cycle,
        total_days,
        effective_days,
        pro_rata_factor,
        working,
    })
}

/// What named allowances are scaled by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AllowanceBasis {
    /// The period's pro-rata factor.
    ProRata,
    /// Observed attendance ratio.
    Attendance(Decimal),
}

/// What the provident-fund percentage applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProvidentFundBase {
    GrossEarnings,
    BasePay,
}

/// Everything the shared pipeline needs, regardless of entry point.
#[derive(Debug, Clone)]
pub(crate) struct PayContext<'a> {
    pub salary_amount: Decimal,
    pub pay_type: PayType,
    pub rate_basis: RateBasis,
    pub hours_per_day: Decimal,
    pub period: ResolvedPeriod,
    pub paid_leave_days: Decimal,
    pub unpaid_leave_taken: Decimal,
    pub half_days_taken: Decimal,
    pub allowance_basis: AllowanceBasis,
    pub provident_fund_base: ProvidentFundBase,
    pub overtime: &'a OvertimeRules,
    pub deductions: &'a DeductionConfig,
    pub allowances: &'a AllowanceConfig,
    pub bonuses: &'a BonusConfig,
    pub late_arrivals: u32,
    pub currency: &'a str,
}

struct Rates {
    prorated_salary: Decimal,
    daily: Decimal,
    hourly: Decimal,
}

fn derive_rates(ctx: &PayContext<'_>) -> Rates {
    let hours_per_day = ctx.hours_per_day;
    match ctx.pay_type {
        PayType::FixedMonthly => {
            let prorated_salary = round_money(ctx.salary_amount * ctx.period.pro_rata_factor);
            let divisor = match ctx.rate_basis {
                RateBasis::CalendarMonth => CALENDAR_MONTH_DAYS,
                RateBasis::CycleDays => Decimal::from(ctx.period.effective_days),
                RateBasis::WorkingDaysOnly => ctx.period.working.working_days,
            };
            let daily = round_money(safe_div(prorated_salary, divisor));
            Rates {
                prorated_salary,
                daily,
                hourly: round_money(safe_div(daily, hours_per_day)),
            }
        }
        PayType::DailyWage => Rates {
            prorated_salary: Decimal::ZERO,
            daily: round_money(ctx.salary_amount),
            hourly: round_money(safe_div(ctx.salary_amount, hours_per_day)),
        },
        PayType::Hourly => Rates {
            prorated_salary: Decimal::ZERO,
            daily: round_money(ctx.salary_amount * hours_per_day),
            hourly: round_money(ctx.salary_amount),
        },
    }
}

fn extra_line(item: &ExtraItem, percentage_base: Decimal, factor: Decimal) -> LineItem {
    let amount = if item.is_percentage {
        percent_of(percentage_base, item.amount)
    } else {
        round_money(item.amount * factor)
    };
    LineItem {
        description: item.description.clone(),
        amount,
    }
}

fn calculate_allowances(
    config: &AllowanceConfig,
    factor: Decimal,
    base_pay: Decimal,
) -> AllowanceBreakdown {
    let scale = |amount: Decimal| round_money(amount * factor);
    let others: Vec<LineItem> = config
        .others
        .iter()
        .map(|item| extra_line(item, base_pay, factor))
        .collect();

    let hra = scale(config.hra);
    let da = scale(config.da);
    let transport = scale(config.transport);
    let medical = scale(config.medical);
    let special = scale(config.special);
    let total = hra
        + da
        + transport
        + medical
        + special
        + others.iter().map(|l| l.amount).sum::<Decimal>();

    AllowanceBreakdown {
        hra,
        da,
        transport,
        medical,
        special,
        others,
        total,
    }
}

/// Overtime pay per tier. All tiers pay zero when overtime is disabled.
pub fn calculate_overtime_pay(rules: &OvertimeRules, hourly_rate: Decimal) -> OvertimeBreakdown {
    let tier = |multiplier: Decimal, hours: Decimal| {
        if rules.enabled {
            round_money(hourly_rate * multiplier * hours)
        } else {
            Decimal::ZERO
        }
    };

    let regular_pay = tier(rules.regular_multiplier, rules.regular_hours);
    let weekend_pay = tier(rules.weekend_multiplier, rules.weekend_hours);
    let holiday_pay = tier(rules.holiday_multiplier, rules.holiday_hours);

    OvertimeBreakdown {
        regular_hours: rules.regular_hours,
        regular_pay,
        weekend_hours: rules.weekend_hours,
        weekend_pay,
        holiday_hours: rules.holiday_hours,
        holiday_pay,
        total: regular_pay + weekend_pay + holiday_pay,
    }
}

fn calculate_bonuses(config: &BonusConfig, base_pay: Decimal) -> BonusBreakdown {
    let performance = round_money(config.performance);
    let attendance = round_money(config.attendance);
    let others: Vec<LineItem> = config
        .others
        .iter()
        .map(|item| extra_line(item, base_pay, Decimal::ONE))
        .collect();
    let total = performance + attendance + others.iter().map(|l| l.amount).sum::<Decimal>();

    BonusBreakdown {
        performance,
        attendance,
        others,
        total,
    }
}

fn calculate_deductions(
    config: &DeductionConfig,
    gross: Decimal,
    provident_fund_base: Decimal,
    late_arrivals: u32,
) -> DeductionsBreakdown {
    let fixed = round_money(config.fixed_amount);
    let percentage = percent_of(gross, config.percentage);
    let late_arrival = round_money(config.late_arrival_penalty * Decimal::from(late_arrivals));
    let professional_tax = round_money(config.professional_tax);
    let provident_fund = percent_of(provident_fund_base, config.provident_fund_percentage);
    let income_tax = if config.calculate_tax {
        percent_of(gross, config.income_tax_percentage)
    } else {
        Decimal::ZERO
    };
    let health_insurance = round_money(config.health_insurance);
    let others: Vec<LineItem> = config
        .others
        .iter()
        .map(|item| extra_line(item, gross, Decimal::ONE))
        .collect();

    let total = fixed
        + percentage
        + late_arrival
        + professional_tax
        + provident_fund
        + income_tax
        + health_insurance
        + others.iter().map(|l| l.amount).sum::<Decimal>();

    DeductionsBreakdown {
        fixed,
        percentage,
        late_arrival,
        professional_tax,
        provident_fund,
        income_tax,
        health_insurance,
        others,
        total,
    }
}

/// Runs the shared pipeline over a prepared context.
pub(crate) fn compute_payslip(ctx: &PayContext<'_>) -> PaySlipOutput {
    let mut trail = AuditTrail::new();
    let period = &ctx.period;

    trail.record(
        "pro_rata",
        "Pro-rata Factor",
        json!({
            "total_days": period.total_days,
            "effective_days": period.effective_days,
        }),
        json!({ "pro_rata_factor": period.pro_rata_factor }),
        format!(
            "{} of {} cycle days fall within the employment dates",
            period.effective_days, period.total_days
        ),
    );

    let rates = derive_rates(ctx);
    debug!(
        pay_type = ?ctx.pay_type,
        daily_rate = %rates.daily,
        hourly_rate = %rates.hourly,
        "Derived rates"
    );
    trail.record(
        "rate_derivation",
        "Rate Derivation",
        json!({
            "salary_amount": ctx.salary_amount,
            "pay_type": ctx.pay_type,
            "rate_basis": ctx.rate_basis,
            "working_days": period.working.working_days,
            "hours_per_day": ctx.hours_per_day,
        }),
        json!({
            "prorated_salary": rates.prorated_salary,
            "daily_rate": rates.daily,
            "hourly_rate": rates.hourly,
        }),
        format!(
            "Daily rate {} and hourly rate {} derived from {:?} salary",
            rates.daily, rates.hourly, ctx.pay_type
        ),
    );

    let unpaid_leave_days = ctx.unpaid_leave_taken + ctx.half_days_taken * Decimal::new(5, 1);
    let unpaid_leave_deduction = round_money(rates.daily * unpaid_leave_days);
    trail.record(
        "unpaid_leave",
        "Unpaid Leave Deduction",
        json!({
            "unpaid_leave_taken": ctx.unpaid_leave_taken,
            "half_days_taken": ctx.half_days_taken,
            "daily_rate": rates.daily,
        }),
        json!({
            "unpaid_leave_days": unpaid_leave_days,
            "deduction": unpaid_leave_deduction,
        }),
        format!("{} unpaid days at the daily rate", unpaid_leave_days),
    );

    let days_worked = (period.working.working_days - unpaid_leave_days).max(Decimal::ZERO);
    let base_pay = match ctx.pay_type {
        PayType::FixedMonthly => round_money(rates.prorated_salary - unpaid_leave_deduction),
        PayType::DailyWage => round_money(rates.daily * days_worked),
        PayType::Hourly => round_money(rates.hourly * days_worked * ctx.hours_per_day),
    };
    trail.record(
        "base_pay",
        "Base Pay",
        json!({ "days_worked": days_worked }),
        json!({ "base_pay": base_pay }),
        match ctx.pay_type {
            PayType::FixedMonthly => "Pro-rated salary less unpaid leave".to_string(),
            PayType::DailyWage => format!("{} days at the daily rate", days_worked),
            PayType::Hourly => format!("{} days of {} hours", days_worked, ctx.hours_per_day),
        },
    );

    let allowance_factor = match ctx.allowance_basis {
        AllowanceBasis::ProRata => period.pro_rata_factor,
        AllowanceBasis::Attendance(ratio) => ratio,
    };
    let allowances = calculate_allowances(ctx.allowances, allowance_factor, base_pay);
    trail.record(
        "allowances",
        "Allowances",
        json!({ "factor": allowance_factor }),
        json!({ "total": allowances.total }),
        match ctx.allowance_basis {
            AllowanceBasis::ProRata => "Allowances scaled by the pro-rata factor",
            AllowanceBasis::Attendance(_) => "Allowances scaled by the attendance ratio",
        },
    );

    let overtime = calculate_overtime_pay(ctx.overtime, rates.hourly);
    trail.record(
        "overtime",
        "Overtime",
        json!({
            "enabled": ctx.overtime.enabled,
            "regular_hours": overtime.regular_hours,
            "weekend_hours": overtime.weekend_hours,
            "holiday_hours": overtime.holiday_hours,
        }),
        json!({ "total": overtime.total }),
        if ctx.overtime.enabled {
            "Each tier paid at hourly rate x multiplier x hours"
        } else {
            "Overtime disabled"
        },
    );

    let bonuses = calculate_bonuses(ctx.bonuses, base_pay);
    trail.record(
        "bonuses",
        "Bonuses",
        json!({ "others": ctx.bonuses.others.len() }),
        json!({ "total": bonuses.total }),
        "Performance, attendance and other bonuses",
    );

    let gross_earnings = round_money(base_pay + allowances.total + overtime.total + bonuses.total);
    trail.record(
        "gross",
        "Gross Earnings",
        json!({
            "base_pay": base_pay,
            "allowances": allowances.total,
            "overtime": overtime.total,
            "bonuses": bonuses.total,
        }),
        json!({ "gross_earnings": gross_earnings }),
        "Base pay plus allowances, overtime and bonuses",
    );

    let pf_base = match ctx.provident_fund_base {
        ProvidentFundBase::GrossEarnings => gross_earnings,
        ProvidentFundBase::BasePay => base_pay,
    };
    let deductions =
        calculate_deductions(ctx.deductions, gross_earnings, pf_base, ctx.late_arrivals);
    trail.record(
        "deductions",
        "Deductions",
        json!({
            "gross_earnings": gross_earnings,
            "provident_fund_base": pf_base,
            "late_arrivals": ctx.late_arrivals,
        }),
        json!({ "total": deductions.total }),
        "Statutory, fixed, percentage and per-item deductions against gross earnings",
    );

    let net_salary = (gross_earnings - deductions.total).max(Decimal::ZERO);
    trail.record(
        "net",
        "Net Salary",
        json!({
            "gross_earnings": gross_earnings,
            "total_deductions": deductions.total,
        }),
        json!({ "net_salary": net_salary }),
        if gross_earnings < deductions.total {
            "Deductions exceed gross; net floored at zero"
        } else {
            "Gross less deductions"
        },
    );

    debug!(
        gross = %gross_earnings,
        deductions = %deductions.total,
        net = %net_salary,
        "Computed payslip"
    );

    let total_deductions = deductions.total;
    PaySlipOutput {
        period: PeriodSummary {
            cycle: period.cycle,
            total_days: period.total_days,
            effective_days: period.effective_days,
            working_days: period.working.working_days,
            weekly_offs: period.working.weekly_offs,
            half_days: period.working.half_days,
            pro_rata_factor: period.pro_rata_factor,
            days_worked,
            paid_leave_days: ctx.paid_leave_days,
            unpaid_leave_days,
        },
        earnings: EarningsBreakdown {
            prorated_salary: rates.prorated_salary,
            daily_rate: rates.daily,
            hourly_rate: rates.hourly,
            unpaid_leave_deduction,
            base_pay,
            allowances,
            overtime,
            bonuses,
            gross_earnings,
        },
        deductions,
        gross_earnings,
        total_deductions,
        net_salary,
        currency: ctx.currency.to_string(),
        audit_trail: trail.into_steps(),
    }
}

/// Calculates a payslip from an explicit input.
///
/// Allowances are scaled by the pro-rata factor and the provident fund is a
/// percentage of gross earnings.
///
/// # Errors
///
/// Returns [`EngineError::InvalidCycle`] if the cycle ends before it starts and
/// [`EngineError::CalculationError`] if the leave date precedes the join date.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::calculate_pay_slip;
/// use payslip_engine::models::PaySlipInput;
/// use rust_decimal::Decimal;
///
/// let input: PaySlipInput = serde_json::from_str(r#"{
///     "salary_amount": "30000",
///     "cycle": { "start_date": "2024-05-01", "end_date": "2024-05-31" }
/// }"#).unwrap();
///
/// let payslip = calculate_pay_slip(&input).unwrap();
/// assert_eq!(payslip.earnings.daily_rate, Decimal::new(111111, 2));
/// assert_eq!(payslip.net_salary, Decimal::new(30000, 0));
/// ```
pub fn calculate_pay_slip(input: &PaySlipInput) -> EngineResult<PaySlipOutput> {
    let period = resolve_period(
        &input.cycle,
        input.join_date,
        input.leave_date,
        &input.working_days,
    )?;

    let ctx = PayContext {
        salary_amount: input.salary_amount,
        pay_type: input.pay_type,
        rate_basis: input.rate_basis,
        hours_per_day: input.working_days.hours_per_day,
        period,
        paid_leave_days: input.leave.paid_leave_taken,
        unpaid_leave_taken: input.leave.unpaid_leave_taken,
        half_days_taken: input.leave.half_days_taken,
        allowance_basis: AllowanceBasis::ProRata,
        provident_fund_base: ProvidentFundBase::GrossEarnings,
        overtime: &input.overtime,
        deductions: &input.deductions,
        allowances: &input.allowances,
        bonuses: &input.bonuses,
        late_arrivals: input.late_arrivals,
        currency: &input.currency,
    };

    Ok(compute_payslip(&ctx))
}

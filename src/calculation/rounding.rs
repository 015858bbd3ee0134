//! Monetary rounding and guarded arithmetic.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places kept on every monetary value.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Rounds a monetary amount to 2 decimal places, midpoint away from zero.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s| Decimal::from_str(s).unwrap();
/// assert_eq!(round_money(dec("1111.1111")), dec("1111.11"));
/// assert_eq!(round_money(dec("138.88875")), dec("138.89"));
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Divides, resolving a zero (or negative) divisor to zero.
pub(crate) fn safe_div(numerator: Decimal, divisor: Decimal) -> Decimal {
    if divisor <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        numerator / divisor
    }
}

/// `base × percent / 100`, rounded as money.
pub(crate) fn percent_of(base: Decimal, percent: Decimal) -> Decimal {
    round_money(base * percent / Decimal::ONE_HUNDRED)
}

//! Leave accrual calculation.
//!
//! Entitlement accrues at `annual_days / 12` per month worked. Proration
//! only applies during the hire year; from the first of January after hire
//! the employee is entitled to the full annual allocation. This is a policy
//! simplification, not a bug: there is no month-by-month proration in later
//! years.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

/// Day of month from which the current month counts as accrued.
pub const ACCRUAL_BONUS_DAY: u32 = 15;

/// Computes the leave days accrued as of a date.
///
/// For an employee hired in the current year:
/// `months_worked = (current_year - hire_year) × 12 + (current_month -
/// hire_month)`, clamped to ≥ 0, plus one extra month when the current
/// day-of-month is at least [`ACCRUAL_BONUS_DAY`]; accrued days are
/// `(months_worked + bonus) × annual_days / 12`.
///
/// An employee hired in any prior year has the full `annual_days` accrued.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::accrued_leave_days;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let hire = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
/// let as_of = NaiveDate::from_ymd_opt(2025, 7, 20).unwrap();
/// let accrued = accrued_leave_days(hire, Decimal::from(22), as_of);
/// // 6 full months + the mid-month bonus = 7 × (22 / 12) ≈ 12.83
/// assert_eq!(
///     accrued.round_dp(2),
///     Decimal::from_str("12.83").unwrap()
/// );
/// ```
pub fn accrued_leave_days(
    hire_date: NaiveDate,
    annual_leave_days: Decimal,
    as_of: NaiveDate,
) -> Decimal {
    if hire_date.year() < as_of.year() {
        return annual_leave_days;
    }

    let monthly_accrual = annual_leave_days / Decimal::from(12);

    let months_worked = ((as_of.year() - hire_date.year()) * 12
        + (as_of.month() as i32 - hire_date.month() as i32))
        .max(0);
    let bonus = if as_of.day() >= ACCRUAL_BONUS_DAY { 1 } else { 0 };

    Decimal::from(months_worked + bonus) * monthly_accrual
}

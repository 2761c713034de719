//! Flat-rate levy on PAYE.
//!
//! Some jurisdictions charge a levy as a fixed percentage of the PAYE
//! withheld (e.g. a 3% health levy). It is a pure function of the PAYE
//! amount with no state and no effective-date lookup.

use rust_decimal::Decimal;

use super::round_money;

/// The default jurisdiction levy rate, 3% of PAYE.
pub fn default_levy_rate() -> Decimal {
    Decimal::new(3, 2)
}

/// Computes the flat-rate levy on a period's PAYE.
///
/// `paye × levy_rate`, rounded to 2 decimal places with standard rounding.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{calculate_levy, default_levy_rate};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let paye = Decimal::from_str("570.00").unwrap();
/// let levy = calculate_levy(paye, default_levy_rate());
/// assert_eq!(levy, Decimal::from_str("17.10").unwrap());
/// ```
pub fn calculate_levy(paye: Decimal, levy_rate: Decimal) -> Decimal {
    round_money(paye * levy_rate)
}

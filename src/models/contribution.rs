//! Statutory contribution rate model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An effective-dated statutory contribution rate (e.g. social security)
/// for one tenant and currency.
///
/// Selection across time follows the same rule as tax tables: at most one
/// rate is effective for any given date
/// (`effective_from <= date < effective_to`, open-ended when `effective_to`
/// is `None`).
///
/// # Example
///
/// ```
/// use payroll_engine::models::ContributionRate;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let nssa = ContributionRate {
///     tenant_id: "acme".to_string(),
///     currency: "USD".to_string(),
///     effective_from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     effective_to: None,
///     employee_rate: Decimal::from_str("0.03").unwrap(),
///     employer_rate: Decimal::from_str("0.03").unwrap(),
///     max_cap: Some(Decimal::from_str("1000").unwrap()),
/// };
/// assert!(nssa.is_effective(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRate {
    /// The tenant this rate belongs to.
    pub tenant_id: String,
    /// ISO currency code the cap is denominated in.
    pub currency: String,
    /// First date (inclusive) this rate is effective.
    pub effective_from: NaiveDate,
    /// First date (exclusive) this rate stops being effective, or `None`
    /// for an open-ended rate.
    pub effective_to: Option<NaiveDate>,
    /// Employee-side rate as a fraction of insurable pay.
    pub employee_rate: Decimal,
    /// Employer-side rate as a fraction of insurable pay.
    pub employer_rate: Decimal,
    /// Ceiling on the contribution base. Pay above the cap contributes as if
    /// it were exactly the cap; `None` means uncapped.
    pub max_cap: Option<Decimal>,
}

impl ContributionRate {
    /// Returns true if this rate is effective on the given date.
    pub fn is_effective(&self, date: NaiveDate) -> bool {
        self.effective_from <= date && self.effective_to.is_none_or(|to| date < to)
    }
}

//! Capped statutory contribution calculation.
//!
//! Social-security style contributions split between employee and employer,
//! each a percentage of insurable pay. When a cap is configured the cap
//! applies to the contribution *base*, not to the resulting amounts: pay
//! above the cap contributes exactly as if it were the cap.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::ContributionRate;

use super::round_money;

/// The employee/employer split produced by a contribution calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionResult {
    /// The pay actually contributed on: `min(pay, max_cap)`.
    pub insurable_pay: Decimal,
    /// Employee-side contribution, rounded to 2 decimal places.
    pub employee_contribution: Decimal,
    /// Employer-side contribution, rounded to 2 decimal places
    /// independently of the employee side.
    pub employer_contribution: Decimal,
}

/// Selects the contribution rate effective for a tenant, currency and date.
///
/// Same effective-date rule as tax tables: `effective_from <= date <
/// effective_to`, latest `effective_from` wins.
///
/// # Errors
///
/// Returns [`EngineError::NotConfigured`] when no rate matches; the pay
/// period must abort rather than contribute zero.
pub fn resolve_contribution_rate<'a>(
    rates: &'a [ContributionRate],
    tenant_id: &str,
    currency: &str,
    date: NaiveDate,
) -> EngineResult<&'a ContributionRate> {
    rates
        .iter()
        .filter(|r| r.tenant_id == tenant_id && r.currency == currency && r.is_effective(date))
        .max_by_key(|r| r.effective_from)
        .ok_or_else(|| EngineError::NotConfigured {
            tenant_id: tenant_id.to_string(),
            currency: currency.to_string(),
            date,
        })
}

/// Computes the capped employee/employer contribution split on gross pay.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_contribution;
/// use payroll_engine::models::ContributionRate;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let rate = ContributionRate {
///     tenant_id: "acme".to_string(),
///     currency: "USD".to_string(),
///     effective_from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     effective_to: None,
///     employee_rate: dec("0.03"),
///     employer_rate: dec("0.03"),
///     max_cap: Some(dec("1000")),
/// };
///
/// let result = calculate_contribution(dec("1500"), &rate);
/// // Capped at 1000: 1000 × 0.03 = 30.00, not 1500 × 0.03.
/// assert_eq!(result.employee_contribution, dec("30.00"));
/// ```
pub fn calculate_contribution(pay: Decimal, rate: &ContributionRate) -> ContributionResult {
    let insurable_pay = match rate.max_cap {
        Some(cap) if pay > cap => cap,
        _ => pay,
    };

    ContributionResult {
        insurable_pay,
        employee_contribution: round_money(insurable_pay * rate.employee_rate),
        employer_contribution: round_money(insurable_pay * rate.employer_rate),
    }
}

//! Historical currency rate resolution and conversion.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::CurrencyRate;
use crate::repository::PayrollRepository;

use super::round_money;

/// The outcome of a currency conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// The converted amount, rounded to 2 decimal places. For a
    /// same-currency conversion this is the input amount, untouched.
    pub amount: Decimal,
    /// The rate record applied, or `None` for the same-currency identity
    /// short-circuit (no lookup is performed in that case).
    pub rate: Option<CurrencyRate>,
}

/// Finds the most recent rate with `effective_date <= date` for a directed
/// currency pair.
///
/// Rates are never interpolated and never inverted: only records whose
/// `from_currency`/`to_currency` match exactly are candidates.
///
/// # Errors
///
/// Returns [`EngineError::RateNotFound`] when no record exists on or before
/// the date. Callers must propagate this rather than assume parity.
pub fn resolve_currency_rate<'a>(
    rates: &'a [CurrencyRate],
    from_currency: &str,
    to_currency: &str,
    date: NaiveDate,
) -> EngineResult<&'a CurrencyRate> {
    rates
        .iter()
        .filter(|r| {
            r.from_currency == from_currency
                && r.to_currency == to_currency
                && r.effective_date <= date
        })
        .max_by_key(|r| r.effective_date)
        .ok_or_else(|| EngineError::RateNotFound {
            from_currency: from_currency.to_string(),
            to_currency: to_currency.to_string(),
            date,
        })
}

/// Converts an amount between currencies at the rate effective on a date.
///
/// Same-currency conversions return the amount unchanged without touching
/// the repository (identity law). Otherwise the resolved rate is applied and
/// the result rounded to 2 decimal places.
///
/// # Errors
///
/// Propagates [`EngineError::RateNotFound`] from resolution and any error
/// the repository surfaces.
///
/// # Examples
///
/// ```no_run
/// use payroll_engine::calculation::convert_currency;
/// use payroll_engine::repository::InMemoryRepository;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let repo = InMemoryRepository::new();
/// let date = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
/// let amount = Decimal::from_str("1000000").unwrap();
/// let result = convert_currency(&repo, "acme", amount, "ZWL", "USD", date)?;
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
pub fn convert_currency(
    repo: &dyn PayrollRepository,
    tenant_id: &str,
    amount: Decimal,
    from_currency: &str,
    to_currency: &str,
    date: NaiveDate,
) -> EngineResult<ConversionResult> {
    if from_currency == to_currency {
        return Ok(ConversionResult { amount, rate: None });
    }

    let rates = repo.currency_rates(tenant_id, from_currency, to_currency)?;
    let rate = resolve_currency_rate(&rates, from_currency, to_currency, date)?;

    Ok(ConversionResult {
        amount: round_money(amount * rate.rate),
        rate: Some(rate.clone()),
    })
}

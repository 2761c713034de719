//! Effective-dated tax table resolution.

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::TaxTable;

/// Selects the tax table effective for a tenant, currency and date.
///
/// Candidates must match the currency and satisfy
/// `effective_from <= date < effective_to` (open-ended tables have no upper
/// edge). Among matches the one with the latest `effective_from` wins, so an
/// appended table supersedes an older open-ended one from its effective date
/// onward.
///
/// # Errors
///
/// Returns [`EngineError::NotConfigured`] when no table matches. This must
/// abort any dependent calculation; the engine never defaults to zero tax.
///
/// # Examples
///
/// ```no_run
/// use payroll_engine::calculation::resolve_tax_table;
/// use chrono::NaiveDate;
///
/// # let tables: Vec<payroll_engine::models::TaxTable> = vec![];
/// let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// let table = resolve_tax_table(&tables, "acme", "USD", date)?;
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
pub fn resolve_tax_table<'a>(
    tables: &'a [TaxTable],
    tenant_id: &str,
    currency: &str,
    date: NaiveDate,
) -> EngineResult<&'a TaxTable> {
    let resolved = tables
        .iter()
        .filter(|t| t.tenant_id == tenant_id && t.currency == currency && t.is_effective(date))
        .max_by_key(|t| t.effective_from)
        .ok_or_else(|| EngineError::NotConfigured {
            tenant_id: tenant_id.to_string(),
            currency: currency.to_string(),
            date,
        })?;

    tracing::debug!(
        tenant_id,
        currency,
        %date,
        effective_from = %resolved.effective_from,
        "resolved tax table"
    );

    Ok(resolved)
}

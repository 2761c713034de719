//! Tax bracket and tax table models.
//!
//! A [`TaxTable`] is an effective-dated, per-tenant, per-currency bracket
//! schedule. Tables are append-only: once a posted pay period references a
//! table it is never mutated; a new table with a new effective range is added
//! instead.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A single marginal tax bracket.
///
/// Brackets are ordered ascending by `min`, are contiguous and
/// non-overlapping, and the final bracket of a schedule has `max: None`
/// (unbounded). `fixed` is the precomputed cumulative tax on all lower
/// brackets, so the tax at any income inside the bracket is
/// `fixed + (income - min) * rate` without re-summing lower slices.
///
/// # Example
///
/// ```
/// use payroll_engine::models::TaxBracket;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let bracket = TaxBracket {
///     min: Decimal::from_str("14400").unwrap(),
///     max: Some(Decimal::from_str("36000").unwrap()),
///     fixed: Decimal::from_str("1440").unwrap(),
///     rate: Decimal::from_str("0.25").unwrap(),
/// };
/// assert!(bracket.contains(Decimal::from_str("20000").unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Lower edge of the bracket (exclusive at the margin; an income exactly
    /// at `min` still belongs to the bracket below).
    pub min: Decimal,
    /// Upper edge of the bracket, inclusive. `None` for the unbounded top
    /// bracket.
    pub max: Option<Decimal>,
    /// Precomputed cumulative tax on all lower brackets.
    pub fixed: Decimal,
    /// Marginal rate applied to the slice of income inside this bracket,
    /// expressed as a fraction (e.g. `0.25` for 25%).
    pub rate: Decimal,
}

impl TaxBracket {
    /// Returns true if an income at the margin falls inside this bracket.
    ///
    /// Boundary values belong to the lower bracket: an income exactly equal
    /// to `max` is still inside this bracket, and an income exactly equal to
    /// `min` is not.
    pub fn contains(&self, income: Decimal) -> bool {
        income > self.min && self.max.is_none_or(|max| income <= max)
    }
}

/// An effective-dated bracket schedule for one tenant and currency.
///
/// Multiple tables may exist per tenant/currency across time; at most one is
/// effective for any given date (`effective_from <= date < effective_to`, or
/// `effective_to` is `None` for an open-ended table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxTable {
    /// The tenant this table belongs to.
    pub tenant_id: String,
    /// ISO currency code the bracket amounts are denominated in.
    pub currency: String,
    /// First date (inclusive) this table is effective.
    pub effective_from: NaiveDate,
    /// First date (exclusive) this table stops being effective, or `None`
    /// for an open-ended table.
    pub effective_to: Option<NaiveDate>,
    /// Ordered ascending bracket schedule.
    pub brackets: Vec<TaxBracket>,
}

impl TaxTable {
    /// Returns true if this table is effective on the given date.
    pub fn is_effective(&self, date: NaiveDate) -> bool {
        self.effective_from <= date && self.effective_to.is_none_or(|to| date < to)
    }

    /// Validates the bracket schedule.
    ///
    /// Checks that:
    /// - the schedule is non-empty and starts at zero
    /// - brackets are contiguous and non-overlapping
    ///   (`brackets[i].max == brackets[i + 1].min`)
    /// - only the final bracket is unbounded
    /// - each `fixed` equals the tax the schedule itself produces at the
    ///   bracket's `min` (i.e. `prev.fixed + (min - prev.min) * prev.rate`)
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTaxTable`] describing the first
    /// violation found.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidTaxTable {
            currency: self.currency.clone(),
            message,
        };

        let first = self
            .brackets
            .first()
            .ok_or_else(|| invalid("bracket schedule is empty".to_string()))?;

        if first.min != Decimal::ZERO {
            return Err(invalid(format!(
                "first bracket must start at 0, starts at {}",
                first.min
            )));
        }
        if first.fixed != Decimal::ZERO {
            return Err(invalid(format!(
                "first bracket must have fixed 0, has {}",
                first.fixed
            )));
        }

        for (i, pair) in self.brackets.windows(2).enumerate() {
            let (prev, next) = (&pair[0], &pair[1]);

            let prev_max = prev.max.ok_or_else(|| {
                invalid(format!("bracket {} is unbounded but not last", i))
            })?;
            if prev_max != next.min {
                return Err(invalid(format!(
                    "brackets {} and {} are not contiguous ({} != {})",
                    i,
                    i + 1,
                    prev_max,
                    next.min
                )));
            }

            let expected_fixed = prev.fixed + (next.min - prev.min) * prev.rate;
            if next.fixed != expected_fixed {
                return Err(invalid(format!(
                    "bracket {} has fixed {} but the lower brackets sum to {}",
                    i + 1,
                    next.fixed,
                    expected_fixed
                )));
            }
        }

        if let Some(last) = self.brackets.last() {
            if last.max.is_some() {
                return Err(invalid(
                    "final bracket must be unbounded (max: null)".to_string(),
                ));
            }
        }

        Ok(())
    }
}

//! Progressive (marginal-rate) tax calculation.
//!
//! Used both by the PAYE engine and for rate introspection. The schedule's
//! `fixed` anchors mean the tax at any income is a single bracket lookup
//! plus one multiplication, with no re-summation of lower slices.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::TaxBracket;

/// Computes the cumulative tax owed on an income under marginal-rate
/// taxation.
///
/// Walks the brackets in ascending order; the first bracket whose interval
/// contains the income (boundary values belong to the lower bracket, so the
/// upper edge is inclusive) yields
/// `bracket.fixed + (income - bracket.min) * bracket.rate`.
///
/// The function is non-decreasing in income and continuous at bracket
/// boundaries as long as the schedule's `fixed` anchors are consistent,
/// which [`crate::models::TaxTable::validate`] enforces on import.
///
/// # Arguments
///
/// * `income` - The (annualized) income to tax. Must be non-negative.
/// * `brackets` - An ordered, contiguous bracket schedule ending in an
///   unbounded bracket.
///
/// # Returns
///
/// Returns the cumulative tax, or an error if:
/// - The income is negative (`CalculationError`)
/// - The schedule is empty or its top bracket is bounded below the income
///   (`CalculationError`; a validated schedule cannot trigger this)
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::progressive_tax;
/// use payroll_engine::models::TaxBracket;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let brackets = vec![
///     TaxBracket { min: dec("0"), max: Some(dec("7200")), fixed: dec("0"), rate: dec("0") },
///     TaxBracket { min: dec("7200"), max: Some(dec("14400")), fixed: dec("0"), rate: dec("0.20") },
///     TaxBracket { min: dec("14400"), max: Some(dec("36000")), fixed: dec("1440"), rate: dec("0.25") },
///     TaxBracket { min: dec("36000"), max: None, fixed: dec("6840"), rate: dec("0.30") },
/// ];
///
/// assert_eq!(progressive_tax(dec("36000"), &brackets).unwrap(), dec("6840"));
/// ```
pub fn progressive_tax(income: Decimal, brackets: &[TaxBracket]) -> EngineResult<Decimal> {
    if income < Decimal::ZERO {
        return Err(EngineError::CalculationError {
            message: format!("taxable income cannot be negative: {}", income),
        });
    }

    for bracket in brackets {
        if income <= bracket.min {
            // Brackets are ascending; the income fell at or below every
            // remaining lower edge, so nothing further applies.
            break;
        }
        let within_upper = bracket.max.is_none_or(|max| income <= max);
        if within_upper {
            return Ok(bracket.fixed + (income - bracket.min) * bracket.rate);
        }
    }

    if income == Decimal::ZERO || brackets.first().is_some_and(|b| income <= b.min) {
        return Ok(Decimal::ZERO);
    }

    Err(EngineError::CalculationError {
        message: format!("no bracket covers income {}", income),
    })
}

/// Finds the bracket an income falls in, using the same boundary tie-break
/// as [`progressive_tax`]: an income exactly at a bracket edge belongs to
/// the lower bracket. Incomes at or below the schedule floor map to the
/// first bracket.
///
/// Returns `None` only for an empty schedule.
pub fn bracket_for(income: Decimal, brackets: &[TaxBracket]) -> Option<&TaxBracket> {
    brackets
        .iter()
        .find(|b| b.max.is_none_or(|max| income <= max))
}

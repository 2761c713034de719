//! Calculation logic for the payroll engine.
//!
//! This module contains all the statutory calculators: effective-dated tax
//! table resolution, progressive (marginal-rate) tax, the period PAYE engine
//! with annualization and YTD tracking, the flat-rate levy, capped statutory
//! contributions, historical currency resolution and conversion, leave
//! accrual, and the leave balance ledger.

mod contribution;
mod currency;
mod leave_accrual;
mod leave_ledger;
mod levy;
mod paye;
mod progressive_tax;
mod tax_table;

pub use contribution::{ContributionResult, calculate_contribution, resolve_contribution_rate};
pub use currency::{ConversionResult, convert_currency, resolve_currency_rate};
pub use leave_accrual::{ACCRUAL_BONUS_DAY, accrued_leave_days};
pub use leave_ledger::{
    BalanceUpdate, BatchFailure, LeaveLedger, TenantRecalculation,
};
pub use levy::{calculate_levy, default_levy_rate};
pub use paye::{DEFAULT_PERIOD_MULTIPLIER, PayeInput, PayeResult, calculate_paye};
pub use progressive_tax::{bracket_for, progressive_tax};
pub use tax_table::resolve_tax_table;

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a monetary amount to 2 decimal places using standard rounding
/// (midpoint away from zero), never truncation.
pub(crate) fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

//! Historical exchange rate model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A historical exchange rate record for one tenant and directed currency
/// pair.
///
/// Rates are directional first-class records: a ZWL→USD rate says nothing
/// about USD→ZWL, and the resolver never inverts. Tenants that need
/// bidirectional conversion store both directions. Resolution picks the most
/// recent record with `effective_date <= target date`; there is no
/// interpolation between records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyRate {
    /// The tenant this rate belongs to.
    pub tenant_id: String,
    /// ISO code of the source currency.
    pub from_currency: String,
    /// ISO code of the target currency.
    pub to_currency: String,
    /// Units of `to_currency` per unit of `from_currency`. Always positive.
    pub rate: Decimal,
    /// The date this rate became effective.
    pub effective_date: NaiveDate,
    /// Where the rate came from (e.g. a central-bank feed name or "manual").
    pub source: String,
}

//! Employee model and pay frequency types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How often an employee is paid.
///
/// Each frequency carries a fixed annualization multiplier used by the PAYE
/// engine. The multiplier is a policy constant per frequency, never derived
/// from calendar arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayFrequency {
    /// Paid once per calendar month (×12).
    Monthly,
    /// Paid every two weeks (×26).
    Fortnightly,
    /// Paid every week (×52).
    Weekly,
    /// Paid per working day (×260).
    Daily,
}

impl PayFrequency {
    /// Parses a pay-period code case-insensitively.
    ///
    /// Returns `None` for unrecognized codes so callers can choose between
    /// the strict path ([`crate::error::EngineError::InvalidPeriod`]) and the
    /// documented monthly fallback with a warning.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::PayFrequency;
    ///
    /// assert_eq!(PayFrequency::from_code("MONTHLY"), Some(PayFrequency::Monthly));
    /// assert_eq!(PayFrequency::from_code("weekly"), Some(PayFrequency::Weekly));
    /// assert_eq!(PayFrequency::from_code("quarterly"), None);
    /// ```
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "monthly" => Some(Self::Monthly),
            "fortnightly" => Some(Self::Fortnightly),
            "weekly" => Some(Self::Weekly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }

    /// Parses a pay-period code strictly.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::EngineError::InvalidPeriod`] for codes
    /// [`PayFrequency::from_code`] does not recognize. Used by callers that
    /// validate configuration up front and must not rely on the monthly
    /// fallback.
    pub fn parse(code: &str) -> crate::error::EngineResult<Self> {
        Self::from_code(code).ok_or_else(|| crate::error::EngineError::InvalidPeriod {
            code: code.to_string(),
        })
    }

    /// Returns the fixed annualization multiplier for this frequency.
    pub fn multiplier(self) -> Decimal {
        match self {
            Self::Monthly => Decimal::from(12),
            Self::Fortnightly => Decimal::from(26),
            Self::Weekly => Decimal::from(52),
            Self::Daily => Decimal::from(260),
        }
    }
}

/// An employee as seen by the calculation core.
///
/// The surrounding platform owns the full employee record; the core only
/// needs identity, tenancy, payment currency and hire date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The tenant the employee belongs to. Ownership checks compare this
    /// against the tenant the caller claims.
    pub tenant_id: String,
    /// ISO code of the currency the employee is paid in.
    pub currency: String,
    /// The date the employee was hired. Drives leave accrual.
    pub hire_date: NaiveDate,
}

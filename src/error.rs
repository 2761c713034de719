//! Error types for the payroll calculation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during statutory calculations.
//! None of these errors may be silently defaulted away by the engines: a
//! missing tax table or currency rate aborts the dependent calculation, and
//! the two documented fallbacks (unknown pay-period code, missing leave
//! policy) are surfaced as warnings on the result instead of errors.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the payroll calculation engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
/// use chrono::NaiveDate;
///
/// let error = EngineError::NotConfigured {
///     tenant_id: "acme".to_string(),
///     currency: "USD".to_string(),
///     date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "No tax configuration for tenant 'acme' in USD effective 2025-06-01"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// No tax table or contribution rate is effective for the tenant,
    /// currency and date. Fatal to the calculation: the pay period must be
    /// aborted rather than defaulted to zero tax.
    #[error("No tax configuration for tenant '{tenant_id}' in {currency} effective {date}")]
    NotConfigured {
        /// The tenant the lookup was for.
        tenant_id: String,
        /// The currency the lookup was for.
        currency: String,
        /// The date for which no configuration was effective.
        date: NaiveDate,
    },

    /// No exchange rate exists on or before the requested date.
    #[error("No exchange rate from {from_currency} to {to_currency} on or before {date}")]
    RateNotFound {
        /// The source currency.
        from_currency: String,
        /// The target currency.
        to_currency: String,
        /// The conversion date.
        date: NaiveDate,
    },

    /// A pay-period code was not recognized during strict parsing.
    #[error("Unrecognized pay period code '{code}'")]
    InvalidPeriod {
        /// The unrecognized code.
        code: String,
    },

    /// No leave policy exists for the tenant.
    #[error("No leave policy configured for tenant '{tenant_id}'")]
    PolicyMissing {
        /// The tenant without a policy.
        tenant_id: String,
    },

    /// An employee record was not found.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The employee id that was not found.
        employee_id: String,
    },

    /// An ownership check failed: the record does not belong to the tenant
    /// the caller claimed. Reported to the caller, never retried.
    #[error("Employee '{employee_id}' does not belong to tenant '{tenant_id}'")]
    RecordMismatch {
        /// The employee whose ownership was checked.
        employee_id: String,
        /// The tenant the caller claimed.
        tenant_id: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A bracket schedule failed validation on import.
    #[error("Invalid tax table for {currency}: {message}")]
    InvalidTaxTable {
        /// The currency of the offending table.
        currency: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },

    /// The data layer reported a failure. Surfaced to the caller rather than
    /// swallowed; the engine owns no retry policy for repository lookups.
    #[error("Repository error: {message}")]
    Repository {
        /// A description of the repository failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

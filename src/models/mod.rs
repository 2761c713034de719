//! Core data models for the payroll calculation engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit;
mod contribution;
mod currency;
mod employee;
mod leave;
mod tax;

pub use audit::{AuditStep, AuditWarning, WarningSeverity};
pub use contribution::ContributionRate;
pub use currency::CurrencyRate;
pub use employee::{Employee, PayFrequency};
pub use leave::{
    DEFAULT_ANNUAL_LEAVE_DAYS, LeaveBalance, LeaveKind, LeavePolicy,
};
pub use tax::{TaxBracket, TaxTable};

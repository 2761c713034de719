//! Statutory payroll calculation engine.
//!
//! This crate provides the numerically exact core of a multi-tenant HR/payroll
//! platform: progressive income-tax (PAYE) computation, capped statutory
//! contributions, date-scoped currency conversion, and leave accrual and
//! balance bookkeeping. All amounts are [`rust_decimal::Decimal`] values and
//! every result carries enough audit information to reproduce the calculation.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;

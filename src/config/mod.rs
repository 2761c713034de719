//! Tenant configuration loading.
//!
//! Reference data enters the engine through YAML seed files: one file per
//! tenant carrying its tax tables, contribution rates, exchange-rate
//! history, leave policy and employees. Seeds are validated on import
//! (bracket schedules especially) so a malformed table is rejected before
//! any calculation can consume it.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/tenants").unwrap();
//! let repository = loader.into_repository().unwrap();
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BracketSeed, ContributionRateSeed, CurrencyRateSeed, EmployeeSeed, LeavePolicySeed,
    TaxTableSeed, TenantSeed,
};

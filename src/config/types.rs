//! Seed file structures for tenant configuration.
//!
//! These are the shapes deserialized from tenant YAML files. Records inside
//! a seed do not repeat the tenant id; it is stamped onto every record when
//! the seed is converted to model types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    ContributionRate, CurrencyRate, Employee, LeavePolicy, TaxBracket, TaxTable,
};

/// One bracket row of a seeded tax table.
#[derive(Debug, Clone, Deserialize)]
pub struct BracketSeed {
    /// Lower edge of the bracket (exclusive for tax purposes, except zero).
    pub min: Decimal,
    /// Upper edge of the bracket (inclusive); absent for the final bracket.
    pub max: Option<Decimal>,
    /// Cumulative tax at the lower edge.
    pub fixed: Decimal,
    /// Marginal rate within the bracket.
    pub rate: Decimal,
}

/// A seeded tax table for one currency and effective range.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxTableSeed {
    /// The currency the table applies to.
    pub currency: String,
    /// First date the table is effective.
    pub effective_from: NaiveDate,
    /// First date the table is no longer effective; absent for open-ended.
    pub effective_to: Option<NaiveDate>,
    /// Bracket schedule on annual income, validated on import.
    pub brackets: Vec<BracketSeed>,
}

/// A seeded contribution rate.
#[derive(Debug, Clone, Deserialize)]
pub struct ContributionRateSeed {
    /// The currency the rate applies to.
    pub currency: String,
    /// First date the rate is effective.
    pub effective_from: NaiveDate,
    /// First date the rate is no longer effective; absent for open-ended.
    pub effective_to: Option<NaiveDate>,
    /// Employee-side rate as a fraction.
    pub employee_rate: Decimal,
    /// Employer-side rate as a fraction.
    pub employer_rate: Decimal,
    /// Cap on the contribution base; absent means uncapped.
    pub max_cap: Option<Decimal>,
}

/// A seeded exchange-rate record for a directed currency pair.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrencyRateSeed {
    /// Source currency.
    pub from_currency: String,
    /// Target currency.
    pub to_currency: String,
    /// Multiplier applied to amounts in the source currency.
    pub rate: Decimal,
    /// Date the rate takes effect.
    pub effective_date: NaiveDate,
    /// Where the rate came from (central bank feed, manual entry).
    pub source: String,
}

/// A seeded leave policy.
#[derive(Debug, Clone, Deserialize)]
pub struct LeavePolicySeed {
    /// Annual leave entitlement in days per year.
    pub annual_leave_days: Decimal,
    /// Maximum unused days rolled into the next year.
    pub carry_over_days: Decimal,
    /// Sick days allowed before a medical certificate is required.
    pub sick_leave_days_before_cert: Decimal,
    /// Maternity leave entitlement in days.
    pub maternity_leave_days: Decimal,
    /// Paternity leave entitlement in days.
    pub paternity_leave_days: Decimal,
}

/// A seeded employee record.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeSeed {
    /// Unique employee identifier.
    pub id: String,
    /// The employee's pay currency.
    pub currency: String,
    /// Hire date, used for leave accrual.
    pub hire_date: NaiveDate,
}

/// One tenant's complete seed file.
#[derive(Debug, Clone, Deserialize)]
pub struct TenantSeed {
    /// The tenant this seed configures.
    pub tenant_id: String,
    /// Tax tables, one per currency and effective range.
    #[serde(default)]
    pub tax_tables: Vec<TaxTableSeed>,
    /// Contribution rates.
    #[serde(default)]
    pub contribution_rates: Vec<ContributionRateSeed>,
    /// Exchange-rate history.
    #[serde(default)]
    pub currency_rates: Vec<CurrencyRateSeed>,
    /// Leave policy; optional, the documented fallback applies without one.
    pub leave_policy: Option<LeavePolicySeed>,
    /// Employee records.
    #[serde(default)]
    pub employees: Vec<EmployeeSeed>,
}

impl TenantSeed {
    /// Parses a seed from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigParseError`] on malformed YAML. Parsing
    /// does not validate bracket schedules; that happens on conversion to
    /// model types.
    pub fn from_yaml(source: &str) -> EngineResult<Self> {
        serde_yaml::from_str(source).map_err(|e| EngineError::ConfigParseError {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })
    }

    /// Converts the seeded tax tables to model tables, stamping the tenant
    /// id and validating each bracket schedule.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTaxTable`] for the first table whose
    /// schedule is empty, does not start at zero, is not contiguous, has
    /// inconsistent cumulative amounts, or whose final bracket is bounded.
    pub fn tax_tables(&self) -> EngineResult<Vec<TaxTable>> {
        self.tax_tables
            .iter()
            .map(|seed| {
                let table = TaxTable {
                    tenant_id: self.tenant_id.clone(),
                    currency: seed.currency.clone(),
                    effective_from: seed.effective_from,
                    effective_to: seed.effective_to,
                    brackets: seed
                        .brackets
                        .iter()
                        .map(|b| TaxBracket {
                            min: b.min,
                            max: b.max,
                            fixed: b.fixed,
                            rate: b.rate,
                        })
                        .collect(),
                };
                table.validate()?;
                Ok(table)
            })
            .collect()
    }

    /// Converts the seeded contribution rates to model rates.
    pub fn contribution_rates(&self) -> Vec<ContributionRate> {
        self.contribution_rates
            .iter()
            .map(|seed| ContributionRate {
                tenant_id: self.tenant_id.clone(),
                currency: seed.currency.clone(),
                effective_from: seed.effective_from,
                effective_to: seed.effective_to,
                employee_rate: seed.employee_rate,
                employer_rate: seed.employer_rate,
                max_cap: seed.max_cap,
            })
            .collect()
    }

    /// Converts the seeded exchange-rate records to model rates.
    pub fn currency_rates(&self) -> Vec<CurrencyRate> {
        self.currency_rates
            .iter()
            .map(|seed| CurrencyRate {
                tenant_id: self.tenant_id.clone(),
                from_currency: seed.from_currency.clone(),
                to_currency: seed.to_currency.clone(),
                rate: seed.rate,
                effective_date: seed.effective_date,
                source: seed.source.clone(),
            })
            .collect()
    }

    /// Converts the seeded leave policy, if present.
    pub fn leave_policy(&self) -> Option<LeavePolicy> {
        self.leave_policy.as_ref().map(|seed| LeavePolicy {
            tenant_id: self.tenant_id.clone(),
            annual_leave_days: seed.annual_leave_days,
            carry_over_days: seed.carry_over_days,
            sick_leave_days_before_cert: seed.sick_leave_days_before_cert,
            maternity_leave_days: seed.maternity_leave_days,
            paternity_leave_days: seed.paternity_leave_days,
        })
    }

    /// Converts the seeded employees.
    pub fn employees(&self) -> Vec<Employee> {
        self.employees
            .iter()
            .map(|seed| Employee {
                id: seed.id.clone(),
                tenant_id: self.tenant_id.clone(),
                currency: seed.currency.clone(),
                hire_date: seed.hire_date,
            })
            .collect()
    }
}

//! Repository abstraction over the surrounding data layer.
//!
//! The engines never own persistence: tax tables, contribution rates,
//! exchange rates, policies and balances are supplied through the
//! [`PayrollRepository`] trait, injected explicitly into each engine call.
//! This keeps every component unit-testable in isolation and keeps retry,
//! timeout and cancellation policy with the data layer where it belongs.
//! Repository failures surface as [`EngineError::Repository`], never
//! swallowed.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    ContributionRate, CurrencyRate, Employee, LeaveBalance, LeavePolicy, TaxTable,
};

/// Synchronous, thread-safe access to the records the engines consume.
///
/// Implementations must be safe for concurrent use: the pure calculators run
/// fully in parallel across employees and tenants, and the leave ledger
/// serializes writes per balance key above this interface, not inside it.
pub trait PayrollRepository: Send + Sync {
    /// All tax tables for a tenant, across currencies and effective ranges.
    fn tax_tables(&self, tenant_id: &str) -> EngineResult<Vec<TaxTable>>;

    /// All contribution rates for a tenant.
    fn contribution_rates(&self, tenant_id: &str) -> EngineResult<Vec<ContributionRate>>;

    /// All exchange-rate records for a tenant and directed currency pair.
    fn currency_rates(
        &self,
        tenant_id: &str,
        from_currency: &str,
        to_currency: &str,
    ) -> EngineResult<Vec<CurrencyRate>>;

    /// The tenant's leave policy, if one is configured.
    fn leave_policy(&self, tenant_id: &str) -> EngineResult<Option<LeavePolicy>>;

    /// Looks up a single employee by id.
    fn employee(&self, employee_id: &str) -> EngineResult<Option<Employee>>;

    /// All employees belonging to a tenant.
    fn employees(&self, tenant_id: &str) -> EngineResult<Vec<Employee>>;

    /// The stored balance for an employee-year, if one exists.
    fn leave_balance(&self, employee_id: &str, year: i32) -> EngineResult<Option<LeaveBalance>>;

    /// Inserts or replaces the balance for its employee-year.
    fn save_leave_balance(&self, balance: &LeaveBalance) -> EngineResult<()>;
}

/// An in-memory [`PayrollRepository`] backed by hash maps.
///
/// Used by tests and by the configuration seed loader. Reference data is
/// loaded up front through the `add_*` methods; balances live behind an
/// `RwLock` so the ledger can write through a shared reference.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    tax_tables: Vec<TaxTable>,
    contribution_rates: Vec<ContributionRate>,
    currency_rates: Vec<CurrencyRate>,
    leave_policies: HashMap<String, LeavePolicy>,
    employees: HashMap<String, Employee>,
    balances: RwLock<HashMap<(String, i32), LeaveBalance>>,
}

impl InMemoryRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tax table.
    pub fn add_tax_table(&mut self, table: TaxTable) {
        self.tax_tables.push(table);
    }

    /// Adds a contribution rate.
    pub fn add_contribution_rate(&mut self, rate: ContributionRate) {
        self.contribution_rates.push(rate);
    }

    /// Adds an exchange-rate record.
    pub fn add_currency_rate(&mut self, rate: CurrencyRate) {
        self.currency_rates.push(rate);
    }

    /// Sets a tenant's leave policy, replacing any existing one.
    pub fn set_leave_policy(&mut self, policy: LeavePolicy) {
        self.leave_policies.insert(policy.tenant_id.clone(), policy);
    }

    /// Adds an employee.
    pub fn add_employee(&mut self, employee: Employee) {
        self.employees.insert(employee.id.clone(), employee);
    }
}

impl PayrollRepository for InMemoryRepository {
    fn tax_tables(&self, tenant_id: &str) -> EngineResult<Vec<TaxTable>> {
        Ok(self
            .tax_tables
            .iter()
            .filter(|t| t.tenant_id == tenant_id)
            .cloned()
            .collect())
    }

    fn contribution_rates(&self, tenant_id: &str) -> EngineResult<Vec<ContributionRate>> {
        Ok(self
            .contribution_rates
            .iter()
            .filter(|r| r.tenant_id == tenant_id)
            .cloned()
            .collect())
    }

    fn currency_rates(
        &self,
        tenant_id: &str,
        from_currency: &str,
        to_currency: &str,
    ) -> EngineResult<Vec<CurrencyRate>> {
        Ok(self
            .currency_rates
            .iter()
            .filter(|r| {
                r.tenant_id == tenant_id
                    && r.from_currency == from_currency
                    && r.to_currency == to_currency
            })
            .cloned()
            .collect())
    }

    fn leave_policy(&self, tenant_id: &str) -> EngineResult<Option<LeavePolicy>> {
        Ok(self.leave_policies.get(tenant_id).cloned())
    }

    fn employee(&self, employee_id: &str) -> EngineResult<Option<Employee>> {
        Ok(self.employees.get(employee_id).cloned())
    }

    fn employees(&self, tenant_id: &str) -> EngineResult<Vec<Employee>> {
        let mut employees: Vec<Employee> = self
            .employees
            .values()
            .filter(|e| e.tenant_id == tenant_id)
            .cloned()
            .collect();
        employees.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(employees)
    }

    fn leave_balance(&self, employee_id: &str, year: i32) -> EngineResult<Option<LeaveBalance>> {
        let balances = self
            .balances
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(balances.get(&(employee_id.to_string(), year)).cloned())
    }

    fn save_leave_balance(&self, balance: &LeaveBalance) -> EngineResult<()> {
        if balance.employee_id.is_empty() {
            return Err(EngineError::Repository {
                message: "cannot save a balance without an employee id".to_string(),
            });
        }
        let mut balances = self
            .balances
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        balances.insert((balance.employee_id.clone(), balance.year), balance.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn employee(id: &str, tenant: &str) -> Employee {
        Employee {
            id: id.to_string(),
            tenant_id: tenant.to_string(),
            currency: "USD".to_string(),
            hire_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        }
    }

    #[test]
    fn test_employees_filters_by_tenant_and_sorts() {
        let mut repo = InMemoryRepository::new();
        repo.add_employee(employee("emp_002", "acme"));
        repo.add_employee(employee("emp_001", "acme"));
        repo.add_employee(employee("emp_003", "other"));

        let employees = repo.employees("acme").unwrap();
        let ids: Vec<&str> = employees.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["emp_001", "emp_002"]);
    }

    #[test]
    fn test_missing_employee_is_none_not_error() {
        let repo = InMemoryRepository::new();
        assert!(repo.employee("ghost").unwrap().is_none());
    }

    #[test]
    fn test_leave_balance_round_trip() {
        let repo = InMemoryRepository::new();
        let policy = LeavePolicy::fallback("acme");
        let balance = LeaveBalance::seeded("emp_001", 2025, &policy);

        assert!(repo.leave_balance("emp_001", 2025).unwrap().is_none());
        repo.save_leave_balance(&balance).unwrap();

        let stored = repo.leave_balance("emp_001", 2025).unwrap().unwrap();
        assert_eq!(stored, balance);
        // Same employee, different year is a distinct record.
        assert!(repo.leave_balance("emp_001", 2024).unwrap().is_none());
    }

    #[test]
    fn test_save_replaces_existing_balance() {
        let repo = InMemoryRepository::new();
        let policy = LeavePolicy::fallback("acme");
        let mut balance = LeaveBalance::seeded("emp_001", 2025, &policy);
        repo.save_leave_balance(&balance).unwrap();

        balance.annual_used = Decimal::from(3);
        repo.save_leave_balance(&balance).unwrap();

        let stored = repo.leave_balance("emp_001", 2025).unwrap().unwrap();
        assert_eq!(stored.annual_used, Decimal::from(3));
    }

    #[test]
    fn test_save_without_employee_id_is_a_repository_error() {
        let repo = InMemoryRepository::new();
        let policy = LeavePolicy::fallback("acme");
        let balance = LeaveBalance::seeded("", 2025, &policy);

        match repo.save_leave_balance(&balance).unwrap_err() {
            EngineError::Repository { message } => {
                assert!(message.contains("employee id"));
            }
            other => panic!("Expected Repository error, got {:?}", other),
        }
    }

    #[test]
    fn test_repository_is_object_safe_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<InMemoryRepository>();

        let repo = InMemoryRepository::new();
        let dyn_repo: &dyn PayrollRepository = &repo;
        assert!(dyn_repo.tax_tables("acme").unwrap().is_empty());
    }
}

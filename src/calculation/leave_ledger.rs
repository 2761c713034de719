//! The leave balance ledger.
//!
//! The only stateful component of the engine. Balances are created lazily
//! per (employee, year) from the tenant's policy snapshot, debited on leave
//! approval, and resynced to policy and hire-date accrual by recalculation.
//!
//! Writes are serialized per balance key through an internal lock table, so
//! at most one mutation is in flight per (employee, year) regardless of how
//! callers schedule their work. Batch recalculation fans out across
//! employees with rayon; one employee's failure never aborts the rest.
//!
//! Note the deliberate divergence between the two mutation paths: `debit`
//! computes `annual_balance = annual_total - annual_used` without adding
//! carry-over back, while `recalculate` rebases on accrued days and ignores
//! carry-over entirely. Both behaviours are preserved exactly and pinned by
//! regression tests; reconciling them is a product decision, not ours.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{Datelike, NaiveDate};
use rayon::prelude::*;
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditWarning, Employee, LeaveBalance, LeaveKind, LeavePolicy, WarningSeverity,
};
use crate::repository::PayrollRepository;

use super::leave_accrual::accrued_leave_days;

/// A balance returned by a ledger operation, with any documented fallbacks
/// that were applied while producing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceUpdate {
    /// The balance after the operation.
    pub balance: LeaveBalance,
    /// Warnings attached by the operation (currently only the missing-policy
    /// fallback).
    pub warnings: Vec<AuditWarning>,
}

/// One employee's failure inside a batch operation.
#[derive(Debug)]
pub struct BatchFailure {
    /// The employee whose recalculation failed.
    pub employee_id: String,
    /// Why it failed.
    pub error: EngineError,
}

/// The partial-failure outcome of a per-tenant batch recalculation.
#[derive(Debug)]
pub struct TenantRecalculation {
    /// Employees whose balances were recalculated and saved.
    pub succeeded: Vec<String>,
    /// Employees that failed, with their individual errors.
    pub failed: Vec<BatchFailure>,
}

type BalanceKey = (String, i32);

/// Per-employee, per-year leave balance bookkeeping over an injected
/// repository.
pub struct LeaveLedger<'a> {
    repo: &'a dyn PayrollRepository,
    locks: Mutex<HashMap<BalanceKey, Arc<Mutex<()>>>>,
}

impl<'a> LeaveLedger<'a> {
    /// Creates a ledger over the given repository.
    pub fn new(repo: &'a dyn PayrollRepository) -> Self {
        Self {
            repo,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the existing balance for (employee, year), creating one
    /// seeded from the tenant's leave policy if none exists yet.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeNotFound` / `RecordMismatch` when the employee does
    /// not exist or does not belong to the tenant, and propagates repository
    /// failures. A missing policy is not an error: the documented 22-day
    /// default applies with a warning.
    pub fn get_or_create(
        &self,
        tenant_id: &str,
        employee_id: &str,
        year: i32,
    ) -> EngineResult<BalanceUpdate> {
        self.owned_employee(tenant_id, employee_id)?;

        let lock = self.balance_lock(employee_id, year);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        self.load_or_seed(tenant_id, employee_id, year)
    }

    /// Debits days of a leave kind from the balance for (employee, year),
    /// creating the balance first if needed.
    ///
    /// Annual debits maintain `annual_balance = annual_total - annual_used`;
    /// carry-over is not added back on this path, and the balance is allowed
    /// to go negative (administrative override is out of the ledger's
    /// hands). Sick, maternity and paternity debits are plain running totals
    /// against the policy caps.
    pub fn debit(
        &self,
        tenant_id: &str,
        employee_id: &str,
        year: i32,
        kind: LeaveKind,
        days: Decimal,
    ) -> EngineResult<BalanceUpdate> {
        if days < Decimal::ZERO {
            return Err(EngineError::CalculationError {
                message: format!("cannot debit a negative number of days: {}", days),
            });
        }
        self.owned_employee(tenant_id, employee_id)?;

        let lock = self.balance_lock(employee_id, year);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut update = self.load_or_seed(tenant_id, employee_id, year)?;
        let balance = &mut update.balance;

        match kind {
            LeaveKind::Annual => {
                balance.annual_used += days;
                balance.annual_balance = balance.annual_total - balance.annual_used;
            }
            LeaveKind::Sick => balance.sick_used += days,
            LeaveKind::Maternity => balance.maternity_used += days,
            LeaveKind::Paternity => balance.paternity_used += days,
        }

        self.repo.save_leave_balance(balance)?;
        Ok(update)
    }

    /// Resyncs the current-year balance to the active policy and the
    /// employee's hire-date accrual.
    ///
    /// Preserves `annual_used`, sets `annual_total` to the policy
    /// entitlement, and sets `annual_balance = max(0, accrued - used)` —
    /// clamped, unlike the debit path, and ignoring carry-over. Used for
    /// correcting balances after policy or hire-date changes.
    pub fn recalculate(
        &self,
        employee_id: &str,
        tenant_id: &str,
        as_of: NaiveDate,
    ) -> EngineResult<BalanceUpdate> {
        let employee = self.owned_employee(tenant_id, employee_id)?;
        let year = as_of.year();

        let lock = self.balance_lock(employee_id, year);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let (policy, policy_warning) = self.policy_or_fallback(tenant_id)?;
        let mut update = self.load_or_seed(tenant_id, employee_id, year)?;
        if let Some(warning) = policy_warning {
            if !update.warnings.contains(&warning) {
                update.warnings.push(warning);
            }
        }

        let accrued = accrued_leave_days(employee.hire_date, policy.annual_leave_days, as_of);
        let balance = &mut update.balance;
        balance.annual_total = policy.annual_leave_days;
        balance.annual_balance = (accrued - balance.annual_used).max(Decimal::ZERO);

        self.repo.save_leave_balance(balance)?;
        Ok(update)
    }

    /// Recalculates every employee in a tenant in parallel.
    ///
    /// Employees are independent: a failure on one is collected into the
    /// outcome and never aborts the others.
    pub fn recalculate_tenant(
        &self,
        tenant_id: &str,
        as_of: NaiveDate,
    ) -> EngineResult<TenantRecalculation> {
        let employees = self.repo.employees(tenant_id)?;

        let outcomes: Vec<(String, EngineResult<BalanceUpdate>)> = employees
            .par_iter()
            .map(|employee| {
                (
                    employee.id.clone(),
                    self.recalculate(&employee.id, tenant_id, as_of),
                )
            })
            .collect();

        let mut result = TenantRecalculation {
            succeeded: Vec::new(),
            failed: Vec::new(),
        };
        for (employee_id, outcome) in outcomes {
            match outcome {
                Ok(_) => result.succeeded.push(employee_id),
                Err(error) => result.failed.push(BatchFailure { employee_id, error }),
            }
        }
        Ok(result)
    }

    /// Returns the tenant's leave policy without applying the fallback.
    ///
    /// The ledger's own operations prefer the documented 22-day default;
    /// this strict accessor is for callers that need the real policy (for
    /// entitlement caps, for example) and must know when there is none.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PolicyMissing`] when the tenant has no policy.
    pub fn policy(&self, tenant_id: &str) -> EngineResult<LeavePolicy> {
        self.repo
            .leave_policy(tenant_id)?
            .ok_or_else(|| EngineError::PolicyMissing {
                tenant_id: tenant_id.to_string(),
            })
    }

    /// Loads the employee and checks it belongs to the tenant.
    fn owned_employee(&self, tenant_id: &str, employee_id: &str) -> EngineResult<Employee> {
        let employee =
            self.repo
                .employee(employee_id)?
                .ok_or_else(|| EngineError::EmployeeNotFound {
                    employee_id: employee_id.to_string(),
                })?;
        if employee.tenant_id != tenant_id {
            return Err(EngineError::RecordMismatch {
                employee_id: employee_id.to_string(),
                tenant_id: tenant_id.to_string(),
            });
        }
        Ok(employee)
    }

    /// The tenant's policy, or the documented fallback with a warning.
    fn policy_or_fallback(
        &self,
        tenant_id: &str,
    ) -> EngineResult<(LeavePolicy, Option<AuditWarning>)> {
        match self.repo.leave_policy(tenant_id)? {
            Some(policy) => Ok((policy, None)),
            None => {
                tracing::warn!(tenant_id, "no leave policy, using 22-day default");
                let warning = AuditWarning {
                    code: "policy_missing".to_string(),
                    message: format!(
                        "No leave policy for tenant '{}'; used the default 22-day entitlement",
                        tenant_id
                    ),
                    severity: WarningSeverity::Medium,
                };
                Ok((LeavePolicy::fallback(tenant_id), Some(warning)))
            }
        }
    }

    /// Loads the stored balance or seeds and saves a fresh one. Callers
    /// must hold the balance lock.
    fn load_or_seed(
        &self,
        tenant_id: &str,
        employee_id: &str,
        year: i32,
    ) -> EngineResult<BalanceUpdate> {
        if let Some(balance) = self.repo.leave_balance(employee_id, year)? {
            return Ok(BalanceUpdate {
                balance,
                warnings: Vec::new(),
            });
        }

        let (policy, warning) = self.policy_or_fallback(tenant_id)?;
        let balance = LeaveBalance::seeded(employee_id, year, &policy);
        self.repo.save_leave_balance(&balance)?;

        Ok(BalanceUpdate {
            balance,
            warnings: warning.into_iter().collect(),
        })
    }

    /// Returns the write lock for one balance key, creating it on first
    /// use.
    fn balance_lock(&self, employee_id: &str, year: i32) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks
            .entry((employee_id.to_string(), year))
            .or_default()
            .clone()
    }
}

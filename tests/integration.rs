//! Comprehensive integration tests for the payroll calculation engine.
//!
//! This test suite drives the engine the way the surrounding platform does:
//! tenant configuration is imported from YAML seeds, and every scenario runs
//! against the assembled repository. Covered:
//! - A full pay-period run (currency conversion → PAYE → levy → contribution)
//! - YTD progression across consecutive periods
//! - Multi-tenant isolation
//! - Leave lifecycle (seed, debit, recalculate, batch recalculate)
//! - Documented fallbacks and error cases

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use payroll_engine::calculation::{
    LeaveLedger, PayeInput, calculate_contribution, calculate_levy, calculate_paye,
    convert_currency, default_levy_rate, resolve_contribution_rate,
};
use payroll_engine::config::{ConfigLoader, TenantSeed};
use payroll_engine::error::EngineError;
use payroll_engine::models::LeaveKind;
use payroll_engine::repository::{InMemoryRepository, PayrollRepository};

// =============================================================================
// Test Helpers
// =============================================================================

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn acme_seed() -> &'static str {
    r#"
tenant_id: acme
tax_tables:
  - currency: USD
    effective_from: 2025-01-01
    brackets:
      - { min: "0", max: "7200", fixed: "0", rate: "0" }
      - { min: "7200", max: "14400", fixed: "0", rate: "0.20" }
      - { min: "14400", max: "36000", fixed: "1440", rate: "0.25" }
      - { min: "36000", fixed: "6840", rate: "0.30" }
contribution_rates:
  - currency: USD
    effective_from: 2025-01-01
    employee_rate: "0.03"
    employer_rate: "0.03"
    max_cap: "1000"
currency_rates:
  - from_currency: ZWL
    to_currency: USD
    rate: "0.00060"
    effective_date: 2025-05-01
    source: rbz_daily
  - from_currency: ZWL
    to_currency: USD
    rate: "0.00051"
    effective_date: 2025-06-01
    source: rbz_daily
leave_policy:
  annual_leave_days: "22"
  carry_over_days: "5"
  sick_leave_days_before_cert: "90"
  maternity_leave_days: "98"
  paternity_leave_days: "10"
employees:
  - id: emp_001
    currency: USD
    hire_date: 2025-01-10
  - id: emp_002
    currency: USD
    hire_date: 2020-06-01
"#
}

fn globex_seed() -> &'static str {
    r#"
tenant_id: globex
tax_tables:
  - currency: USD
    effective_from: 2025-01-01
    brackets:
      - { min: "0", fixed: "0", rate: "0.10" }
employees:
  - id: glx_001
    currency: USD
    hire_date: 2023-02-01
"#
}

fn seeded_repository() -> InMemoryRepository {
    let seeds = vec![
        TenantSeed::from_yaml(acme_seed()).unwrap(),
        TenantSeed::from_yaml(globex_seed()).unwrap(),
    ];
    let mut repository = InMemoryRepository::new();
    for seed in &seeds {
        for table in seed.tax_tables().unwrap() {
            repository.add_tax_table(table);
        }
        for rate in seed.contribution_rates() {
            repository.add_contribution_rate(rate);
        }
        for rate in seed.currency_rates() {
            repository.add_currency_rate(rate);
        }
        if let Some(policy) = seed.leave_policy() {
            repository.set_leave_policy(policy);
        }
        for employee in seed.employees() {
            repository.add_employee(employee);
        }
    }
    repository
}

fn monthly_input(tenant: &str, income: &str, ytd_taxable: &str, ytd_paye: &str) -> PayeInput {
    PayeInput {
        tenant_id: tenant.to_string(),
        taxable_income: dec(income),
        currency: "USD".to_string(),
        period: "monthly".to_string(),
        ytd_taxable: dec(ytd_taxable),
        ytd_paye: dec(ytd_paye),
        period_date: date(2025, 6, 30),
    }
}

// =============================================================================
// Full Pay Period
// =============================================================================

/// A complete period for an employee paid in ZWL under a USD tax table:
/// convert, tax, levy, contribute.
#[test]
fn test_full_pay_period_with_conversion() {
    let repo = seeded_repository();

    // 1. Convert the ZWL gross to the tax table's currency.
    let converted = convert_currency(
        &repo,
        "acme",
        dec("5882353"),
        "ZWL",
        "USD",
        date(2025, 6, 15),
    )
    .unwrap();
    // 5,882,353 × 0.00051 = 3000.00003 → 3000.00
    assert_eq!(converted.amount, dec("3000.00"));

    // 2. PAYE on the converted income.
    let paye = calculate_paye(
        &repo,
        &monthly_input("acme", &converted.amount.to_string(), "0", "0"),
    )
    .unwrap();
    assert_eq!(paye.paye_this_period, dec("570.00"));

    // 3. Levy on the withheld PAYE.
    let levy = calculate_levy(paye.paye_this_period, default_levy_rate());
    assert_eq!(levy, dec("17.10"));

    // 4. Capped contribution on the gross.
    let rates = repo.contribution_rates("acme").unwrap();
    let rate = resolve_contribution_rate(&rates, "acme", "USD", date(2025, 6, 30)).unwrap();
    let contribution = calculate_contribution(converted.amount, rate);
    assert_eq!(contribution.insurable_pay, dec("1000"));
    assert_eq!(contribution.employee_contribution, dec("30.00"));
    assert_eq!(contribution.employer_contribution, dec("30.00"));
}

/// YTD figures thread through consecutive periods and the incremental tax
/// rises as the annualized YTD climbs brackets.
#[test]
fn test_ytd_progression_across_periods() {
    let repo = seeded_repository();

    let first = calculate_paye(&repo, &monthly_input("acme", "3000", "0", "0")).unwrap();
    assert_eq!(first.paye_this_period, dec("570.00"));

    let second = calculate_paye(
        &repo,
        &monthly_input(
            "acme",
            "3000",
            &first.updated_ytd_taxable.to_string(),
            &first.updated_ytd_paye.to_string(),
        ),
    )
    .unwrap();

    // Annualized YTD is now 39000, inside the 30% band, so the marginal
    // period costs more than the first.
    assert!(second.paye_this_period > first.paye_this_period);
    assert_eq!(second.updated_ytd_taxable, dec("6000"));
    assert_eq!(
        second.updated_ytd_paye,
        first.updated_ytd_paye + second.paye_this_period
    );
}

/// The effective-date rule picks the June rate, not the May one.
#[test]
fn test_historical_rate_selection() {
    let repo = seeded_repository();

    let mid_june = convert_currency(
        &repo,
        "acme",
        dec("1000000"),
        "ZWL",
        "USD",
        date(2025, 6, 15),
    )
    .unwrap();
    assert_eq!(mid_june.amount, dec("510.00"));
    assert_eq!(
        mid_june.rate.unwrap().effective_date,
        date(2025, 6, 1)
    );

    let mid_may = convert_currency(
        &repo,
        "acme",
        dec("1000000"),
        "ZWL",
        "USD",
        date(2025, 5, 15),
    )
    .unwrap();
    assert_eq!(mid_may.amount, dec("600.00"));
}

// =============================================================================
// Multi-Tenant Isolation
// =============================================================================

/// Each tenant's calculation sees only its own configuration.
#[test]
fn test_tenants_are_isolated() {
    let repo = seeded_repository();

    let acme = calculate_paye(&repo, &monthly_input("acme", "3000", "0", "0")).unwrap();
    let globex = calculate_paye(&repo, &monthly_input("globex", "3000", "0", "0")).unwrap();

    assert_eq!(acme.paye_this_period, dec("570.00"));
    // Globex runs a flat 10%: 36000 × 0.10 / 12 = 300.
    assert_eq!(globex.paye_this_period, dec("300.00"));
}

/// A tenant with no configuration cannot silently borrow another's table.
#[test]
fn test_unknown_tenant_is_not_configured() {
    let repo = seeded_repository();

    let result = calculate_paye(&repo, &monthly_input("initech", "3000", "0", "0"));
    assert!(matches!(
        result.unwrap_err(),
        EngineError::NotConfigured { .. }
    ));
}

/// Cross-tenant employee access fails the ownership check.
#[test]
fn test_cross_tenant_leave_access_is_rejected() {
    let repo = seeded_repository();
    let ledger = LeaveLedger::new(&repo);

    let result = ledger.get_or_create("globex", "emp_001", 2025);
    assert!(matches!(
        result.unwrap_err(),
        EngineError::RecordMismatch { .. }
    ));
}

// =============================================================================
// Leave Lifecycle
// =============================================================================

/// Seed, debit, recalculate: the documented lifecycle for one employee-year.
#[test]
fn test_leave_lifecycle() {
    let repo = seeded_repository();
    let ledger = LeaveLedger::new(&repo);

    let seeded = ledger.get_or_create("acme", "emp_001", 2025).unwrap();
    assert_eq!(seeded.balance.annual_total, dec("22"));
    assert_eq!(seeded.balance.annual_balance, dec("22"));

    let debited = ledger
        .debit("acme", "emp_001", 2025, LeaveKind::Annual, dec("4"))
        .unwrap();
    assert_eq!(debited.balance.annual_used, dec("4"));
    assert_eq!(debited.balance.annual_balance, dec("18"));

    // Hired 2025-01-10, recalculated as of 2025-07-20: 7 accrual months.
    let recalculated = ledger
        .recalculate("emp_001", "acme", date(2025, 7, 20))
        .unwrap();
    assert_eq!(
        recalculated.balance.annual_balance.round_dp(2),
        dec("8.83") // 7 × 22/12 − 4
    );
    assert_eq!(recalculated.balance.annual_used, dec("4"));
}

/// Batch recalculation touches every employee of the tenant and no one else.
#[test]
fn test_tenant_batch_recalculation() {
    let repo = seeded_repository();
    let ledger = LeaveLedger::new(&repo);

    let outcome = ledger
        .recalculate_tenant("acme", date(2025, 7, 20))
        .unwrap();

    assert_eq!(outcome.succeeded.len(), 2);
    assert!(outcome.failed.is_empty());

    // emp_002 was hired in a prior year: full entitlement accrued.
    let veteran = repo.leave_balance("emp_002", 2025).unwrap().unwrap();
    assert_eq!(veteran.annual_balance, dec("22"));

    // The globex employee was not touched.
    assert!(repo.leave_balance("glx_001", 2025).unwrap().is_none());
}

/// Sick leave runs against the certificate threshold from the policy.
#[test]
fn test_sick_leave_against_policy_threshold() {
    let repo = seeded_repository();
    let ledger = LeaveLedger::new(&repo);

    let update = ledger
        .debit("acme", "emp_002", 2025, LeaveKind::Sick, dec("3"))
        .unwrap();
    assert_eq!(update.balance.sick_used, dec("3"));

    let policy = ledger.policy("acme").unwrap();
    assert_eq!(
        update
            .balance
            .remaining_entitlement(LeaveKind::Sick, &policy),
        dec("87")
    );
}

// =============================================================================
// Fallbacks and Errors
// =============================================================================

/// A tenant without a leave policy gets the 22-day default, loudly.
#[test]
fn test_missing_policy_fallback_is_loud() {
    let repo = seeded_repository();
    let ledger = LeaveLedger::new(&repo);

    let update = ledger.get_or_create("globex", "glx_001", 2025).unwrap();

    assert_eq!(update.balance.annual_total, dec("22"));
    assert_eq!(update.warnings.len(), 1);
    assert_eq!(update.warnings[0].code, "policy_missing");

    // The strict accessor still reports the truth.
    assert!(matches!(
        ledger.policy("globex").unwrap_err(),
        EngineError::PolicyMissing { .. }
    ));
}

/// An unknown period code computes as monthly and says so.
#[test]
fn test_unknown_period_fallback_is_loud() {
    let repo = seeded_repository();
    let mut input = monthly_input("acme", "3000", "0", "0");
    input.period = "quarterly".to_string();

    let result = calculate_paye(&repo, &input).unwrap();

    assert_eq!(result.paye_this_period, dec("570.00"));
    assert_eq!(result.warnings[0].code, "invalid_period");
}

/// A missing exchange rate aborts the conversion, never assumes parity.
#[test]
fn test_missing_rate_aborts_conversion() {
    let repo = seeded_repository();

    let result = convert_currency(&repo, "acme", dec("100"), "EUR", "USD", date(2025, 6, 15));
    assert!(matches!(
        result.unwrap_err(),
        EngineError::RateNotFound { .. }
    ));
}

/// No contribution rate configured aborts the contribution step.
#[test]
fn test_missing_contribution_rate_aborts() {
    let repo = seeded_repository();
    let rates = repo.contribution_rates("globex").unwrap();

    let result = resolve_contribution_rate(&rates, "globex", "USD", date(2025, 6, 30));
    assert!(matches!(
        result.unwrap_err(),
        EngineError::NotConfigured { .. }
    ));
}

// =============================================================================
// Seed Import
// =============================================================================

/// The loader end-to-end: directory → seeds → validated repository.
#[test]
fn test_loader_imports_a_directory() {
    let dir = std::env::temp_dir().join(format!("payroll-seeds-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("acme.yaml"), acme_seed()).unwrap();
    std::fs::write(dir.join("globex.yaml"), globex_seed()).unwrap();
    std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

    let loader = ConfigLoader::load(&dir).unwrap();
    assert_eq!(loader.seeds().len(), 2);
    assert_eq!(loader.seeds()[0].tenant_id, "acme");

    let repository = loader.into_repository().unwrap();
    let result = calculate_paye(&repository, &monthly_input("acme", "3000", "0", "0")).unwrap();
    assert_eq!(result.paye_this_period, dec("570.00"));

    std::fs::remove_dir_all(&dir).unwrap();
}

/// A corrupt bracket schedule is rejected at import, before any calculation.
#[test]
fn test_import_rejects_invalid_schedule() {
    let seed = TenantSeed::from_yaml(
        r#"
tenant_id: broken
tax_tables:
  - currency: USD
    effective_from: 2025-01-01
    brackets:
      - { min: "0", max: "7200", fixed: "0", rate: "0" }
      - { min: "7200", max: "14400", fixed: "99", rate: "0.20" }
      - { min: "14400", fixed: "1440", rate: "0.25" }
"#,
    )
    .unwrap();

    match seed.tax_tables().unwrap_err() {
        EngineError::InvalidTaxTable { currency, message } => {
            assert_eq!(currency, "USD");
            assert!(message.contains("99"));
        }
        other => panic!("Expected InvalidTaxTable, got {:?}", other),
    }
}

//! The PAYE engine.
//!
//! Wraps the progressive tax calculator with annualization, year-to-date
//! tracking and period de-annualization to compute the incremental tax for a
//! single pay period.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{AuditStep, AuditWarning, PayFrequency, TaxBracket, WarningSeverity};
use crate::repository::PayrollRepository;

use super::progressive_tax::{bracket_for, progressive_tax};
use super::round_money;
use super::tax_table::resolve_tax_table;

/// The multiplier applied when a pay-period code is not recognized.
///
/// Forward-compatibility fallback only: using it always attaches an
/// `invalid_period` warning to the result and logs, never a silent success.
pub const DEFAULT_PERIOD_MULTIPLIER: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Inputs for a single pay period's PAYE calculation.
///
/// `ytd_taxable` and `ytd_paye` are the running actual totals carried across
/// periods within the tax year; the engine owns neither and returns the
/// updated figures for the payroll-run orchestrator to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayeInput {
    /// The tenant whose tax configuration applies.
    pub tenant_id: String,
    /// Taxable income for this period, in `currency`.
    pub taxable_income: Decimal,
    /// ISO currency code the income is denominated in.
    pub currency: String,
    /// Pay-period code ("monthly", "fortnightly", "weekly", "daily").
    /// Unrecognized codes fall back to the monthly multiplier with a
    /// warning.
    pub period: String,
    /// Cumulative taxable income before this period.
    pub ytd_taxable: Decimal,
    /// Cumulative PAYE withheld before this period.
    pub ytd_paye: Decimal,
    /// The date the period is paid; selects the effective tax table.
    pub period_date: NaiveDate,
}

/// The outcome of a single period's PAYE calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayeResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// PAYE to withhold this period, rounded to 2 decimal places and
    /// clamped to ≥ 0.
    pub paye_this_period: Decimal,
    /// `ytd_taxable + taxable_income`, actual and unannualized.
    pub updated_ytd_taxable: Decimal,
    /// `ytd_paye + paye_this_period`.
    pub updated_ytd_paye: Decimal,
    /// `annual tax / annualized YTD × 100`, for audit display only.
    pub effective_tax_rate: Decimal,
    /// The bracket containing the annualized YTD after this period, for
    /// audit display only. `None` only for an empty schedule, which a
    /// validated table cannot produce.
    pub applied_bracket: Option<TaxBracket>,
    /// Human-readable summary of the calculation.
    pub explanation: String,
    /// The individual calculation decisions, in order.
    pub steps: Vec<AuditStep>,
    /// Documented fallbacks applied during the calculation.
    pub warnings: Vec<AuditWarning>,
}

/// Computes the PAYE to withhold for a single pay period.
///
/// Algorithm:
/// 1. Resolve the effective tax table for (tenant, currency, period date);
///    fail with `NotConfigured` if absent.
/// 2. Annualize the period income by the period's fixed multiplier.
/// 3. Compute the incremental annual tax:
///    `progressive_tax(ytd + annualized) - progressive_tax(ytd)`.
/// 4. De-annualize by the same multiplier, clamp to ≥ 0 (a large YTD
///    true-up could otherwise go negative; this engine never issues
///    refunds), and round to 2 decimal places.
/// 5. Return updated YTD figures (actual, unannualized income; withheld
///    PAYE), the applied bracket and the effective rate.
///
/// # Errors
///
/// Returns `NotConfigured` when no tax table is effective, or any error the
/// repository surfaces. An unrecognized period code is not an error here: it
/// falls back to [`DEFAULT_PERIOD_MULTIPLIER`] and attaches an
/// `invalid_period` warning to the result.
pub fn calculate_paye(
    repo: &dyn PayrollRepository,
    input: &PayeInput,
) -> EngineResult<PayeResult> {
    let mut steps = Vec::new();
    let mut warnings = Vec::new();

    let tables = repo.tax_tables(&input.tenant_id)?;
    let table = resolve_tax_table(&tables, &input.tenant_id, &input.currency, input.period_date)?;

    steps.push(AuditStep {
        step_number: 1,
        rule_id: "resolve_tax_table".to_string(),
        rule_name: "Resolve effective tax table".to_string(),
        input: serde_json::json!({
            "tenant_id": input.tenant_id,
            "currency": input.currency,
            "period_date": input.period_date.to_string(),
        }),
        output: serde_json::json!({
            "effective_from": table.effective_from.to_string(),
            "bracket_count": table.brackets.len(),
        }),
        reasoning: format!(
            "Using {} table effective {} for {}",
            table.currency, table.effective_from, input.period_date
        ),
    });

    let multiplier = match PayFrequency::from_code(&input.period) {
        Some(frequency) => frequency.multiplier(),
        None => {
            tracing::warn!(
                code = %input.period,
                "unrecognized pay period code, falling back to monthly multiplier"
            );
            warnings.push(AuditWarning {
                code: "invalid_period".to_string(),
                message: format!(
                    "Unrecognized pay period code '{}'; fell back to the monthly multiplier",
                    input.period
                ),
                severity: WarningSeverity::Medium,
            });
            DEFAULT_PERIOD_MULTIPLIER
        }
    };

    let annualized_income = input.taxable_income * multiplier;
    steps.push(AuditStep {
        step_number: 2,
        rule_id: "annualize".to_string(),
        rule_name: "Annualize period income".to_string(),
        input: serde_json::json!({
            "taxable_income": input.taxable_income.to_string(),
            "period": input.period,
            "multiplier": multiplier.to_string(),
        }),
        output: serde_json::json!({ "annualized_income": annualized_income.to_string() }),
        reasoning: format!(
            "{} × {} = {}",
            input.taxable_income, multiplier, annualized_income
        ),
    });

    let annualized_ytd = input.ytd_taxable + annualized_income;
    let annual_tax_before = progressive_tax(input.ytd_taxable, &table.brackets)?;
    let annual_tax_after = progressive_tax(annualized_ytd, &table.brackets)?;
    let incremental_tax = annual_tax_after - annual_tax_before;

    steps.push(AuditStep {
        step_number: 3,
        rule_id: "incremental_tax".to_string(),
        rule_name: "Incremental annual tax".to_string(),
        input: serde_json::json!({
            "ytd_taxable": input.ytd_taxable.to_string(),
            "annualized_ytd": annualized_ytd.to_string(),
        }),
        output: serde_json::json!({
            "annual_tax_before": annual_tax_before.to_string(),
            "annual_tax_after": annual_tax_after.to_string(),
            "incremental_tax": incremental_tax.to_string(),
        }),
        reasoning: format!(
            "{} - {} = {}",
            annual_tax_after, annual_tax_before, incremental_tax
        ),
    });

    let paye_this_period = round_money((incremental_tax / multiplier).max(Decimal::ZERO));

    steps.push(AuditStep {
        step_number: 4,
        rule_id: "deannualize".to_string(),
        rule_name: "De-annualize and round".to_string(),
        input: serde_json::json!({
            "incremental_tax": incremental_tax.to_string(),
            "multiplier": multiplier.to_string(),
        }),
        output: serde_json::json!({ "paye_this_period": paye_this_period.to_string() }),
        reasoning: format!(
            "{} ÷ {} = {}, clamped to ≥ 0 and rounded to 2 dp",
            incremental_tax, multiplier, paye_this_period
        ),
    });

    let effective_tax_rate = if annualized_ytd > Decimal::ZERO {
        round_money(annual_tax_after / annualized_ytd * Decimal::from(100))
    } else {
        Decimal::ZERO
    };
    let applied_bracket = bracket_for(annualized_ytd, &table.brackets).cloned();

    let explanation = format!(
        "Annualized income {} {} taxed at an effective {}%; PAYE this period {}",
        annualized_ytd, input.currency, effective_tax_rate, paye_this_period
    );

    Ok(PayeResult {
        calculation_id: Uuid::new_v4(),
        paye_this_period,
        updated_ytd_taxable: input.ytd_taxable + input.taxable_income,
        updated_ytd_paye: input.ytd_paye + paye_this_period,
        effective_tax_rate,
        applied_bracket,
        explanation,
        steps,
        warnings,
    })
}

//! Audit trail types attached to calculation results.
//!
//! Statutory calculations must be explainable after the fact. Each engine
//! records the steps it took as [`AuditStep`] values and surfaces documented
//! fallbacks as [`AuditWarning`] values on the result.

use serde::{Deserialize, Serialize};

/// The severity of an audit warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningSeverity {
    /// Informational; no action expected.
    Low,
    /// A documented fallback was applied; the caller should review.
    Medium,
    /// The result is suspect and should be checked before posting.
    High,
}

/// A single step in the audit trail recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule
/// application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag the two documented fallbacks (unknown pay-period code,
/// missing leave policy) and any other condition that does not prevent
/// calculation but requires attention. The engine never applies a fallback
/// without attaching one of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level.
    pub severity: WarningSeverity,
}

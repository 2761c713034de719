//! Leave policy and per-employee leave balance models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The documented fallback annual entitlement used when a tenant has no
/// leave policy. Never applied silently: the ledger attaches a warning and
/// logs whenever this default is used.
pub const DEFAULT_ANNUAL_LEAVE_DAYS: Decimal = Decimal::from_parts(22, 0, 0, false, 0);

/// The category of leave being taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveKind {
    /// Annual (vacation) leave, accrued monthly.
    Annual,
    /// Sick leave, a running total against the policy cap.
    Sick,
    /// Maternity leave, a running total against the policy cap.
    Maternity,
    /// Paternity leave, a running total against the policy cap.
    Paternity,
}

/// Per-tenant leave entitlements.
///
/// One policy per tenant, mutable by admin action. Changes apply
/// prospectively: balances already created keep the totals they were seeded
/// with until explicitly recalculated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeavePolicy {
    /// The tenant this policy belongs to.
    pub tenant_id: String,
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

impl LeavePolicy {
    /// The fallback policy applied when a tenant has none configured.
    ///
    /// Annual entitlement is [`DEFAULT_ANNUAL_LEAVE_DAYS`]; the remaining
    /// entitlements are conservative statutory floors.
    pub fn fallback(tenant_id: &str) -> Self {
        Self {
            tenant_id: tenant_id.to_string(),
            annual_leave_days: DEFAULT_ANNUAL_LEAVE_DAYS,
            carry_over_days: Decimal::ZERO,
            sick_leave_days_before_cert: Decimal::from(90),
            maternity_leave_days: Decimal::from(98),
            paternity_leave_days: Decimal::ZERO,
        }
    }

    /// Returns the fixed entitlement cap for a leave kind.
    pub fn entitlement(&self, kind: LeaveKind) -> Decimal {
        match kind {
            LeaveKind::Annual => self.annual_leave_days,
            LeaveKind::Sick => self.sick_leave_days_before_cert,
            LeaveKind::Maternity => self.maternity_leave_days,
            LeaveKind::Paternity => self.paternity_leave_days,
        }
    }
}

/// One employee's leave balance for one calendar year.
///
/// Created lazily on first access from the tenant's policy snapshot at
/// creation time. The debit path maintains
/// `annual_balance = annual_total - annual_used` (carry-over is not added
/// back); the recalculation path rebases `annual_balance` on accrued days
/// and clamps it to ≥ 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// The employee this balance belongs to.
    pub employee_id: String,
    /// The calendar year this balance covers.
    pub year: i32,
    /// Annual entitlement the balance was seeded or resynced with.
    pub annual_total: Decimal,
    /// Annual days taken so far this year.
    pub annual_used: Decimal,
    /// Annual days remaining.
    pub annual_balance: Decimal,
    /// Unused days carried over from the prior year.
    pub annual_carry_over: Decimal,
    /// Sick days taken so far this year.
    pub sick_used: Decimal,
    /// Maternity days taken so far this year.
    pub maternity_used: Decimal,
    /// Paternity days taken so far this year.
    pub paternity_used: Decimal,
}

impl LeaveBalance {
    /// Creates a fresh balance seeded from a policy snapshot, with all
    /// usage and carry-over at zero.
    pub fn seeded(employee_id: &str, year: i32, policy: &LeavePolicy) -> Self {
        Self {
            employee_id: employee_id.to_string(),
            year,
            annual_total: policy.annual_leave_days,
            annual_used: Decimal::ZERO,
            annual_balance: policy.annual_leave_days,
            annual_carry_over: Decimal::ZERO,
            sick_used: Decimal::ZERO,
            maternity_used: Decimal::ZERO,
            paternity_used: Decimal::ZERO,
        }
    }

    /// Days of a given kind already used this year.
    pub fn used(&self, kind: LeaveKind) -> Decimal {
        match kind {
            LeaveKind::Annual => self.annual_used,
            LeaveKind::Sick => self.sick_used,
            LeaveKind::Maternity => self.maternity_used,
            LeaveKind::Paternity => self.paternity_used,
        }
    }

    /// Days of a given kind still available under the policy's fixed cap.
    ///
    /// For annual leave this is the maintained `annual_balance`; for the
    /// other kinds it is `cap - used`, floored at zero.
    pub fn remaining_entitlement(&self, kind: LeaveKind, policy: &LeavePolicy) -> Decimal {
        match kind {
            LeaveKind::Annual => self.annual_balance,
            _ => (policy.entitlement(kind) - self.used(kind)).max(Decimal::ZERO),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn policy() -> LeavePolicy {
        LeavePolicy {
            tenant_id: "acme".to_string(),
            annual_leave_days: dec("22"),
            carry_over_days: dec("5"),
            sick_leave_days_before_cert: dec("90"),
            maternity_leave_days: dec("98"),
            paternity_leave_days: dec("10"),
        }
    }

    #[test]
    fn test_seeded_balance_starts_at_full_entitlement() {
        let balance = LeaveBalance::seeded("emp_001", 2025, &policy());

        assert_eq!(balance.annual_total, dec("22"));
        assert_eq!(balance.annual_balance, dec("22"));
        assert_eq!(balance.annual_used, Decimal::ZERO);
        assert_eq!(balance.annual_carry_over, Decimal::ZERO);
        assert_eq!(balance.sick_used, Decimal::ZERO);
    }

    #[test]
    fn test_fallback_policy_uses_documented_default() {
        let fallback = LeavePolicy::fallback("acme");
        assert_eq!(fallback.annual_leave_days, dec("22"));
        assert_eq!(fallback.annual_leave_days, DEFAULT_ANNUAL_LEAVE_DAYS);
        assert_eq!(fallback.carry_over_days, Decimal::ZERO);
    }

    #[test]
    fn test_entitlement_by_kind() {
        let policy = policy();
        assert_eq!(policy.entitlement(LeaveKind::Annual), dec("22"));
        assert_eq!(policy.entitlement(LeaveKind::Sick), dec("90"));
        assert_eq!(policy.entitlement(LeaveKind::Maternity), dec("98"));
        assert_eq!(policy.entitlement(LeaveKind::Paternity), dec("10"));
    }

    #[test]
    fn test_remaining_entitlement_floors_at_zero() {
        let policy = policy();
        let mut balance = LeaveBalance::seeded("emp_001", 2025, &policy);
        balance.sick_used = dec("95");

        assert_eq!(
            balance.remaining_entitlement(LeaveKind::Sick, &policy),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_remaining_annual_entitlement_reads_the_maintained_balance() {
        let policy = policy();
        let mut balance = LeaveBalance::seeded("emp_001", 2025, &policy);
        balance.annual_used = dec("8");
        balance.annual_balance = dec("14");

        assert_eq!(
            balance.remaining_entitlement(LeaveKind::Annual, &policy),
            dec("14")
        );
    }

    #[test]
    fn test_leave_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&LeaveKind::Maternity).unwrap(),
            "\"maternity\""
        );
        let back: LeaveKind = serde_json::from_str("\"sick\"").unwrap();
        assert_eq!(back, LeaveKind::Sick);
    }

    #[test]
    fn test_balance_serde_round_trip() {
        let balance = LeaveBalance::seeded("emp_001", 2025, &policy());
        let json = serde_json::to_string(&balance).unwrap();
        let back: LeaveBalance = serde_json::from_str(&json).unwrap();
        assert_eq!(balance, back);
    }
}

//! Payroll result models.
//!
//! This module contains the [`PayrollResult`] type and its associated
//! structures: the employer-side contribution figures reported alongside the
//! employee's net pay, and the audit trace recording each calculation step.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Employer-side contributions, computed against the same capped basis as
/// the employee's. Reported only; they never affect net pay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerContributions {
    /// Employer provident-fund contribution.
    pub provident_fund: Decimal,
    /// Employer social-security contribution.
    pub social_security: Decimal,
    /// Employer unemployment-insurance contribution.
    pub unemployment_insurance: Decimal,
}

impl EmployerContributions {
    /// Returns the sum of all employer contributions.
    pub fn total(&self) -> Decimal {
        self.provident_fund + self.social_security + self.unemployment_insurance
    }
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
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

/// The complete audit trace for a calculation.
///
/// Holds no timestamps or durations so that identical inputs always produce
/// identical traces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
}

impl AuditTrace {
    /// Returns the step recorded for the given rule, if any.
    pub fn step(&self, rule_id: &str) -> Option<&AuditStep> {
        self.steps.iter().find(|s| s.rule_id == rule_id)
    }
}

/// The fully itemized payroll for one employee and one period.
///
/// Every monetary line is rounded to two decimal places. `net_payable` is
/// computed from unrounded intermediates and rounded once, so it can differ
/// by a cent from the sum of the rounded lines.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{AuditTrace, EmployerContributions, PayrollResult};
/// use rust_decimal::Decimal;
///
/// let result = PayrollResult {
///     gross_salary: Decimal::from(50_000),
///     provident_fund_employee: Decimal::from(2_500),
///     social_security_employee: Decimal::from(4_500),
///     unemployment_insurance_employee: Decimal::ZERO,
///     income_tax: Decimal::from(5_600),
///     transport_amount: Decimal::ZERO,
///     advance_deduction: Decimal::ZERO,
///     net_payable: Decimal::from(37_400),
///     employer_contributions: EmployerContributions::default(),
///     audit_trace: AuditTrace::default(),
/// };
/// assert_eq!(result.total_employee_contributions(), Decimal::from(7_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// Taxable, contributable gross (transport excluded).
    pub gross_salary: Decimal,
    /// Employee provident-fund contribution.
    pub provident_fund_employee: Decimal,
    /// Employee social-security contribution.
    pub social_security_employee: Decimal,
    /// Employee unemployment-insurance contribution.
    pub unemployment_insurance_employee: Decimal,
    /// Progressive income tax.
    pub income_tax: Decimal,
    /// Non-taxable transport allowance added to net pay.
    pub transport_amount: Decimal,
    /// Advance recovered from net pay.
    pub advance_deduction: Decimal,
    /// Amount paid to the employee.
    pub net_payable: Decimal,
    /// Employer-side contributions for reporting.
    pub employer_contributions: EmployerContributions,
    /// Step-by-step record of the calculation.
    pub audit_trace: AuditTrace,
}

impl PayrollResult {
    /// Returns the sum of the three employee contributions.
    pub fn total_employee_contributions(&self) -> Decimal {
        self.provident_fund_employee
            + self.social_security_employee
            + self.unemployment_insurance_employee
    }
}

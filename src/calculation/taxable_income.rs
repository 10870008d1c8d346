//! Tax base and taxable income.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

use super::contributions::ContributionAmounts;

/// The result of deducting employee contributions from the gross.
#[derive(Debug, Clone)]
pub(crate) struct TaxBaseResult {
    /// `total_gross - employee contributions`.
    pub tax_base: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Deducts all three employee contributions from the gross.
pub(crate) fn calculate_tax_base(
    total_gross: Decimal,
    employee_contributions: &ContributionAmounts,
    step_number: u32,
) -> EngineResult<TaxBaseResult> {
    let deducted = employee_contributions.total()?;
    let tax_base = total_gross
        .checked_sub(deducted)
        .ok_or_else(|| EngineError::input_out_of_range("gross_salary"))?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "tax_base".to_string(),
        rule_name: "Tax Base".to_string(),
        input: serde_json::json!({
            "total_gross": total_gross.normalize().to_string(),
            "employee_contributions": deducted.normalize().to_string()
        }),
        output: serde_json::json!({
            "tax_base": tax_base.normalize().to_string()
        }),
        reasoning: format!(
            "${} - ${} contributions = ${}",
            total_gross.normalize(),
            deducted.normalize(),
            tax_base.normalize()
        ),
    };

    Ok(TaxBaseResult {
        tax_base,
        audit_step,
    })
}

/// The result of deducting the allowance from the tax base.
#[derive(Debug, Clone)]
pub(crate) struct TaxableIncomeResult {
    /// `max(tax_base - allowance, 0)`.
    pub taxable_income: Decimal,
    /// Whether the allowance exceeded the tax base.
    pub floored_at_zero: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Deducts the allowance from the tax base, never going below zero.
pub(crate) fn calculate_taxable_income(
    tax_base: Decimal,
    allowance: Decimal,
    step_number: u32,
) -> EngineResult<TaxableIncomeResult> {
    let difference = tax_base
        .checked_sub(allowance)
        .ok_or_else(|| EngineError::configuration_out_of_range("allowance_parameters"))?;
    let floored_at_zero = difference < Decimal::ZERO;
    let taxable_income = difference.max(Decimal::ZERO);

    let reasoning = if floored_at_zero {
        format!(
            "Allowance ${} exceeds tax base ${}; taxable income is $0",
            allowance.normalize(),
            tax_base.normalize()
        )
    } else {
        format!(
            "${} - ${} allowance = ${}",
            tax_base.normalize(),
            allowance.normalize(),
            taxable_income.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "taxable_income".to_string(),
        rule_name: "Taxable Income".to_string(),
        input: serde_json::json!({
            "tax_base": tax_base.normalize().to_string(),
            "allowance": allowance.normalize().to_string()
        }),
        output: serde_json::json!({
            "taxable_income": taxable_income.normalize().to_string(),
            "floored_at_zero": floored_at_zero
        }),
        reasoning,
    };

    Ok(TaxableIncomeResult {
        taxable_income,
        floored_at_zero,
        audit_step,
    })
}

//! Net pay calculation.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

use super::contributions::ContributionAmounts;

/// The result of the net-pay step.
#[derive(Debug, Clone)]
pub(crate) struct NetPayResult {
    /// Unrounded net payable.
    pub net_payable: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes net pay from unrounded intermediates.
///
/// `gross - contributions - tax + transport - advance`. Transport is added
/// back untaxed and the advance is recovered last.
///
/// # Errors
///
/// Returns an input error naming the amount whose inclusion overflows.
pub(crate) fn calculate_net_pay(
    total_gross: Decimal,
    employee_contributions: &ContributionAmounts,
    income_tax: Decimal,
    transport_allowance: Decimal,
    advance_deduction: Decimal,
    step_number: u32,
) -> EngineResult<NetPayResult> {
    let contributions = employee_contributions.total()?;
    let net_payable = total_gross
        .checked_sub(contributions)
        .ok_or_else(|| EngineError::input_out_of_range("gross_salary"))?
        .checked_sub(income_tax)
        .ok_or_else(|| EngineError::input_out_of_range("gross_salary"))?
        .checked_add(transport_allowance)
        .ok_or_else(|| EngineError::input_out_of_range("transport_allowance_amount"))?
        .checked_sub(advance_deduction)
        .ok_or_else(|| EngineError::input_out_of_range("advance_deduction"))?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "net_payable".to_string(),
        rule_name: "Net Payable".to_string(),
        input: serde_json::json!({
            "total_gross": total_gross.normalize().to_string(),
            "employee_contributions": contributions.normalize().to_string(),
            "income_tax": income_tax.normalize().to_string(),
            "transport_allowance": transport_allowance.normalize().to_string(),
            "advance_deduction": advance_deduction.normalize().to_string()
        }),
        output: serde_json::json!({
            "net_payable": net_payable.normalize().to_string()
        }),
        reasoning: format!(
            "${} - ${} contributions - ${} tax + ${} transport - ${} advance = ${}",
            total_gross.normalize(),
            contributions.normalize(),
            income_tax.normalize(),
            transport_allowance.normalize(),
            advance_deduction.normalize(),
            net_payable.normalize()
        ),
    };

    Ok(NetPayResult {
        net_payable,
        audit_step,
    })
}

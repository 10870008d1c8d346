//! Household tax allowance calculation.
//!
//! The allowance is a multiple of the minimum wage. The multiple is the
//! personal multiplier, plus the spouse multiplier for a married employee
//! whose spouse does not work, plus the child multiplier per dependent child.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AllowanceParameters, AuditStep, CHILD_ALLOWANCE, EmployeeTaxProfile, MinimumWageReference,
    PERSONAL_ALLOWANCE, SPOUSE_ALLOWANCE,
};

/// The result of calculating the household allowance.
#[derive(Debug, Clone)]
pub(crate) struct AllowanceResult {
    /// Sum of the applicable multipliers.
    pub factor: Decimal,
    /// `factor × minimum wage`.
    pub allowance: Decimal,
    /// Whether the spouse multiplier was included.
    pub spouse_included: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the tax allowance for an employee's household.
///
/// # Errors
///
/// Returns a configuration error if the personal, spouse or child multiplier
/// is missing from `params`, or if the multipliers scale the minimum wage
/// past what a `Decimal` can hold.
pub(crate) fn calculate_allowance(
    profile: &EmployeeTaxProfile,
    params: &AllowanceParameters,
    minimum_wage: &MinimumWageReference,
    step_number: u32,
) -> EngineResult<AllowanceResult> {
    let personal = params.required_multiplier(PERSONAL_ALLOWANCE)?;
    let spouse_multiplier = params.required_multiplier(SPOUSE_ALLOWANCE)?;
    let child_multiplier = params.required_multiplier(CHILD_ALLOWANCE)?;

    let spouse_included = profile.qualifies_for_spouse_allowance();
    let spouse = if spouse_included {
        spouse_multiplier
    } else {
        Decimal::ZERO
    };
    let children = child_multiplier
        .checked_mul(Decimal::from(profile.dependent_child_count))
        .ok_or_else(|| EngineError::configuration_out_of_range("allowance_parameters.child"))?;

    let factor = personal
        .checked_add(spouse)
        .and_then(|sum| sum.checked_add(children))
        .ok_or_else(|| EngineError::configuration_out_of_range("allowance_parameters"))?;
    let allowance = factor
        .checked_mul(minimum_wage.amount)
        .ok_or_else(|| EngineError::configuration_out_of_range("minimum_wage.amount"))?;

    let spouse_note = if spouse_included {
        format!("spouse {}", spouse.normalize())
    } else if profile.is_married() {
        "spouse 0 (spouse working)".to_string()
    } else {
        "spouse 0 (single)".to_string()
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "personal_allowance".to_string(),
        rule_name: "Personal Allowance".to_string(),
        input: serde_json::json!({
            "marital_status": profile.marital_status,
            "is_spouse_working": profile.is_spouse_working,
            "dependent_child_count": profile.dependent_child_count,
            "personal_multiplier": personal.normalize().to_string(),
            "spouse_multiplier": spouse_multiplier.normalize().to_string(),
            "child_multiplier": child_multiplier.normalize().to_string(),
            "minimum_wage": minimum_wage.amount.normalize().to_string()
        }),
        output: serde_json::json!({
            "factor": factor.normalize().to_string(),
            "allowance": allowance.normalize().to_string(),
            "spouse_included": spouse_included
        }),
        reasoning: format!(
            "(personal {} + {} + child {} × {}) × ${} = ${}",
            personal.normalize(),
            spouse_note,
            child_multiplier.normalize(),
            profile.dependent_child_count,
            minimum_wage.amount.normalize(),
            allowance.normalize()
        ),
    };

    Ok(AllowanceResult {
        factor,
        allowance,
        spouse_included,
        audit_step,
    })
}

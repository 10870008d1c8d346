//! Social-contribution calculation.
//!
//! Contributions are levied on the gross capped at a fixed multiple of the
//! minimum wage. Employee and employer amounts use the same capped basis.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, ContributionRateSet, MinimumWageReference};

/// Multiple of the minimum wage at which the contribution basis is capped.
pub const CONTRIBUTION_CEILING_MULTIPLIER: u32 = 7;

/// Returns the contribution ceiling for a minimum wage.
///
/// # Errors
///
/// Returns a configuration error if the minimum wage is too large to scale.
pub(crate) fn contribution_ceiling(minimum_wage: &MinimumWageReference) -> EngineResult<Decimal> {
    minimum_wage
        .amount
        .checked_mul(Decimal::from(CONTRIBUTION_CEILING_MULTIPLIER))
        .ok_or_else(|| EngineError::configuration_out_of_range("minimum_wage.amount"))
}

/// The result of capping the gross to the contribution basis.
#[derive(Debug, Clone)]
pub(crate) struct ContributionBasisResult {
    /// `min(total_gross, ceiling)`.
    pub basis: Decimal,
    /// The ceiling that was applied.
    pub ceiling: Decimal,
    /// Whether the gross exceeded the ceiling.
    pub ceiling_applied: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Caps the gross at [`CONTRIBUTION_CEILING_MULTIPLIER`] times the minimum wage.
pub(crate) fn calculate_contribution_basis(
    total_gross: Decimal,
    minimum_wage: &MinimumWageReference,
    step_number: u32,
) -> EngineResult<ContributionBasisResult> {
    let ceiling = contribution_ceiling(minimum_wage)?;
    let ceiling_applied = total_gross > ceiling;
    let basis = if ceiling_applied { ceiling } else { total_gross };

    let reasoning = if ceiling_applied {
        format!(
            "Gross ${} exceeds ceiling {} × ${} = ${}; contributions levied on ${}",
            total_gross.normalize(),
            CONTRIBUTION_CEILING_MULTIPLIER,
            minimum_wage.amount.normalize(),
            ceiling.normalize(),
            basis.normalize()
        )
    } else {
        format!(
            "Gross ${} is within ceiling {} × ${} = ${}",
            total_gross.normalize(),
            CONTRIBUTION_CEILING_MULTIPLIER,
            minimum_wage.amount.normalize(),
            ceiling.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "contribution_basis".to_string(),
        rule_name: "Contribution Basis".to_string(),
        input: serde_json::json!({
            "total_gross": total_gross.normalize().to_string(),
            "minimum_wage": minimum_wage.amount.normalize().to_string(),
            "ceiling_multiplier": CONTRIBUTION_CEILING_MULTIPLIER
        }),
        output: serde_json::json!({
            "ceiling": ceiling.normalize().to_string(),
            "basis": basis.normalize().to_string(),
            "ceiling_applied": ceiling_applied
        }),
        reasoning,
    };

    Ok(ContributionBasisResult {
        basis,
        ceiling,
        ceiling_applied,
        audit_step,
    })
}

/// Unrounded provident-fund, social-security and unemployment amounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ContributionAmounts {
    /// Provident-fund contribution.
    pub provident_fund: Decimal,
    /// Social-security contribution.
    pub social_security: Decimal,
    /// Unemployment-insurance contribution.
    pub unemployment_insurance: Decimal,
}

impl ContributionAmounts {
    /// Returns the sum of the three contributions.
    ///
    /// Overflow can only come from an oversized gross, so it is reported
    /// against `gross_salary`.
    pub fn total(&self) -> EngineResult<Decimal> {
        self.provident_fund
            .checked_add(self.social_security)
            .and_then(|sum| sum.checked_add(self.unemployment_insurance))
            .ok_or_else(|| EngineError::input_out_of_range("gross_salary"))
    }

    fn at_rates(basis: Decimal, pf: Decimal, ss: Decimal, ui: Decimal) -> EngineResult<Self> {
        let levy = |rate: Decimal| {
            basis
                .checked_mul(rate)
                .ok_or_else(|| EngineError::input_out_of_range("gross_salary"))
        };
        Ok(Self {
            provident_fund: levy(pf)?,
            social_security: levy(ss)?,
            unemployment_insurance: levy(ui)?,
        })
    }
}

/// The result of applying contribution rates to the basis.
#[derive(Debug, Clone)]
pub(crate) struct ContributionResult {
    /// Employee-side amounts; these reduce taxable income and net pay.
    pub employee: ContributionAmounts,
    /// Employer-side amounts; reported only.
    pub employer: ContributionAmounts,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Applies employee and employer contribution rates to the capped basis.
pub(crate) fn calculate_contributions(
    basis: Decimal,
    rates: &ContributionRateSet,
    step_number: u32,
) -> EngineResult<ContributionResult> {
    let employee = ContributionAmounts::at_rates(
        basis,
        rates.employee_provident_fund_rate,
        rates.employee_social_security_rate,
        rates.employee_unemployment_rate,
    )?;
    let employer = ContributionAmounts::at_rates(
        basis,
        rates.employer_provident_fund_rate,
        rates.employer_social_security_rate,
        rates.employer_unemployment_rate,
    )?;
    let employee_total = employee.total()?;
    let employer_total = employer.total()?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "employee_contributions".to_string(),
        rule_name: "Social Contributions".to_string(),
        input: serde_json::json!({
            "basis": basis.normalize().to_string(),
            "employee_provident_fund_rate": rates.employee_provident_fund_rate.normalize().to_string(),
            "employee_social_security_rate": rates.employee_social_security_rate.normalize().to_string(),
            "employee_unemployment_rate": rates.employee_unemployment_rate.normalize().to_string(),
            "employer_provident_fund_rate": rates.employer_provident_fund_rate.normalize().to_string(),
            "employer_social_security_rate": rates.employer_social_security_rate.normalize().to_string(),
            "employer_unemployment_rate": rates.employer_unemployment_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "provident_fund_employee": employee.provident_fund.normalize().to_string(),
            "social_security_employee": employee.social_security.normalize().to_string(),
            "unemployment_insurance_employee": employee.unemployment_insurance.normalize().to_string(),
            "employee_total": employee_total.normalize().to_string(),
            "employer_total": employer_total.normalize().to_string()
        }),
        reasoning: format!(
            "${} × (PF {} + SS {} + UI {}) = ${} employee contributions",
            basis.normalize(),
            rates.employee_provident_fund_rate.normalize(),
            rates.employee_social_security_rate.normalize(),
            rates.employee_unemployment_rate.normalize(),
            employee_total.normalize()
        ),
    };

    Ok(ContributionResult {
        employee,
        employer,
        audit_step,
    })
}

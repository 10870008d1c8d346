//! End-to-end payroll calculation for one employee and one pay period.

use tracing::debug;

use crate::error::EngineResult;
use crate::models::{AuditTrace, EmployerContributions, PayrollCalculationInput, PayrollResult};

use super::allowance::calculate_allowance;
use super::contributions::{
    ContributionAmounts, calculate_contribution_basis, calculate_contributions,
};
use super::gross::calculate_gross;
use super::net_pay::calculate_net_pay;
use super::progressive_tax::calculate_progressive_tax;
use super::rounding::round_currency;
use super::taxable_income::{calculate_tax_base, calculate_taxable_income};
use super::validation::validate_input;

/// Calculates the itemized payroll for one employee.
///
/// A pure function: the result depends only on `input`, and the call never
/// performs I/O or touches shared state, so it can run concurrently for many
/// employees sharing the same resolved rates.
///
/// Steps run in a fixed order (gross, contribution basis, contributions,
/// tax base, allowance, taxable income, progressive tax, net pay), each
/// recorded in the result's audit trace. Line items are rounded to cents when
/// placed into the result; net pay is computed from unrounded values and
/// rounded once.
///
/// # Errors
///
/// - [`EngineError::InvalidInput`](crate::error::EngineError::InvalidInput)
///   for negative amounts, an inconsistent employee profile, or pay so large
///   that an intermediate amount leaves the `Decimal` range.
/// - [`EngineError::Configuration`](crate::error::EngineError::Configuration)
///   for malformed brackets, rates, minimum wage or allowance multipliers,
///   including a minimum wage too large to derive the ceiling or allowance.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate;
/// use payroll_engine::models::{
///     AllowanceParameters, ContributionRateSet, EmployeeTaxProfile, MinimumWageReference,
///     PayComponents, PayrollCalculationInput, ResolvedRates, TaxBracket,
/// };
/// use rust_decimal::Decimal;
///
/// let rates = ResolvedRates {
///     tax_brackets: vec![
///         TaxBracket { lower_limit: Decimal::ZERO, upper_limit: Some(Decimal::from(30_000)), rate: Decimal::new(10, 2), order: 1 },
///         TaxBracket { lower_limit: Decimal::from(30_000), upper_limit: None, rate: Decimal::new(20, 2), order: 2 },
///     ],
///     contribution_rates: ContributionRateSet {
///         employee_social_security_rate: Decimal::new(9, 2),
///         employer_social_security_rate: Decimal::ZERO,
///         employee_provident_fund_rate: Decimal::new(5, 2),
///         employer_provident_fund_rate: Decimal::ZERO,
///         employee_unemployment_rate: Decimal::ZERO,
///         employer_unemployment_rate: Decimal::ZERO,
///     },
///     minimum_wage: MinimumWageReference { amount: Decimal::from(10_000) },
///     allowances: AllowanceParameters::new(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
/// };
/// let input = PayrollCalculationInput::new(
///     PayComponents::base(Decimal::from(50_000)),
///     EmployeeTaxProfile::single(),
///     &rates,
/// );
///
/// let result = calculate(&input)?;
/// assert_eq!(result.income_tax, Decimal::from(5_600));
/// assert_eq!(result.net_payable, Decimal::from(37_400));
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
pub fn calculate(input: &PayrollCalculationInput<'_>) -> EngineResult<PayrollResult> {
    let brackets = validate_input(input).inspect_err(|e| {
        debug!(error = %e, "Rejected payroll calculation");
    })?;

    let pay = &input.pay;
    let profile = &input.profile;
    let rates = input.rates;

    let gross = calculate_gross(pay, 1)?;
    let basis = calculate_contribution_basis(gross.total_gross, &rates.minimum_wage, 2)?;
    let contributions = calculate_contributions(basis.basis, &rates.contribution_rates, 3)?;
    let tax_base = calculate_tax_base(gross.total_gross, &contributions.employee, 4)?;
    let allowance = calculate_allowance(profile, &rates.allowances, &rates.minimum_wage, 5)?;
    let taxable = calculate_taxable_income(tax_base.tax_base, allowance.allowance, 6)?;
    let tax = calculate_progressive_tax(taxable.taxable_income, &brackets, 7)?;
    let net = calculate_net_pay(
        gross.total_gross,
        &contributions.employee,
        tax.income_tax,
        profile.transport_allowance_amount,
        pay.advance_deduction,
        8,
    )?;

    debug!(
        gross = %gross.total_gross,
        contribution_basis = %basis.basis,
        contribution_ceiling = %basis.ceiling,
        ceiling_applied = basis.ceiling_applied,
        allowance_factor = %allowance.factor,
        spouse_included = allowance.spouse_included,
        taxable_income = %taxable.taxable_income,
        allowance_exceeded_base = taxable.floored_at_zero,
        brackets_reached = tax.slices.iter().filter(|s| !s.taxed_amount.is_zero()).count(),
        income_tax = %tax.income_tax,
        net_payable = %net.net_payable,
        "Payroll calculated"
    );

    let employee = contributions.employee;
    let employer = contributions.employer;

    Ok(PayrollResult {
        gross_salary: round_currency(gross.total_gross),
        provident_fund_employee: round_currency(employee.provident_fund),
        social_security_employee: round_currency(employee.social_security),
        unemployment_insurance_employee: round_currency(employee.unemployment_insurance),
        income_tax: round_currency(tax.income_tax),
        transport_amount: round_currency(profile.transport_allowance_amount),
        advance_deduction: round_currency(pay.advance_deduction),
        net_payable: round_currency(net.net_payable),
        employer_contributions: round_employer(&employer),
        audit_trace: AuditTrace {
            steps: vec![
                gross.audit_step,
                basis.audit_step,
                contributions.audit_step,
                tax_base.audit_step,
                allowance.audit_step,
                taxable.audit_step,
                tax.audit_step,
                net.audit_step,
            ],
        },
    })
}

fn round_employer(amounts: &ContributionAmounts) -> EmployerContributions {
    EmployerContributions {
        provident_fund: round_currency(amounts.provident_fund),
        social_security: round_currency(amounts.social_security),
        unemployment_insurance: round_currency(amounts.unemployment_insurance),
    }
}

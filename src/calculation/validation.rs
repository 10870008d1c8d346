//! Input and reference-data validation.
//!
//! Caller mistakes (negative amounts, an inconsistent profile) are reported
//! as [`EngineError::InvalidInput`]. Malformed reference data (bracket gaps,
//! out-of-range rates, a non-positive minimum wage) is reported as
//! [`EngineError::Configuration`]. Every error names the offending field.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AllowanceParameters, CHILD_ALLOWANCE, ContributionRateSet, EmployeeTaxProfile,
    MinimumWageReference, PERSONAL_ALLOWANCE, PayComponents, PayrollCalculationInput,
    SPOUSE_ALLOWANCE, TaxBracket,
};

/// Checks every monetary pay figure is non-negative.
pub fn validate_pay_components(pay: &PayComponents) -> EngineResult<()> {
    for (field, amount) in pay.named_amounts() {
        ensure_non_negative(field, amount)?;
    }
    Ok(())
}

/// Checks the employee profile is internally consistent.
pub fn validate_profile(profile: &EmployeeTaxProfile) -> EngineResult<()> {
    ensure_non_negative(
        "transport_allowance_amount",
        profile.transport_allowance_amount,
    )?;

    if !profile.is_married() && profile.is_spouse_working {
        return Err(EngineError::invalid_input(
            "is_spouse_working",
            "must be false when marital status is single",
        ));
    }

    Ok(())
}

/// Validates a bracket set and returns it sorted by ascending `order`.
///
/// The set must be non-empty, start at zero, have unique orders, be
/// contiguous with no gaps or overlaps, and end with exactly one unbounded
/// bracket. Each rate must lie in [0, 1].
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::validate_tax_brackets;
/// use payroll_engine::models::TaxBracket;
/// use rust_decimal::Decimal;
///
/// let brackets = vec![
///     TaxBracket { lower_limit: Decimal::from(30_000), upper_limit: None, rate: Decimal::new(20, 2), order: 2 },
///     TaxBracket { lower_limit: Decimal::ZERO, upper_limit: Some(Decimal::from(30_000)), rate: Decimal::new(10, 2), order: 1 },
/// ];
/// let sorted = validate_tax_brackets(&brackets).unwrap();
/// assert_eq!(sorted[0].order, 1);
/// assert!(sorted[1].is_unbounded());
/// ```
pub fn validate_tax_brackets(brackets: &[TaxBracket]) -> EngineResult<Vec<&TaxBracket>> {
    if brackets.is_empty() {
        return Err(EngineError::configuration(
            "tax_brackets",
            "must contain at least one bracket",
        ));
    }

    let mut sorted: Vec<&TaxBracket> = brackets.iter().collect();
    sorted.sort_by_key(|b| b.order);

    for pair in sorted.windows(2) {
        if pair[0].order == pair[1].order {
            return Err(EngineError::configuration(
                bracket_field(pair[1], "order"),
                "duplicate bracket order",
            ));
        }
    }

    for bracket in &sorted {
        if bracket.lower_limit < Decimal::ZERO {
            return Err(EngineError::configuration(
                bracket_field(bracket, "lower_limit"),
                format!("must not be negative (got {})", bracket.lower_limit),
            ));
        }
        ensure_rate(bracket_field(bracket, "rate"), bracket.rate)?;
        if let Some(upper) = bracket.upper_limit {
            if upper <= bracket.lower_limit {
                return Err(EngineError::configuration(
                    bracket_field(bracket, "upper_limit"),
                    format!(
                        "must be greater than lower limit {} (got {})",
                        bracket.lower_limit, upper
                    ),
                ));
            }
        }
    }

    let first = sorted[0];
    if !first.lower_limit.is_zero() {
        return Err(EngineError::configuration(
            bracket_field(first, "lower_limit"),
            format!("first bracket must start at 0 (got {})", first.lower_limit),
        ));
    }

    for pair in sorted.windows(2) {
        let (previous, next) = (pair[0], pair[1]);
        match previous.upper_limit {
            None => {
                return Err(EngineError::configuration(
                    bracket_field(previous, "upper_limit"),
                    "only the last bracket may be unbounded",
                ));
            }
            Some(upper) if upper != next.lower_limit => {
                let kind = if next.lower_limit > upper {
                    "gap"
                } else {
                    "overlap"
                };
                return Err(EngineError::configuration(
                    bracket_field(next, "lower_limit"),
                    format!(
                        "must equal previous upper limit {} (got {}, {})",
                        upper, next.lower_limit, kind
                    ),
                ));
            }
            Some(_) => {}
        }
    }

    let last = sorted[sorted.len() - 1];
    if !last.is_unbounded() {
        return Err(EngineError::configuration(
            bracket_field(last, "upper_limit"),
            "top bracket must be unbounded",
        ));
    }

    Ok(sorted)
}

/// Checks every contribution rate lies in [0, 1].
pub fn validate_contribution_rates(rates: &ContributionRateSet) -> EngineResult<()> {
    for (name, rate) in rates.named_rates() {
        ensure_rate(format!("contribution_rates.{}", name), rate)?;
    }
    Ok(())
}

/// Checks the minimum wage is strictly positive.
pub fn validate_minimum_wage(minimum_wage: &MinimumWageReference) -> EngineResult<()> {
    if minimum_wage.amount <= Decimal::ZERO {
        return Err(EngineError::configuration(
            "minimum_wage.amount",
            format!("must be greater than 0 (got {})", minimum_wage.amount),
        ));
    }
    Ok(())
}

/// Checks the required multipliers are present and all are non-negative.
pub fn validate_allowance_parameters(params: &AllowanceParameters) -> EngineResult<()> {
    for name in [PERSONAL_ALLOWANCE, SPOUSE_ALLOWANCE, CHILD_ALLOWANCE] {
        params.required_multiplier(name)?;
    }
    for (name, value) in params.iter() {
        if value < Decimal::ZERO {
            return Err(EngineError::configuration(
                format!("allowance_parameters.{}", name),
                format!("must not be negative (got {})", value),
            ));
        }
    }
    Ok(())
}

/// Runs every precondition for a calculation and returns the sorted brackets.
///
/// Input errors are checked before reference-data errors.
pub fn validate_input<'a>(input: &PayrollCalculationInput<'a>) -> EngineResult<Vec<&'a TaxBracket>> {
    validate_pay_components(&input.pay)?;
    validate_profile(&input.profile)?;

    let rates = input.rates;
    let brackets = validate_tax_brackets(&rates.tax_brackets)?;
    validate_contribution_rates(&rates.contribution_rates)?;
    validate_minimum_wage(&rates.minimum_wage)?;
    validate_allowance_parameters(&rates.allowances)?;

    Ok(brackets)
}

fn ensure_non_negative(field: &str, amount: Decimal) -> EngineResult<()> {
    if amount < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            field,
            format!("must not be negative (got {})", amount),
        ));
    }
    Ok(())
}

fn ensure_rate(field: String, rate: Decimal) -> EngineResult<()> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(EngineError::configuration(
            field,
            format!("must be between 0 and 1 (got {})", rate),
        ));
    }
    Ok(())
}

fn bracket_field(bracket: &TaxBracket, name: &str) -> String {
    format!("tax_brackets[order={}].{}", bracket.order, name)
}

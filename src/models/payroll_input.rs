//! Per-employee calculation input.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EmployeeTaxProfile, ResolvedRates};

/// The pay-period figures for one employee.
///
/// Base, bonus, overtime and commission are taxable and contributable.
/// The advance deduction only reduces net pay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayComponents {
    /// Base salary for the period.
    pub base_salary: Decimal,
    /// Bonus paid in the period.
    #[serde(default)]
    pub bonus: Decimal,
    /// Overtime pay for the period.
    #[serde(default)]
    pub overtime_pay: Decimal,
    /// Commission earned in the period.
    #[serde(default)]
    pub commission_pay: Decimal,
    /// Salary advance recovered from this period's net pay.
    #[serde(default)]
    pub advance_deduction: Decimal,
}

impl PayComponents {
    /// Creates components with only a base salary.
    pub fn base(base_salary: Decimal) -> Self {
        Self {
            base_salary,
            ..Self::default()
        }
    }

    /// Returns each monetary field paired with its name.
    pub fn named_amounts(&self) -> [(&'static str, Decimal); 5] {
        [
            ("base_salary", self.base_salary),
            ("bonus", self.bonus),
            ("overtime_pay", self.overtime_pay),
            ("commission_pay", self.commission_pay),
            ("advance_deduction", self.advance_deduction),
        ]
    }
}

/// Everything needed to calculate one employee's payroll for one period.
///
/// The resolved rates are borrowed so a single resolved set can be shared
/// across every employee in a batch.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{
///     AllowanceParameters, ContributionRateSet, EmployeeTaxProfile, MinimumWageReference,
///     PayComponents, PayrollCalculationInput, ResolvedRates, TaxBracket,
/// };
/// use rust_decimal::Decimal;
///
/// let rates = ResolvedRates {
///     tax_brackets: vec![TaxBracket {
///         lower_limit: Decimal::ZERO,
///         upper_limit: None,
///         rate: Decimal::new(10, 2),
///         order: 1,
///     }],
///     contribution_rates: ContributionRateSet {
///         employee_social_security_rate: Decimal::new(10, 2),
///         employer_social_security_rate: Decimal::ZERO,
///         employee_provident_fund_rate: Decimal::ZERO,
///         employer_provident_fund_rate: Decimal::ZERO,
///         employee_unemployment_rate: Decimal::ZERO,
///         employer_unemployment_rate: Decimal::ZERO,
///     },
///     minimum_wage: MinimumWageReference { amount: Decimal::from(20_000) },
///     allowances: AllowanceParameters::new(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
/// };
///
/// let input = PayrollCalculationInput::new(
///     PayComponents::base(Decimal::from(50_000)),
///     EmployeeTaxProfile::single(),
///     &rates,
/// );
/// assert_eq!(input.pay.base_salary, Decimal::from(50_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PayrollCalculationInput<'a> {
    /// The employee's pay-period figures.
    pub pay: PayComponents,
    /// The employee's household and allowance attributes.
    pub profile: EmployeeTaxProfile,
    /// Reference data resolved for the employee's classification and date.
    pub rates: &'a ResolvedRates,
}

impl<'a> PayrollCalculationInput<'a> {
    /// Creates a new calculation input.
    pub fn new(pay: PayComponents, profile: EmployeeTaxProfile, rates: &'a ResolvedRates) -> Self {
        Self {
            pay,
            profile,
            rates,
        }
    }
}

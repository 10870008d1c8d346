//! Reference data consumed by the calculator.
//!
//! These types hold the resolved, read-only tax brackets, contribution rates,
//! minimum wage and allowance multipliers for one calculation date and one
//! employee classification. See [`crate::config`] for how they are resolved.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Allowance multiplier name for the personal allowance.
pub const PERSONAL_ALLOWANCE: &str = "personal";

/// Allowance multiplier name for the non-working spouse allowance.
pub const SPOUSE_ALLOWANCE: &str = "spouse";

/// Allowance multiplier name for the per-child allowance.
pub const CHILD_ALLOWANCE: &str = "child";

/// One progressive-tax slice.
///
/// # Example
///
/// ```
/// use payroll_engine::models::TaxBracket;
/// use rust_decimal::Decimal;
///
/// let bracket = TaxBracket {
///     lower_limit: Decimal::from(30_000),
///     upper_limit: Some(Decimal::from(60_000)),
///     rate: Decimal::new(20, 2),
///     order: 2,
/// };
/// assert_eq!(bracket.taxed_slice(Decimal::from(45_000)), Decimal::from(15_000));
/// assert_eq!(bracket.taxed_slice(Decimal::from(10_000)), Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Inclusive lower bound of the slice.
    pub lower_limit: Decimal,
    /// Upper bound of the slice; `None` for the unbounded top bracket.
    #[serde(default)]
    pub upper_limit: Option<Decimal>,
    /// Rate applied to income inside the slice, in [0, 1].
    pub rate: Decimal,
    /// Position of the bracket within its set (ascending).
    pub order: u32,
}

impl TaxBracket {
    /// Returns true if this is the unbounded top bracket.
    pub fn is_unbounded(&self) -> bool {
        self.upper_limit.is_none()
    }

    /// Returns the part of `income` that falls inside this bracket.
    ///
    /// `max(0, min(income, upper_limit) - lower_limit)`, with an unbounded
    /// upper limit treated as infinity.
    pub fn taxed_slice(&self, income: Decimal) -> Decimal {
        let capped = match self.upper_limit {
            Some(upper) => income.min(upper),
            None => income,
        };
        (capped - self.lower_limit).max(Decimal::ZERO)
    }
}

/// One social-contribution profile.
///
/// Employee rates reduce net pay; employer rates are reported only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRateSet {
    /// Employee social-security rate.
    pub employee_social_security_rate: Decimal,
    /// Employer social-security rate.
    pub employer_social_security_rate: Decimal,
    /// Employee provident-fund rate.
    pub employee_provident_fund_rate: Decimal,
    /// Employer provident-fund rate.
    pub employer_provident_fund_rate: Decimal,
    /// Employee unemployment-insurance rate.
    pub employee_unemployment_rate: Decimal,
    /// Employer unemployment-insurance rate.
    pub employer_unemployment_rate: Decimal,
}

impl ContributionRateSet {
    /// Returns every rate paired with its field name, for validation and audit.
    pub fn named_rates(&self) -> [(&'static str, Decimal); 6] {
        [
            (
                "employee_social_security_rate",
                self.employee_social_security_rate,
            ),
            (
                "employer_social_security_rate",
                self.employer_social_security_rate,
            ),
            (
                "employee_provident_fund_rate",
                self.employee_provident_fund_rate,
            ),
            (
                "employer_provident_fund_rate",
                self.employer_provident_fund_rate,
            ),
            ("employee_unemployment_rate", self.employee_unemployment_rate),
            ("employer_unemployment_rate", self.employer_unemployment_rate),
        ]
    }
}

/// The statutory minimum wage in force for the calculation date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimumWageReference {
    /// The minimum wage amount for one pay period.
    pub amount: Decimal,
}

/// Named allowance multipliers, each a multiple of the minimum wage.
///
/// The calculator reads [`PERSONAL_ALLOWANCE`], [`SPOUSE_ALLOWANCE`] and
/// [`CHILD_ALLOWANCE`]; other names may be present and are ignored.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{AllowanceParameters, CHILD_ALLOWANCE};
/// use rust_decimal::Decimal;
///
/// let params = AllowanceParameters::new(Decimal::ONE, Decimal::new(5, 1), Decimal::new(1, 1))
///     .with_multiplier("disability", Decimal::new(3, 1));
/// assert_eq!(params.multiplier(CHILD_ALLOWANCE), Some(Decimal::new(1, 1)));
/// assert_eq!(params.multiplier("disability"), Some(Decimal::new(3, 1)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllowanceParameters {
    multipliers: BTreeMap<String, Decimal>,
}

impl AllowanceParameters {
    /// Creates parameters with the three multipliers the calculator reads.
    pub fn new(personal: Decimal, spouse: Decimal, child: Decimal) -> Self {
        Self::default()
            .with_multiplier(PERSONAL_ALLOWANCE, personal)
            .with_multiplier(SPOUSE_ALLOWANCE, spouse)
            .with_multiplier(CHILD_ALLOWANCE, child)
    }

    /// Adds or replaces a named multiplier.
    pub fn with_multiplier(mut self, name: impl Into<String>, value: Decimal) -> Self {
        self.multipliers.insert(name.into(), value);
        self
    }

    /// Returns the multiplier with the given name, if present.
    pub fn multiplier(&self, name: &str) -> Option<Decimal> {
        self.multipliers.get(name).copied()
    }

    /// Returns the multiplier with the given name, or a configuration error.
    pub fn required_multiplier(&self, name: &str) -> EngineResult<Decimal> {
        self.multiplier(name).ok_or_else(|| {
            EngineError::configuration(
                format!("allowance_parameters.{}", name),
                "required multiplier is missing",
            )
        })
    }

    /// Iterates over all multipliers in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.multipliers.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Everything the resolver hands to the calculator for one employee
/// classification on one date.
///
/// Read-only for the duration of a payroll batch and safe to share by
/// reference across threads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRates {
    /// Progressive tax brackets.
    pub tax_brackets: Vec<TaxBracket>,
    /// Social-contribution rates.
    pub contribution_rates: ContributionRateSet,
    /// Minimum wage reference amount.
    pub minimum_wage: MinimumWageReference,
    /// Allowance multipliers.
    pub allowances: AllowanceParameters,
}

//! Effective-dated resolution of reference data.
//!
//! The calculator never looks anything up itself. A [`RateResolver`] turns a
//! calculation date and an employee classification into one
//! [`ResolvedRates`], and the calculator consumes that as plain data.

use chrono::NaiveDate;
use tracing::debug;

use crate::calculation::{
    validate_allowance_parameters, validate_contribution_rates, validate_minimum_wage,
    validate_tax_brackets,
};
use crate::error::{EngineError, EngineResult};
use crate::models::{MinimumWageReference, ResolvedRates};

use super::types::{
    AllowanceRecord, ContributionRateRecord, MinimumWageRecord, ReferenceData, TaxBracketSetRecord,
};

/// Resolves the reference data that applies to one employee on one date.
///
/// Implementations must return exactly one record per category: the one
/// effective on `as_of` with the latest `effective_from`. Zero matches, or
/// several sharing that latest date, are configuration errors, as is a
/// malformed bracket schedule.
pub trait RateResolver {
    /// Resolves brackets, contribution rates, minimum wage and allowances.
    fn resolve(
        &self,
        as_of: NaiveDate,
        citizenship_class: &str,
        contribution_class: &str,
    ) -> EngineResult<ResolvedRates>;
}

/// A record that applies over `[effective_from, effective_to)`.
pub trait EffectiveDated {
    /// First date the record applies (inclusive).
    fn effective_from(&self) -> NaiveDate;

    /// Date the record stops applying (exclusive), if any.
    fn effective_to(&self) -> Option<NaiveDate>;

    /// Returns true if the record applies on `date`.
    fn is_effective_on(&self, date: NaiveDate) -> bool {
        self.effective_from() <= date && self.effective_to().is_none_or(|to| to > date)
    }
}

macro_rules! impl_effective_dated {
    ($($record:ty),* $(,)?) => {
        $(
            impl EffectiveDated for $record {
                fn effective_from(&self) -> NaiveDate {
                    self.effective_from
                }

                fn effective_to(&self) -> Option<NaiveDate> {
                    self.effective_to
                }
            }
        )*
    };
}

impl_effective_dated!(
    TaxBracketSetRecord,
    ContributionRateRecord,
    MinimumWageRecord,
    AllowanceRecord,
);

/// Selects the single record effective on `as_of`.
///
/// Among records effective on the date, the one with the latest
/// `effective_from` wins. `category` names the record kind in errors.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use payroll_engine::config::{MinimumWageRecord, select_effective};
/// use rust_decimal::Decimal;
///
/// let records = vec![
///     MinimumWageRecord {
///         effective_from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///         effective_to: None,
///         amount: Decimal::from(18_000),
///     },
///     MinimumWageRecord {
///         effective_from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///         effective_to: None,
///         amount: Decimal::from(20_000),
///     },
/// ];
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
/// let record = select_effective(&records, date, "minimum_wage").unwrap();
/// assert_eq!(record.amount, Decimal::from(20_000));
/// ```
pub fn select_effective<'a, T, I>(
    records: I,
    as_of: NaiveDate,
    category: &str,
) -> EngineResult<&'a T>
where
    T: EffectiveDated + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut latest: Vec<&'a T> = Vec::new();

    for record in records.into_iter().filter(|r| r.is_effective_on(as_of)) {
        match latest.first().map(|r| r.effective_from()) {
            Some(current) if record.effective_from() < current => {}
            Some(current) if record.effective_from() > current => {
                latest.clear();
                latest.push(record);
            }
            _ => latest.push(record),
        }
    }

    match latest.as_slice() {
        [] => Err(EngineError::configuration(
            category,
            format!("no record effective on {}", as_of),
        )),
        [only] => Ok(*only),
        many => Err(EngineError::configuration(
            category,
            format!(
                "{} records effective from {} apply on {}; expected exactly one",
                many.len(),
                many[0].effective_from(),
                as_of
            ),
        )),
    }
}

impl RateResolver for ReferenceData {
    fn resolve(
        &self,
        as_of: NaiveDate,
        citizenship_class: &str,
        contribution_class: &str,
    ) -> EngineResult<ResolvedRates> {
        let bracket_set = select_effective(self.tax_bracket_sets(), as_of, "tax_brackets")?;
        let tax_brackets: Vec<_> = validate_tax_brackets(&bracket_set.brackets)?
            .into_iter()
            .cloned()
            .collect();

        let contribution_category =
            format!("contribution_rates[{}/{}]", citizenship_class, contribution_class);
        let contribution = select_effective(
            self.contribution_rates().iter().filter(|r| {
                r.citizenship_class == citizenship_class
                    && r.contribution_class == contribution_class
            }),
            as_of,
            &contribution_category,
        )?;
        validate_contribution_rates(&contribution.rates)?;

        let wage = select_effective(self.minimum_wages(), as_of, "minimum_wage")?;
        let minimum_wage = MinimumWageReference {
            amount: wage.amount,
        };
        validate_minimum_wage(&minimum_wage)?;

        let allowance = select_effective(self.allowances(), as_of, "allowance_parameters")?;
        validate_allowance_parameters(&allowance.multipliers)?;

        debug!(
            %as_of,
            citizenship_class,
            contribution_class,
            brackets_from = %bracket_set.effective_from,
            contribution_rates_from = %contribution.effective_from,
            minimum_wage = %minimum_wage.amount,
            "Resolved reference data"
        );

        Ok(ResolvedRates {
            tax_brackets,
            contribution_rates: contribution.rates,
            minimum_wage,
            allowances: allowance.multipliers.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AllowanceParameters, ContributionRateSet, TaxBracket};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn wage(from: NaiveDate, to: Option<NaiveDate>, amount: &str) -> MinimumWageRecord {
        MinimumWageRecord {
            effective_from: from,
            effective_to: to,
            amount: dec(amount),
        }
    }

    fn flat_brackets(from: NaiveDate, rate: &str) -> TaxBracketSetRecord {
        TaxBracketSetRecord {
            effective_from: from,
            effective_to: None,
            brackets: vec![TaxBracket {
                lower_limit: Decimal::ZERO,
                upper_limit: None,
                rate: dec(rate),
                order: 1,
            }],
        }
    }

    fn rates(ss: &str) -> ContributionRateSet {
        ContributionRateSet {
            employee_social_security_rate: dec(ss),
            employer_social_security_rate: dec("0.155"),
            employee_provident_fund_rate: dec("0.05"),
            employer_provident_fund_rate: dec("0.05"),
            employee_unemployment_rate: dec("0.01"),
            employer_unemployment_rate: dec("0.02"),
        }
    }

    fn contribution(
        citizenship: &str,
        class: &str,
        from: NaiveDate,
        ss: &str,
    ) -> ContributionRateRecord {
        ContributionRateRecord {
            citizenship_class: citizenship.to_string(),
            contribution_class: class.to_string(),
            effective_from: from,
            effective_to: None,
            rates: rates(ss),
        }
    }

    fn allowances(from: NaiveDate) -> AllowanceRecord {
        AllowanceRecord {
            effective_from: from,
            effective_to: None,
            multipliers: AllowanceParameters::new(dec("1.0"), dec("0.5"), dec("0.1")),
        }
    }

    fn reference_data() -> ReferenceData {
        ReferenceData::new(
            vec![
                flat_brackets(date(2024, 1, 1), "0.15"),
                flat_brackets(date(2025, 1, 1), "0.10"),
            ],
            vec![
                contribution("citizen", "standard", date(2024, 1, 1), "0.09"),
                contribution("citizen", "standard", date(2025, 1, 1), "0.04"),
                contribution("foreign", "exempt", date(2025, 1, 1), "0"),
            ],
            vec![wage(date(2025, 1, 1), None, "20000")],
            vec![allowances(date(2025, 1, 1))],
        )
    }

    #[test]
    fn test_latest_effective_record_wins() {
        let records = vec![
            wage(date(2024, 1, 1), None, "18000"),
            wage(date(2025, 1, 1), None, "20000"),
        ];

        let chosen = select_effective(&records, date(2025, 6, 1), "minimum_wage").unwrap();
        assert_eq!(chosen.amount, dec("20000"));
    }

    #[test]
    fn test_future_record_is_not_effective_yet() {
        let records = vec![
            wage(date(2024, 1, 1), None, "18000"),
            wage(date(2025, 1, 1), None, "20000"),
        ];

        let chosen = select_effective(&records, date(2024, 12, 31), "minimum_wage").unwrap();
        assert_eq!(chosen.amount, dec("18000"));
    }

    #[test]
    fn test_effective_to_is_exclusive() {
        let records = vec![wage(date(2024, 1, 1), Some(date(2025, 1, 1)), "18000")];

        assert!(select_effective(&records, date(2024, 12, 31), "minimum_wage").is_ok());
        let err = select_effective(&records, date(2025, 1, 1), "minimum_wage").unwrap_err();
        assert_eq!(err.field(), Some("minimum_wage"));
        assert!(err.to_string().contains("no record effective on 2025-01-01"));
    }

    #[test]
    fn test_effective_from_is_inclusive() {
        let records = vec![wage(date(2025, 1, 1), None, "20000")];
        assert!(select_effective(&records, date(2025, 1, 1), "minimum_wage").is_ok());
    }

    #[test]
    fn test_two_records_with_same_start_are_ambiguous() {
        let records = vec![
            wage(date(2025, 1, 1), None, "20000"),
            wage(date(2025, 1, 1), None, "21000"),
        ];

        match select_effective(&records, date(2025, 6, 1), "minimum_wage") {
            Err(EngineError::Configuration { field, message }) => {
                assert_eq!(field, "minimum_wage");
                assert!(message.contains("2 records"));
            }
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_picks_current_records() {
        let resolved = reference_data()
            .resolve(date(2025, 6, 30), "citizen", "standard")
            .unwrap();

        assert_eq!(resolved.tax_brackets[0].rate, dec("0.10"));
        assert_eq!(
            resolved.contribution_rates.employee_social_security_rate,
            dec("0.04")
        );
        assert_eq!(resolved.minimum_wage.amount, dec("20000"));
        assert_eq!(resolved.allowances.multiplier("spouse"), Some(dec("0.5")));
    }

    #[test]
    fn test_resolve_filters_by_classification() {
        let resolved = reference_data()
            .resolve(date(2025, 6, 30), "foreign", "exempt")
            .unwrap();

        assert_eq!(
            resolved.contribution_rates.employee_social_security_rate,
            Decimal::ZERO
        );
    }

    #[test]
    fn test_resolve_unknown_classification_is_configuration_error() {
        let err = reference_data()
            .resolve(date(2025, 6, 30), "citizen", "pensioner")
            .unwrap_err();

        assert!(matches!(err, EngineError::Configuration { .. }));
        assert_eq!(err.field(), Some("contribution_rates[citizen/pensioner]"));
    }

    #[test]
    fn test_resolve_before_any_minimum_wage_is_configuration_error() {
        let err = reference_data()
            .resolve(date(2024, 6, 30), "citizen", "standard")
            .unwrap_err();

        assert_eq!(err.field(), Some("minimum_wage"));
    }

    #[test]
    fn test_resolve_rejects_malformed_brackets() {
        let base = reference_data();
        let data = ReferenceData::new(
            vec![TaxBracketSetRecord {
                effective_from: date(2025, 1, 1),
                effective_to: None,
                brackets: vec![TaxBracket {
                    lower_limit: Decimal::ZERO,
                    upper_limit: Some(dec("30000")),
                    rate: dec("0.10"),
                    order: 1,
                }],
            }],
            base.contribution_rates().to_vec(),
            base.minimum_wages().to_vec(),
            base.allowances().to_vec(),
        );

        let err = data
            .resolve(date(2025, 6, 30), "citizen", "standard")
            .unwrap_err();
        assert_eq!(err.field(), Some("tax_brackets[order=1].upper_limit"));
    }

    #[test]
    fn test_resolved_brackets_are_sorted() {
        let data = ReferenceData::new(
            vec![TaxBracketSetRecord {
                effective_from: date(2025, 1, 1),
                effective_to: None,
                brackets: vec![
                    TaxBracket {
                        lower_limit: dec("30000"),
                        upper_limit: None,
                        rate: dec("0.20"),
                        order: 2,
                    },
                    TaxBracket {
                        lower_limit: Decimal::ZERO,
                        upper_limit: Some(dec("30000")),
                        rate: dec("0.10"),
                        order: 1,
                    },
                ],
            }],
            vec![contribution("citizen", "standard", date(2025, 1, 1), "0.04")],
            vec![wage(date(2025, 1, 1), None, "20000")],
            vec![allowances(date(2025, 1, 1))],
        );

        let resolved = data
            .resolve(date(2025, 6, 30), "citizen", "standard")
            .unwrap();
        let orders: Vec<u32> = resolved.tax_brackets.iter().map(|b| b.order).collect();
        assert_eq!(orders, vec![1, 2]);
    }
}

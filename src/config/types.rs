//! Effective-dated reference-data records.
//!
//! This module contains the strongly-typed records that are deserialized
//! from the reference-data YAML files, and [`ReferenceData`], the in-memory
//! collection the resolver selects from.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AllowanceParameters, ContributionRateSet, TaxBracket};

/// A bracket schedule in force over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracketSetRecord {
    /// First date the schedule applies (inclusive).
    pub effective_from: NaiveDate,
    /// Date the schedule stops applying (exclusive), if it has ended.
    #[serde(default)]
    pub effective_to: Option<NaiveDate>,
    /// The brackets in the schedule.
    pub brackets: Vec<TaxBracket>,
}

/// Contribution rates for one citizenship and contribution class over a
/// date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRateRecord {
    /// Citizenship class the rates apply to (e.g. "citizen").
    pub citizenship_class: String,
    /// Contribution class the rates apply to (e.g. "standard").
    pub contribution_class: String,
    /// First date the rates apply (inclusive).
    pub effective_from: NaiveDate,
    /// Date the rates stop applying (exclusive), if they have ended.
    #[serde(default)]
    pub effective_to: Option<NaiveDate>,
    /// The rates.
    pub rates: ContributionRateSet,
}

/// A minimum wage amount over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimumWageRecord {
    /// First date the amount applies (inclusive).
    pub effective_from: NaiveDate,
    /// Date the amount stops applying (exclusive), if it has ended.
    #[serde(default)]
    pub effective_to: Option<NaiveDate>,
    /// The minimum wage for one pay period.
    pub amount: Decimal,
}

/// Allowance multipliers over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceRecord {
    /// First date the multipliers apply (inclusive).
    pub effective_from: NaiveDate,
    /// Date the multipliers stop applying (exclusive), if they have ended.
    #[serde(default)]
    pub effective_to: Option<NaiveDate>,
    /// The named multipliers.
    pub multipliers: AllowanceParameters,
}

/// tax_brackets.yaml file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxBracketsFile {
    /// All bracket schedules.
    pub tax_bracket_sets: Vec<TaxBracketSetRecord>,
}

/// contribution_rates.yaml file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ContributionRatesFile {
    /// All contribution rate records.
    pub contribution_rates: Vec<ContributionRateRecord>,
}

/// minimum_wages.yaml file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct MinimumWagesFile {
    /// All minimum wage records.
    pub minimum_wages: Vec<MinimumWageRecord>,
}

/// allowances.yaml file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct AllowancesFile {
    /// All allowance records.
    pub allowance_parameters: Vec<AllowanceRecord>,
}

/// The complete effective-dated reference data.
///
/// Read-only once built; share it behind `Arc` or by reference.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    tax_bracket_sets: Vec<TaxBracketSetRecord>,
    contribution_rates: Vec<ContributionRateRecord>,
    minimum_wages: Vec<MinimumWageRecord>,
    allowances: Vec<AllowanceRecord>,
}

impl ReferenceData {
    /// Creates reference data from its component record lists.
    pub fn new(
        tax_bracket_sets: Vec<TaxBracketSetRecord>,
        contribution_rates: Vec<ContributionRateRecord>,
        minimum_wages: Vec<MinimumWageRecord>,
        allowances: Vec<AllowanceRecord>,
    ) -> Self {
        Self {
            tax_bracket_sets,
            contribution_rates,
            minimum_wages,
            allowances,
        }
    }

    /// Returns all bracket schedules.
    pub fn tax_bracket_sets(&self) -> &[TaxBracketSetRecord] {
        &self.tax_bracket_sets
    }

    /// Returns all contribution rate records.
    pub fn contribution_rates(&self) -> &[ContributionRateRecord] {
        &self.contribution_rates
    }

    /// Returns all minimum wage records.
    pub fn minimum_wages(&self) -> &[MinimumWageRecord] {
        &self.minimum_wages
    }

    /// Returns all allowance records.
    pub fn allowances(&self) -> &[AllowanceRecord] {
        &self.allowances
    }
}

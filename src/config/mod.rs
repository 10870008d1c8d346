//! Reference-data resolution for the Payroll Calculation Engine.
//!
//! This module provides the [`RateResolver`] contract the calculator's
//! caller uses to obtain tax brackets, contribution rates, the minimum wage
//! and allowance multipliers for a date and employee classification, plus an
//! implementation backed by effective-dated records loaded from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use payroll_engine::config::{ConfigLoader, RateResolver};
//!
//! let loader = ConfigLoader::load("./config/reference").unwrap();
//! let date = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
//! let rates = loader.resolve(date, "citizen", "standard").unwrap();
//! println!("{} tax brackets", rates.tax_brackets.len());
//! ```

mod loader;
mod resolver;
mod types;

pub use loader::{
    ALLOWANCES_FILE, CONTRIBUTION_RATES_FILE, ConfigLoader, MINIMUM_WAGES_FILE, TAX_BRACKETS_FILE,
};
pub use resolver::{EffectiveDated, RateResolver, select_effective};
pub use types::{
    AllowanceRecord, AllowancesFile, ContributionRateRecord, ContributionRatesFile,
    MinimumWageRecord, MinimumWagesFile, ReferenceData, TaxBracketSetRecord, TaxBracketsFile,
};

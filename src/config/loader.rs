//! Reference-data loading.
//!
//! This module provides the [`ConfigLoader`] type for loading effective-dated
//! tax, contribution, minimum wage and allowance records from YAML files.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::ResolvedRates;

use super::resolver::RateResolver;
use super::types::{
    AllowancesFile, ContributionRatesFile, MinimumWagesFile, ReferenceData, TaxBracketsFile,
};

/// File holding the bracket schedules.
pub const TAX_BRACKETS_FILE: &str = "tax_brackets.yaml";

/// File holding the contribution rates.
pub const CONTRIBUTION_RATES_FILE: &str = "contribution_rates.yaml";

/// File holding the minimum wages.
pub const MINIMUM_WAGES_FILE: &str = "minimum_wages.yaml";

/// File holding the allowance multipliers.
pub const ALLOWANCES_FILE: &str = "allowances.yaml";

/// Loads and provides access to payroll reference data.
///
/// # Directory Structure
///
/// ```text
/// config/reference/
/// ├── tax_brackets.yaml        # Bracket schedules by effective date
/// ├── contribution_rates.yaml  # Rates by citizenship/contribution class and date
/// ├── minimum_wages.yaml       # Minimum wage by effective date
/// └── allowances.yaml          # Allowance multipliers by effective date
/// ```
///
/// # Example
///
/// ```no_run
/// use chrono::NaiveDate;
/// use payroll_engine::config::{ConfigLoader, RateResolver};
///
/// let loader = ConfigLoader::load("./config/reference")?;
/// let date = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
/// let rates = loader.resolve(date, "citizen", "standard")?;
/// println!("Minimum wage: {}", rates.minimum_wage.amount);
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    data: ReferenceData,
}

impl ConfigLoader {
    /// Loads reference data from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or is missing a field (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let brackets = Self::load_yaml::<TaxBracketsFile>(&path.join(TAX_BRACKETS_FILE))?;
        let contributions =
            Self::load_yaml::<ContributionRatesFile>(&path.join(CONTRIBUTION_RATES_FILE))?;
        let wages = Self::load_yaml::<MinimumWagesFile>(&path.join(MINIMUM_WAGES_FILE))?;
        let allowances = Self::load_yaml::<AllowancesFile>(&path.join(ALLOWANCES_FILE))?;

        let data = ReferenceData::new(
            brackets.tax_bracket_sets,
            contributions.contribution_rates,
            wages.minimum_wages,
            allowances.allowance_parameters,
        );

        info!(
            path = %path.display(),
            tax_bracket_sets = data.tax_bracket_sets().len(),
            contribution_rates = data.contribution_rates().len(),
            minimum_wages = data.minimum_wages().len(),
            allowances = data.allowances().len(),
            "Loaded payroll reference data"
        );

        Ok(Self { data })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        debug!(path = %path_str, bytes = content.len(), "Parsing reference data file");

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded reference data.
    pub fn reference_data(&self) -> &ReferenceData {
        &self.data
    }

    /// Consumes the loader, returning the reference data.
    pub fn into_reference_data(self) -> ReferenceData {
        self.data
    }
}

impl RateResolver for ConfigLoader {
    fn resolve(
        &self,
        as_of: NaiveDate,
        citizenship_class: &str,
        contribution_class: &str,
    ) -> EngineResult<ResolvedRates> {
        self.data
            .resolve(as_of, citizenship_class, contribution_class)
    }
}

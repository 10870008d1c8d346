//! Error types for the Payroll Calculation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while resolving reference data
//! or calculating payroll.

use thiserror::Error;

const OUT_OF_RANGE: &str = "amount out of range";

/// The main error type for the Payroll Calculation Engine.
///
/// The calculator only ever returns [`EngineError::InvalidInput`] (a bad call)
/// or [`EngineError::Configuration`] (bad reference data). The remaining
/// variants come from loading reference data off disk.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::InvalidInput {
///     field: "bonus".to_string(),
///     message: "must not be negative (got -1)".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid input field 'bonus': must not be negative (got -1)"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A caller-supplied value was out of range or inconsistent.
    #[error("Invalid input field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Resolved reference data (brackets, rates, minimum wage, allowances)
    /// was missing, ambiguous or malformed.
    #[error("Invalid configuration '{field}': {message}")]
    Configuration {
        /// The reference-data field or category at fault.
        field: String,
        /// A description of the problem.
        message: String,
    },
}

impl EngineError {
    pub(crate) fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    pub(crate) fn configuration(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration {
            field: field.into(),
            message: message.into(),
        }
    }

    /// An amount derived from caller input no longer fits in a `Decimal`.
    pub(crate) fn input_out_of_range(field: impl Into<String>) -> Self {
        Self::invalid_input(field, OUT_OF_RANGE)
    }

    /// An amount derived from reference data no longer fits in a `Decimal`.
    pub(crate) fn configuration_out_of_range(field: impl Into<String>) -> Self {
        Self::configuration(field, OUT_OF_RANGE)
    }

    /// Returns the offending field for input and configuration errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidInput { field, .. } | Self::Configuration { field, .. } => Some(field),
            Self::ConfigNotFound { .. } | Self::ConfigParseError { .. } => None,
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

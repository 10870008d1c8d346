//! Payroll Calculation Engine
//!
//! This crate turns an employee's pay components for one period into an
//! itemized payroll: gross salary, capped social contributions, progressive
//! income tax after household allowances, and net pay, with an audit trace of
//! every step.
//!
//! The calculator in [`calculation`] is a pure function over a
//! [`models::PayrollCalculationInput`]. Effective-dated reference data (tax
//! brackets, contribution rates, minimum wage and allowance multipliers) is
//! resolved beforehand through [`config::RateResolver`].
//!
//! # Example
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use payroll_engine::calculation::calculate;
//! use payroll_engine::config::{ConfigLoader, RateResolver};
//! use payroll_engine::models::{EmployeeTaxProfile, PayComponents, PayrollCalculationInput};
//! use rust_decimal::Decimal;
//!
//! let loader = ConfigLoader::load("./config/reference")?;
//! let date = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
//! let rates = loader.resolve(date, "citizen", "standard")?;
//!
//! let input = PayrollCalculationInput::new(
//!     PayComponents::base(Decimal::from(40_000)),
//!     EmployeeTaxProfile::single(),
//!     &rates,
//! );
//! let result = calculate(&input)?;
//! println!("Net payable: {}", result.net_payable);
//! # Ok::<(), payroll_engine::error::EngineError>(())
//! ```

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;

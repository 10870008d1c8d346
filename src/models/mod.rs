//! Core data models for the Payroll Calculation Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod payroll_input;
mod payroll_result;
mod reference;

pub use employee::{EmployeeTaxProfile, MaritalStatus};
pub use payroll_input::{PayComponents, PayrollCalculationInput};
pub use payroll_result::{AuditStep, AuditTrace, EmployerContributions, PayrollResult};
pub use reference::{
    AllowanceParameters, CHILD_ALLOWANCE, ContributionRateSet, MinimumWageReference,
    PERSONAL_ALLOWANCE, ResolvedRates, SPOUSE_ALLOWANCE, TaxBracket,
};

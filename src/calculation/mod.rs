//! Calculation logic for the Payroll Calculation Engine.
//!
//! [`calculate`] is the only entry point. The steps it runs (gross salary,
//! the capped contribution basis, contributions, the tax base, the household
//! allowance, taxable income, progressive income tax and net pay) stay
//! private to the crate; each one is recorded in the result's audit trace.
//! The validators and currency rounding are public so reference data can be
//! checked before it is used.

mod allowance;
mod contributions;
mod gross;
mod net_pay;
mod payroll;
mod progressive_tax;
mod rounding;
mod taxable_income;
mod validation;

pub use contributions::CONTRIBUTION_CEILING_MULTIPLIER;
pub use payroll::calculate;
pub use rounding::{CURRENCY_DECIMAL_PLACES, round_currency};
pub use validation::{
    validate_allowance_parameters, validate_contribution_rates, validate_input,
    validate_minimum_wage, validate_pay_components, validate_profile, validate_tax_brackets,
};

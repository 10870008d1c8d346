//! Employee tax profile and related types.
//!
//! This module defines the subset of employee attributes that affect payroll:
//! household composition (for allowances) and the non-taxable transport amount.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents an employee's marital status for allowance purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaritalStatus {
    /// Not married.
    Single,
    /// Married; the spouse allowance may apply.
    Married,
}

/// The household and allowance attributes of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeTaxProfile {
    /// The employee's marital status.
    pub marital_status: MaritalStatus,
    /// Whether the employee's spouse is in paid work.
    #[serde(default)]
    pub is_spouse_working: bool,
    /// Number of dependent children counted for the child allowance.
    #[serde(default)]
    pub dependent_child_count: u32,
    /// Transport allowance paid on top of net pay. Never taxed or contributed.
    #[serde(default)]
    pub transport_allowance_amount: Decimal,
}

impl EmployeeTaxProfile {
    /// Creates a profile for a single employee with no children or transport.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{EmployeeTaxProfile, MaritalStatus};
    ///
    /// let profile = EmployeeTaxProfile::single();
    /// assert_eq!(profile.marital_status, MaritalStatus::Single);
    /// assert!(!profile.qualifies_for_spouse_allowance());
    /// ```
    pub fn single() -> Self {
        Self {
            marital_status: MaritalStatus::Single,
            is_spouse_working: false,
            dependent_child_count: 0,
            transport_allowance_amount: Decimal::ZERO,
        }
    }

    /// Returns true if the employee is married.
    pub fn is_married(&self) -> bool {
        self.marital_status == MaritalStatus::Married
    }

    /// Returns true if the spouse multiplier counts towards the allowance:
    /// the employee is married and the spouse is not working.
    pub fn qualifies_for_spouse_allowance(&self) -> bool {
        self.is_married() && !self.is_spouse_working
    }
}

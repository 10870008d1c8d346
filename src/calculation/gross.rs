//! Taxable gross calculation.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, PayComponents};

/// The result of summing the taxable pay components.
#[derive(Debug, Clone)]
pub(crate) struct GrossResult {
    /// base + bonus + overtime + commission.
    pub total_gross: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Sums the taxable, contributable pay components.
///
/// The transport allowance is not part of the gross: it is never taxed or
/// contributed and is only added back at the net-pay step. The advance
/// deduction is likewise excluded.
///
/// # Errors
///
/// Returns an input error naming the component whose addition overflows.
pub(crate) fn calculate_gross(pay: &PayComponents, step_number: u32) -> EngineResult<GrossResult> {
    let earnings = [
        ("base_salary", pay.base_salary),
        ("bonus", pay.bonus),
        ("overtime_pay", pay.overtime_pay),
        ("commission_pay", pay.commission_pay),
    ];
    let total_gross = earnings
        .iter()
        .try_fold(Decimal::ZERO, |acc, (field, amount)| {
            acc.checked_add(*amount)
                .ok_or_else(|| EngineError::input_out_of_range(*field))
        })?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "gross_salary".to_string(),
        rule_name: "Gross Salary".to_string(),
        input: serde_json::json!({
            "base_salary": pay.base_salary.normalize().to_string(),
            "bonus": pay.bonus.normalize().to_string(),
            "overtime_pay": pay.overtime_pay.normalize().to_string(),
            "commission_pay": pay.commission_pay.normalize().to_string()
        }),
        output: serde_json::json!({
            "total_gross": total_gross.normalize().to_string()
        }),
        reasoning: format!(
            "${} + ${} + ${} + ${} = ${}",
            pay.base_salary.normalize(),
            pay.bonus.normalize(),
            pay.overtime_pay.normalize(),
            pay.commission_pay.normalize(),
            total_gross.normalize()
        ),
    };

    Ok(GrossResult {
        total_gross,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_sums_all_taxable_components() {
        let pay = PayComponents {
            base_salary: dec("30000"),
            bonus: dec("5000"),
            overtime_pay: dec("2500.50"),
            commission_pay: dec("1499.50"),
            advance_deduction: Decimal::ZERO,
        };

        let result = calculate_gross(&pay, 1).unwrap();
        assert_eq!(result.total_gross, dec("39000"));
    }

    #[test]
    fn test_advance_deduction_is_not_part_of_gross() {
        let pay = PayComponents {
            advance_deduction: dec("10000"),
            ..PayComponents::base(dec("50000"))
        };

        let result = calculate_gross(&pay, 1).unwrap();
        assert_eq!(result.total_gross, dec("50000"));
    }

    #[test]
    fn test_audit_step_records_inputs_and_total() {
        let result = calculate_gross(&PayComponents::base(dec("50000.00")), 1).unwrap();

        assert_eq!(result.audit_step.rule_id, "gross_salary");
        assert_eq!(
            result.audit_step.input["base_salary"].as_str().unwrap(),
            "50000"
        );
        assert_eq!(
            result.audit_step.output["total_gross"].as_str().unwrap(),
            "50000"
        );
        assert!(result.audit_step.reasoning.contains("$50000"));
    }

    #[test]
    fn test_audit_step_has_correct_step_number() {
        let result = calculate_gross(&PayComponents::default(), 4).unwrap();
        assert_eq!(result.audit_step.step_number, 4);
    }

    #[test]
    fn test_overflowing_sum_names_component() {
        let pay = PayComponents {
            bonus: Decimal::MAX,
            ..PayComponents::base(Decimal::MAX)
        };

        match calculate_gross(&pay, 1) {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "bonus");
                assert_eq!(message, "amount out of range");
            }
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_maximum_single_component_is_accepted() {
        let result = calculate_gross(&PayComponents::base(Decimal::MAX), 1).unwrap();
        assert_eq!(result.total_gross, Decimal::MAX);
    }
}

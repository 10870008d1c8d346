//! Progressive income tax.
//!
//! Tax is the sum, over brackets in ascending order, of the income slice
//! falling inside each bracket times that bracket's rate.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, TaxBracket};

/// The income taxed inside one bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BracketSlice {
    /// The bracket's order.
    pub order: u32,
    /// The bracket's rate.
    pub rate: Decimal,
    /// The income falling inside the bracket.
    pub taxed_amount: Decimal,
    /// `taxed_amount × rate`.
    pub tax: Decimal,
}

/// The result of applying the bracket schedule.
#[derive(Debug, Clone)]
pub(crate) struct ProgressiveTaxResult {
    /// Total unrounded income tax.
    pub income_tax: Decimal,
    /// One slice per bracket, in bracket order. Zero slices included.
    pub slices: Vec<BracketSlice>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Applies a bracket schedule to the taxable income.
///
/// `brackets` must already be validated and sorted, as returned by
/// [`validate_tax_brackets`](super::validate_tax_brackets). Brackets the
/// income does not reach produce a zero slice.
///
/// # Errors
///
/// Returns an input error if a slice's tax, or their sum, leaves the
/// `Decimal` range.
pub(crate) fn calculate_progressive_tax(
    taxable_income: Decimal,
    brackets: &[&TaxBracket],
    step_number: u32,
) -> EngineResult<ProgressiveTaxResult> {
    let out_of_range = || EngineError::input_out_of_range("taxable_income");

    let slices = brackets
        .iter()
        .map(|bracket| -> EngineResult<BracketSlice> {
            let taxed_amount = bracket.taxed_slice(taxable_income);
            let tax = taxed_amount
                .checked_mul(bracket.rate)
                .ok_or_else(out_of_range)?;
            Ok(BracketSlice {
                order: bracket.order,
                rate: bracket.rate,
                taxed_amount,
                tax,
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    let income_tax = slices
        .iter()
        .try_fold(Decimal::ZERO, |acc, s| acc.checked_add(s.tax))
        .ok_or_else(out_of_range)?;

    let breakdown: Vec<String> = slices
        .iter()
        .filter(|s| !s.taxed_amount.is_zero())
        .map(|s| {
            format!(
                "${} × {} = ${}",
                s.taxed_amount.normalize(),
                s.rate.normalize(),
                s.tax.normalize()
            )
        })
        .collect();

    let reasoning = if breakdown.is_empty() {
        "No taxable income; income tax is $0".to_string()
    } else {
        format!(
            "{}; total ${}",
            breakdown.join(" + "),
            income_tax.normalize()
        )
    };

    let slice_json: Vec<serde_json::Value> = slices
        .iter()
        .map(|s| {
            serde_json::json!({
                "order": s.order,
                "rate": s.rate.normalize().to_string(),
                "taxed_amount": s.taxed_amount.normalize().to_string(),
                "tax": s.tax.normalize().to_string()
            })
        })
        .collect();

    let audit_step = AuditStep {
        step_number,
        rule_id: "income_tax".to_string(),
        rule_name: "Progressive Income Tax".to_string(),
        input: serde_json::json!({
            "taxable_income": taxable_income.normalize().to_string(),
            "bracket_count": brackets.len()
        }),
        output: serde_json::json!({
            "slices": slice_json,
            "income_tax": income_tax.normalize().to_string()
        }),
        reasoning,
    };

    Ok(ProgressiveTaxResult {
        income_tax,
        slices,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::validate_tax_brackets;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn bracket(lower: &str, upper: Option<&str>, rate: &str, order: u32) -> TaxBracket {
        TaxBracket {
            lower_limit: dec(lower),
            upper_limit: upper.map(dec),
            rate: dec(rate),
            order,
        }
    }

    fn three_brackets() -> Vec<TaxBracket> {
        vec![
            bracket("0", Some("30000"), "0.10", 1),
            bracket("30000", Some("60000"), "0.20", 2),
            bracket("60000", None, "0.30", 3),
        ]
    }

    fn tax(income: &str, brackets: &[TaxBracket]) -> ProgressiveTaxResult {
        let sorted = validate_tax_brackets(brackets).unwrap();
        calculate_progressive_tax(dec(income), &sorted, 7).unwrap()
    }

    #[test]
    fn test_income_in_first_bracket() {
        let result = tax("2000", &three_brackets());

        assert_eq!(result.income_tax, dec("200"));
        assert_eq!(result.slices[1].taxed_amount, Decimal::ZERO);
        assert_eq!(result.slices[2].taxed_amount, Decimal::ZERO);
    }

    #[test]
    fn test_income_spanning_two_brackets() {
        let brackets = vec![
            bracket("0", Some("30000"), "0.10", 1),
            bracket("30000", None, "0.20", 2),
        ];

        let result = tax("43000", &brackets);
        assert_eq!(result.income_tax, dec("5600"));
    }

    #[test]
    fn test_income_spanning_all_brackets() {
        let result = tax("100000", &three_brackets());

        // 3000 + 6000 + 12000
        assert_eq!(result.income_tax, dec("21000"));
        assert_eq!(result.slices[2].taxed_amount, dec("40000"));
    }

    #[test]
    fn test_income_exactly_on_boundary() {
        let result = tax("30000", &three_brackets());

        assert_eq!(result.income_tax, dec("3000"));
        assert_eq!(result.slices[1].taxed_amount, Decimal::ZERO);
    }

    #[test]
    fn test_zero_income_gives_zero_tax() {
        let result = tax("0", &three_brackets());

        assert_eq!(result.income_tax, Decimal::ZERO);
        assert_eq!(result.slices.len(), 3);
        assert!(result.audit_step.reasoning.contains("No taxable income"));
    }

    #[test]
    fn test_flat_single_bracket() {
        let result = tax("286000", &[bracket("0", None, "0.10", 1)]);
        assert_eq!(result.income_tax, dec("28600"));
    }

    #[test]
    fn test_unsorted_input_is_applied_in_order() {
        let mut brackets = three_brackets();
        brackets.reverse();

        let result = tax("45000", &brackets);
        assert_eq!(result.slices[0].order, 1);
        assert_eq!(result.income_tax, dec("6000"));
    }

    #[test]
    fn test_slices_sum_to_taxable_income() {
        for income in ["0", "0.01", "29999.99", "30000", "59999.5", "60000", "1234567.89"] {
            let result = tax(income, &three_brackets());
            let taxed: Decimal = result.slices.iter().map(|s| s.taxed_amount).sum();
            assert_eq!(taxed, dec(income), "income {}", income);
        }
    }

    #[test]
    fn test_audit_step_lists_every_slice() {
        let result = tax("45000", &three_brackets());

        assert_eq!(result.audit_step.rule_id, "income_tax");
        let slices = result.audit_step.output["slices"].as_array().unwrap();
        assert_eq!(slices.len(), 3);
        assert_eq!(slices[1]["taxed_amount"].as_str().unwrap(), "15000");
        assert_eq!(
            result.audit_step.output["income_tax"].as_str().unwrap(),
            "6000"
        );
    }

    #[test]
    fn test_tax_past_decimal_range_is_input_error() {
        // Skips validation; only a rate above 1 can leave the range.
        let steep = bracket("0", None, "2", 1);

        let err = calculate_progressive_tax(Decimal::MAX, &[&steep], 7).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput { .. }));
        assert_eq!(err.field(), Some("taxable_income"));
    }
}

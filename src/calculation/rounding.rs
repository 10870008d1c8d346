//! Currency rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of minor-unit decimal places in the payroll currency.
pub const CURRENCY_DECIMAL_PLACES: u32 = 2;

/// Rounds a value to the currency's minor unit, half away from zero, and
/// fixes the scale at two places so results always carry cents.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_currency(Decimal::from_str("123.455").unwrap()).to_string(), "123.46");
/// assert_eq!(round_currency(Decimal::from_str("-123.455").unwrap()).to_string(), "-123.46");
/// assert_eq!(round_currency(Decimal::from(50_000)).to_string(), "50000.00");
/// ```
pub fn round_currency(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(CURRENCY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(CURRENCY_DECIMAL_PLACES);
    rounded
}

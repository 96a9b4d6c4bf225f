//! Price arithmetic.
//!
//! Catalog prices come out of spreadsheet cells as strings and are kept as
//! [`Decimal`] everywhere so line totals and grand totals are exact. The
//! payment gateway wants minor currency units (paise), converted at the
//! last moment.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::CoreError;

/// Flat delivery charge applied to every order, in rupees.
pub const DEFAULT_DELIVERY_CHARGE: u32 = 50;

/// Parse a price cell (e.g. `"100"`, `"99.50"`) into a [`Decimal`].
pub fn parse_price(cell: &str) -> Result<Decimal, CoreError> {
    cell.trim()
        .parse::<Decimal>()
        .map_err(|_| CoreError::Validation(format!("Invalid price value: {cell:?}")))
}

/// Convert a rupee amount into integer minor units (paise).
///
/// Fails on amounts that do not fit in an `i64` after scaling, which for
/// a checkout total means corrupt catalog data.
pub fn to_minor_units(amount: Decimal) -> Result<i64, CoreError> {
    (amount * Decimal::from(100))
        .round()
        .to_i64()
        .ok_or_else(|| CoreError::Validation(format!("Amount out of range: {amount}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn parses_integer_price() {
        assert_eq!(parse_price("100").unwrap(), Decimal::from(100));
    }

    #[test]
    fn parses_fractional_price_with_whitespace() {
        assert_eq!(parse_price(" 99.50 ").unwrap(), "99.50".parse().unwrap());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_price("ten rupees").is_err());
        assert!(parse_price("").is_err());
    }

    #[test]
    fn minor_units_scale_by_hundred() {
        assert_eq!(to_minor_units(Decimal::from(250)).unwrap(), 25_000);
        assert_eq!(to_minor_units("99.50".parse().unwrap()).unwrap(), 9_950);
    }

    #[test]
    fn minor_units_round_sub_paise() {
        assert_eq!(to_minor_units("10.005".parse().unwrap()).unwrap(), 1_001);
    }
}

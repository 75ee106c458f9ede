//! Utility functions for SQLite storage operations.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a TEXT-stored amount into a Decimal, with a fallback for
/// scientific notation by parsing as f64 first. Unparseable values are
/// logged and read as ZERO rather than failing the whole snapshot.
pub(crate) fn parse_decimal_tolerant(value_str: &str, field_name: &str) -> Decimal {
    match Decimal::from_str(value_str) {
        Ok(d) => d,
        Err(e_decimal) => match f64::from_str(value_str) {
            Ok(f_val) => match Decimal::from_f64(f_val) {
                Some(dec_val) => dec_val,
                None => {
                    log::error!(
                        "Failed to convert {} '{}' (parsed as f64: {}) to Decimal.",
                        field_name,
                        value_str,
                        f_val
                    );
                    Decimal::ZERO
                }
            },
            Err(e_f64) => {
                log::error!(
                    "Failed to parse {} '{}': as Decimal (err: {}), and as f64 (err: {}). Falling back to ZERO.",
                    field_name, value_str, e_decimal, e_f64
                );
                Decimal::ZERO
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_plain_decimal_text() {
        assert_eq!(parse_decimal_tolerant("140.00", "net_amount"), dec!(140.00));
        assert_eq!(parse_decimal_tolerant("-3.5", "net_amount"), dec!(-3.5));
    }

    #[test]
    fn parses_scientific_notation_via_f64() {
        assert_eq!(parse_decimal_tolerant("1.4e2", "net_amount"), dec!(140));
    }

    #[test]
    fn unparseable_text_reads_as_zero() {
        assert_eq!(parse_decimal_tolerant("n/a", "net_amount"), Decimal::ZERO);
    }
}

//! Utility functions for SQLite storage operations.

use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Maximum number of parameters for SQLite IN (...) queries.
///
/// SQLite has a compile-time limit on the number of parameters in a SQL statement,
/// typically around 999 (SQLITE_MAX_VARIABLE_NUMBER), so `IN (...)` lists are
/// split into chunks of this size.
pub const SQLITE_MAX_PARAMS_CHUNK: usize = 500;

/// Chunk a slice into smaller slices for batch SQLite queries.
pub fn chunk_for_sqlite<T>(items: &[T]) -> impl Iterator<Item = &[T]> {
    items.chunks(SQLITE_MAX_PARAMS_CHUNK)
}

/// Escapes `%`, `_` and `\` so `value` matches literally inside a
/// `LIKE ... ESCAPE '\'` pattern.
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Parses a stored decimal, with a fallback for scientific notation by
/// parsing as f64 first. Unparseable values are logged and read as zero.
pub fn parse_decimal_string_tolerant(value_str: &str, field_name: &str) -> Decimal {
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
    fn test_chunk_for_sqlite_over_limit() {
        let items: Vec<i64> = (0..1200).collect();
        let chunks: Vec<_> = chunk_for_sqlite(&items).collect();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), SQLITE_MAX_PARAMS_CHUNK);
        assert_eq!(chunks[2].len(), 200);
    }

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like("INFY"), "INFY");
        assert_eq!(escape_like("%%"), "\\%\\%");
        assert_eq!(escape_like("A_B\\C"), "A\\_B\\\\C");
    }

    #[test]
    fn test_parse_plain_and_scientific_decimals() {
        assert_eq!(parse_decimal_string_tolerant("1500.25", "total_value"), dec!(1500.25));
        assert_eq!(parse_decimal_string_tolerant("1.5e2", "quantity"), dec!(150));
        assert_eq!(parse_decimal_string_tolerant("garbage", "fee"), Decimal::ZERO);
    }
}

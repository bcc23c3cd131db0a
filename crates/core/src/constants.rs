use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Tolerance for the `total_value == available_quantity * average_price` check on a lot
pub const LOT_VALUE_TOLERANCE: Decimal = dec!(0.000001);

/// Minimum length of a trimmed security search term
pub const MIN_SEARCH_TERM_LEN: usize = 2;

/// Maximum number of rows returned by a security search
pub const SEARCH_RESULT_LIMIT: i64 = 50;

/// Upper bound accepted for any quantity, price, amount or fee in a trade request
pub const MAX_TRADE_AMOUNT: Decimal = dec!(1000000000000);

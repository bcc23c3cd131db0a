use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Latest market quote for one instrument.
///
/// Holds the raw current price and previous close; the derived change
/// figures are floored to two decimal places on read.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketQuote {
    /// Symbol as sent to the provider (including any exchange suffix)
    pub symbol: String,

    /// Current (last traded) price
    pub price: Decimal,

    /// Close of the previous trading session, zero when unknown
    pub previous_close: Decimal,

    /// Timestamp of the last price
    pub timestamp: DateTime<Utc>,

    /// Source of the quote (YAHOO, ...)
    pub source: String,
}

impl MarketQuote {
    pub fn new(
        symbol: impl Into<String>,
        price: Decimal,
        previous_close: Decimal,
        timestamp: DateTime<Utc>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            previous_close,
            timestamp,
            source: source.into(),
        }
    }

    pub fn market_price(&self) -> Decimal {
        self.price
    }

    /// Current price minus previous close, floored to 2 decimals.
    pub fn market_change(&self) -> Decimal {
        floor_2dp(self.price.saturating_sub(self.previous_close))
    }

    /// Percent change against the previous close, floored to 2 decimals.
    /// Zero when the previous close is zero.
    pub fn market_change_percent(&self) -> Decimal {
        if self.previous_close.is_zero() {
            return Decimal::ZERO;
        }
        let change = self.price.saturating_sub(self.previous_close);
        change
            .checked_div(self.previous_close)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .map(floor_2dp)
            .unwrap_or_default()
    }
}

fn floor_2dp(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::ToNegativeInfinity)
}

use futures::future::join_all;
use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use lotfolio_market_data::{MarketQuote, QuoteProvider};

use crate::securities::Security;

/// Market fields attached to summary and inventory rows. All zero when the
/// quote could not be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    pub market_price: Decimal,
    pub market_change: Decimal,
    pub market_change_percent: Decimal,
}

impl From<&MarketQuote> for MarketSnapshot {
    fn from(quote: &MarketQuote) -> Self {
        Self {
            market_price: quote.market_price(),
            market_change: quote.market_change(),
            market_change_percent: quote.market_change_percent(),
        }
    }
}

/// Queries one security. Provider failures are logged and swallowed.
pub async fn fetch_snapshot(provider: &dyn QuoteProvider, security: &Security) -> MarketSnapshot {
    match provider
        .query(&security.symbol, security.exchange.as_str())
        .await
    {
        Ok(quote) => MarketSnapshot::from(&quote),
        Err(e) => {
            warn!(
                "Market data unavailable for {} ({}) from {}: {}",
                security.symbol,
                security.exchange.as_str(),
                provider.id(),
                e
            );
            MarketSnapshot::default()
        }
    }
}

/// Queries every security concurrently. The result at index `i` belongs to
/// `securities[i]`.
pub async fn fetch_snapshots(
    provider: &dyn QuoteProvider,
    securities: &[Security],
) -> Vec<MarketSnapshot> {
    debug!("Fetching {} market snapshots", securities.len());
    join_all(
        securities
            .iter()
            .map(|security| fetch_snapshot(provider, security)),
    )
    .await
}

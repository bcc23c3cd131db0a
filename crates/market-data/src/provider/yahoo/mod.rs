//! Yahoo Finance quote provider.
//!
//! Indian listings are addressed with Yahoo's exchange suffixes
//! (`INFY.NS` on NSE, `INFY.BO` on BSE). Mutual fund codes are passed
//! through unchanged.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, warn};
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::MarketQuote;
use crate::provider::QuoteProvider;

const PROVIDER_ID: &str = "YAHOO";

/// Maps an exchange hint to the suffix Yahoo uses for that venue.
pub fn yahoo_suffix(exchange: &str) -> Option<&'static str> {
    match exchange.trim().to_uppercase().as_str() {
        "NSE" => Some(".NS"),
        "BSE" => Some(".BO"),
        _ => None,
    }
}

/// Builds the Yahoo ticker for a symbol/exchange pair.
///
/// Symbols that already carry a suffix are returned as-is.
pub fn yahoo_symbol(symbol: &str, exchange: &str) -> String {
    let symbol = symbol.trim().to_uppercase();
    match yahoo_suffix(exchange) {
        Some(suffix) if !symbol.ends_with(suffix) => format!("{}{}", symbol, suffix),
        _ => symbol,
    }
}

/// Yahoo Finance quote provider.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider.
    pub fn new() -> Result<Self, MarketDataError> {
        let connector =
            yahoo::YahooConnector::new().map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to initialize Yahoo connector: {}", e),
            })?;
        Ok(Self { connector })
    }

    fn to_decimal(value: f64, field: &str) -> Result<Decimal, MarketDataError> {
        Decimal::from_f64(value).ok_or_else(|| MarketDataError::ValidationFailed {
            message: format!("Invalid {} value: {}", field, value),
        })
    }

    /// Turns the trailing daily closes into a quote. The last close is the
    /// current price and the one before it the previous close.
    fn quote_from_history(
        ticker: &str,
        quotes: &[yahoo::Quote],
    ) -> Result<MarketQuote, MarketDataError> {
        let last = quotes
            .last()
            .ok_or_else(|| MarketDataError::NoData(ticker.to_string()))?;

        let price = Self::to_decimal(last.close, "close")?;
        let previous_close = match quotes.len() {
            n if n >= 2 => Self::to_decimal(quotes[n - 2].close, "previous close")?,
            _ => Decimal::ZERO,
        };

        let timestamp: DateTime<Utc> = Utc
            .timestamp_opt(last.timestamp as i64, 0)
            .single()
            .unwrap_or_else(Utc::now);

        Ok(MarketQuote::new(
            ticker,
            price,
            previous_close,
            timestamp,
            PROVIDER_ID,
        ))
    }
}

#[async_trait]
impl QuoteProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn query(&self, symbol: &str, exchange: &str) -> Result<MarketQuote, MarketDataError> {
        let ticker = yahoo_symbol(symbol, exchange);
        debug!("Fetching latest quote for {} from Yahoo", ticker);

        let response = self
            .connector
            .get_quote_range(&ticker, "1d", "5d")
            .await
            .map_err(|e| {
                if matches!(e, yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) {
                    MarketDataError::SymbolNotFound(ticker.clone())
                } else {
                    MarketDataError::ProviderError {
                        provider: PROVIDER_ID.to_string(),
                        message: e.to_string(),
                    }
                }
            })?;

        let quotes = response.quotes().map_err(|e| {
            warn!("No quotes returned for {}: {}", ticker, e);
            MarketDataError::SymbolNotFound(ticker.clone())
        })?;

        Self::quote_from_history(&ticker, &quotes)
    }
}

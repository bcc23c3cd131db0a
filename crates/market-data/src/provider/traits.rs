//! Quote provider trait definition.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::MarketQuote;

/// Trait for latest-quote sources.
///
/// `exchange` is a hint in the caller's vocabulary (e.g. "NSE", "BSE");
/// each provider maps it to its own symbol convention.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use lotfolio_market_data::{MarketDataError, MarketQuote, QuoteProvider};
///
/// struct FixedProvider;
///
/// #[async_trait]
/// impl QuoteProvider for FixedProvider {
///     fn id(&self) -> &'static str {
///         "FIXED"
///     }
///
///     async fn query(&self, symbol: &str, exchange: &str) -> Result<MarketQuote, MarketDataError> {
///         // ...
///     }
/// }
/// ```
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Unique identifier for this provider, used for logging.
    fn id(&self) -> &'static str;

    /// Fetch the latest quote for `symbol` listed on `exchange`.
    async fn query(&self, symbol: &str, exchange: &str) -> Result<MarketQuote, MarketDataError>;
}

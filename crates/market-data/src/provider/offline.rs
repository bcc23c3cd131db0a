use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::MarketQuote;
use crate::provider::QuoteProvider;

/// Provider used when market data is switched off. Every query fails with
/// [`MarketDataError::Disabled`], which read paths absorb.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineProvider;

#[async_trait]
impl QuoteProvider for OfflineProvider {
    fn id(&self) -> &'static str {
        "OFFLINE"
    }

    async fn query(&self, _symbol: &str, _exchange: &str) -> Result<MarketQuote, MarketDataError> {
        Err(MarketDataError::Disabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_offline_provider_always_fails() {
        let provider = OfflineProvider;
        let result = provider.query("INFY", "NSE").await;
        assert!(matches!(result, Err(MarketDataError::Disabled)));
    }
}

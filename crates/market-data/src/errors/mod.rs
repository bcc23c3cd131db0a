//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur while querying a quote provider.
///
/// Callers on read paths treat every variant as non-fatal: a failed quote
/// leaves the market fields of a view at zero.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The requested symbol was not found by the provider.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The provider returned fewer data points than a quote needs.
    #[error("No data for symbol: {0}")]
    NoData(String),

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider returned data that could not be converted.
    #[error("Validation failed: {message}")]
    ValidationFailed {
        /// Description of the validation failure
        message: String,
    },

    /// Market data lookups are switched off for this process.
    #[error("Market data is disabled")]
    Disabled,
}

//! Lotfolio Market Data Crate
//!
//! Provider-agnostic latest-quote fetching used to decorate portfolio
//! views with live prices.
//!
//! # Core Types
//!
//! - [`MarketQuote`] - Latest price plus previous close, with floored change figures
//! - [`QuoteProvider`] - The `query(symbol, exchange)` contract every source implements
//! - [`YahooProvider`] - Yahoo Finance implementation
//! - [`OfflineProvider`] - Always-failing provider for when lookups are disabled

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::MarketQuote;
pub use provider::offline::OfflineProvider;
pub use provider::yahoo::{yahoo_symbol, YahooProvider};
pub use provider::QuoteProvider;

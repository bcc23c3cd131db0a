//! Market data module - best-effort quote enrichment for read views.

mod enrichment;

pub use enrichment::{fetch_snapshot, fetch_snapshots, MarketSnapshot};
pub use lotfolio_market_data::{MarketDataError, MarketQuote, QuoteProvider};

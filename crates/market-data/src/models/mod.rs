//! Market data models
//!
//! - `quote` - Latest quote with previous close (MarketQuote)

mod quote;

pub use quote::MarketQuote;

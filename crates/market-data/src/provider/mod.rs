//! Quote provider abstractions and implementations.
//!
//! This module contains:
//! - The `QuoteProvider` trait that all providers implement
//! - The Yahoo Finance provider
//! - An offline provider used when market data is disabled

mod traits;

pub mod offline;
pub mod yahoo;

// Re-exports
pub use traits::QuoteProvider;

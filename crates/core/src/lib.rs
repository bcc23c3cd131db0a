//! Lotfolio Core - Domain entities, services, and traits.
//!
//! This crate contains the inventory-lot accounting engine and the catalog
//! it trades against. It is database-agnostic and defines traits that are
//! implemented by the `storage-sqlite` crate.

pub mod accounts;
pub mod constants;
pub mod errors;
pub mod inventory;
pub mod market_data;
pub mod portfolio;
pub mod securities;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

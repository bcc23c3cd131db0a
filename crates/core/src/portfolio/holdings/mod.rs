mod holdings_model;
mod holdings_service;


pub use holdings_model::{HoldingSummary, InventoryView};
pub use holdings_service::{HoldingsService, HoldingsServiceTrait};

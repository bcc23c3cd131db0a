//! Inventory module - lots, ledger trail, and the lot accounting engine.

mod inventory_model;
mod inventory_service;
mod inventory_traits;
pub mod lot_engine;
mod trade_requests;

#[cfg(test)]
pub(crate) mod memory_store;

#[cfg(test)]
mod inventory_service_tests;

pub use inventory_model::{
    InventoryLot, LedgerEntry, LedgerEntryType, LotState, NewInventoryLot, NewLedgerEntry,
    NewTransaction, TradeOutcome, Transaction,
};
pub use inventory_service::InventoryService;
pub use inventory_traits::{
    InventoryJob, InventoryRepositoryTrait, InventoryServiceTrait, InventoryStore,
};
pub use trade_requests::{
    BonusRequest, BuyRequest, DividendRequest, MergeRequest, SellRequest, SplitRequest,
};

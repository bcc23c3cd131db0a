//! SQLite storage for inventory lots, the per-lot ledger, and transactions.

mod model;
mod repository;
mod store;

pub use model::{
    LedgerEntryDB, LotDB, NewLedgerEntryDB, NewLotDB, NewTransactionDB, TransactionDB,
};
pub use repository::InventoryRepository;
pub use store::SqliteInventoryStore;

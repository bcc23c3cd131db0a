//! Persistence port and service contract for the lot accounting engine.

use async_trait::async_trait;

use super::inventory_model::{
    InventoryLot, LedgerEntry, LedgerEntryType, NewInventoryLot, NewLedgerEntry, NewTransaction,
    TradeOutcome, Transaction,
};
use super::trade_requests::{
    BonusRequest, BuyRequest, DividendRequest, MergeRequest, SellRequest, SplitRequest,
};
use crate::accounts::Account;
use crate::errors::Result;
use crate::securities::{Security, SecurityType};

/// Transaction-scoped view of the store handed to an engine job.
///
/// Every call made through one `InventoryStore` belongs to the same storage
/// transaction. Lookups return `Ok(None)` when the row is absent.
pub trait InventoryStore {
    fn get_account(&mut self, account_id: i64) -> Result<Option<Account>>;
    fn get_security(&mut self, security_id: i64) -> Result<Option<Security>>;
    fn get_lot(&mut self, lot_id: i64) -> Result<Option<InventoryLot>>;

    /// Active lots for (account, security), ordered by id.
    fn list_active_lots(&mut self, account_id: i64, security_id: i64)
        -> Result<Vec<InventoryLot>>;

    fn insert_lot(&mut self, new_lot: NewInventoryLot) -> Result<InventoryLot>;

    /// Persists `available_quantity`, `average_price`, `total_value` and `state`.
    fn update_lot_aggregates(&mut self, lot: &InventoryLot) -> Result<()>;

    fn insert_ledger_entry(&mut self, entry: NewLedgerEntry) -> Result<LedgerEntry>;
    fn insert_transaction(&mut self, transaction: NewTransaction) -> Result<Transaction>;
    fn link_ledger_entry(&mut self, ledger_id: i64, transaction_id: i64) -> Result<()>;
    fn link_ledger_entries(&mut self, ledger_ids: &[i64], transaction_id: i64) -> Result<()>;
}

/// A unit of engine work. It either commits every write it made or none.
pub type InventoryJob =
    Box<dyn FnOnce(&mut dyn InventoryStore) -> Result<TradeOutcome> + Send + 'static>;

/// Trait defining the contract for inventory repository operations.
#[async_trait]
pub trait InventoryRepositoryTrait: Send + Sync {
    /// Runs `job` atomically, serialized against every other job.
    async fn execute(&self, job: InventoryJob) -> Result<TradeOutcome>;

    fn get_lot(&self, lot_id: i64) -> Result<Option<InventoryLot>>;

    /// Lots for (account, security) in id order, closed ones included on request.
    fn list_lots(
        &self,
        account_id: i64,
        security_id: i64,
        include_closed: bool,
    ) -> Result<Vec<InventoryLot>>;

    /// Every active lot of an account, ordered by security then id.
    fn list_active_lots_by_account(&self, account_id: i64) -> Result<Vec<InventoryLot>>;

    fn list_ledger_entries(&self, inventory_id: i64) -> Result<Vec<LedgerEntry>>;

    /// Transactions for (account, security) in id order, optionally of one kind.
    fn list_transactions(
        &self,
        account_id: i64,
        security_id: i64,
        transaction_type: Option<LedgerEntryType>,
    ) -> Result<Vec<Transaction>>;
}

/// Trait defining the contract for the trading operations.
///
/// `category` is the security type an endpoint trades in; a security of any
/// other type is rejected with `InvalidSecurity`.
#[async_trait]
pub trait InventoryServiceTrait: Send + Sync {
    async fn buy(&self, category: SecurityType, request: BuyRequest) -> Result<TradeOutcome>;
    async fn sell(&self, category: SecurityType, request: SellRequest) -> Result<TradeOutcome>;
    async fn dividend(
        &self,
        category: SecurityType,
        request: DividendRequest,
    ) -> Result<TradeOutcome>;
    async fn split(&self, category: SecurityType, request: SplitRequest)
        -> Result<TradeOutcome>;
    async fn bonus(&self, category: SecurityType, request: BonusRequest)
        -> Result<TradeOutcome>;

    /// Stock-only.
    async fn merge(&self, request: MergeRequest) -> Result<TradeOutcome>;

    fn list_ledger(&self, inventory_id: i64) -> Result<Vec<LedgerEntry>>;
    fn list_transactions(&self, account_id: i64, security_id: i64) -> Result<Vec<Transaction>>;
    fn list_dividends(&self, account_id: i64, security_id: i64) -> Result<Vec<Transaction>>;
}

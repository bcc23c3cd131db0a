use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use lotfolio_core::inventory::{
    InventoryJob, InventoryLot, InventoryRepositoryTrait, LedgerEntry, LedgerEntryType,
    LotState, TradeOutcome, Transaction,
};
use lotfolio_core::Result;

use super::model::{LedgerEntryDB, LotDB, TransactionDB};
use super::store::SqliteInventoryStore;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{inventories, inventory_ledger, transactions};

/// Inventory repository. Engine jobs go through the writer so each one runs
/// in its own immediate transaction; reads use the pool.
pub struct InventoryRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl InventoryRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl InventoryRepositoryTrait for InventoryRepository {
    async fn execute(&self, job: InventoryJob) -> Result<TradeOutcome> {
        self.writer
            .exec(move |conn| {
                let mut store = SqliteInventoryStore::new(conn);
                job(&mut store)
            })
            .await
    }

    fn get_lot(&self, lot_id: i64) -> Result<Option<InventoryLot>> {
        let mut conn = get_connection(&self.pool)?;
        let row = inventories::table
            .find(lot_id)
            .select(LotDB::as_select())
            .first::<LotDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(InventoryLot::from))
    }

    fn list_lots(
        &self,
        account_id: i64,
        security_id: i64,
        include_closed: bool,
    ) -> Result<Vec<InventoryLot>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = inventories::table
            .filter(inventories::account_id.eq(account_id))
            .filter(inventories::security_id.eq(security_id))
            .into_boxed();
        if !include_closed {
            query = query.filter(inventories::state.eq(LotState::Active.as_str()));
        }

        let rows = query
            .order(inventories::id.asc())
            .select(LotDB::as_select())
            .load::<LotDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(InventoryLot::from).collect())
    }

    fn list_active_lots_by_account(&self, account_id: i64) -> Result<Vec<InventoryLot>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = inventories::table
            .filter(inventories::account_id.eq(account_id))
            .filter(inventories::state.eq(LotState::Active.as_str()))
            .order((inventories::security_id.asc(), inventories::id.asc()))
            .select(LotDB::as_select())
            .load::<LotDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(InventoryLot::from).collect())
    }

    fn list_ledger_entries(&self, inventory_id: i64) -> Result<Vec<LedgerEntry>> {
        let mut conn = get_connection(&self.pool)?;
        inventory_ledger::table
            .filter(inventory_ledger::inventory_id.eq(inventory_id))
            .order(inventory_ledger::id.asc())
            .select(LedgerEntryDB::as_select())
            .load::<LedgerEntryDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(LedgerEntry::try_from)
            .collect()
    }

    fn list_transactions(
        &self,
        account_id: i64,
        security_id: i64,
        transaction_type: Option<LedgerEntryType>,
    ) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = transactions::table
            .filter(transactions::account_id.eq(account_id))
            .filter(transactions::security_id.eq(security_id))
            .into_boxed();
        if let Some(kind) = transaction_type {
            query = query.filter(transactions::transaction_type.eq(kind.as_str()));
        }

        query
            .order(transactions::id.asc())
            .select(TransactionDB::as_select())
            .load::<TransactionDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(Transaction::try_from)
            .collect()
    }
}

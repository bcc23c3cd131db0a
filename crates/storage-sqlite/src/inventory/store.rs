//! `InventoryStore` over a connection that is already inside a transaction.

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use lotfolio_core::accounts::Account;
use lotfolio_core::inventory::{
    InventoryLot, InventoryStore, LedgerEntry, LotState, NewInventoryLot, NewLedgerEntry,
    NewTransaction, Transaction,
};
use lotfolio_core::securities::Security;
use lotfolio_core::Result;

use super::model::{
    LedgerEntryDB, LotDB, NewLedgerEntryDB, NewLotDB, NewTransactionDB, TransactionDB,
};
use crate::accounts::AccountDB;
use crate::errors::IntoCore;
use crate::schema::{accounts, inventories, inventory_ledger, securities, transactions};
use crate::securities::SecurityDB;
use crate::utils::chunk_for_sqlite;

/// Store handed to engine jobs by the writer. It never opens or commits a
/// transaction of its own.
pub struct SqliteInventoryStore<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> SqliteInventoryStore<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }
}

impl InventoryStore for SqliteInventoryStore<'_> {
    fn get_account(&mut self, account_id: i64) -> Result<Option<Account>> {
        let row = accounts::table
            .find(account_id)
            .select(AccountDB::as_select())
            .first::<AccountDB>(self.conn)
            .optional()
            .into_core()?;
        Ok(row.map(Account::from))
    }

    fn get_security(&mut self, security_id: i64) -> Result<Option<Security>> {
        let row = securities::table
            .find(security_id)
            .select(SecurityDB::as_select())
            .first::<SecurityDB>(self.conn)
            .optional()
            .into_core()?;
        Ok(row.map(Security::from))
    }

    fn get_lot(&mut self, lot_id: i64) -> Result<Option<InventoryLot>> {
        let row = inventories::table
            .find(lot_id)
            .select(LotDB::as_select())
            .first::<LotDB>(self.conn)
            .optional()
            .into_core()?;
        Ok(row.map(InventoryLot::from))
    }

    fn list_active_lots(
        &mut self,
        account_id: i64,
        security_id: i64,
    ) -> Result<Vec<InventoryLot>> {
        let rows = inventories::table
            .filter(inventories::account_id.eq(account_id))
            .filter(inventories::security_id.eq(security_id))
            .filter(inventories::state.eq(LotState::Active.as_str()))
            .order(inventories::id.asc())
            .select(LotDB::as_select())
            .load::<LotDB>(self.conn)
            .into_core()?;
        Ok(rows.into_iter().map(InventoryLot::from).collect())
    }

    fn insert_lot(&mut self, new_lot: NewInventoryLot) -> Result<InventoryLot> {
        let row = diesel::insert_into(inventories::table)
            .values(NewLotDB::from(new_lot))
            .returning(LotDB::as_returning())
            .get_result(self.conn)
            .into_core()?;
        Ok(row.into())
    }

    fn update_lot_aggregates(&mut self, lot: &InventoryLot) -> Result<()> {
        diesel::update(inventories::table.find(lot.id))
            .set((
                inventories::available_quantity.eq(lot.available_quantity.to_string()),
                inventories::average_price.eq(lot.average_price.to_string()),
                inventories::total_value.eq(lot.total_value.to_string()),
                inventories::state.eq(lot.state.as_str()),
                inventories::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .execute(self.conn)
            .into_core()?;
        Ok(())
    }

    fn insert_ledger_entry(&mut self, entry: NewLedgerEntry) -> Result<LedgerEntry> {
        let row = diesel::insert_into(inventory_ledger::table)
            .values(NewLedgerEntryDB::from(entry))
            .returning(LedgerEntryDB::as_returning())
            .get_result(self.conn)
            .into_core()?;
        row.try_into()
    }

    fn insert_transaction(&mut self, transaction: NewTransaction) -> Result<Transaction> {
        let row = diesel::insert_into(transactions::table)
            .values(NewTransactionDB::from(transaction))
            .returning(TransactionDB::as_returning())
            .get_result(self.conn)
            .into_core()?;
        row.try_into()
    }

    fn link_ledger_entry(&mut self, ledger_id: i64, transaction_id: i64) -> Result<()> {
        diesel::update(inventory_ledger::table.find(ledger_id))
            .set(inventory_ledger::transaction_id.eq(Some(transaction_id)))
            .execute(self.conn)
            .into_core()?;
        Ok(())
    }

    fn link_ledger_entries(&mut self, ledger_ids: &[i64], transaction_id: i64) -> Result<()> {
        for chunk in chunk_for_sqlite(ledger_ids) {
            diesel::update(inventory_ledger::table.filter(inventory_ledger::id.eq_any(chunk)))
                .set(inventory_ledger::transaction_id.eq(Some(transaction_id)))
                .execute(self.conn)
                .into_core()?;
        }
        Ok(())
    }
}

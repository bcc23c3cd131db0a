//! In-memory `InventoryStore` for engine and service tests.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use super::inventory_model::{
    InventoryLot, LedgerEntry, LotState, NewInventoryLot, NewLedgerEntry, NewTransaction,
    Transaction,
};
use super::inventory_traits::InventoryStore;
use crate::accounts::{Account, AccountStatus};
use crate::errors::{DatabaseError, Result};
use crate::securities::{Exchange, Security, SecurityType};

#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryInventoryStore {
    pub accounts: Vec<Account>,
    pub securities: Vec<Security>,
    pub lots: Vec<InventoryLot>,
    pub ledger: Vec<LedgerEntry>,
    pub transactions: Vec<Transaction>,
    /// Makes `insert_transaction` fail, after lot and ledger writes happened.
    pub fail_transaction_insert: bool,
}

impl MemoryInventoryStore {
    pub fn add_account(&mut self, status: AccountStatus) -> i64 {
        let id = self.accounts.len() as i64 + 1;
        self.accounts.push(Account {
            id,
            user_id: 1,
            name: format!("Account {}", id),
            status,
            ..Default::default()
        });
        id
    }

    pub fn add_security(&mut self, security_type: SecurityType, symbol: &str) -> i64 {
        let id = self.securities.len() as i64 + 1;
        self.securities.push(Security {
            id,
            security_type,
            exchange: if security_type == SecurityType::MutualFund {
                Exchange::Amfi
            } else {
                Exchange::Nse
            },
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            ..Default::default()
        });
        id
    }

    pub fn add_lot(
        &mut self,
        account_id: i64,
        security_id: i64,
        quantity: Decimal,
        average_price: Decimal,
        opened_date: NaiveDate,
    ) -> i64 {
        let id = self.lots.len() as i64 + 1;
        self.lots.push(InventoryLot {
            id,
            account_id,
            security_id,
            available_quantity: quantity,
            average_price,
            total_value: quantity * average_price,
            state: LotState::Active,
            opened_date,
            ..Default::default()
        });
        id
    }

    pub fn lot(&self, lot_id: i64) -> &InventoryLot {
        &self.lots[(lot_id - 1) as usize]
    }
}

impl InventoryStore for MemoryInventoryStore {
    fn get_account(&mut self, account_id: i64) -> Result<Option<Account>> {
        Ok(self.accounts.iter().find(|a| a.id == account_id).cloned())
    }

    fn get_security(&mut self, security_id: i64) -> Result<Option<Security>> {
        Ok(self.securities.iter().find(|s| s.id == security_id).cloned())
    }

    fn get_lot(&mut self, lot_id: i64) -> Result<Option<InventoryLot>> {
        Ok(self.lots.iter().find(|l| l.id == lot_id).cloned())
    }

    fn list_active_lots(
        &mut self,
        account_id: i64,
        security_id: i64,
    ) -> Result<Vec<InventoryLot>> {
        Ok(self
            .lots
            .iter()
            .filter(|l| l.belongs_to(account_id, security_id) && l.is_active())
            .cloned()
            .collect())
    }

    fn insert_lot(&mut self, new_lot: NewInventoryLot) -> Result<InventoryLot> {
        let lot = InventoryLot {
            id: self.lots.len() as i64 + 1,
            account_id: new_lot.account_id,
            security_id: new_lot.security_id,
            opened_date: new_lot.opened_date,
            ..Default::default()
        };
        self.lots.push(lot.clone());
        Ok(lot)
    }

    fn update_lot_aggregates(&mut self, lot: &InventoryLot) -> Result<()> {
        let stored = self
            .lots
            .iter_mut()
            .find(|l| l.id == lot.id)
            .ok_or_else(|| DatabaseError::NotFound(format!("lot {}", lot.id)))?;
        stored.available_quantity = lot.available_quantity;
        stored.average_price = lot.average_price;
        stored.total_value = lot.total_value;
        stored.state = lot.state;
        Ok(())
    }

    fn insert_ledger_entry(&mut self, entry: NewLedgerEntry) -> Result<LedgerEntry> {
        let entry = LedgerEntry {
            id: self.ledger.len() as i64 + 1,
            inventory_id: entry.inventory_id,
            transaction_id: None,
            entry_type: entry.entry_type,
            quantity: entry.quantity,
            average_price: entry.average_price,
            fee: entry.fee,
            total_value: entry.total_value,
            date: entry.date,
            created_at: NaiveDateTime::default(),
        };
        self.ledger.push(entry.clone());
        Ok(entry)
    }

    fn insert_transaction(&mut self, transaction: NewTransaction) -> Result<Transaction> {
        if self.fail_transaction_insert {
            return Err(DatabaseError::QueryFailed("disk I/O error".to_string()).into());
        }
        let transaction = Transaction {
            id: self.transactions.len() as i64 + 1,
            account_id: transaction.account_id,
            security_id: transaction.security_id,
            transaction_type: transaction.transaction_type,
            quantity: transaction.quantity,
            average_price: transaction.average_price,
            fee: transaction.fee,
            total_value: transaction.total_value,
            date: transaction.date,
            created_at: NaiveDateTime::default(),
        };
        self.transactions.push(transaction.clone());
        Ok(transaction)
    }

    fn link_ledger_entry(&mut self, ledger_id: i64, transaction_id: i64) -> Result<()> {
        self.link_ledger_entries(&[ledger_id], transaction_id)
    }

    fn link_ledger_entries(&mut self, ledger_ids: &[i64], transaction_id: i64) -> Result<()> {
        for entry in self.ledger.iter_mut() {
            if ledger_ids.contains(&entry.id) {
                entry.transaction_id = Some(transaction_id);
            }
        }
        Ok(())
    }
}

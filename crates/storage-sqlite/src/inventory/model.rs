//! Database models for inventory lots, their ledger, and transactions.
//!
//! Decimal columns are stored as text and parsed back tolerantly.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use lotfolio_core::inventory::{
    InventoryLot, LedgerEntry, LedgerEntryType, LotState, NewInventoryLot, NewLedgerEntry,
    NewTransaction, Transaction,
};
use lotfolio_core::{Error, Result};

use crate::utils::parse_decimal_string_tolerant;

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::inventories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LotDB {
    pub id: i64,
    pub account_id: i64,
    pub security_id: i64,
    pub available_quantity: String,
    pub average_price: String,
    pub total_value: String,
    pub state: String,
    pub opened_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A fresh lot. Aggregates start from the column defaults.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::inventories)]
pub struct NewLotDB {
    pub account_id: i64,
    pub security_id: i64,
    pub state: String,
    pub opened_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<LotDB> for InventoryLot {
    fn from(db: LotDB) -> Self {
        Self {
            id: db.id,
            account_id: db.account_id,
            security_id: db.security_id,
            available_quantity: parse_decimal_string_tolerant(
                &db.available_quantity,
                "available_quantity",
            ),
            average_price: parse_decimal_string_tolerant(&db.average_price, "average_price"),
            total_value: parse_decimal_string_tolerant(&db.total_value, "total_value"),
            state: LotState::from_db(&db.state),
            opened_date: db.opened_date,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewInventoryLot> for NewLotDB {
    fn from(domain: NewInventoryLot) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            account_id: domain.account_id,
            security_id: domain.security_id,
            state: LotState::Active.as_str().to_string(),
            opened_date: domain.opened_date,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::inventory_ledger)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LedgerEntryDB {
    pub id: i64,
    pub inventory_id: i64,
    pub transaction_id: Option<i64>,
    pub entry_type: String,
    pub quantity: String,
    pub average_price: String,
    pub fee: String,
    pub total_value: String,
    pub date: NaiveDate,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::inventory_ledger)]
pub struct NewLedgerEntryDB {
    pub inventory_id: i64,
    pub entry_type: String,
    pub quantity: String,
    pub average_price: String,
    pub fee: String,
    pub total_value: String,
    pub date: NaiveDate,
    pub created_at: NaiveDateTime,
}

impl TryFrom<LedgerEntryDB> for LedgerEntry {
    type Error = Error;

    fn try_from(db: LedgerEntryDB) -> Result<Self> {
        Ok(Self {
            id: db.id,
            inventory_id: db.inventory_id,
            transaction_id: db.transaction_id,
            entry_type: db.entry_type.parse::<LedgerEntryType>()?,
            quantity: parse_decimal_string_tolerant(&db.quantity, "quantity"),
            average_price: parse_decimal_string_tolerant(&db.average_price, "average_price"),
            fee: parse_decimal_string_tolerant(&db.fee, "fee"),
            total_value: parse_decimal_string_tolerant(&db.total_value, "total_value"),
            date: db.date,
            created_at: db.created_at,
        })
    }
}

impl From<NewLedgerEntry> for NewLedgerEntryDB {
    fn from(domain: NewLedgerEntry) -> Self {
        Self {
            inventory_id: domain.inventory_id,
            entry_type: domain.entry_type.as_str().to_string(),
            quantity: domain.quantity.to_string(),
            average_price: domain.average_price.to_string(),
            fee: domain.fee.to_string(),
            total_value: domain.total_value.to_string(),
            date: domain.date,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: i64,
    pub account_id: i64,
    pub security_id: i64,
    pub transaction_type: String,
    pub quantity: String,
    pub average_price: String,
    pub fee: String,
    pub total_value: String,
    pub date: NaiveDate,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
pub struct NewTransactionDB {
    pub account_id: i64,
    pub security_id: i64,
    pub transaction_type: String,
    pub quantity: String,
    pub average_price: String,
    pub fee: String,
    pub total_value: String,
    pub date: NaiveDate,
    pub created_at: NaiveDateTime,
}

impl TryFrom<TransactionDB> for Transaction {
    type Error = Error;

    fn try_from(db: TransactionDB) -> Result<Self> {
        Ok(Self {
            id: db.id,
            account_id: db.account_id,
            security_id: db.security_id,
            transaction_type: db.transaction_type.parse::<LedgerEntryType>()?,
            quantity: parse_decimal_string_tolerant(&db.quantity, "quantity"),
            average_price: parse_decimal_string_tolerant(&db.average_price, "average_price"),
            fee: parse_decimal_string_tolerant(&db.fee, "fee"),
            total_value: parse_decimal_string_tolerant(&db.total_value, "total_value"),
            date: db.date,
            created_at: db.created_at,
        })
    }
}

impl From<NewTransaction> for NewTransactionDB {
    fn from(domain: NewTransaction) -> Self {
        Self {
            account_id: domain.account_id,
            security_id: domain.security_id,
            transaction_type: domain.transaction_type.as_str().to_string(),
            quantity: domain.quantity.to_string(),
            average_price: domain.average_price.to_string(),
            fee: domain.fee.to_string(),
            total_value: domain.total_value.to_string(),
            date: domain.date,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

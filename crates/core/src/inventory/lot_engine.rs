//! Lot accounting engine.
//!
//! Each operation follows the same write order: mutate lots and insert their
//! ledger rows, insert the aggregating transaction, then back-fill the ledger
//! rows with the transaction id. Every function runs against one
//! `InventoryStore`, so the caller decides the transaction boundary.

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;

use super::inventory_model::{
    checked_product, checked_quotient, checked_sum, InventoryLot, LedgerEntry, LedgerEntryType,
    NewInventoryLot, NewLedgerEntry, NewTransaction, TradeOutcome, Transaction,
};
use super::inventory_traits::InventoryStore;
use super::trade_requests::{
    BonusRequest, BuyRequest, DividendRequest, MergeRequest, SellRequest, SplitRequest,
};
use crate::errors::{LedgerError, Result};
use crate::securities::{Security, SecurityType};

/// Checks the security exists and has the traded category, and that the
/// account exists and is active.
fn resolve_context(
    store: &mut dyn InventoryStore,
    category: SecurityType,
    account_id: i64,
    security_id: i64,
) -> Result<Security> {
    let security = require_security(store, category, security_id)?;

    let account = store
        .get_account(account_id)?
        .ok_or(LedgerError::AccountNotFound(account_id))?;
    if !account.is_active() {
        return Err(LedgerError::InactiveAccount(account_id).into());
    }

    Ok(security)
}

fn require_security(
    store: &mut dyn InventoryStore,
    category: SecurityType,
    security_id: i64,
) -> Result<Security> {
    let security = store
        .get_security(security_id)?
        .ok_or(LedgerError::SecurityNotFound(security_id))?;
    if security.security_type != category {
        return Err(LedgerError::InvalidSecurity {
            security_id,
            expected: category.as_str().to_string(),
        }
        .into());
    }
    Ok(security)
}

fn invalid_inventory(inventory_id: i64, account_id: i64, security_id: i64) -> LedgerError {
    LedgerError::InvalidInventory {
        inventory_id,
        account_id,
        security_id,
    }
}

/// Fetches `lot_id` and checks its ownership.
fn require_lot(
    store: &mut dyn InventoryStore,
    lot_id: i64,
    account_id: i64,
    security_id: i64,
) -> Result<InventoryLot> {
    match store.get_lot(lot_id)? {
        Some(lot) if lot.belongs_to(account_id, security_id) => Ok(lot),
        _ => Err(invalid_inventory(lot_id, account_id, security_id).into()),
    }
}

/// Reuses `lot_id` when given, otherwise opens an empty lot.
fn resolve_or_open_lot(
    store: &mut dyn InventoryStore,
    lot_id: Option<i64>,
    account_id: i64,
    security_id: i64,
    date: NaiveDate,
) -> Result<InventoryLot> {
    match lot_id {
        Some(id) => require_lot(store, id, account_id, security_id),
        None => {
            let lot = store.insert_lot(NewInventoryLot {
                account_id,
                security_id,
                opened_date: date,
            })?;
            debug!(
                "Opened lot {} for account {} security {}",
                lot.id, account_id, security_id
            );
            Ok(lot)
        }
    }
}

fn checked_total(values: impl IntoIterator<Item = Decimal>) -> Result<Decimal> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, value| checked_sum(acc, value))
}

fn sum_quantity(lots: &[InventoryLot]) -> Result<Decimal> {
    checked_total(lots.iter().map(|lot| lot.available_quantity))
}

/// Inserts the transaction and links every ledger row to it.
fn record_transaction(
    store: &mut dyn InventoryStore,
    new_transaction: NewTransaction,
    entries: &mut [LedgerEntry],
) -> Result<Transaction> {
    let transaction = store.insert_transaction(new_transaction)?;
    match entries.len() {
        0 => {}
        1 => store.link_ledger_entry(entries[0].id, transaction.id)?,
        _ => {
            let ids: Vec<i64> = entries.iter().map(|e| e.id).collect();
            store.link_ledger_entries(&ids, transaction.id)?;
        }
    }
    for entry in entries.iter_mut() {
        entry.transaction_id = Some(transaction.id);
    }
    Ok(transaction)
}

/// Buys into one lot. The ledger row, lot delta, and transaction all carry
/// `quantity * average_price` as total value.
pub fn buy(
    store: &mut dyn InventoryStore,
    category: SecurityType,
    request: &BuyRequest,
    date: NaiveDate,
) -> Result<TradeOutcome> {
    resolve_context(store, category, request.account_id, request.security_id)?;
    let mut lot = resolve_or_open_lot(
        store,
        request.inventory_id,
        request.account_id,
        request.security_id,
        date,
    )?;

    let total_value = checked_product(request.quantity, request.average_price)?;
    lot.add(request.quantity, total_value)?;
    let entry = store.insert_ledger_entry(NewLedgerEntry {
        inventory_id: lot.id,
        entry_type: LedgerEntryType::Buy,
        quantity: request.quantity,
        average_price: request.average_price,
        fee: request.fee,
        total_value,
        date,
    })?;

    store.update_lot_aggregates(&lot)?;

    let mut entries = vec![entry];
    let transaction = record_transaction(
        store,
        NewTransaction {
            account_id: request.account_id,
            security_id: request.security_id,
            transaction_type: LedgerEntryType::Buy,
            quantity: request.quantity,
            average_price: request.average_price,
            fee: request.fee,
            total_value,
            date,
        },
        &mut entries,
    )?;

    Ok(TradeOutcome {
        transactions: vec![transaction],
        ledger_entries: entries,
        lots: vec![lot],
    })
}

/// Sells from one explicit lot, or drains active lots in id order. Every
/// per-lot ledger row carries the full requested fee.
pub fn sell(
    store: &mut dyn InventoryStore,
    category: SecurityType,
    request: &SellRequest,
    date: NaiveDate,
) -> Result<TradeOutcome> {
    resolve_context(store, category, request.account_id, request.security_id)?;

    let mut lots = match request.inventory_id {
        Some(lot_id) => vec![require_lot(
            store,
            lot_id,
            request.account_id,
            request.security_id,
        )?],
        None => store.list_active_lots(request.account_id, request.security_id)?,
    };

    let available = sum_quantity(&lots)?;
    if available < request.quantity {
        return Err(LedgerError::InsufficientQuantity {
            requested: request.quantity,
            available,
        }
        .into());
    }

    let total_value = checked_product(request.quantity, request.average_price)?;
    let mut remaining = request.quantity;
    let mut entries = Vec::new();
    let mut touched = Vec::new();
    for lot in lots.iter_mut() {
        if remaining <= Decimal::ZERO {
            break;
        }
        if lot.available_quantity <= Decimal::ZERO {
            continue;
        }

        let drain = lot.available_quantity.min(remaining);
        let value = checked_product(drain, request.average_price)?;
        lot.reduce(drain)?;
        let entry = store.insert_ledger_entry(NewLedgerEntry {
            inventory_id: lot.id,
            entry_type: LedgerEntryType::Sell,
            quantity: drain,
            average_price: request.average_price,
            fee: request.fee,
            total_value: value,
            date,
        })?;
        store.update_lot_aggregates(lot)?;
        debug!(
            "Sold {} from lot {}, {} left",
            drain, lot.id, lot.available_quantity
        );

        remaining -= drain;
        entries.push(entry);
        touched.push(lot.clone());
    }

    let transaction = record_transaction(
        store,
        NewTransaction {
            account_id: request.account_id,
            security_id: request.security_id,
            transaction_type: LedgerEntryType::Sell,
            quantity: request.quantity,
            average_price: request.average_price,
            fee: request.fee,
            total_value,
            date,
        },
        &mut entries,
    )?;

    Ok(TradeOutcome {
        transactions: vec![transaction],
        ledger_entries: entries,
        lots: touched,
    })
}

/// Records a dividend over the quantity held in active lots opened on or
/// before `date`. Lots are not touched and no ledger rows are written.
pub fn dividend(
    store: &mut dyn InventoryStore,
    category: SecurityType,
    request: &DividendRequest,
    date: NaiveDate,
) -> Result<TradeOutcome> {
    resolve_context(store, category, request.account_id, request.security_id)?;

    let held = checked_total(
        store
            .list_active_lots(request.account_id, request.security_id)?
            .iter()
            .filter(|lot| lot.opened_date <= date)
            .map(|lot| lot.available_quantity),
    )?;
    if held <= Decimal::ZERO {
        return Err(LedgerError::NoHoldings {
            account_id: request.account_id,
            security_id: request.security_id,
        }
        .into());
    }

    let transaction = store.insert_transaction(NewTransaction {
        account_id: request.account_id,
        security_id: request.security_id,
        transaction_type: LedgerEntryType::Dividend,
        quantity: held,
        average_price: request.amount,
        fee: Decimal::ZERO,
        total_value: checked_product(held, request.amount)?,
        date,
    })?;

    Ok(TradeOutcome {
        transactions: vec![transaction],
        ..Default::default()
    })
}

/// Credits split shares to one lot at zero cost, so the lot's total value is
/// unchanged and its average price falls.
pub fn split(
    store: &mut dyn InventoryStore,
    category: SecurityType,
    request: &SplitRequest,
    date: NaiveDate,
) -> Result<TradeOutcome> {
    resolve_context(store, category, request.account_id, request.security_id)?;
    let mut lot = resolve_or_open_lot(
        store,
        request.inventory_id,
        request.account_id,
        request.security_id,
        date,
    )?;

    lot.add(request.quantity, Decimal::ZERO)?;
    let entry = store.insert_ledger_entry(NewLedgerEntry {
        inventory_id: lot.id,
        entry_type: LedgerEntryType::Split,
        quantity: request.quantity,
        average_price: Decimal::ZERO,
        fee: request.fee,
        total_value: Decimal::ZERO,
        date,
    })?;

    store.update_lot_aggregates(&lot)?;

    let mut entries = vec![entry];
    let transaction = record_transaction(
        store,
        NewTransaction {
            account_id: request.account_id,
            security_id: request.security_id,
            transaction_type: LedgerEntryType::Split,
            quantity: request.quantity,
            average_price: Decimal::ZERO,
            fee: request.fee,
            total_value: Decimal::ZERO,
            date,
        },
        &mut entries,
    )?;

    Ok(TradeOutcome {
        transactions: vec![transaction],
        ledger_entries: entries,
        lots: vec![lot],
    })
}

/// Allocates bonus shares across active lots in proportion to each lot's
/// available quantity. The last lot takes the remainder so the per-lot
/// shares sum exactly to the requested quantity.
pub fn bonus(
    store: &mut dyn InventoryStore,
    category: SecurityType,
    request: &BonusRequest,
    date: NaiveDate,
) -> Result<TradeOutcome> {
    resolve_context(store, category, request.account_id, request.security_id)?;

    let mut lots: Vec<InventoryLot> = store
        .list_active_lots(request.account_id, request.security_id)?
        .into_iter()
        .filter(|lot| lot.available_quantity > Decimal::ZERO)
        .collect();
    let held = sum_quantity(&lots)?;
    if held <= Decimal::ZERO {
        return Err(LedgerError::NoHoldings {
            account_id: request.account_id,
            security_id: request.security_id,
        }
        .into());
    }

    let last = lots.len() - 1;
    let mut allocated = Decimal::ZERO;
    let mut entries = Vec::with_capacity(lots.len());
    for (index, lot) in lots.iter_mut().enumerate() {
        let share = if index == last {
            request.quantity - allocated
        } else {
            checked_quotient(checked_product(request.quantity, lot.available_quantity)?, held)?
        };
        allocated += share;

        lot.add(share, Decimal::ZERO)?;
        let entry = store.insert_ledger_entry(NewLedgerEntry {
            inventory_id: lot.id,
            entry_type: LedgerEntryType::Bonus,
            quantity: share,
            average_price: Decimal::ZERO,
            fee: request.fee,
            total_value: Decimal::ZERO,
            date,
        })?;

        store.update_lot_aggregates(lot)?;
        entries.push(entry);
    }

    let transaction = record_transaction(
        store,
        NewTransaction {
            account_id: request.account_id,
            security_id: request.security_id,
            transaction_type: LedgerEntryType::Bonus,
            quantity: request.quantity,
            average_price: Decimal::ZERO,
            fee: request.fee,
            total_value: Decimal::ZERO,
            date,
        },
        &mut entries,
    )?;

    Ok(TradeOutcome {
        transactions: vec![transaction],
        ledger_entries: entries,
        lots,
    })
}

/// Drains every active lot of the parent security and credits
/// `target_quantity` shares of the new security at the parent's aggregate
/// cost basis.
///
/// Writes two transactions: `MERGER_TRANSFER` on the parent and `MERGER` on
/// the new security.
pub fn merge(
    store: &mut dyn InventoryStore,
    request: &MergeRequest,
    date: NaiveDate,
) -> Result<TradeOutcome> {
    resolve_context(
        store,
        SecurityType::Stock,
        request.account_id,
        request.parent_security_id,
    )?;
    require_security(store, SecurityType::Stock, request.new_security_id)?;

    let mut parent_lots: Vec<InventoryLot> = store
        .list_active_lots(request.account_id, request.parent_security_id)?
        .into_iter()
        .filter(|lot| lot.available_quantity > Decimal::ZERO)
        .collect();
    let total_quantity = sum_quantity(&parent_lots)?;
    if total_quantity <= Decimal::ZERO {
        return Err(LedgerError::NoHoldings {
            account_id: request.account_id,
            security_id: request.parent_security_id,
        }
        .into());
    }
    let total_amount = checked_total(parent_lots.iter().map(|lot| lot.total_value))?;

    // Parent side
    let mut transfer_entries = Vec::with_capacity(parent_lots.len());
    for lot in parent_lots.iter_mut() {
        let average_price = lot.average_price;
        let (quantity, value) = lot.drain();
        let entry = store.insert_ledger_entry(NewLedgerEntry {
            inventory_id: lot.id,
            entry_type: LedgerEntryType::MergerTransfer,
            quantity,
            average_price,
            fee: Decimal::ZERO,
            total_value: value,
            date,
        })?;
        store.update_lot_aggregates(lot)?;
        transfer_entries.push(entry);
    }

    let transfer = record_transaction(
        store,
        NewTransaction {
            account_id: request.account_id,
            security_id: request.parent_security_id,
            transaction_type: LedgerEntryType::MergerTransfer,
            quantity: total_quantity,
            average_price: checked_quotient(total_amount, total_quantity)?,
            fee: Decimal::ZERO,
            total_value: total_amount,
            date,
        },
        &mut transfer_entries,
    )?;

    // New side
    let mut new_lot = resolve_or_open_lot(
        store,
        request.new_inventory_id,
        request.account_id,
        request.new_security_id,
        date,
    )?;
    let merged_price = checked_quotient(total_amount, request.target_quantity)?;
    new_lot.add(request.target_quantity, total_amount)?;
    let merger_entry = store.insert_ledger_entry(NewLedgerEntry {
        inventory_id: new_lot.id,
        entry_type: LedgerEntryType::Merger,
        quantity: request.target_quantity,
        average_price: merged_price,
        fee: Decimal::ZERO,
        total_value: total_amount,
        date,
    })?;

    store.update_lot_aggregates(&new_lot)?;

    let mut merger_entries = vec![merger_entry];
    let merger = record_transaction(
        store,
        NewTransaction {
            account_id: request.account_id,
            security_id: request.new_security_id,
            transaction_type: LedgerEntryType::Merger,
            quantity: request.target_quantity,
            average_price: merged_price,
            fee: Decimal::ZERO,
            total_value: total_amount,
            date,
        },
        &mut merger_entries,
    )?;

    debug!(
        "Merged {} of security {} into {} of security {}",
        total_quantity, request.parent_security_id, request.target_quantity, request.new_security_id
    );

    transfer_entries.extend(merger_entries);
    parent_lots.push(new_lot);
    Ok(TradeOutcome {
        transactions: vec![transfer, merger],
        ledger_entries: transfer_entries,
        lots: parent_lots,
    })
}

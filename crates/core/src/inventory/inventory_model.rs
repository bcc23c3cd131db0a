//! Inventory lot, ledger, and transaction models.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::LOT_VALUE_TOLERANCE;
use crate::errors::{Error, Result, ValidationError};

/// Lot lifecycle. A lot whose available quantity reaches zero is closed but
/// kept as a historical record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LotState {
    #[default]
    Active,
    Closed,
}

impl LotState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LotState::Active => "ACTIVE",
            LotState::Closed => "CLOSED",
        }
    }

    pub fn from_db(value: &str) -> Self {
        if value.eq_ignore_ascii_case("CLOSED") {
            LotState::Closed
        } else {
            LotState::Active
        }
    }
}

/// Kind of a lot-affecting event. Shared by ledger entries and transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LedgerEntryType {
    Buy,
    Sell,
    Dividend,
    Split,
    Bonus,
    Merger,
    MergerTransfer,
}

impl LedgerEntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerEntryType::Buy => "BUY",
            LedgerEntryType::Sell => "SELL",
            LedgerEntryType::Dividend => "DIVIDEND",
            LedgerEntryType::Split => "SPLIT",
            LedgerEntryType::Bonus => "BONUS",
            LedgerEntryType::Merger => "MERGER",
            LedgerEntryType::MergerTransfer => "MERGER_TRANSFER",
        }
    }
}

impl FromStr for LedgerEntryType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "BUY" => Ok(LedgerEntryType::Buy),
            "SELL" => Ok(LedgerEntryType::Sell),
            "DIVIDEND" => Ok(LedgerEntryType::Dividend),
            "SPLIT" => Ok(LedgerEntryType::Split),
            "BONUS" => Ok(LedgerEntryType::Bonus),
            "MERGER" => Ok(LedgerEntryType::Merger),
            "MERGER_TRANSFER" => Ok(LedgerEntryType::MergerTransfer),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown ledger entry type: {}",
                other
            )))),
        }
    }
}

/// One cost-basis lot of a security held in an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct InventoryLot {
    pub id: i64,
    pub account_id: i64,
    pub security_id: i64,
    pub available_quantity: Decimal,
    pub average_price: Decimal,
    pub total_value: Decimal,
    pub state: LotState,
    pub opened_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl InventoryLot {
    pub fn is_active(&self) -> bool {
        self.state == LotState::Active
    }

    pub fn belongs_to(&self, account_id: i64, security_id: i64) -> bool {
        self.account_id == account_id && self.security_id == security_id
    }

    /// Adds quantity and cost basis, then recomputes the weighted average.
    /// Zero-cost additions (split, bonus) lower the average price.
    pub fn add(&mut self, quantity: Decimal, value: Decimal) -> Result<()> {
        self.available_quantity = checked_sum(self.available_quantity, quantity)?;
        self.total_value = checked_sum(self.total_value, value)?;
        self.recalculate()
    }

    /// Removes quantity at the lot's own average price. The per-unit cost
    /// basis is preserved; only the quantity and total value shrink.
    pub fn reduce(&mut self, quantity: Decimal) -> Result<()> {
        let remaining = self.available_quantity - quantity;
        if remaining > Decimal::ZERO {
            self.total_value = checked_product(remaining, self.average_price)?;
            self.available_quantity = remaining;
            self.state = LotState::Active;
        } else {
            self.zero_out();
        }
        Ok(())
    }

    /// Empties the lot and returns the drained `(quantity, total_value)`.
    pub fn drain(&mut self) -> (Decimal, Decimal) {
        let drained = (self.available_quantity, self.total_value);
        self.zero_out();
        drained
    }

    fn recalculate(&mut self) -> Result<()> {
        if self.available_quantity > Decimal::ZERO {
            self.average_price = checked_quotient(self.total_value, self.available_quantity)?;
            self.state = LotState::Active;
        } else {
            self.zero_out();
        }
        Ok(())
    }

    fn zero_out(&mut self) {
        self.available_quantity = Decimal::ZERO;
        self.total_value = Decimal::ZERO;
        self.average_price = Decimal::ZERO;
        self.state = LotState::Closed;
    }

    /// Whether `total_value == available_quantity * average_price` holds.
    pub fn is_consistent(&self) -> bool {
        self.available_quantity
            .checked_mul(self.average_price)
            .and_then(|expected| self.total_value.checked_sub(expected))
            .is_some_and(|diff| diff.abs() <= LOT_VALUE_TOLERANCE)
    }
}

fn out_of_range(operation: &str, lhs: Decimal, rhs: Decimal) -> Error {
    Error::invalid_input(format!("{} {} {} is out of range", lhs, operation, rhs))
}

/// `lhs * rhs`, or `InvalidRequest` when the result does not fit a `Decimal`.
pub(crate) fn checked_product(lhs: Decimal, rhs: Decimal) -> Result<Decimal> {
    lhs.checked_mul(rhs)
        .ok_or_else(|| out_of_range("*", lhs, rhs))
}

/// `lhs / rhs`, or `InvalidRequest` on overflow or a zero divisor.
pub(crate) fn checked_quotient(lhs: Decimal, rhs: Decimal) -> Result<Decimal> {
    lhs.checked_div(rhs)
        .ok_or_else(|| out_of_range("/", lhs, rhs))
}

/// `lhs + rhs`, or `InvalidRequest` on overflow.
pub(crate) fn checked_sum(lhs: Decimal, rhs: Decimal) -> Result<Decimal> {
    lhs.checked_add(rhs)
        .ok_or_else(|| out_of_range("+", lhs, rhs))
}

/// Input model for opening an empty lot.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInventoryLot {
    pub account_id: i64,
    pub security_id: i64,
    pub opened_date: NaiveDate,
}

/// Immutable record of one lot-affecting event. `transaction_id` is
/// back-filled once the aggregating transaction exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub id: i64,
    pub inventory_id: i64,
    pub transaction_id: Option<i64>,
    pub entry_type: LedgerEntryType,
    pub quantity: Decimal,
    pub average_price: Decimal,
    pub fee: Decimal,
    pub total_value: Decimal,
    pub date: NaiveDate,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewLedgerEntry {
    pub inventory_id: i64,
    pub entry_type: LedgerEntryType,
    pub quantity: Decimal,
    pub average_price: Decimal,
    pub fee: Decimal,
    pub total_value: Decimal,
    pub date: NaiveDate,
}

/// Account/security-level aggregate of a trading action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub account_id: i64,
    pub security_id: i64,
    pub transaction_type: LedgerEntryType,
    pub quantity: Decimal,
    pub average_price: Decimal,
    pub fee: Decimal,
    pub total_value: Decimal,
    pub date: NaiveDate,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub account_id: i64,
    pub security_id: i64,
    pub transaction_type: LedgerEntryType,
    pub quantity: Decimal,
    pub average_price: Decimal,
    pub fee: Decimal,
    pub total_value: Decimal,
    pub date: NaiveDate,
}

/// Everything a trading operation wrote, in write order. Lots are the
/// post-mutation snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TradeOutcome {
    pub transactions: Vec<Transaction>,
    pub ledger_entries: Vec<LedgerEntry>,
    pub lots: Vec<InventoryLot>,
}

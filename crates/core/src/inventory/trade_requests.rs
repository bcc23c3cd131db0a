//! Validated inputs for the trading operations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_TRADE_AMOUNT;
use crate::errors::{Error, Result, ValidationError};

fn require_id(value: i64, field: &str) -> Result<()> {
    if value <= 0 {
        return Err(Error::Validation(ValidationError::MissingField(
            field.to_string(),
        )));
    }
    Ok(())
}

fn require_within_limit(value: Decimal, field: &str) -> Result<()> {
    if value > MAX_TRADE_AMOUNT {
        return Err(Error::invalid_input(format!(
            "{} cannot exceed {}",
            field, MAX_TRADE_AMOUNT
        )));
    }
    Ok(())
}

fn require_positive(value: Decimal, field: &str) -> Result<()> {
    if value <= Decimal::ZERO {
        return Err(Error::invalid_input(format!("{} must be greater than 0", field)));
    }
    require_within_limit(value, field)
}

fn require_non_negative(value: Decimal, field: &str) -> Result<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(Error::invalid_input(format!("{} cannot be negative", field)));
    }
    require_within_limit(value, field)
}

fn require_lot_id(value: Option<i64>) -> Result<()> {
    match value {
        Some(id) => require_id(id, "inventoryId"),
        None => Ok(()),
    }
}

/// Buy into a new lot, or into `inventory_id` when given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyRequest {
    pub account_id: i64,
    pub security_id: i64,
    pub inventory_id: Option<i64>,
    pub quantity: Decimal,
    pub average_price: Decimal,
    #[serde(default)]
    pub fee: Decimal,
    pub date: Option<NaiveDate>,
}

impl BuyRequest {
    pub fn validate(&self) -> Result<()> {
        require_id(self.account_id, "accountId")?;
        require_id(self.security_id, "securityId")?;
        require_lot_id(self.inventory_id)?;
        require_positive(self.quantity, "quantity")?;
        require_positive(self.average_price, "averagePrice")?;
        require_non_negative(self.fee, "fee")
    }
}

/// Sell from `inventory_id`, or drain active lots in id order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellRequest {
    pub account_id: i64,
    pub security_id: i64,
    pub inventory_id: Option<i64>,
    pub quantity: Decimal,
    pub average_price: Decimal,
    #[serde(default)]
    pub fee: Decimal,
    pub date: Option<NaiveDate>,
}

impl SellRequest {
    pub fn validate(&self) -> Result<()> {
        require_id(self.account_id, "accountId")?;
        require_id(self.security_id, "securityId")?;
        require_lot_id(self.inventory_id)?;
        require_positive(self.quantity, "quantity")?;
        require_positive(self.average_price, "averagePrice")?;
        require_non_negative(self.fee, "fee")
    }
}

/// Per-unit dividend. The quantity is derived from holdings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividendRequest {
    pub account_id: i64,
    pub security_id: i64,
    pub amount: Decimal,
    pub date: Option<NaiveDate>,
}

impl DividendRequest {
    pub fn validate(&self) -> Result<()> {
        require_id(self.account_id, "accountId")?;
        require_id(self.security_id, "securityId")?;
        require_positive(self.amount, "amount")
    }
}

/// Additional shares from a split, credited to one lot at zero cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitRequest {
    pub account_id: i64,
    pub security_id: i64,
    pub inventory_id: Option<i64>,
    pub quantity: Decimal,
    #[serde(default)]
    pub fee: Decimal,
    pub date: Option<NaiveDate>,
}

impl SplitRequest {
    pub fn validate(&self) -> Result<()> {
        require_id(self.account_id, "accountId")?;
        require_id(self.security_id, "securityId")?;
        require_lot_id(self.inventory_id)?;
        require_positive(self.quantity, "quantity")?;
        require_non_negative(self.fee, "fee")
    }
}

/// Bonus shares, allocated pro-rata across active lots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BonusRequest {
    pub account_id: i64,
    pub security_id: i64,
    pub quantity: Decimal,
    #[serde(default)]
    pub fee: Decimal,
    pub date: Option<NaiveDate>,
}

impl BonusRequest {
    pub fn validate(&self) -> Result<()> {
        require_id(self.account_id, "accountId")?;
        require_id(self.security_id, "securityId")?;
        require_positive(self.quantity, "quantity")?;
        require_non_negative(self.fee, "fee")
    }
}

/// Converts all holdings of `parent_security_id` into `target_quantity`
/// shares of `new_security_id`, carrying the cost basis over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeRequest {
    pub account_id: i64,
    pub parent_security_id: i64,
    pub new_security_id: i64,
    pub new_inventory_id: Option<i64>,
    pub target_quantity: Decimal,
    pub date: Option<NaiveDate>,
}

impl MergeRequest {
    pub fn validate(&self) -> Result<()> {
        require_id(self.account_id, "accountId")?;
        require_id(self.parent_security_id, "parentSecurityId")?;
        require_id(self.new_security_id, "newSecurityId")?;
        require_lot_id(self.new_inventory_id)?;
        if self.parent_security_id == self.new_security_id {
            return Err(Error::invalid_input(
                "Parent and new security must differ",
            ));
        }
        require_positive(self.target_quantity, "targetQuantity")
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::inventory::InventoryLot;
use crate::market_data::MarketSnapshot;
use crate::securities::{Exchange, Security, SecurityType};

/// Aggregate of an account's active lots of one security.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HoldingSummary {
    pub security_id: i64,
    pub security_type: SecurityType,
    pub exchange: Exchange,
    pub symbol: String,
    pub name: String,
    pub quantity: Decimal,
    /// Weighted average over the aggregated lots, zero when nothing is held
    pub average_price: Decimal,
    pub total_value: Decimal,
    #[serde(flatten)]
    pub market: MarketSnapshot,
    pub market_value: Decimal,
}

impl HoldingSummary {
    pub fn from_lots(security: &Security, lots: &[InventoryLot]) -> Self {
        let quantity = lots
            .iter()
            .fold(Decimal::ZERO, |acc, lot| acc.saturating_add(lot.available_quantity));
        let total_value = lots
            .iter()
            .fold(Decimal::ZERO, |acc, lot| acc.saturating_add(lot.total_value));
        let average_price = if quantity > Decimal::ZERO {
            total_value.checked_div(quantity).unwrap_or_default()
        } else {
            Decimal::ZERO
        };

        Self {
            security_id: security.id,
            security_type: security.security_type,
            exchange: security.exchange,
            symbol: security.symbol.clone(),
            name: security.name.clone(),
            quantity,
            average_price,
            total_value,
            market: MarketSnapshot::default(),
            market_value: Decimal::ZERO,
        }
    }

    pub fn with_market(mut self, market: MarketSnapshot) -> Self {
        self.market_value = self.quantity.saturating_mul(market.market_price);
        self.market = market;
        self
    }
}

/// A lot decorated with the current market figures of its security.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryView {
    #[serde(flatten)]
    pub lot: InventoryLot,
    #[serde(flatten)]
    pub market: MarketSnapshot,
    pub market_value: Decimal,
}

impl InventoryView {
    pub fn new(lot: InventoryLot, market: MarketSnapshot) -> Self {
        Self {
            market_value: lot.available_quantity.saturating_mul(market.market_price),
            lot,
            market,
        }
    }
}

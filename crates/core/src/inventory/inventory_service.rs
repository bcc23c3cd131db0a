use chrono::{NaiveDate, Utc};
use log::debug;
use std::sync::Arc;

use super::inventory_model::{LedgerEntry, LedgerEntryType, TradeOutcome, Transaction};
use super::inventory_traits::{InventoryRepositoryTrait, InventoryServiceTrait};
use super::lot_engine;
use super::trade_requests::{
    BonusRequest, BuyRequest, DividendRequest, MergeRequest, SellRequest, SplitRequest,
};
use crate::errors::Result;
use crate::securities::SecurityType;

/// Service running trading operations as single repository jobs.
pub struct InventoryService {
    repository: Arc<dyn InventoryRepositoryTrait>,
}

impl InventoryService {
    pub fn new(repository: Arc<dyn InventoryRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn effective_date(date: Option<NaiveDate>) -> NaiveDate {
        date.unwrap_or_else(|| Utc::now().date_naive())
    }
}

#[async_trait::async_trait]
impl InventoryServiceTrait for InventoryService {
    async fn buy(&self, category: SecurityType, request: BuyRequest) -> Result<TradeOutcome> {
        request.validate()?;
        let date = Self::effective_date(request.date);
        debug!(
            "Buy {} x {} of security {} in account {}",
            request.quantity, request.average_price, request.security_id, request.account_id
        );
        self.repository
            .execute(Box::new(move |store| {
                lot_engine::buy(store, category, &request, date)
            }))
            .await
    }

    async fn sell(&self, category: SecurityType, request: SellRequest) -> Result<TradeOutcome> {
        request.validate()?;
        let date = Self::effective_date(request.date);
        debug!(
            "Sell {} x {} of security {} in account {}",
            request.quantity, request.average_price, request.security_id, request.account_id
        );
        self.repository
            .execute(Box::new(move |store| {
                lot_engine::sell(store, category, &request, date)
            }))
            .await
    }

    async fn dividend(
        &self,
        category: SecurityType,
        request: DividendRequest,
    ) -> Result<TradeOutcome> {
        request.validate()?;
        let date = Self::effective_date(request.date);
        self.repository
            .execute(Box::new(move |store| {
                lot_engine::dividend(store, category, &request, date)
            }))
            .await
    }

    async fn split(&self, category: SecurityType, request: SplitRequest) -> Result<TradeOutcome> {
        request.validate()?;
        let date = Self::effective_date(request.date);
        self.repository
            .execute(Box::new(move |store| {
                lot_engine::split(store, category, &request, date)
            }))
            .await
    }

    async fn bonus(&self, category: SecurityType, request: BonusRequest) -> Result<TradeOutcome> {
        request.validate()?;
        let date = Self::effective_date(request.date);
        self.repository
            .execute(Box::new(move |store| {
                lot_engine::bonus(store, category, &request, date)
            }))
            .await
    }

    async fn merge(&self, request: MergeRequest) -> Result<TradeOutcome> {
        request.validate()?;
        let date = Self::effective_date(request.date);
        self.repository
            .execute(Box::new(move |store| lot_engine::merge(store, &request, date)))
            .await
    }

    fn list_ledger(&self, inventory_id: i64) -> Result<Vec<LedgerEntry>> {
        self.repository.list_ledger_entries(inventory_id)
    }

    fn list_transactions(&self, account_id: i64, security_id: i64) -> Result<Vec<Transaction>> {
        self.repository
            .list_transactions(account_id, security_id, None)
    }

    fn list_dividends(&self, account_id: i64, security_id: i64) -> Result<Vec<Transaction>> {
        self.repository
            .list_transactions(account_id, security_id, Some(LedgerEntryType::Dividend))
    }
}

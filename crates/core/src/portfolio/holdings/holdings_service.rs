use async_trait::async_trait;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::sync::Arc;

use super::holdings_model::{HoldingSummary, InventoryView};
use crate::errors::{LedgerError, Result};
use crate::inventory::{InventoryLot, InventoryRepositoryTrait};
use crate::market_data::{fetch_snapshot, fetch_snapshots, QuoteProvider};
use crate::securities::{Security, SecurityRepositoryTrait, SecurityType};

#[async_trait]
pub trait HoldingsServiceTrait: Send + Sync {
    /// One row per security of `category` held in the account, ordered by
    /// security id. Market figures are zero when quotes are unavailable.
    async fn get_summary(&self, account_id: i64, category: SecurityType)
        -> Result<Vec<HoldingSummary>>;

    /// Lots of one security with market figures attached.
    async fn get_inventory(
        &self,
        account_id: i64,
        security_id: i64,
        category: SecurityType,
        include_closed: bool,
    ) -> Result<Vec<InventoryView>>;
}

pub struct HoldingsService {
    inventory_repository: Arc<dyn InventoryRepositoryTrait>,
    security_repository: Arc<dyn SecurityRepositoryTrait>,
    quote_provider: Arc<dyn QuoteProvider>,
}

impl HoldingsService {
    pub fn new(
        inventory_repository: Arc<dyn InventoryRepositoryTrait>,
        security_repository: Arc<dyn SecurityRepositoryTrait>,
        quote_provider: Arc<dyn QuoteProvider>,
    ) -> Self {
        Self {
            inventory_repository,
            security_repository,
            quote_provider,
        }
    }

    fn require_security(&self, security_id: i64, category: SecurityType) -> Result<Security> {
        let security = self
            .security_repository
            .get_by_id(security_id)?
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
}

#[async_trait]
impl HoldingsServiceTrait for HoldingsService {
    async fn get_summary(
        &self,
        account_id: i64,
        category: SecurityType,
    ) -> Result<Vec<HoldingSummary>> {
        let mut lots_by_security: BTreeMap<i64, Vec<InventoryLot>> = BTreeMap::new();
        for lot in self
            .inventory_repository
            .list_active_lots_by_account(account_id)?
        {
            lots_by_security.entry(lot.security_id).or_default().push(lot);
        }

        let mut securities = Vec::with_capacity(lots_by_security.len());
        let mut rows = Vec::with_capacity(lots_by_security.len());
        for (security_id, lots) in &lots_by_security {
            let Some(security) = self.security_repository.get_by_id(*security_id)? else {
                warn!(
                    "Account {} holds lots of unknown security {}",
                    account_id, security_id
                );
                continue;
            };
            if security.security_type != category {
                continue;
            }
            rows.push(HoldingSummary::from_lots(&security, lots));
            securities.push(security);
        }

        debug!(
            "Enriching {} {} holdings for account {}",
            rows.len(),
            category.as_str(),
            account_id
        );
        let snapshots = fetch_snapshots(self.quote_provider.as_ref(), &securities).await;
        Ok(rows
            .into_iter()
            .zip(snapshots)
            .map(|(row, market)| row.with_market(market))
            .collect())
    }

    async fn get_inventory(
        &self,
        account_id: i64,
        security_id: i64,
        category: SecurityType,
        include_closed: bool,
    ) -> Result<Vec<InventoryView>> {
        let security = self.require_security(security_id, category)?;
        let lots = self
            .inventory_repository
            .list_lots(account_id, security_id, include_closed)?;
        if lots.is_empty() {
            return Ok(Vec::new());
        }

        let market = fetch_snapshot(self.quote_provider.as_ref(), &security).await;
        Ok(lots
            .into_iter()
            .map(|lot| InventoryView::new(lot, market))
            .collect())
    }
}

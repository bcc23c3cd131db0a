#[cfg(test)]
mod tests {
    use crate::accounts::AccountStatus;
    use crate::errors::{Error, Result};
    use crate::inventory::memory_store::MemoryInventoryStore;
    use crate::inventory::{
        BuyRequest, DividendRequest, InventoryJob, InventoryLot, InventoryRepositoryTrait,
        InventoryService, InventoryServiceTrait, LedgerEntry, LedgerEntryType, SellRequest,
        TradeOutcome, Transaction,
    };
    use crate::securities::SecurityType;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    // --- Mock InventoryRepository ---
    // Runs each job on a copy of the state and keeps the copy only on success.
    #[derive(Clone, Default)]
    struct MockInventoryRepository {
        state: Arc<Mutex<MemoryInventoryStore>>,
        executed: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl InventoryRepositoryTrait for MockInventoryRepository {
        async fn execute(&self, job: InventoryJob) -> Result<TradeOutcome> {
            self.executed.fetch_add(1, Ordering::SeqCst);
            let mut state = self.state.lock().unwrap();
            let mut working = state.clone();
            let outcome = job(&mut working)?;
            *state = working;
            Ok(outcome)
        }

        fn get_lot(&self, lot_id: i64) -> Result<Option<InventoryLot>> {
            let state = self.state.lock().unwrap();
            Ok(state.lots.iter().find(|l| l.id == lot_id).cloned())
        }

        fn list_lots(
            &self,
            account_id: i64,
            security_id: i64,
            include_closed: bool,
        ) -> Result<Vec<InventoryLot>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .lots
                .iter()
                .filter(|l| l.belongs_to(account_id, security_id))
                .filter(|l| include_closed || l.is_active())
                .cloned()
                .collect())
        }

        fn list_active_lots_by_account(&self, account_id: i64) -> Result<Vec<InventoryLot>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .lots
                .iter()
                .filter(|l| l.account_id == account_id && l.is_active())
                .cloned()
                .collect())
        }

        fn list_ledger_entries(&self, inventory_id: i64) -> Result<Vec<LedgerEntry>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .ledger
                .iter()
                .filter(|e| e.inventory_id == inventory_id)
                .cloned()
                .collect())
        }

        fn list_transactions(
            &self,
            account_id: i64,
            security_id: i64,
            transaction_type: Option<LedgerEntryType>,
        ) -> Result<Vec<Transaction>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .transactions
                .iter()
                .filter(|t| t.account_id == account_id && t.security_id == security_id)
                .filter(|t| transaction_type.map_or(true, |kind| t.transaction_type == kind))
                .cloned()
                .collect())
        }
    }

    fn setup() -> (InventoryService, MockInventoryRepository) {
        let repository = MockInventoryRepository::default();
        {
            let mut state = repository.state.lock().unwrap();
            state.add_account(AccountStatus::Active);
            state.add_security(SecurityType::Stock, "AAPL");
        }
        (InventoryService::new(Arc::new(repository.clone())), repository)
    }

    fn buy(quantity: rust_decimal::Decimal) -> BuyRequest {
        BuyRequest {
            account_id: 1,
            security_id: 1,
            inventory_id: None,
            quantity,
            average_price: dec!(150),
            fee: dec!(2),
            date: NaiveDate::from_ymd_opt(2024, 1, 15),
        }
    }

    #[tokio::test]
    async fn test_buy_then_list_ledger_and_transactions() {
        let (service, _) = setup();
        let outcome = service.buy(SecurityType::Stock, buy(dec!(10))).await.unwrap();

        let lot = &outcome.lots[0];
        assert_eq!(lot.total_value, dec!(1500));
        assert_eq!(lot.opened_date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());

        let ledger = service.list_ledger(lot.id).unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].transaction_id, Some(outcome.transactions[0].id));

        let transactions = service.list_transactions(1, 1).unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].quantity, dec!(10));
    }

    #[tokio::test]
    async fn test_invalid_request_never_reaches_repository() {
        let (service, repository) = setup();
        let result = service.buy(SecurityType::Stock, buy(dec!(0))).await;

        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(repository.executed.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_insufficient_sell_leaves_no_rows() {
        let (service, repository) = setup();
        service.buy(SecurityType::Stock, buy(dec!(5))).await.unwrap();

        let err = service
            .sell(
                SecurityType::Stock,
                SellRequest {
                    account_id: 1,
                    security_id: 1,
                    inventory_id: None,
                    quantity: dec!(10),
                    average_price: dec!(200),
                    fee: dec!(0),
                    date: None,
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err.code(), "InsufficientQuantity");
        let state = repository.state.lock().unwrap();
        assert_eq!(state.ledger.len(), 1);
        assert_eq!(state.transactions.len(), 1);
        assert_eq!(state.lots[0].available_quantity, dec!(5));
    }

    #[tokio::test]
    async fn test_failed_job_discards_partial_writes() {
        let (service, repository) = setup();
        service.buy(SecurityType::Stock, buy(dec!(10))).await.unwrap();
        service.buy(SecurityType::Stock, buy(dec!(10))).await.unwrap();
        repository.state.lock().unwrap().fail_transaction_insert = true;

        let err = service
            .sell(
                SecurityType::Stock,
                SellRequest {
                    account_id: 1,
                    security_id: 1,
                    inventory_id: None,
                    quantity: dec!(15),
                    average_price: dec!(200),
                    fee: dec!(1),
                    date: None,
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err.code(), "InternalError");
        let state = repository.state.lock().unwrap();
        assert_eq!(state.ledger.len(), 2);
        assert!(state
            .lots
            .iter()
            .all(|l| l.available_quantity == dec!(10)));
    }

    #[tokio::test]
    async fn test_list_dividends_only_returns_dividends() {
        let (service, _) = setup();
        service.buy(SecurityType::Stock, buy(dec!(10))).await.unwrap();
        service
            .dividend(
                SecurityType::Stock,
                DividendRequest {
                    account_id: 1,
                    security_id: 1,
                    amount: dec!(3),
                    date: NaiveDate::from_ymd_opt(2024, 2, 1),
                },
            )
            .await
            .unwrap();

        let dividends = service.list_dividends(1, 1).unwrap();
        assert_eq!(dividends.len(), 1);
        assert_eq!(dividends[0].transaction_type, LedgerEntryType::Dividend);
        assert_eq!(dividends[0].total_value, dec!(30));
        assert_eq!(service.list_transactions(1, 1).unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_mutual_fund_endpoint_rejects_stock() {
        let (service, _) = setup();
        let err = service
            .buy(SecurityType::MutualFund, buy(dec!(1)))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "InvalidSecurity");
    }
}

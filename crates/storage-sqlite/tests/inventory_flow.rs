mod common;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use lotfolio_core::inventory::{
    BonusRequest, BuyRequest, DividendRequest, InventoryJob, InventoryRepositoryTrait,
    InventoryServiceTrait, InventoryStore, LedgerEntryType, LotState, MergeRequest, SellRequest,
    TradeOutcome,
};
use lotfolio_core::securities::SecurityType;

use common::{setup, TestDb};

fn day(d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2024, 3, d)
}

async fn buy(db: &TestDb, account_id: i64, security_id: i64, quantity: Decimal, price: Decimal) -> i64 {
    let outcome = db
        .inventory
        .buy(
            SecurityType::Stock,
            BuyRequest {
                account_id,
                security_id,
                inventory_id: None,
                quantity,
                average_price: price,
                fee: Decimal::ZERO,
                date: day(1),
            },
        )
        .await
        .unwrap();
    outcome.lots[0].id
}

fn sell_request(account_id: i64, security_id: i64, quantity: Decimal) -> SellRequest {
    SellRequest {
        account_id,
        security_id,
        inventory_id: None,
        quantity,
        average_price: dec!(200),
        fee: dec!(1),
        date: day(10),
    }
}

#[tokio::test]
async fn buy_opens_a_lot_with_one_transaction() {
    let db = setup();
    let account_id = db.account().await;
    let security_id = db.stock("AAPL").await;

    let outcome = db
        .inventory
        .buy(
            SecurityType::Stock,
            BuyRequest {
                account_id,
                security_id,
                inventory_id: None,
                quantity: dec!(10),
                average_price: dec!(150),
                fee: dec!(2),
                date: day(1),
            },
        )
        .await
        .unwrap();

    let lot = db.inventory_repo.get_lot(outcome.lots[0].id).unwrap().unwrap();
    assert_eq!(lot.available_quantity, dec!(10));
    assert_eq!(lot.average_price, dec!(150));
    assert_eq!(lot.total_value, dec!(1500));
    assert_eq!(lot.state, LotState::Active);

    let transactions = db.inventory.list_transactions(account_id, security_id).unwrap();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].transaction_type, LedgerEntryType::Buy);
    assert_eq!(transactions[0].quantity, dec!(10));

    let ledger = db.inventory.list_ledger(lot.id).unwrap();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].transaction_id, Some(transactions[0].id));
}

#[tokio::test]
async fn sell_drains_lots_in_order_and_links_every_row() {
    let db = setup();
    let account_id = db.account().await;
    let security_id = db.stock("INFY").await;
    let first = buy(&db, account_id, security_id, dec!(10), dec!(100)).await;
    let second = buy(&db, account_id, security_id, dec!(5), dec!(120)).await;

    let outcome = db
        .inventory
        .sell(SecurityType::Stock, sell_request(account_id, security_id, dec!(12)))
        .await
        .unwrap();
    let transaction_id = outcome.transactions[0].id;
    assert_eq!(outcome.transactions[0].quantity, dec!(12));

    let first_lot = db.inventory_repo.get_lot(first).unwrap().unwrap();
    assert_eq!(first_lot.available_quantity, Decimal::ZERO);
    assert_eq!(first_lot.state, LotState::Closed);
    let second_lot = db.inventory_repo.get_lot(second).unwrap().unwrap();
    assert_eq!(second_lot.available_quantity, dec!(3));
    assert_eq!(second_lot.total_value, dec!(360));

    let first_sell = db.inventory.list_ledger(first).unwrap();
    let second_sell = db.inventory.list_ledger(second).unwrap();
    assert_eq!(first_sell[1].quantity, dec!(10));
    assert_eq!(second_sell[1].quantity, dec!(2));
    assert_eq!(first_sell[1].transaction_id, Some(transaction_id));
    assert_eq!(second_sell[1].transaction_id, Some(transaction_id));

    // Closed lots stay on record but leave the default listing.
    assert_eq!(db.inventory_repo.list_lots(account_id, security_id, false).unwrap().len(), 1);
    assert_eq!(db.inventory_repo.list_lots(account_id, security_id, true).unwrap().len(), 2);
}

#[tokio::test]
async fn insufficient_sell_rolls_back_everything() {
    let db = setup();
    let account_id = db.account().await;
    let security_id = db.stock("TCS").await;
    let lot_id = buy(&db, account_id, security_id, dec!(5), dec!(100)).await;

    let err = db
        .inventory
        .sell(SecurityType::Stock, sell_request(account_id, security_id, dec!(10)))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "InsufficientQuantity");

    let lot = db.inventory_repo.get_lot(lot_id).unwrap().unwrap();
    assert_eq!(lot.available_quantity, dec!(5));
    assert_eq!(db.inventory.list_ledger(lot_id).unwrap().len(), 1);
    assert_eq!(db.inventory.list_transactions(account_id, security_id).unwrap().len(), 1);
}

#[tokio::test]
async fn bonus_is_allocated_pro_rata_and_keeps_cost_basis() {
    let db = setup();
    let account_id = db.account().await;
    let security_id = db.stock("HDFC").await;
    let first = buy(&db, account_id, security_id, dec!(10), dec!(100)).await;
    let second = buy(&db, account_id, security_id, dec!(30), dec!(100)).await;

    db.inventory
        .bonus(
            SecurityType::Stock,
            BonusRequest {
                account_id,
                security_id,
                quantity: dec!(4),
                fee: Decimal::ZERO,
                date: day(5),
            },
        )
        .await
        .unwrap();

    let first_lot = db.inventory_repo.get_lot(first).unwrap().unwrap();
    let second_lot = db.inventory_repo.get_lot(second).unwrap().unwrap();
    assert_eq!(first_lot.available_quantity, dec!(11));
    assert_eq!(second_lot.available_quantity, dec!(33));
    assert_eq!(first_lot.total_value, dec!(1000));
    assert_eq!(second_lot.total_value, dec!(3000));
    assert!(first_lot.average_price < dec!(100));
    assert!(first_lot.is_consistent());
}

#[tokio::test]
async fn merge_carries_the_cost_basis_to_the_new_security() {
    let db = setup();
    let account_id = db.account().await;
    let parent = db.stock("OLDCO").await;
    let child = db.stock("NEWCO").await;
    let first = buy(&db, account_id, parent, dec!(10), dec!(80)).await;
    let second = buy(&db, account_id, parent, dec!(10), dec!(120)).await;

    let outcome = db
        .inventory
        .merge(MergeRequest {
            account_id,
            parent_security_id: parent,
            new_security_id: child,
            new_inventory_id: None,
            target_quantity: dec!(10),
            date: day(20),
        })
        .await
        .unwrap();
    assert_eq!(outcome.transactions.len(), 2);

    for lot_id in [first, second] {
        let lot = db.inventory_repo.get_lot(lot_id).unwrap().unwrap();
        assert_eq!(lot.available_quantity, Decimal::ZERO);
        assert_eq!(lot.state, LotState::Closed);
    }

    let merged = db.inventory_repo.list_lots(account_id, child, false).unwrap();
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].available_quantity, dec!(10));
    assert_eq!(merged[0].average_price, dec!(200));
    assert_eq!(merged[0].total_value, dec!(2000));

    let transfers = db.inventory.list_transactions(account_id, parent).unwrap();
    assert_eq!(
        transfers.last().unwrap().transaction_type,
        LedgerEntryType::MergerTransfer
    );
}

#[tokio::test]
async fn dividends_are_listed_separately() {
    let db = setup();
    let account_id = db.account().await;
    let security_id = db.stock("ITC").await;
    buy(&db, account_id, security_id, dec!(10), dec!(100)).await;

    db.inventory
        .dividend(
            SecurityType::Stock,
            DividendRequest {
                account_id,
                security_id,
                amount: dec!(2.5),
                date: day(15),
            },
        )
        .await
        .unwrap();

    let dividends = db.inventory.list_dividends(account_id, security_id).unwrap();
    assert_eq!(dividends.len(), 1);
    assert_eq!(dividends[0].total_value, dec!(25));
    assert_eq!(db.inventory.list_transactions(account_id, security_id).unwrap().len(), 2);
}

#[tokio::test]
async fn trading_in_the_wrong_category_is_rejected() {
    let db = setup();
    let account_id = db.account().await;
    let security_id = db.stock("WIPRO").await;

    let err = db
        .inventory
        .buy(
            SecurityType::MutualFund,
            BuyRequest {
                account_id,
                security_id,
                inventory_id: None,
                quantity: dec!(1),
                average_price: dec!(10),
                fee: Decimal::ZERO,
                date: day(1),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "InvalidSecurity");
    assert!(db.inventory_repo.list_lots(account_id, security_id, true).unwrap().is_empty());
}

#[tokio::test]
async fn out_of_range_trades_fail_without_stopping_the_writer() {
    let db = setup();
    let account_id = db.account().await;
    let security_id = db.stock("ITC").await;
    let huge = dec!(100000000000000000000);

    let err = db
        .inventory
        .buy(
            SecurityType::Stock,
            BuyRequest {
                account_id,
                security_id,
                inventory_id: None,
                quantity: huge,
                average_price: huge,
                fee: Decimal::ZERO,
                date: day(1),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "InvalidRequest");

    // A lot already at the edge of the representable range overflows inside
    // the writer job; the job must roll back and leave the writer running.
    let lot_id = buy(&db, account_id, security_id, dec!(1), dec!(1)).await;
    let inflate: InventoryJob = Box::new(move |store: &mut dyn InventoryStore| {
        let mut lot = store.get_lot(lot_id)?.unwrap();
        lot.average_price = Decimal::MAX;
        lot.total_value = Decimal::MAX;
        store.update_lot_aggregates(&lot)?;
        Ok(TradeOutcome::default())
    });
    db.inventory_repo.execute(inflate).await.unwrap();

    let err = db
        .inventory
        .buy(
            SecurityType::Stock,
            BuyRequest {
                account_id,
                security_id,
                inventory_id: Some(lot_id),
                quantity: dec!(1),
                average_price: dec!(1),
                fee: Decimal::ZERO,
                date: day(2),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "InvalidRequest");

    let lot = db.inventory_repo.get_lot(lot_id).unwrap().unwrap();
    assert_eq!(lot.available_quantity, dec!(1));
    assert_eq!(lot.total_value, Decimal::MAX);
    assert_eq!(db.inventory.list_ledger(lot_id).unwrap().len(), 1);

    let next = buy(&db, account_id, security_id, dec!(1), dec!(1)).await;
    assert_ne!(next, lot_id);
    assert_eq!(db.inventory.list_transactions(account_id, security_id).unwrap().len(), 2);
}

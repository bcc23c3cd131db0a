mod common;

use lotfolio_core::accounts::{AccountServiceTrait, AccountStatus, AccountUpdate};
use lotfolio_core::securities::{
    Exchange, NewSecurity, SecurityRepositoryTrait, SecurityServiceTrait, SecurityType,
    SecurityUpdate,
};
use lotfolio_storage_sqlite::SecurityRepository;

use common::setup;

#[tokio::test]
async fn account_lifecycle() {
    let db = setup();
    let id = db.account().await;

    let renamed = db
        .accounts
        .update_account(AccountUpdate {
            id,
            name: "  Retirement ".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(renamed.name, "Retirement");

    let inactive = db.accounts.inactivate_account(id).await.unwrap();
    assert_eq!(inactive.status, AccountStatus::Inactive);
    let active = db.accounts.activate_account(id).await.unwrap();
    assert!(active.is_active());

    let listed = db.accounts.list_accounts(7).unwrap();
    assert_eq!(listed.len(), 1);
    assert!(db.accounts.list_accounts(8).unwrap().is_empty());

    let err = db.accounts.get_account(999).unwrap_err();
    assert_eq!(err.code(), "AccountNotFound");
}

#[tokio::test]
async fn security_identity_is_unique() {
    let db = setup();
    db.stock("RELIANCE").await;

    let err = db
        .securities
        .create_security(NewSecurity {
            security_type: SecurityType::Stock,
            exchange: Exchange::Nse,
            symbol: "reliance".to_string(),
            name: "Reliance Industries".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "DuplicateSecurity");

    // Same symbol on another exchange is a different security.
    db.securities
        .create_security(NewSecurity {
            security_type: SecurityType::Stock,
            exchange: Exchange::Bse,
            symbol: "RELIANCE".to_string(),
            name: "Reliance Industries".to_string(),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn unique_index_violation_maps_to_duplicate_security() {
    // Bypass the service pre-check and hit the index directly.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("raw.db");
    let path = lotfolio_storage_sqlite::init(path.to_str().unwrap()).unwrap();
    let pool = lotfolio_storage_sqlite::create_pool(&path).unwrap();
    lotfolio_storage_sqlite::run_migrations(&pool).unwrap();
    let writer = lotfolio_storage_sqlite::spawn_writer((*pool).clone());
    let repo = SecurityRepository::new(pool, writer);

    let new_security = NewSecurity {
        security_type: SecurityType::Stock,
        exchange: Exchange::Nse,
        symbol: "SBIN".to_string(),
        name: "State Bank".to_string(),
    };
    repo.create(new_security.clone()).await.unwrap();
    let err = repo.create(new_security).await.unwrap_err();
    assert_eq!(err.code(), "DuplicateSecurity");
}

#[tokio::test]
async fn update_and_lookup_security() {
    let db = setup();
    let id = db.stock("TATA").await;

    let updated = db
        .securities
        .update_security(SecurityUpdate {
            id,
            security_type: SecurityType::Stock,
            exchange: Exchange::Bse,
            symbol: "tatamotors".to_string(),
            name: "Tata Motors".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(updated.symbol, "TATAMOTORS");
    assert_eq!(updated.exchange, Exchange::Bse);

    let found = db
        .securities
        .get_security_by_identity(SecurityType::Stock, Exchange::Bse, "TATAMOTORS")
        .unwrap();
    assert_eq!(found.map(|s| s.id), Some(id));

    let err = db.securities.get_security(404).unwrap_err();
    assert_eq!(err.code(), "SecurityNotFound");
}

#[tokio::test]
async fn search_matches_symbol_or_name() {
    let db = setup();
    db.stock("INFY").await;
    db.stock("TCS").await;
    db.securities
        .create_security(NewSecurity {
            security_type: SecurityType::Stock,
            exchange: Exchange::Nse,
            symbol: "HCLTECH".to_string(),
            name: "HCL Infosystems".to_string(),
        })
        .await
        .unwrap();

    let hits = db
        .securities
        .search_securities(SecurityType::Stock, Exchange::Nse, "inf")
        .unwrap();
    let symbols: Vec<_> = hits.iter().map(|s| s.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["HCLTECH", "INFY"]);

    let listed = db
        .securities
        .list_securities(SecurityType::Stock, Exchange::Nse)
        .unwrap();
    assert_eq!(listed.len(), 3);

    let err = db
        .securities
        .search_securities(SecurityType::Stock, Exchange::Nse, " i ")
        .unwrap_err();
    assert_eq!(err.code(), "InvalidSearchTerm");
}

#[tokio::test]
async fn search_treats_like_wildcards_literally() {
    let db = setup();
    db.stock("INFY").await;
    db.stock("TCS").await;
    db.securities
        .create_security(NewSecurity {
            security_type: SecurityType::Stock,
            exchange: Exchange::Nse,
            symbol: "SBIBOND".to_string(),
            name: "SBI 7.5% Bond".to_string(),
        })
        .await
        .unwrap();

    for term in ["%%", "__", "\\%"] {
        let hits = db
            .securities
            .search_securities(SecurityType::Stock, Exchange::Nse, term)
            .unwrap();
        assert!(hits.is_empty(), "{:?} matched {:?}", term, hits);
    }

    let hits = db
        .securities
        .search_securities(SecurityType::Stock, Exchange::Nse, "5% b")
        .unwrap();
    let symbols: Vec<_> = hits.iter().map(|s| s.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["SBIBOND"]);
}

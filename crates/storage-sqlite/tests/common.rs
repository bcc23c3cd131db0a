#![allow(dead_code)]

use std::sync::Arc;

use tempfile::TempDir;

use lotfolio_core::accounts::{AccountService, AccountServiceTrait, NewAccount};
use lotfolio_core::inventory::InventoryService;
use lotfolio_core::securities::{
    Exchange, NewSecurity, SecurityService, SecurityServiceTrait, SecurityType,
};
use lotfolio_storage_sqlite::{
    create_pool, init, run_migrations, spawn_writer, AccountRepository,
    InventoryRepository, SecurityRepository,
};

pub struct TestDb {
    // Keeps the database directory alive for the test's duration.
    _dir: TempDir,
    pub accounts: AccountService,
    pub securities: SecurityService,
    pub inventory: InventoryService,
    pub inventory_repo: Arc<InventoryRepository>,
}

pub fn setup() -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");
    let db_path = init(db_path.to_str().unwrap()).unwrap();
    let pool = create_pool(&db_path).unwrap();
    run_migrations(&pool).unwrap();
    let writer = spawn_writer((*pool).clone());

    let inventory_repo = Arc::new(InventoryRepository::new(pool.clone(), writer.clone()));
    TestDb {
        accounts: AccountService::new(Arc::new(AccountRepository::new(
            pool.clone(),
            writer.clone(),
        ))),
        securities: SecurityService::new(Arc::new(SecurityRepository::new(
            pool.clone(),
            writer,
        ))),
        inventory: InventoryService::new(inventory_repo.clone()),
        inventory_repo,
        _dir: dir,
    }
}

impl TestDb {
    pub async fn account(&self) -> i64 {
        self.accounts
            .create_account(NewAccount {
                user_id: 7,
                name: "Brokerage".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    pub async fn stock(&self, symbol: &str) -> i64 {
        self.securities
            .create_security(NewSecurity {
                security_type: SecurityType::Stock,
                exchange: Exchange::Nse,
                symbol: symbol.to_string(),
                name: format!("{} Ltd", symbol),
            })
            .await
            .unwrap()
            .id
    }
}

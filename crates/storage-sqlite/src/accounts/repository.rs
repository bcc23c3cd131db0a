use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use lotfolio_core::accounts::{
    Account, AccountRepositoryTrait, AccountStatus, AccountUpdate, NewAccount,
};
use lotfolio_core::Result;

use super::model::{AccountDB, NewAccountDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::accounts;
use crate::schema::accounts::dsl::*;

/// Repository for managing account data in the database
pub struct AccountRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AccountRepository {
    /// Creates a new AccountRepository instance
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl AccountRepositoryTrait for AccountRepository {
    async fn create(&self, new_account: NewAccount) -> Result<Account> {
        let account_db: NewAccountDB = new_account.into();
        self.writer
            .exec(move |conn| {
                let created = diesel::insert_into(accounts::table)
                    .values(&account_db)
                    .returning(AccountDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(created.into())
            })
            .await
    }

    async fn update(&self, account_update: AccountUpdate) -> Result<Option<Account>> {
        self.writer
            .exec(move |conn| {
                let updated = diesel::update(accounts.find(account_update.id))
                    .set((
                        name.eq(account_update.name),
                        updated_at.eq(chrono::Utc::now().naive_utc()),
                    ))
                    .returning(AccountDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .into_core()?;
                Ok(updated.map(Account::from))
            })
            .await
    }

    async fn set_status(
        &self,
        account_id: i64,
        new_status: AccountStatus,
    ) -> Result<Option<Account>> {
        self.writer
            .exec(move |conn| {
                let updated = diesel::update(accounts.find(account_id))
                    .set((
                        status.eq(new_status.as_str()),
                        updated_at.eq(chrono::Utc::now().naive_utc()),
                    ))
                    .returning(AccountDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .into_core()?;
                Ok(updated.map(Account::from))
            })
            .await
    }

    fn get_by_id(&self, account_id: i64) -> Result<Option<Account>> {
        let mut conn = get_connection(&self.pool)?;

        let account = accounts
            .select(AccountDB::as_select())
            .find(account_id)
            .first::<AccountDB>(&mut conn)
            .optional()
            .into_core()?;

        Ok(account.map(Account::from))
    }

    fn list_by_user(&self, owner_id: i64) -> Result<Vec<Account>> {
        let mut conn = get_connection(&self.pool)?;

        let results = accounts
            .filter(user_id.eq(owner_id))
            .select(AccountDB::as_select())
            .order((status.asc(), name.asc()))
            .load::<AccountDB>(&mut conn)
            .into_core()?;

        Ok(results.into_iter().map(Account::from).collect())
    }
}

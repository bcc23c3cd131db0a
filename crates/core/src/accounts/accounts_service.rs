use log::debug;
use std::sync::Arc;

use super::accounts_model::{Account, AccountStatus, AccountUpdate, NewAccount};
use super::accounts_traits::{AccountRepositoryTrait, AccountServiceTrait};
use crate::errors::{LedgerError, Result};

/// Service for managing accounts
pub struct AccountService {
    repository: Arc<dyn AccountRepositoryTrait>,
}

impl AccountService {
    /// Creates a new AccountService instance
    pub fn new(repository: Arc<dyn AccountRepositoryTrait>) -> Self {
        Self { repository }
    }

    async fn set_status(&self, account_id: i64, status: AccountStatus) -> Result<Account> {
        debug!("Setting account {} status to {}", account_id, status.as_str());
        self.repository
            .set_status(account_id, status)
            .await?
            .ok_or_else(|| LedgerError::AccountNotFound(account_id).into())
    }
}

#[async_trait::async_trait]
impl AccountServiceTrait for AccountService {
    async fn create_account(&self, new_account: NewAccount) -> Result<Account> {
        new_account.validate()?;
        let new_account = NewAccount {
            name: new_account.name.trim().to_string(),
            ..new_account
        };
        debug!(
            "Creating account '{}' for user {}",
            new_account.name, new_account.user_id
        );
        self.repository.create(new_account).await
    }

    async fn update_account(&self, account_update: AccountUpdate) -> Result<Account> {
        account_update.validate()?;
        let account_id = account_update.id;
        let account_update = AccountUpdate {
            name: account_update.name.trim().to_string(),
            ..account_update
        };
        self.repository
            .update(account_update)
            .await?
            .ok_or_else(|| LedgerError::AccountNotFound(account_id).into())
    }

    async fn activate_account(&self, account_id: i64) -> Result<Account> {
        self.set_status(account_id, AccountStatus::Active).await
    }

    async fn inactivate_account(&self, account_id: i64) -> Result<Account> {
        self.set_status(account_id, AccountStatus::Inactive).await
    }

    fn get_account(&self, account_id: i64) -> Result<Account> {
        self.repository
            .get_by_id(account_id)?
            .ok_or_else(|| LedgerError::AccountNotFound(account_id).into())
    }

    fn list_accounts(&self, user_id: i64) -> Result<Vec<Account>> {
        self.repository.list_by_user(user_id)
    }
}

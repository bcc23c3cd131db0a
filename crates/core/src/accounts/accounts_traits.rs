//! Account repository and service traits.
//!
//! These traits define the contract for account operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::accounts_model::{Account, AccountStatus, AccountUpdate, NewAccount};
use crate::errors::Result;

/// Trait defining the contract for Account repository operations.
///
/// Lookups return `Ok(None)` when no row matches; only storage failures
/// are errors.
#[async_trait]
pub trait AccountRepositoryTrait: Send + Sync {
    /// Creates a new account.
    async fn create(&self, new_account: NewAccount) -> Result<Account>;

    /// Renames an existing account. Returns `None` if the id is unknown.
    async fn update(&self, account_update: AccountUpdate) -> Result<Option<Account>>;

    /// Sets the status of an account. Returns `None` if the id is unknown.
    async fn set_status(&self, account_id: i64, status: AccountStatus)
        -> Result<Option<Account>>;

    /// Retrieves an account by its ID.
    fn get_by_id(&self, account_id: i64) -> Result<Option<Account>>;

    /// Lists the accounts owned by a user, active first.
    fn list_by_user(&self, user_id: i64) -> Result<Vec<Account>>;
}

/// Trait defining the contract for Account service operations.
#[async_trait]
pub trait AccountServiceTrait: Send + Sync {
    async fn create_account(&self, new_account: NewAccount) -> Result<Account>;

    async fn update_account(&self, account_update: AccountUpdate) -> Result<Account>;

    async fn activate_account(&self, account_id: i64) -> Result<Account>;

    async fn inactivate_account(&self, account_id: i64) -> Result<Account>;

    /// Retrieves an account by ID, failing with `AccountNotFound`.
    fn get_account(&self, account_id: i64) -> Result<Account>;

    fn list_accounts(&self, user_id: i64) -> Result<Vec<Account>>;
}

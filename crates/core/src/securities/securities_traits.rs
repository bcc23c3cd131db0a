use super::securities_model::{Exchange, NewSecurity, Security, SecurityType, SecurityUpdate};
use crate::errors::Result;

/// Trait defining the contract for Security repository operations.
///
/// Lookups return `Ok(None)` when no row matches. Implementations map a
/// violation of the `(type, exchange, symbol)` unique index to
/// `LedgerError::DuplicateSecurity`.
#[async_trait::async_trait]
pub trait SecurityRepositoryTrait: Send + Sync {
    async fn create(&self, new_security: NewSecurity) -> Result<Security>;
    async fn update(&self, update: SecurityUpdate) -> Result<Option<Security>>;
    fn get_by_id(&self, security_id: i64) -> Result<Option<Security>>;
    fn get_by_identity(
        &self,
        security_type: SecurityType,
        exchange: Exchange,
        symbol: &str,
    ) -> Result<Option<Security>>;
    fn list_by_type_exchange(
        &self,
        security_type: SecurityType,
        exchange: Exchange,
    ) -> Result<Vec<Security>>;

    /// Case-insensitive substring match on symbol or name, ordered by symbol.
    fn search(
        &self,
        security_type: SecurityType,
        exchange: Exchange,
        term: &str,
        limit: i64,
    ) -> Result<Vec<Security>>;
}

/// Trait defining the contract for Security service operations.
#[async_trait::async_trait]
pub trait SecurityServiceTrait: Send + Sync {
    async fn create_security(&self, new_security: NewSecurity) -> Result<Security>;
    async fn update_security(&self, update: SecurityUpdate) -> Result<Security>;
    fn get_security(&self, security_id: i64) -> Result<Security>;
    fn get_security_by_identity(
        &self,
        security_type: SecurityType,
        exchange: Exchange,
        symbol: &str,
    ) -> Result<Option<Security>>;
    fn list_securities(
        &self,
        security_type: SecurityType,
        exchange: Exchange,
    ) -> Result<Vec<Security>>;
    fn search_securities(
        &self,
        security_type: SecurityType,
        exchange: Exchange,
        term: &str,
    ) -> Result<Vec<Security>>;
}

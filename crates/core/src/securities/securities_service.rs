use log::debug;
use std::sync::Arc;

use super::securities_model::{
    normalize_symbol, Exchange, NewSecurity, Security, SecurityType, SecurityUpdate,
};
use super::securities_traits::{SecurityRepositoryTrait, SecurityServiceTrait};
use crate::constants::{MIN_SEARCH_TERM_LEN, SEARCH_RESULT_LIMIT};
use crate::errors::{LedgerError, Result};
use crate::Error;

/// Service for the security catalog.
pub struct SecurityService {
    repository: Arc<dyn SecurityRepositoryTrait>,
}

impl SecurityService {
    pub fn new(repository: Arc<dyn SecurityRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn duplicate(security_type: SecurityType, exchange: Exchange, symbol: &str) -> Error {
        LedgerError::DuplicateSecurity {
            security_type: security_type.as_str().to_string(),
            exchange: exchange.as_str().to_string(),
            symbol: symbol.to_string(),
        }
        .into()
    }
}

#[async_trait::async_trait]
impl SecurityServiceTrait for SecurityService {
    async fn create_security(&self, new_security: NewSecurity) -> Result<Security> {
        new_security.validate()?;
        let new_security = new_security.normalized();

        if self
            .repository
            .get_by_identity(
                new_security.security_type,
                new_security.exchange,
                &new_security.symbol,
            )?
            .is_some()
        {
            return Err(Self::duplicate(
                new_security.security_type,
                new_security.exchange,
                &new_security.symbol,
            ));
        }

        debug!(
            "Registering security {}/{}/{}",
            new_security.security_type.as_str(),
            new_security.exchange.as_str(),
            new_security.symbol
        );
        self.repository.create(new_security).await
    }

    async fn update_security(&self, update: SecurityUpdate) -> Result<Security> {
        update.validate()?;
        let update = update.normalized();

        if self.repository.get_by_id(update.id)?.is_none() {
            return Err(LedgerError::SecurityNotFound(update.id).into());
        }

        if let Some(existing) = self.repository.get_by_identity(
            update.security_type,
            update.exchange,
            &update.symbol,
        )? {
            if existing.id != update.id {
                return Err(Self::duplicate(
                    update.security_type,
                    update.exchange,
                    &update.symbol,
                ));
            }
        }

        let security_id = update.id;
        self.repository
            .update(update)
            .await?
            .ok_or_else(|| LedgerError::SecurityNotFound(security_id).into())
    }

    fn get_security(&self, security_id: i64) -> Result<Security> {
        self.repository
            .get_by_id(security_id)?
            .ok_or_else(|| LedgerError::SecurityNotFound(security_id).into())
    }

    fn get_security_by_identity(
        &self,
        security_type: SecurityType,
        exchange: Exchange,
        symbol: &str,
    ) -> Result<Option<Security>> {
        self.repository
            .get_by_identity(security_type, exchange, &normalize_symbol(symbol))
    }

    fn list_securities(
        &self,
        security_type: SecurityType,
        exchange: Exchange,
    ) -> Result<Vec<Security>> {
        self.repository.list_by_type_exchange(security_type, exchange)
    }

    fn search_securities(
        &self,
        security_type: SecurityType,
        exchange: Exchange,
        term: &str,
    ) -> Result<Vec<Security>> {
        let term = term.trim();
        if term.chars().count() < MIN_SEARCH_TERM_LEN {
            return Err(LedgerError::InvalidSearchTerm(term.to_string()).into());
        }
        self.repository
            .search(security_type, exchange, term, SEARCH_RESULT_LIMIT)
    }
}

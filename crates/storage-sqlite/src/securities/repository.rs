use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::sync::Arc;

use lotfolio_core::errors::LedgerError;
use lotfolio_core::securities::{
    Exchange, NewSecurity, Security, SecurityRepositoryTrait, SecurityType, SecurityUpdate,
};
use lotfolio_core::{Error, Result};

use super::model::{NewSecurityDB, SecurityDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::securities;
use crate::schema::securities::dsl::*;
use crate::utils::escape_like;

/// Maps a violation of the identity index to `DuplicateSecurity`.
fn map_identity_violation(
    err: DieselError,
    kind: SecurityType,
    venue: Exchange,
    ticker: &str,
) -> Error {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            LedgerError::DuplicateSecurity {
                security_type: kind.as_str().to_string(),
                exchange: venue.as_str().to_string(),
                symbol: ticker.to_string(),
            }
            .into()
        }
        other => StorageError::from(other).into(),
    }
}

pub struct SecurityRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SecurityRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl SecurityRepositoryTrait for SecurityRepository {
    async fn create(&self, new_security: NewSecurity) -> Result<Security> {
        let (kind, venue) = (new_security.security_type, new_security.exchange);
        let security_db: NewSecurityDB = new_security.into();
        self.writer
            .exec(move |conn| {
                diesel::insert_into(securities::table)
                    .values(&security_db)
                    .returning(SecurityDB::as_returning())
                    .get_result(conn)
                    .map(Security::from)
                    .map_err(|e| map_identity_violation(e, kind, venue, &security_db.symbol))
            })
            .await
    }

    async fn update(&self, update: SecurityUpdate) -> Result<Option<Security>> {
        self.writer
            .exec(move |conn| {
                diesel::update(securities.find(update.id))
                    .set((
                        security_type.eq(update.security_type.code()),
                        exchange.eq(update.exchange.code()),
                        symbol.eq(&update.symbol),
                        name.eq(&update.name),
                        updated_at.eq(chrono::Utc::now().naive_utc()),
                    ))
                    .returning(SecurityDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .map(|row| row.map(Security::from))
                    .map_err(|e| {
                        map_identity_violation(e, update.security_type, update.exchange, &update.symbol)
                    })
            })
            .await
    }

    fn get_by_id(&self, security_id: i64) -> Result<Option<Security>> {
        let mut conn = get_connection(&self.pool)?;

        let row = securities
            .select(SecurityDB::as_select())
            .find(security_id)
            .first::<SecurityDB>(&mut conn)
            .optional()
            .into_core()?;

        Ok(row.map(Security::from))
    }

    fn get_by_identity(
        &self,
        kind: SecurityType,
        venue: Exchange,
        ticker: &str,
    ) -> Result<Option<Security>> {
        let mut conn = get_connection(&self.pool)?;

        let row = securities
            .filter(security_type.eq(kind.code()))
            .filter(exchange.eq(venue.code()))
            .filter(symbol.eq(ticker))
            .select(SecurityDB::as_select())
            .first::<SecurityDB>(&mut conn)
            .optional()
            .into_core()?;

        Ok(row.map(Security::from))
    }

    fn list_by_type_exchange(&self, kind: SecurityType, venue: Exchange) -> Result<Vec<Security>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = securities
            .filter(security_type.eq(kind.code()))
            .filter(exchange.eq(venue.code()))
            .select(SecurityDB::as_select())
            .order(symbol.asc())
            .load::<SecurityDB>(&mut conn)
            .into_core()?;

        Ok(rows.into_iter().map(Security::from).collect())
    }

    fn search(
        &self,
        kind: SecurityType,
        venue: Exchange,
        term: &str,
        limit: i64,
    ) -> Result<Vec<Security>> {
        let mut conn = get_connection(&self.pool)?;
        let pattern = format!("%{}%", escape_like(&term.to_uppercase()));

        let rows = securities
            .filter(security_type.eq(kind.code()))
            .filter(exchange.eq(venue.code()))
            .filter(
                diesel::dsl::sql::<diesel::sql_types::Bool>("(UPPER(symbol) LIKE ")
                    .bind::<diesel::sql_types::Text, _>(pattern.clone())
                    .sql(" ESCAPE '\\' OR UPPER(name) LIKE ")
                    .bind::<diesel::sql_types::Text, _>(pattern)
                    .sql(" ESCAPE '\\')"),
            )
            .select(SecurityDB::as_select())
            .order(symbol.asc())
            .limit(limit)
            .load::<SecurityDB>(&mut conn)
            .into_core()?;

        Ok(rows.into_iter().map(Security::from).collect())
    }
}

//! Database model for securities.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use lotfolio_core::securities::{Exchange, NewSecurity, Security, SecurityType};

/// Database model for securities. Type and exchange are stored as their
/// numeric codes.
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::securities)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SecurityDB {
    pub id: i64,
    pub security_type: i32,
    pub exchange: i32,
    pub symbol: String,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::securities)]
pub struct NewSecurityDB {
    pub security_type: i32,
    pub exchange: i32,
    pub symbol: String,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<SecurityDB> for Security {
    fn from(db: SecurityDB) -> Self {
        Self {
            id: db.id,
            security_type: SecurityType::from_code(db.security_type),
            exchange: Exchange::from_code(db.exchange),
            symbol: db.symbol,
            name: db.name,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewSecurity> for NewSecurityDB {
    fn from(domain: NewSecurity) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            security_type: domain.security_type.code(),
            exchange: domain.exchange.code(),
            symbol: domain.symbol,
            name: domain.name,
            created_at: now,
            updated_at: now,
        }
    }
}

//! Database model for accounts.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use lotfolio_core::accounts::{Account, AccountStatus, NewAccount};

/// Database model for accounts
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccountDB {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insert model; the id is assigned by SQLite.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::accounts)]
pub struct NewAccountDB {
    pub user_id: i64,
    pub name: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<AccountDB> for Account {
    fn from(db: AccountDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            status: AccountStatus::from_db(&db.status),
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewAccount> for NewAccountDB {
    fn from(domain: NewAccount) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            user_id: domain.user_id,
            name: domain.name,
            status: AccountStatus::Active.as_str().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

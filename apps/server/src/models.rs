use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use lotfolio_core::accounts as core_accounts;
use lotfolio_core::securities::{self as core_securities, resolve_exchange, resolve_type};

/// Envelope every endpoint answers with.
#[derive(Serialize, Debug)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub success: bool,
    pub error: Vec<ErrorItem>,
    pub data: Option<T>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct ErrorItem {
    pub code: String,
    pub msg: String,
}

impl<T> ApiResponse<T> {
    pub fn failure(status: StatusCode, code: &str, msg: String) -> Self {
        Self {
            status: status.as_u16(),
            success: false,
            error: vec![ErrorItem {
                code: code.to_string(),
                msg,
            }],
            data: None,
        }
    }
}

pub type Envelope<T> = Json<ApiResponse<T>>;

pub fn ok<T>(data: T) -> Envelope<T> {
    Json(ApiResponse {
        status: StatusCode::OK.as_u16(),
        success: true,
        error: Vec::new(),
        data: Some(data),
    })
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub status: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<core_accounts::Account> for Account {
    fn from(a: core_accounts::Account) -> Self {
        Self {
            is_active: a.is_active(),
            id: a.id,
            user_id: a.user_id,
            name: a.name,
            status: a.status.as_str().to_string(),
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub user_id: i64,
    pub name: String,
}

impl From<NewAccount> for core_accounts::NewAccount {
    fn from(a: NewAccount) -> Self {
        Self {
            user_id: a.user_id,
            name: a.name,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdate {
    pub name: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AccountsQuery {
    pub user_id: i64,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Security {
    pub id: i64,
    pub security_type: String,
    pub exchange: String,
    pub symbol: String,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<core_securities::Security> for Security {
    fn from(s: core_securities::Security) -> Self {
        Self {
            id: s.id,
            security_type: s.security_type.as_str().to_string(),
            exchange: s.exchange.as_str().to_string(),
            symbol: s.symbol,
            name: s.name,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

/// Type and exchange arrive as free-form names ("stock", "MF", "nse").
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SecurityInput {
    pub security_type: String,
    pub exchange: String,
    pub symbol: String,
    pub name: String,
}

impl From<SecurityInput> for core_securities::NewSecurity {
    fn from(s: SecurityInput) -> Self {
        Self {
            security_type: resolve_type(&s.security_type),
            exchange: resolve_exchange(&s.exchange),
            symbol: s.symbol,
            name: s.name,
        }
    }
}

impl SecurityInput {
    pub fn into_update(self, id: i64) -> core_securities::SecurityUpdate {
        core_securities::SecurityUpdate {
            id,
            security_type: resolve_type(&self.security_type),
            exchange: resolve_exchange(&self.exchange),
            symbol: self.symbol,
            name: self.name,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SecuritiesQuery {
    #[serde(rename = "type")]
    pub security_type: String,
    pub exchange: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SecuritySearchQuery {
    #[serde(rename = "type")]
    pub security_type: String,
    pub exchange: String,
    pub term: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SecurityLookupQuery {
    #[serde(rename = "type")]
    pub security_type: String,
    pub exchange: String,
    pub symbol: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SummaryQuery {
    pub account_id: i64,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InventoryQuery {
    pub account_id: i64,
    pub security_id: i64,
    #[serde(default)]
    pub include_closed: bool,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LedgerQuery {
    pub inventory_id: i64,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct HoldingQuery {
    pub account_id: i64,
    pub security_id: i64,
}

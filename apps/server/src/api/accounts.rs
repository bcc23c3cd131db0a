use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use lotfolio_core::accounts::AccountUpdate as CoreAccountUpdate;

use super::{ApiJson, ApiPath, ApiQuery};
use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{ok, Account, AccountUpdate, AccountsQuery, Envelope, NewAccount},
};

async fn list_accounts(
    State(state): State<Arc<AppState>>,
    ApiQuery(q): ApiQuery<AccountsQuery>,
) -> ApiResult<Envelope<Vec<Account>>> {
    let accounts = state.account_service.list_accounts(q.user_id)?;
    Ok(ok(accounts.into_iter().map(Account::from).collect()))
}

async fn create_account(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<NewAccount>,
) -> ApiResult<Envelope<Account>> {
    let account = state.account_service.create_account(payload.into()).await?;
    Ok(ok(Account::from(account)))
}

async fn get_account(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Envelope<Account>> {
    let account = state.account_service.get_account(id)?;
    Ok(ok(Account::from(account)))
}

async fn update_account(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<AccountUpdate>,
) -> ApiResult<Envelope<Account>> {
    let account = state
        .account_service
        .update_account(CoreAccountUpdate {
            id,
            name: payload.name,
        })
        .await?;
    Ok(ok(Account::from(account)))
}

async fn activate_account(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Envelope<Account>> {
    let account = state.account_service.activate_account(id).await?;
    Ok(ok(Account::from(account)))
}

async fn inactivate_account(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Envelope<Account>> {
    let account = state.account_service.inactivate_account(id).await?;
    Ok(ok(Account::from(account)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route("/accounts/{id}", get(get_account).put(update_account))
        .route("/accounts/{id}/activate", post(activate_account))
        .route("/accounts/{id}/inactivate", post(inactivate_account))
}

use std::sync::Arc;

use axum::{extract::State, routing::get, Router};
use lotfolio_core::{
    securities::{resolve_exchange, resolve_type, Exchange, SecurityType},
    Error,
};

use super::{ApiJson, ApiPath, ApiQuery};
use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{
        ok, Envelope, SecuritiesQuery, Security, SecurityInput, SecurityLookupQuery,
        SecuritySearchQuery,
    },
};

/// Resolves free-form type and exchange names, rejecting unknown ones.
fn resolve_identity(security_type: &str, exchange: &str) -> ApiResult<(SecurityType, Exchange)> {
    let kind = resolve_type(security_type);
    if !kind.is_valid() {
        return Err(Error::invalid_input(format!("Unknown security type '{}'", security_type)).into());
    }
    let venue = resolve_exchange(exchange);
    if !venue.is_valid() {
        return Err(Error::invalid_input(format!("Unknown exchange '{}'", exchange)).into());
    }
    Ok((kind, venue))
}

async fn list_securities(
    State(state): State<Arc<AppState>>,
    ApiQuery(q): ApiQuery<SecuritiesQuery>,
) -> ApiResult<Envelope<Vec<Security>>> {
    let (kind, venue) = resolve_identity(&q.security_type, &q.exchange)?;
    let securities = state.security_service.list_securities(kind, venue)?;
    Ok(ok(securities.into_iter().map(Security::from).collect()))
}

async fn create_security(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<SecurityInput>,
) -> ApiResult<Envelope<Security>> {
    let security = state
        .security_service
        .create_security(payload.into())
        .await?;
    Ok(ok(Security::from(security)))
}

async fn search_securities(
    State(state): State<Arc<AppState>>,
    ApiQuery(q): ApiQuery<SecuritySearchQuery>,
) -> ApiResult<Envelope<Vec<Security>>> {
    let (kind, venue) = resolve_identity(&q.security_type, &q.exchange)?;
    let securities = state
        .security_service
        .search_securities(kind, venue, &q.term)?;
    Ok(ok(securities.into_iter().map(Security::from).collect()))
}

/// `data` is null when nothing matches.
async fn lookup_security(
    State(state): State<Arc<AppState>>,
    ApiQuery(q): ApiQuery<SecurityLookupQuery>,
) -> ApiResult<Envelope<Option<Security>>> {
    let (kind, venue) = resolve_identity(&q.security_type, &q.exchange)?;
    let security = state
        .security_service
        .get_security_by_identity(kind, venue, &q.symbol)?;
    Ok(ok(security.map(Security::from)))
}

async fn get_security(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Envelope<Security>> {
    let security = state.security_service.get_security(id)?;
    Ok(ok(Security::from(security)))
}

async fn update_security(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<SecurityInput>,
) -> ApiResult<Envelope<Security>> {
    let security = state
        .security_service
        .update_security(payload.into_update(id))
        .await?;
    Ok(ok(Security::from(security)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/securities", get(list_securities).post(create_security))
        .route("/securities/search", get(search_securities))
        .route("/securities/lookup", get(lookup_security))
        .route("/securities/{id}", get(get_security).put(update_security))
}

//! Trading routes. Stocks and mutual funds share handlers; the route prefix
//! fixes the security type a request may trade.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use lotfolio_core::{
    inventory::{
        BonusRequest, BuyRequest, DividendRequest, LedgerEntry, MergeRequest, SellRequest,
        SplitRequest, TradeOutcome, Transaction,
    },
    portfolio::{HoldingSummary, InventoryView},
    securities::SecurityType,
    Error,
};

use super::{ApiJson, ApiQuery};
use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{ok, Envelope, HoldingQuery, InventoryQuery, LedgerQuery, SummaryQuery},
};

fn require_id(value: i64, field: &str) -> ApiResult<()> {
    if value <= 0 {
        return Err(Error::invalid_input(format!("{} must be positive", field)).into());
    }
    Ok(())
}

async fn buy(
    state: Arc<AppState>,
    category: SecurityType,
    request: BuyRequest,
) -> ApiResult<Envelope<TradeOutcome>> {
    let outcome = state.inventory_service.buy(category, request).await?;
    Ok(ok(outcome))
}

async fn sell(
    state: Arc<AppState>,
    category: SecurityType,
    request: SellRequest,
) -> ApiResult<Envelope<TradeOutcome>> {
    let outcome = state.inventory_service.sell(category, request).await?;
    Ok(ok(outcome))
}

async fn dividend(
    state: Arc<AppState>,
    category: SecurityType,
    request: DividendRequest,
) -> ApiResult<Envelope<TradeOutcome>> {
    let outcome = state.inventory_service.dividend(category, request).await?;
    Ok(ok(outcome))
}

async fn split(
    state: Arc<AppState>,
    category: SecurityType,
    request: SplitRequest,
) -> ApiResult<Envelope<TradeOutcome>> {
    let outcome = state.inventory_service.split(category, request).await?;
    Ok(ok(outcome))
}

async fn bonus(
    state: Arc<AppState>,
    category: SecurityType,
    request: BonusRequest,
) -> ApiResult<Envelope<TradeOutcome>> {
    let outcome = state.inventory_service.bonus(category, request).await?;
    Ok(ok(outcome))
}

async fn merge(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<MergeRequest>,
) -> ApiResult<Envelope<TradeOutcome>> {
    let outcome = state.inventory_service.merge(request).await?;
    Ok(ok(outcome))
}

async fn summary(
    state: Arc<AppState>,
    category: SecurityType,
    q: SummaryQuery,
) -> ApiResult<Envelope<Vec<HoldingSummary>>> {
    require_id(q.account_id, "accountId")?;
    let rows = state
        .holdings_service
        .get_summary(q.account_id, category)
        .await?;
    Ok(ok(rows))
}

async fn inventory(
    state: Arc<AppState>,
    category: SecurityType,
    q: InventoryQuery,
) -> ApiResult<Envelope<Vec<InventoryView>>> {
    require_id(q.account_id, "accountId")?;
    require_id(q.security_id, "securityId")?;
    let lots = state
        .holdings_service
        .get_inventory(q.account_id, q.security_id, category, q.include_closed)
        .await?;
    Ok(ok(lots))
}

async fn ledger(
    State(state): State<Arc<AppState>>,
    ApiQuery(q): ApiQuery<LedgerQuery>,
) -> ApiResult<Envelope<Vec<LedgerEntry>>> {
    require_id(q.inventory_id, "inventoryId")?;
    Ok(ok(state.inventory_service.list_ledger(q.inventory_id)?))
}

async fn transactions(
    State(state): State<Arc<AppState>>,
    ApiQuery(q): ApiQuery<HoldingQuery>,
) -> ApiResult<Envelope<Vec<Transaction>>> {
    require_id(q.account_id, "accountId")?;
    require_id(q.security_id, "securityId")?;
    let rows = state
        .inventory_service
        .list_transactions(q.account_id, q.security_id)?;
    Ok(ok(rows))
}

async fn dividends(
    State(state): State<Arc<AppState>>,
    ApiQuery(q): ApiQuery<HoldingQuery>,
) -> ApiResult<Envelope<Vec<Transaction>>> {
    require_id(q.account_id, "accountId")?;
    require_id(q.security_id, "securityId")?;
    let rows = state
        .inventory_service
        .list_dividends(q.account_id, q.security_id)?;
    Ok(ok(rows))
}

/// Routes shared by every tradable category.
fn category_router(category: SecurityType) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/buy",
            post(move |State(state): State<Arc<AppState>>, ApiJson(req): ApiJson<BuyRequest>| {
                buy(state, category, req)
            }),
        )
        .route(
            "/sell",
            post(move |State(state): State<Arc<AppState>>, ApiJson(req): ApiJson<SellRequest>| {
                sell(state, category, req)
            }),
        )
        .route(
            "/dividend",
            post(
                move |State(state): State<Arc<AppState>>,
                      ApiJson(req): ApiJson<DividendRequest>| {
                    dividend(state, category, req)
                },
            ),
        )
        .route(
            "/split",
            post(move |State(state): State<Arc<AppState>>, ApiJson(req): ApiJson<SplitRequest>| {
                split(state, category, req)
            }),
        )
        .route(
            "/bonus",
            post(move |State(state): State<Arc<AppState>>, ApiJson(req): ApiJson<BonusRequest>| {
                bonus(state, category, req)
            }),
        )
        .route(
            "/summary",
            get(move |State(state): State<Arc<AppState>>, ApiQuery(q): ApiQuery<SummaryQuery>| {
                summary(state, category, q)
            }),
        )
        .route(
            "/inventory",
            get(
                move |State(state): State<Arc<AppState>>, ApiQuery(q): ApiQuery<InventoryQuery>| {
                    inventory(state, category, q)
                },
            ),
        )
        .route("/ledger", get(ledger))
        .route("/transactions", get(transactions))
        .route("/dividends", get(dividends))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .nest(
            "/stocks",
            category_router(SecurityType::Stock).route("/merge", post(merge)),
        )
        .nest("/mutual-funds", category_router(SecurityType::MutualFund))
}

use std::sync::Arc;

use axum::{extract::State, routing::get, Router};
use serde::Serialize;

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{ok, Envelope},
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthStatus {
    status: &'static str,
    version: &'static str,
    db_path: String,
}

async fn healthz(State(state): State<Arc<AppState>>) -> ApiResult<Envelope<HealthStatus>> {
    Ok(ok(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        db_path: state.db_path.clone(),
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/healthz", get(healthz))
}

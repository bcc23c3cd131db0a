use std::sync::Arc;

use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use crate::main_lib::AppState;
use crate::models::{Account, AccountUpdate, ErrorItem, NewAccount, Security, SecurityInput};

/// Schema document for the request and response bodies.
#[derive(OpenApi)]
#[openapi(
    info(title = "Lotfolio API"),
    components(schemas(Account, NewAccount, AccountUpdate, Security, SecurityInput, ErrorItem))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/openapi.json", get(openapi_json))
}

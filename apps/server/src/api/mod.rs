mod accounts;
mod docs;
mod health;
mod securities;
mod trading;

use std::sync::Arc;

use axum::extract::{FromRequest, FromRequestParts};
use axum::http::{header, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::ApiError;
use crate::main_lib::AppState;

/// JSON body whose decoding failures answer with the error envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

fn cors_layer(config: &Config) -> CorsLayer {
    let origin = match &config.cors_allow_origins {
        Some(origins) => AllowOrigin::list(origins.clone()),
        None => AllowOrigin::from(Any),
    };
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let api = Router::new()
        .merge(health::router())
        .merge(docs::router())
        .merge(accounts::router())
        .merge(securities::router())
        .merge(trading::router());

    Router::new()
        .nest("/api/v1", api)
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

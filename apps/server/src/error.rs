use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use lotfolio_core::Error as CoreError;
use thiserror::Error;

use crate::models::ApiResponse;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The request could not be decoded.
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Core(e) => e.code(),
            ApiError::BadRequest(_) => "InvalidRequest",
            ApiError::Anyhow(_) => "InternalError",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.code() {
            "InvalidRequest" | "InvalidSearchTerm" => StatusCode::BAD_REQUEST,
            "AccountNotFound" | "SecurityNotFound" => StatusCode::NOT_FOUND,
            "DuplicateSecurity" => StatusCode::CONFLICT,
            "InvalidSecurity" | "InactiveAccount" | "InvalidInventory"
            | "InsufficientQuantity" | "NoHoldings" => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, code, "request failed");
            "Internal server error".to_string()
        } else {
            tracing::debug!(error = %self, code, "request rejected");
            self.to_string()
        };

        let body = ApiResponse::<()>::failure(status, code, message);
        (status, Json(body)).into_response()
    }
}

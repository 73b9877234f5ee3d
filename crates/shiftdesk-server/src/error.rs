use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use shiftdesk_common::CommonError;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Seed error: {0}")]
    Seed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<CommonError> for ServerError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::InvalidCursor(cursor) => {
                ServerError::Validation(format!("invalid cursor: {cursor}"))
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::Validation(msg) => {
                return (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response();
            }
            ServerError::Seed(e) | ServerError::Internal(e) => {
                tracing::error!(error = %e, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;

use attendance_core::errors::{DatabaseError, Error as CoreError};
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::auth::AuthError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    Auth(#[from] AuthError),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Serialize)]
pub(crate) struct ErrorBody {
    pub code: u16,
    pub category: &'static str,
    pub message: String,
}

pub(crate) fn error_response(status: StatusCode, category: &'static str, message: String) -> Response {
    let body = Json(ErrorBody {
        code: status.as_u16(),
        category,
        message,
    });
    (status, body).into_response()
}

const STORAGE_FAILURE: &str = "The data store is unavailable, please try again later";

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, category, message) = match self {
            ApiError::Auth(err) => return err.into_response(),
            ApiError::Core(e) => match &e {
                CoreError::Validation(_) => (StatusCode::BAD_REQUEST, "validation", e.to_string()),
                CoreError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found", e.to_string()),
                CoreError::Database(DatabaseError::NotFound(_)) => {
                    (StatusCode::NOT_FOUND, "not_found", "Record not found".to_string())
                }
                CoreError::InvalidState(_) => {
                    (StatusCode::CONFLICT, "invalid_state", e.to_string())
                }
                CoreError::ConstraintViolation(reason) => {
                    (StatusCode::CONFLICT, "conflict", reason.clone())
                }
                CoreError::Database(cause) => {
                    tracing::error!("Persistence failure: {}", cause);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "persistence",
                        STORAGE_FAILURE.to_string(),
                    )
                }
                CoreError::Unexpected(cause) => {
                    tracing::error!("Unexpected failure: {}", cause);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "internal",
                        "Internal server error".to_string(),
                    )
                }
            },
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, "validation", reason),
            ApiError::Anyhow(err) => {
                tracing::error!("Internal failure: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal server error".to_string(),
                )
            }
        };
        error_response(status, category, message)
    }
}

/// Malformed or incomplete JSON bodies are reported like any other validation failure.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

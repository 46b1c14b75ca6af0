//! Application error types and handling

use crate::validation::ValidationResult;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed: {}", .0.failed_fields().join(", "))]
    Validation(ValidationResult),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Io(_) | AppError::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            AppError::Validation(result) => json!({
                "error": "Validation failed",
                "status": status.as_u16(),
                "fields": result.errors,
            }),
            AppError::BadRequest(msg) | AppError::NotFound(msg) => json!({
                "error": msg,
                "status": status.as_u16(),
            }),
            AppError::Database(msg) => {
                tracing::error!("Database error: {}", msg);
                json!({
                    "error": "Database error",
                    "status": status.as_u16(),
                })
            }
            AppError::Io(err) => {
                tracing::error!("IO error: {:?}", err);
                json!({
                    "error": "Internal server error",
                    "status": status.as_u16(),
                })
            }
            AppError::Other(err) => {
                tracing::error!("Unexpected error: {:?}", err);
                json!({
                    "error": "Internal server error",
                    "status": status.as_u16(),
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Resource not found".to_string()),
            _ => AppError::Database(err.to_string()),
        }
    }
}

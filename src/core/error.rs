use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::ErrorResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Describe a storage failure without leaking connection details.
    fn storage_diagnostic(err: &sqlx::Error) -> &'static str {
        match err {
            sqlx::Error::PoolTimedOut => "connection pool timed out",
            sqlx::Error::PoolClosed => "connection pool is closed",
            sqlx::Error::Io(_) | sqlx::Error::Tls(_) => "storage backend unreachable",
            sqlx::Error::Database(_) => "storage rejected the query",
            _ => "storage query failed",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            AppError::Validation(messages) => (
                StatusCode::BAD_REQUEST,
                "Datos inválidos".to_string(),
                Some(messages),
            ),
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::StorageUnavailable(ref e) => {
                tracing::error!("Storage error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Storage unavailable: {}", Self::storage_diagnostic(e)),
                    None,
                )
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse::new(message, errors));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

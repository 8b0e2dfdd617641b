//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. All route handlers should return
//! `Result<T, AppError>`. Every failure is translated to a JSON body: 4xx
//! responses carry `{"error": ...}`, 5xx responses carry
//! `{"error": ..., "details": ...}` with the source chain in `details`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::db::orders::StockError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Order placement or stock adjustment failed.
    #[error(transparent)]
    Stock(#[from] StockError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Path identifier is not in canonical form.
    #[error("Invalid ID format")]
    InvalidId,

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body shape shared by all failure responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    fn with_details(error: impl Into<String>, details: impl ToString) -> Self {
        Self {
            error: error.into(),
            details: Some(details.to_string()),
        }
    }
}

impl AppError {
    fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Database(_) | Self::Internal(_) | Self::Stock(StockError::Repository(_))
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let (status, body) = match &self {
            Self::Stock(StockError::ProductNotFound) => {
                (StatusCode::NOT_FOUND, ErrorBody::new("Product not found"))
            }
            Self::Stock(StockError::OrderNotFound) => {
                (StatusCode::NOT_FOUND, ErrorBody::new("Order not found"))
            }
            Self::Stock(StockError::InsufficientStock) => {
                (StatusCode::BAD_REQUEST, ErrorBody::new("Insufficient stock"))
            }
            Self::Stock(StockError::Repository(e)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::with_details("Internal server error", e),
            ),
            Self::Database(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::with_details("Internal server error", e),
            ),
            Self::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::with_details("Internal server error", msg),
            ),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorBody::new(msg.clone())),
            Self::InvalidId => (StatusCode::BAD_REQUEST, ErrorBody::new("Invalid ID format")),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorBody::new(msg.clone())),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

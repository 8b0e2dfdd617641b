//! Identifier-format validation for path parameters.
//!
//! Applied as a route layer on the product `{id}` routes. The order routes
//! are deliberately left unguarded; their typed extractors reject malformed
//! ids on their own terms.

use axum::{
    extract::{Path, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::error::AppError;

/// Reject the request with 400 `{"error": "Invalid ID format"}` before any
/// handler runs if the `{id}` path segment is not a canonical UUID.
pub async fn validate_id(Path(id): Path<String>, request: Request, next: Next) -> Response {
    if Uuid::parse_str(&id).is_err() {
        return AppError::InvalidId.into_response();
    }

    next.run(request).await
}

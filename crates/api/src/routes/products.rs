//! Product route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;

use stockroom_core::ProductId;

use crate::db::{ProductRepository, RepositoryError};
use crate::error::AppError;
use crate::models::product::{CreateProductInput, Product, UpdateProductInput};
use crate::state::AppState;

/// Response for the total-stock aggregation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalStockResponse {
    /// Sum of stock across all products; 0 for an empty catalog.
    pub total_stock: i64,
}

/// Create a new product.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProductInput>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let product = ProductRepository::new(state.pool()).create(&input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Partially update a product.
///
/// # Errors
///
/// Returns 404 if the product does not exist.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(input): Json<UpdateProductInput>,
) -> Result<Json<Product>, AppError> {
    match ProductRepository::new(state.pool()).update(id, &input).await {
        Ok(product) => Ok(Json(product)),
        Err(RepositoryError::NotFound) => Err(AppError::NotFound("Product not found".to_owned())),
        Err(e) => Err(e.into()),
    }
}

/// List all products. An empty catalog yields an empty list, not an error.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>, AppError> {
    let products = ProductRepository::new(state.pool()).list().await?;
    Ok(Json(products))
}

/// Get a product by ID.
///
/// # Errors
///
/// Returns 404 if the product does not exist.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>, AppError> {
    ProductRepository::new(state.pool())
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))
}

/// Total stock quantity across all products combined.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub async fn total_stock(
    State(state): State<AppState>,
) -> Result<Json<TotalStockResponse>, AppError> {
    let total_stock = ProductRepository::new(state.pool()).total_stock().await?;
    Ok(Json(TotalStockResponse { total_stock }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_stock_wire_shape() {
        let body = serde_json::to_value(TotalStockResponse { total_stock: 0 }).expect("serializes");
        assert_eq!(body, serde_json::json!({ "totalStock": 0 }));
    }
}

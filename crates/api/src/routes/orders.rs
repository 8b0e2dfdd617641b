//! Order route handlers.
//!
//! Placement and quantity updates go through the order repository's
//! transactional stock upkeep; the per-user and per-product listings keep
//! the service's empty-result-as-404 contract, unlike the plain listings
//! which return an empty array.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use stockroom_core::{OrderId, ProductId, UserId};

use crate::db::{OrderRepository, StockError};
use crate::error::AppError;
use crate::models::order::{CreateOrderInput, Order, OrderWithDetails, UpdateOrderInput, UserSummary};
use crate::state::AppState;

/// Default window for the recent-orders listing, in days.
const DEFAULT_RECENT_WINDOW_DAYS: i64 = 7;

/// Query parameters for the recent-orders listing.
#[derive(Debug, Deserialize)]
pub struct RecentOrdersQuery {
    /// Window size in days; defaults to 7.
    pub days: Option<i64>,
}

/// Place a new order.
///
/// # Errors
///
/// Returns 404 if the product does not exist, 400 if stock does not cover
/// the quantity.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateOrderInput>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    let order = OrderRepository::new(state.pool()).create(&input).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// Change an order's quantity, re-balancing the product's stock.
///
/// # Errors
///
/// Returns 404 if the order or product does not exist, 400 if the adjusted
/// delta would drive stock below zero.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(input): Json<UpdateOrderInput>,
) -> Result<Json<Order>, AppError> {
    match OrderRepository::new(state.pool())
        .update_quantity(id, input.quantity)
        .await
    {
        Ok(order) => Ok(Json(order)),
        Err(StockError::InsufficientStock) => {
            Err(AppError::BadRequest("Insufficient stock for update".to_owned()))
        }
        Err(e) => Err(e.into()),
    }
}

/// List all orders with user and product summaries. An empty order book
/// yields an empty list, not an error.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<OrderWithDetails>>, AppError> {
    let orders = OrderRepository::new(state.pool()).list_with_details().await?;
    Ok(Json(orders))
}

/// List orders placed within the last `days` days (default 7).
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub async fn recent(
    State(state): State<AppState>,
    Query(query): Query<RecentOrdersQuery>,
) -> Result<Json<Vec<OrderWithDetails>>, AppError> {
    let days = query.days.unwrap_or(DEFAULT_RECENT_WINDOW_DAYS);
    let orders = OrderRepository::new(state.pool()).list_recent(days).await?;
    Ok(Json(orders))
}

/// List a user's orders.
///
/// # Errors
///
/// Returns 404 when the user has placed no orders.
pub async fn user_orders(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<Vec<OrderWithDetails>>, AppError> {
    let orders = OrderRepository::new(state.pool()).list_for_user(user_id).await?;

    if orders.is_empty() {
        return Err(AppError::NotFound("No orders found for this user".to_owned()));
    }

    Ok(Json(orders))
}

/// List the distinct users who have ordered a product.
///
/// # Errors
///
/// Returns 404 when no orders reference the product.
pub async fn product_buyers(
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
) -> Result<Json<Vec<UserSummary>>, AppError> {
    let buyers = OrderRepository::new(state.pool())
        .buyers_for_product(product_id)
        .await?;

    if buyers.is_empty() {
        return Err(AppError::NotFound("No users found for this product".to_owned()));
    }

    Ok(Json(buyers))
}

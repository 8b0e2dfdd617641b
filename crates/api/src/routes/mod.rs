//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! # Products
//! POST /api/products                          - Create product
//! PUT  /api/products/{id}                     - Update product (id format validated first)
//! GET  /api/products                          - List products
//! GET  /api/products/total-stock              - Total stock across all products
//! GET  /api/products/{id}                     - Get product (id format validated first)
//!
//! # Orders
//! POST /api/orders                            - Place order (decrements stock)
//! PUT  /api/orders/{id}                       - Change order quantity (re-balances stock)
//! GET  /api/orders                            - List orders with user/product summaries
//! GET  /api/orders/recent                     - Orders within the last N days (default 7)
//! GET  /api/orders/user/{user_id}             - A user's orders (404 when none)
//! GET  /api/orders/product/{product_id}/users - Distinct buyers of a product (404 when none)
//! ```

pub mod orders;
pub mod products;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::middleware::validate_id;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    // Only the {id} routes get the format check, mirroring the original
    // router; /total-stock is static and must be registered alongside.
    let by_id = Router::new()
        .route("/{id}", get(products::show).put(products::update))
        .route_layer(middleware::from_fn(validate_id));

    Router::new()
        .route("/", get(products::index).post(products::create))
        .route("/total-stock", get(products::total_stock))
        .merge(by_id)
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(orders::create).get(orders::index))
        .route("/{id}", put(orders::update))
        .route("/recent", get(orders::recent))
        .route("/user/{user_id}", get(orders::user_orders))
        .route("/product/{product_id}/users", get(orders::product_buyers))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/products", product_routes())
        .nest("/api/orders", order_routes())
}

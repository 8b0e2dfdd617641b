//! Database operations for orders and the stock they consume.
//!
//! Order quantity and product `stock_quantity` are denormalized fields that
//! must move in lockstep. Every mutation path here adjusts stock with a
//! single conditional `UPDATE` inside a transaction, so the availability
//! check and the adjustment are one atomic statement and two concurrent
//! requests cannot both pass the check and oversell (the lost-update race a
//! naive read-then-write sequence would allow).

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use thiserror::Error;
use uuid::Uuid;

use stockroom_core::{Email, OrderId, ProductId, UserId};

use super::RepositoryError;
use crate::models::order::{
    CreateOrderInput, Order, OrderWithDetails, ProductSummary, UserSummary,
};

/// Failures from order placement and stock adjustment.
#[derive(Debug, Error)]
pub enum StockError {
    /// The referenced product does not exist.
    #[error("product not found")]
    ProductNotFound,

    /// The referenced order does not exist.
    #[error("order not found")]
    OrderNotFound,

    /// The adjustment would drive the product's stock below zero.
    #[error("insufficient stock")]
    InsufficientStock,

    /// Underlying storage failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<sqlx::Error> for StockError {
    fn from(e: sqlx::Error) -> Self {
        Self::Repository(RepositoryError::Database(e))
    }
}

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for bare order queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    user_id: Uuid,
    product_id: Uuid,
    quantity: i32,
    order_date: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: OrderId::new(row.id),
            user_id: UserId::new(row.user_id),
            product_id: ProductId::new(row.product_id),
            quantity: row.quantity,
            order_date: row.order_date,
        }
    }
}

/// Internal row type for orders joined with user/product summaries.
///
/// User columns are nullable: the user reference is never verified at
/// placement time, so it may match no stored user.
#[derive(Debug, sqlx::FromRow)]
struct OrderDetailsRow {
    id: Uuid,
    user_id: Uuid,
    product_id: Uuid,
    quantity: i32,
    order_date: DateTime<Utc>,
    user_name: Option<String>,
    user_email: Option<String>,
    product_name: String,
    product_price: Decimal,
}

/// Internal row type for buyer lookups.
#[derive(Debug, sqlx::FromRow)]
struct BuyerRow {
    id: Uuid,
    name: String,
    email: String,
}

const ORDER_COLUMNS: &str = "id, user_id, product_id, quantity, order_date";

const ORDER_DETAILS_QUERY: &str = "SELECT \
        o.id, o.user_id, o.product_id, o.quantity, o.order_date, \
        u.name AS user_name, u.email AS user_email, \
        p.name AS product_name, p.price AS product_price \
     FROM orders o \
     LEFT JOIN users u ON u.id = o.user_id \
     INNER JOIN products p ON p.id = o.product_id";

fn parse_email(raw: &str) -> Result<Email, RepositoryError> {
    Email::parse(raw)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid email in database: {e}")))
}

fn into_details(row: OrderDetailsRow) -> Result<OrderWithDetails, RepositoryError> {
    let user = match (row.user_name, row.user_email) {
        (Some(name), Some(email)) => Some(UserSummary {
            id: UserId::new(row.user_id),
            name,
            email: parse_email(&email)?,
        }),
        _ => None,
    };

    Ok(OrderWithDetails {
        id: OrderId::new(row.id),
        user,
        product: ProductSummary {
            id: ProductId::new(row.product_id),
            name: row.product_name,
            price: row.product_price,
        },
        quantity: row.quantity,
        order_date: row.order_date,
    })
}

/// Collapse buyer rows to one entry per user, preserving first-seen order.
fn dedupe_first_seen(rows: Vec<BuyerRow>) -> Result<Vec<UserSummary>, RepositoryError> {
    let mut seen = HashSet::with_capacity(rows.len());
    let mut buyers = Vec::new();

    for row in rows {
        if seen.insert(row.id) {
            buyers.push(UserSummary {
                id: UserId::new(row.id),
                name: row.name,
                email: parse_email(&row.email)?,
            });
        }
    }

    Ok(buyers)
}

/// Cutoff timestamp for the recent-orders window.
///
/// An out-of-range window clamps to the minimum representable instant, which
/// makes the filter a no-op rather than an error.
fn recent_cutoff(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    Duration::try_days(days)
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for order database operations and stock upkeep.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Place an order, decrementing the product's stock by the ordered
    /// quantity. Both effects commit together or not at all.
    ///
    /// The quantity itself is not validated; placement relies solely on the
    /// stock condition `stock_quantity >= quantity`.
    ///
    /// # Errors
    ///
    /// Returns `StockError::ProductNotFound` if the product does not exist,
    /// `StockError::InsufficientStock` if the product's stock does not cover
    /// the quantity, or `StockError::Repository` for storage failures.
    pub async fn create(&self, input: &CreateOrderInput) -> Result<Order, StockError> {
        let mut tx = self.pool.begin().await.map_err(RepositoryError::from)?;

        let adjusted = sqlx::query_scalar::<_, Uuid>(
            "UPDATE products \
             SET stock_quantity = stock_quantity - $2, updated_at = now() \
             WHERE id = $1 AND stock_quantity >= $2 \
             RETURNING id",
        )
        .bind(input.product.as_uuid())
        .bind(input.quantity)
        .fetch_optional(&mut *tx)
        .await?;

        if adjusted.is_none() {
            return Err(stock_failure(&mut tx, input.product).await);
        }

        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "INSERT INTO orders (user_id, product_id, quantity) \
             VALUES ($1, $2, $3) \
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(input.user.as_uuid())
        .bind(input.product.as_uuid())
        .bind(input.quantity)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await.map_err(RepositoryError::from)?;
        Ok(row.into())
    }

    /// Replace an order's quantity, re-balancing the product's stock by
    /// `new_quantity - order.quantity`. The delta may be negative, in which
    /// case stock increases. Both effects commit together or not at all.
    ///
    /// The order row is locked for the duration of the transaction so
    /// concurrent updates of the same order always compute their delta
    /// against the committed quantity.
    ///
    /// # Errors
    ///
    /// Returns `StockError::OrderNotFound` / `StockError::ProductNotFound`
    /// if either record is missing, `StockError::InsufficientStock` if the
    /// delta would drive stock below zero, or `StockError::Repository` for
    /// storage failures.
    pub async fn update_quantity(
        &self,
        id: OrderId,
        new_quantity: i32,
    ) -> Result<Order, StockError> {
        let mut tx = self.pool.begin().await.map_err(RepositoryError::from)?;

        let order = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 FOR UPDATE"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StockError::OrderNotFound)?;

        let delta = new_quantity - order.quantity;

        let adjusted = sqlx::query_scalar::<_, Uuid>(
            "UPDATE products \
             SET stock_quantity = stock_quantity - $2, updated_at = now() \
             WHERE id = $1 AND stock_quantity - $2 >= 0 \
             RETURNING id",
        )
        .bind(order.product_id)
        .bind(delta)
        .fetch_optional(&mut *tx)
        .await?;

        if adjusted.is_none() {
            return Err(stock_failure(&mut tx, ProductId::new(order.product_id)).await);
        }

        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "UPDATE orders SET quantity = $2 WHERE id = $1 RETURNING {ORDER_COLUMNS}"
        ))
        .bind(id.as_uuid())
        .bind(new_quantity)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await.map_err(RepositoryError::from)?;
        Ok(row.into())
    }

    /// List all orders with user and product summaries.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` for an invalid stored email.
    pub async fn list_with_details(&self) -> Result<Vec<OrderWithDetails>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderDetailsRow>(&format!(
            "{ORDER_DETAILS_QUERY} ORDER BY o.order_date ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(into_details).collect()
    }

    /// List orders placed within the last `days` days, with summaries.
    ///
    /// The cutoff is computed from wall-clock now at call time.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` for an invalid stored email.
    pub async fn list_recent(&self, days: i64) -> Result<Vec<OrderWithDetails>, RepositoryError> {
        let cutoff = recent_cutoff(Utc::now(), days);

        let rows = sqlx::query_as::<_, OrderDetailsRow>(&format!(
            "{ORDER_DETAILS_QUERY} WHERE o.order_date >= $1 ORDER BY o.order_date ASC"
        ))
        .bind(cutoff)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(into_details).collect()
    }

    /// List a user's orders with summaries.
    ///
    /// Returns an empty list when the user has no orders; the route layer
    /// decides how to surface that.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` for an invalid stored email.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<OrderWithDetails>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderDetailsRow>(&format!(
            "{ORDER_DETAILS_QUERY} WHERE o.user_id = $1 ORDER BY o.order_date ASC"
        ))
        .bind(user_id.as_uuid())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(into_details).collect()
    }

    /// Distinct users who have ordered the given product, first buyer first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` for an invalid stored email.
    pub async fn buyers_for_product(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<UserSummary>, RepositoryError> {
        let rows = sqlx::query_as::<_, BuyerRow>(
            "SELECT u.id, u.name, u.email \
             FROM orders o \
             INNER JOIN users u ON u.id = o.user_id \
             WHERE o.product_id = $1 \
             ORDER BY o.order_date ASC",
        )
        .bind(product_id.as_uuid())
        .fetch_all(self.pool)
        .await?;

        dedupe_first_seen(rows)
    }
}

/// Classify a failed conditional stock adjustment: the product is either
/// missing entirely or short on stock.
async fn stock_failure(tx: &mut Transaction<'_, Postgres>, product_id: ProductId) -> StockError {
    let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM products WHERE id = $1)")
        .bind(product_id.as_uuid())
        .fetch_one(&mut **tx)
        .await;

    match exists {
        Ok(true) => StockError::InsufficientStock,
        Ok(false) => StockError::ProductNotFound,
        Err(e) => e.into(),
    }
}

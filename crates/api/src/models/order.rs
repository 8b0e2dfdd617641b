//! Order domain models.
//!
//! An order references a user and a product by ID. Listing endpoints return
//! [`OrderWithDetails`], where the bare references are replaced by summary
//! views of the referenced records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockroom_core::{Email, OrderId, ProductId, UserId};

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// User who placed the order. Not verified at placement time.
    #[serde(rename = "user")]
    pub user_id: UserId,
    /// Product the order is for.
    #[serde(rename = "product")]
    pub product_id: ProductId,
    /// Units ordered.
    pub quantity: i32,
    /// When the order was placed.
    pub order_date: DateTime<Utc>,
}

/// Summary view of a user, for order enrichment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: Email,
}

/// Summary view of a product, for order enrichment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Decimal,
}

/// An order with its user and product references expanded.
///
/// `user` is `None` when the order's user reference matches no stored user
/// (placement never verifies it); such orders serialize with `"user": null`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderWithDetails {
    /// Unique order ID.
    pub id: OrderId,
    /// User who placed the order, if the reference resolves.
    pub user: Option<UserSummary>,
    /// Product the order is for.
    pub product: ProductSummary,
    /// Units ordered.
    pub quantity: i32,
    /// When the order was placed.
    pub order_date: DateTime<Utc>,
}

/// Input for placing an order.
///
/// `quantity` is intentionally accepted as any integer: placement relies on
/// the stock condition alone, matching the service's observed behavior.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderInput {
    /// User placing the order.
    pub user: UserId,
    /// Product to order.
    pub product: ProductId,
    /// Units to order.
    pub quantity: i32,
}

/// Input for changing an order's quantity.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOrderInput {
    /// Replacement quantity.
    pub quantity: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_create_input_wire_names() {
        let user = Uuid::new_v4();
        let product = Uuid::new_v4();
        let body = format!(r#"{{"user": "{user}", "product": "{product}", "quantity": 3}}"#);

        let input: CreateOrderInput = serde_json::from_str(&body).expect("valid body");
        assert_eq!(input.user.as_uuid(), user);
        assert_eq!(input.product.as_uuid(), product);
        assert_eq!(input.quantity, 3);
    }

    #[test]
    fn test_create_input_rejects_malformed_ids() {
        let body = r#"{"user": "not-an-id", "product": "also-bad", "quantity": 3}"#;
        assert!(serde_json::from_str::<CreateOrderInput>(body).is_err());
    }

    #[test]
    fn test_order_serializes_with_original_field_names() {
        let order = Order {
            id: OrderId::generate(),
            user_id: UserId::generate(),
            product_id: ProductId::generate(),
            quantity: 2,
            order_date: Utc::now(),
        };

        let json = serde_json::to_value(&order).expect("serializes");
        assert!(json.get("user").is_some());
        assert!(json.get("product").is_some());
        assert!(json.get("orderDate").is_some());
        assert!(json.get("user_id").is_none());
        assert!(json.get("order_date").is_none());
    }

    #[test]
    fn test_details_serialize_missing_user_as_null() {
        let details = OrderWithDetails {
            id: OrderId::generate(),
            user: None,
            product: ProductSummary {
                id: ProductId::generate(),
                name: "Widget".to_owned(),
                price: Decimal::new(1999, 2),
            },
            quantity: 1,
            order_date: Utc::now(),
        };

        let json = serde_json::to_value(&details).expect("serializes");
        assert!(json["user"].is_null());
        assert_eq!(json["product"]["name"], "Widget");
    }
}

//! Product domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockroom_core::ProductId;

/// A catalog product with its remaining stock.
///
/// `stock_quantity` is a maintained counter: every order mutation adjusts it
/// through the order repository, and it must never go below zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Free-form category label.
    pub category: String,
    /// Unit price.
    pub price: Decimal,
    /// Units currently in stock.
    pub stock_quantity: i32,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductInput {
    /// Display name.
    pub name: String,
    /// Free-form category label.
    pub category: String,
    /// Unit price.
    pub price: Decimal,
    /// Initial units in stock.
    pub stock_quantity: i32,
}

/// Input for a partial product update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductInput {
    /// Display name.
    pub name: Option<String>,
    /// Free-form category label.
    pub category: Option<String>,
    /// Unit price.
    pub price: Option<Decimal>,
    /// Units in stock.
    pub stock_quantity: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_input_uses_camel_case_wire_names() {
        let input: CreateProductInput = serde_json::from_str(
            r#"{"name": "Widget", "category": "tools", "price": "9.99", "stockQuantity": 10}"#,
        )
        .expect("valid body");

        assert_eq!(input.name, "Widget");
        assert_eq!(input.stock_quantity, 10);
    }

    #[test]
    fn test_update_input_fields_default_to_absent() {
        let input: UpdateProductInput = serde_json::from_str(r#"{"price": "12.50"}"#).expect("ok");
        assert!(input.name.is_none());
        assert!(input.category.is_none());
        assert!(input.stock_quantity.is_none());
        assert!(input.price.is_some());
    }

    #[test]
    fn test_product_serializes_stock_quantity_camel_cased() {
        let product = Product {
            id: ProductId::generate(),
            name: "Widget".to_owned(),
            category: "tools".to_owned(),
            price: Decimal::new(999, 2),
            stock_quantity: 7,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&product).expect("serializes");
        assert_eq!(json["stockQuantity"], 7);
        assert!(json.get("stock_quantity").is_none());
    }
}

//! Domain models and per-operation request inputs.
//!
//! These types represent validated domain objects separate from database row
//! types. API-facing structs keep the service's original camelCase wire
//! names (`stockQuantity`, `orderDate`).

pub mod order;
pub mod product;
pub mod user;

pub use order::{
    CreateOrderInput, Order, OrderWithDetails, ProductSummary, UpdateOrderInput, UserSummary,
};
pub use product::{CreateProductInput, Product, UpdateProductInput};
pub use user::User;

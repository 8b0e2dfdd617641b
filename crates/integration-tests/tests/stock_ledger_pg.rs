//! Stock ledger tests against a real `PostgreSQL` instance.
//!
//! Ignored by default; they need a provisioned, migratable database:
//!
//! ```bash
//! export STOCKROOM_TEST_DATABASE_URL=postgres://localhost/stockroom_test
//! cargo test -p stockroom-integration-tests -- --ignored
//! ```
//!
//! Each test seeds its own rows, so they can run in any order on a shared
//! database.

use rust_decimal::Decimal;
use sqlx::PgPool;

use stockroom_api::db::{OrderRepository, ProductRepository, StockError, UserRepository};
use stockroom_api::models::order::CreateOrderInput;
use stockroom_api::models::product::CreateProductInput;
use stockroom_core::{Email, UserId};

async fn test_pool() -> PgPool {
    let url = std::env::var("STOCKROOM_TEST_DATABASE_URL")
        .expect("STOCKROOM_TEST_DATABASE_URL must be set for database tests");

    let pool = PgPool::connect(&url).await.expect("database reachable");
    sqlx::migrate!("../api/migrations")
        .run(&pool)
        .await
        .expect("migrations apply");

    pool
}

async fn seed_product(pool: &PgPool, name: &str, stock: i32) -> stockroom_core::ProductId {
    let product = ProductRepository::new(pool)
        .create(&CreateProductInput {
            name: name.to_owned(),
            category: "test".to_owned(),
            price: Decimal::new(500, 2),
            stock_quantity: stock,
        })
        .await
        .expect("product created");

    product.id
}

async fn seed_user(pool: &PgPool, name: &str) -> UserId {
    // Random local part keeps re-runs clear of the unique-email constraint.
    let email = Email::parse(&format!("{}@example.com", UserId::generate())).expect("valid email");
    let user = UserRepository::new(pool)
        .create(name, &email)
        .await
        .expect("user created");

    user.id
}

async fn stock_of(pool: &PgPool, id: stockroom_core::ProductId) -> i32 {
    ProductRepository::new(pool)
        .get(id)
        .await
        .expect("query ok")
        .expect("product exists")
        .stock_quantity
}

#[tokio::test]
#[ignore = "requires a provisioned database"]
async fn test_order_lifecycle_rebalances_stock() {
    let pool = test_pool().await;
    let user = seed_user(&pool, "Scenario User").await;
    let widget = seed_product(&pool, "Widget", 10).await;
    let orders = OrderRepository::new(&pool);

    // Place an order for 3: stock 10 -> 7.
    let order = orders
        .create(&CreateOrderInput {
            user,
            product: widget,
            quantity: 3,
        })
        .await
        .expect("order placed");
    assert_eq!(order.quantity, 3);
    assert_eq!(stock_of(&pool, widget).await, 7);

    // Raise to 5: stock 7 -> 5.
    let order = orders
        .update_quantity(order.id, 5)
        .await
        .expect("update applies");
    assert_eq!(order.quantity, 5);
    assert_eq!(stock_of(&pool, widget).await, 5);

    // Re-applying the same quantity is a stock no-op.
    orders
        .update_quantity(order.id, 5)
        .await
        .expect("idempotent re-application");
    assert_eq!(stock_of(&pool, widget).await, 5);

    // Lower to 1: the negative delta gives stock back, 5 -> 9.
    let order = orders
        .update_quantity(order.id, 1)
        .await
        .expect("reduction applies");
    assert_eq!(order.quantity, 1);
    assert_eq!(stock_of(&pool, widget).await, 9);
}

#[tokio::test]
#[ignore = "requires a provisioned database"]
async fn test_insufficient_stock_leaves_stock_untouched() {
    let pool = test_pool().await;
    let user = seed_user(&pool, "Greedy User").await;
    let product = seed_product(&pool, "Scarce Item", 10).await;

    let err = OrderRepository::new(&pool)
        .create(&CreateOrderInput {
            user,
            product,
            quantity: 100,
        })
        .await
        .expect_err("cannot oversell");

    assert!(matches!(err, StockError::InsufficientStock));
    assert_eq!(stock_of(&pool, product).await, 10);
}

#[tokio::test]
#[ignore = "requires a provisioned database"]
async fn test_missing_product_is_reported_before_stock() {
    let pool = test_pool().await;
    let user = seed_user(&pool, "Lost User").await;

    let err = OrderRepository::new(&pool)
        .create(&CreateOrderInput {
            user,
            product: stockroom_core::ProductId::generate(),
            quantity: 1,
        })
        .await
        .expect_err("no such product");

    assert!(matches!(err, StockError::ProductNotFound));
}

#[tokio::test]
#[ignore = "requires a provisioned database"]
async fn test_buyers_are_deduplicated_per_product() {
    let pool = test_pool().await;
    let repeat_buyer = seed_user(&pool, "Repeat Buyer").await;
    let other_buyer = seed_user(&pool, "Other Buyer").await;
    let product = seed_product(&pool, "Popular Item", 50).await;
    let orders = OrderRepository::new(&pool);

    for user in [repeat_buyer, repeat_buyer, other_buyer] {
        orders
            .create(&CreateOrderInput {
                user,
                product,
                quantity: 1,
            })
            .await
            .expect("order placed");
    }

    let buyers = orders
        .buyers_for_product(product)
        .await
        .expect("buyers listed");

    assert_eq!(buyers.len(), 2);
    assert_eq!(buyers.first().map(|b| b.id), Some(repeat_buyer));
    assert_eq!(buyers.get(1).map(|b| b.id), Some(other_buyer));
}

#[tokio::test]
#[ignore = "requires a provisioned database"]
async fn test_user_with_no_orders_yields_empty_list() {
    let pool = test_pool().await;
    let loner = seed_user(&pool, "No Orders Yet").await;

    // The repository reports the empty set; the route layer turns it into
    // a 404. Contrast with the all-orders listing, which stays a 200 + [].
    let orders = OrderRepository::new(&pool)
        .list_for_user(loner)
        .await
        .expect("query ok");
    assert!(orders.is_empty());
}

#[tokio::test]
#[ignore = "requires a provisioned database"]
async fn test_total_stock_sums_catalog() {
    let pool = test_pool().await;
    let products = ProductRepository::new(&pool);

    let before = products.total_stock().await.expect("aggregation ok");
    seed_product(&pool, "Counted Item A", 7).await;
    seed_product(&pool, "Counted Item B", 8).await;
    let after = products.total_stock().await.expect("aggregation ok");

    assert_eq!(after - before, 15);
}

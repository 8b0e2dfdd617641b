//! Seed the database with sample users and products.
//!
//! Intended for local development: gives the API something to place orders
//! against. Safe to re-run; users that already exist are skipped.

use rust_decimal::Decimal;
use secrecy::SecretString;
use thiserror::Error;

use stockroom_api::db::{self, ProductRepository, RepositoryError, UserRepository};
use stockroom_api::models::product::CreateProductInput;
use stockroom_core::Email;

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Invalid seed data: {0}")]
    InvalidSeedData(String),
}

const SAMPLE_USERS: &[(&str, &str)] = &[
    ("Amara Osei", "amara@example.com"),
    ("Jonas Lindqvist", "jonas@example.com"),
    ("Priya Raman", "priya@example.com"),
];

const SAMPLE_PRODUCTS: &[(&str, &str, &str, i32)] = &[
    ("Widget", "tools", "9.99", 100),
    ("Sprocket", "tools", "4.25", 250),
    ("Gasket Kit", "parts", "19.50", 40),
    ("Flux Capacitor", "electronics", "129.00", 5),
];

/// Insert sample users and products.
///
/// # Errors
///
/// Returns `SeedError` if the database URL is missing, the connection fails,
/// or an insert fails for a reason other than an already-seeded user.
pub async fn run() -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("STOCKROOM_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| SeedError::MissingEnvVar("STOCKROOM_DATABASE_URL"))?;

    let pool = db::create_pool(&SecretString::from(database_url)).await?;

    let users = UserRepository::new(&pool);
    for &(name, email) in SAMPLE_USERS {
        let email = Email::parse(email).map_err(|e| SeedError::InvalidSeedData(e.to_string()))?;

        match users.create(name, &email).await {
            Ok(user) => tracing::info!(%user.id, name, "Seeded user"),
            Err(RepositoryError::Conflict(_)) => {
                tracing::info!(name, "User already seeded, skipping");
            }
            Err(e) => return Err(e.into()),
        }
    }

    let products = ProductRepository::new(&pool);
    for &(name, category, price, stock_quantity) in SAMPLE_PRODUCTS {
        let price = price
            .parse::<Decimal>()
            .map_err(|e| SeedError::InvalidSeedData(e.to_string()))?;

        let input = CreateProductInput {
            name: name.to_owned(),
            category: category.to_owned(),
            price,
            stock_quantity,
        };

        let product = products.create(&input).await?;
        tracing::info!(%product.id, name, stock = product.stock_quantity, "Seeded product");
    }

    tracing::info!("Seeding complete!");
    Ok(())
}

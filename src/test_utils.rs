//! Shared test utilities for `trade-desk`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{order, organization, product},
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test organization with a buyer type.
pub async fn create_test_organization(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::organization::Model> {
    organization::create_organization(
        db,
        name.to_string(),
        Some(entities::OrganizationType::Buyer),
    )
    .await
}

/// Creates a test product with the canonical apple fixture values.
pub async fn create_test_product(
    db: &DatabaseConnection,
    organization_id: i64,
) -> Result<entities::product::Model> {
    product::create_product(
        db,
        "Apples".to_string(),
        "Golden".to_string(),
        "18KG Boxes".to_string(),
        organization_id,
    )
    .await
}

/// Creates a test buy order with a single 100KG line item for `product_id`.
pub async fn create_test_order(
    db: &DatabaseConnection,
    organization_id: i64,
    product_id: i64,
) -> Result<order::OrderAggregate> {
    order::create_order(
        db,
        entities::OrderType::Buy,
        organization_id,
        vec![],
        vec![order::LineItemRequest {
            product_id,
            volume: "100KG".to_string(),
            price_per_unit: "1.5USD/1KG".to_string(),
        }],
    )
    .await
}

/// Sets up a complete test environment with an organization.
/// Returns (db, organization) for common test scenarios.
pub async fn setup_with_organization()
-> Result<(DatabaseConnection, entities::organization::Model)> {
    let db = setup_test_db().await?;
    let organization = create_test_organization(&db, "test-org").await?;
    Ok((db, organization))
}

/// Sets up a complete test environment with organization and product.
/// Returns (db, organization, product) for aggregate-related tests.
pub async fn setup_with_product() -> Result<(
    DatabaseConnection,
    entities::organization::Model,
    entities::product::Model,
)> {
    let db = setup_test_db().await?;
    let organization = create_test_organization(&db, "test-org").await?;
    let product = create_test_product(&db, organization.id).await?;
    Ok((db, organization, product))
}

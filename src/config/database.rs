//! Database configuration module.
//!
//! Handles the `SQLite` connection and table creation using `SeaORM`. Tables
//! are generated with `Schema::create_table_from_entity`, so the database
//! schema always matches the entity definitions in `crate::entities` without
//! hand-written SQL or migration files.

use crate::entities::{Order, OrderProduct, Organization, Product, ReferencedOrder};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from the environment or falls back to a local file.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/trade_desk.sqlite?mode=rwc".to_string())
}

/// Establishes a connection to the database named by `DATABASE_URL`.
///
/// # Errors
/// Returns an error if the connection cannot be established.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates all tables from the entity definitions.
///
/// Entities are created parents-first so the generated foreign keys always
/// point at existing tables: organizations, then products and orders, then
/// the order-owned tables.
///
/// # Errors
/// Returns an error if any of the create-table statements fails.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let organization_table = schema.create_table_from_entity(Organization);
    let product_table = schema.create_table_from_entity(Product);
    let order_table = schema.create_table_from_entity(Order);
    let referenced_order_table = schema.create_table_from_entity(ReferencedOrder);
    let order_product_table = schema.create_table_from_entity(OrderProduct);

    db.execute(builder.build(&organization_table)).await?;
    db.execute(builder.build(&product_table)).await?;
    db.execute(builder.build(&order_table)).await?;
    db.execute(builder.build(&referenced_order_table)).await?;
    db.execute(builder.build(&order_product_table)).await?;

    Ok(())
}

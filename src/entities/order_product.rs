//! Order-product entity - A line item inside an order.
//!
//! A line item pairs a product with a volume and a price per unit. Both are
//! opaque strings (e.g., `"100KG"`, `"1.5USD/1KG"`) stored and returned
//! verbatim; no unit parsing happens anywhere in the system. Line items are
//! owned exclusively by their order: they are replaced wholesale on order
//! update and removed with the order row. The product reference is nullable
//! so a line item survives the physical removal of its product.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Line item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_products")]
pub struct Model {
    /// Unique identifier for the line item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Traded volume, stored verbatim (e.g., "100KG")
    pub volume: String,
    /// Price per unit, stored verbatim (e.g., "1.5USD/1KG")
    pub price_per_unit: String,
    /// ID of the product being traded, if the product row still exists
    pub product_id: Option<i64>,
    /// ID of the order that owns this line item
    pub order_id: i64,
    /// When the line item was created
    pub created_at: DateTimeUtc,
    /// When the line item was last modified
    pub updated_at: DateTimeUtc,
    /// Soft delete marker
    pub deleted_at: Option<DateTimeUtc>,
}

/// Defines relationships between line items and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line item may point at one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Product,
    /// Each line item belongs to one order
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Order,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! Product entity - A tradable good owned by an organization.
//!
//! Products describe what is being traded (category, variety, packaging) and
//! are referenced by order line items. Removing a product is a soft delete;
//! line items that point at it keep their row and lose the reference only if
//! the product row is ever physically removed.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Product category (e.g., "Apples")
    pub category: String,
    /// Variety within the category (e.g., "Golden")
    pub variety: String,
    /// Packaging description (e.g., "18KG Boxes")
    pub packaging: String,
    /// ID of the organization that owns this product
    pub organization_id: i64,
    /// When the product was created
    pub created_at: DateTimeUtc,
    /// When the product was last modified
    pub updated_at: DateTimeUtc,
    /// Soft delete marker - set when the product is removed, row is preserved
    pub deleted_at: Option<DateTimeUtc>,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each product belongs to one organization
    #[sea_orm(
        belongs_to = "super::organization::Entity",
        from = "Column::OrganizationId",
        to = "super::organization::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Organization,
    /// One product appears in many order line items
    #[sea_orm(has_many = "super::order_product::Entity")]
    OrderProducts,
}

impl Related<super::organization::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organization.def()
    }
}

impl Related<super::order_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderProducts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! Organization entity - A trading party that owns products and orders.
//!
//! Organizations are the root of the ownership graph: every product belongs to
//! exactly one organization, and every order is placed on behalf of one.
//! Deletion is always soft (a `deleted_at` stamp), so history stays intact.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Whether an organization participates in trades as a buyer or a seller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum OrganizationType {
    /// Buys produce from sellers
    #[sea_orm(string_value = "buyer")]
    Buyer,
    /// Offers produce for sale
    #[sea_orm(string_value = "seller")]
    Seller,
}

/// Organization database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "organizations")]
pub struct Model {
    /// Unique identifier for the organization
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name, at least three characters
    pub name: String,
    /// Trading role of the organization, if declared
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub kind: Option<OrganizationType>,
    /// When the organization was created
    pub created_at: DateTimeUtc,
    /// When the organization was last modified
    pub updated_at: DateTimeUtc,
    /// Soft delete marker - set when the organization is removed, row is preserved
    pub deleted_at: Option<DateTimeUtc>,
}

/// Defines relationships between Organization and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One organization owns many products
    #[sea_orm(has_many = "super::product::Entity")]
    Products,
    /// One organization owns many orders
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

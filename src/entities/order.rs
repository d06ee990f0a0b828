//! Order entity - A buy or sell order placed by an organization.
//!
//! An order is the root of an aggregate: it owns a list of line items
//! (`order_product` rows) and an edge set of references to other orders
//! (`referenced_orders` rows). The reference graph is traversed by id via the
//! explicit join table, never through nested object graphs, so cycles in the
//! data can never cause unbounded traversal.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Direction of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// A purchase order
    #[sea_orm(string_value = "buy")]
    Buy,
    /// A sale order
    #[sea_orm(string_value = "sell")]
    Sell,
}

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Whether this order buys or sells
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub kind: OrderType,
    /// ID of the organization that placed the order
    pub organization_id: i64,
    /// When the order was created
    pub created_at: DateTimeUtc,
    /// When the order was last modified
    pub updated_at: DateTimeUtc,
    /// Soft delete marker - set when the order is removed, row is preserved
    pub deleted_at: Option<DateTimeUtc>,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each order belongs to one organization
    #[sea_orm(
        belongs_to = "super::organization::Entity",
        from = "Column::OrganizationId",
        to = "super::organization::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Organization,
    /// One order owns many line items
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

/// Self many-to-many link from an order to the orders it references,
/// walked through the `referenced_orders` join table.
pub struct ReferencedOrders;

impl Linked for ReferencedOrders {
    type FromEntity = Entity;
    type ToEntity = Entity;

    fn link(&self) -> Vec<RelationDef> {
        vec![
            super::referenced_order::Relation::Order.def().rev(),
            super::referenced_order::Relation::ReferencedOrder.def(),
        ]
    }
}

impl ActiveModelBehavior for ActiveModel {}

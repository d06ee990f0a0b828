//! Referenced-order join table - The edge set of the order reference graph.
//!
//! Each row records that `order_id` references `referenced_order_id`. The
//! relation is directional; the inverse edge is not created automatically.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Referenced-order edge model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "referenced_orders")]
pub struct Model {
    /// The order holding the reference
    #[sea_orm(primary_key, auto_increment = false)]
    pub order_id: i64,
    /// The order being referenced
    #[sea_orm(primary_key, auto_increment = false)]
    pub referenced_order_id: i64,
}

/// Defines relationships between the edge table and orders
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The referencing side of the edge
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Order,
    /// The referenced side of the edge
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::ReferencedOrderId",
        to = "super::order::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    ReferencedOrder,
}

impl ActiveModelBehavior for ActiveModel {}

//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod order;
pub mod order_product;
pub mod organization;
pub mod product;
pub mod referenced_order;

// Re-export specific types to avoid conflicts
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel, OrderType};
pub use order_product::{
    Column as OrderProductColumn, Entity as OrderProduct, Model as OrderProductModel,
};
pub use organization::{
    Column as OrganizationColumn, Entity as Organization, Model as OrganizationModel,
    OrganizationType,
};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use referenced_order::{
    Column as ReferencedOrderColumn, Entity as ReferencedOrder, Model as ReferencedOrderModel,
};

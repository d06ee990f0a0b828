//! Order aggregate business logic - The core of the system.
//!
//! An order is created and mutated as one aggregate: the order row, its line
//! items, and its edge set of references to other orders. Every nested id in
//! a request (the owning organization, referenced orders, line-item products)
//! is resolved against live records before anything is written, and the whole
//! validate-then-persist sequence runs inside a single database transaction
//! so a failing step never leaves a partial aggregate behind.

use crate::{
    core::pagination::{self, Page},
    entities::{
        Order, OrderProduct, OrderType, ReferencedOrder, order, order_product, product,
        referenced_order,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

/// One requested line item: a product reference plus the opaque volume and
/// price strings that get stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LineItemRequest {
    /// Product being traded
    pub product_id: i64,
    /// Traded volume (e.g., "100KG")
    pub volume: String,
    /// Price per unit (e.g., "1.5USD/1KG")
    pub price_per_unit: String,
}

/// A persisted line item together with its product, if the product is still
/// live.
#[derive(Debug, Serialize)]
pub struct LineItem {
    /// The stored line item row
    #[serde(flatten)]
    pub item: order_product::Model,
    /// The product the line trades, None once the product is gone
    pub product: Option<product::Model>,
}

/// An order with its owned line items and the orders it references.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAggregate {
    /// The order record
    #[serde(flatten)]
    pub order: order::Model,
    /// Live orders this order references
    pub referenced_orders: Vec<order::Model>,
    /// Line items owned by this order
    pub line_items: Vec<LineItem>,
}

/// Resolves an order id to a live (non-deleted) record.
pub(crate) async fn find_active_order<C>(db: &C, id: i64) -> Result<order::Model>
where
    C: ConnectionTrait,
{
    Order::find_by_id(id)
        .filter(order::Column::DeletedAt.is_null())
        .one(db)
        .await?
        .ok_or(Error::OrderNotFound { id })
}

/// Creates an order aggregate.
///
/// Resolution order: organization, referenced orders, then products. All of
/// it, plus the inserts, runs in one transaction; a failure at any step
/// persists nothing.
///
/// # Errors
/// Returns `Error::OrganizationNotFound` for a dead `organization_id`,
/// `Error::InvalidOrderReference` if any id in `orders` does not resolve,
/// and `Error::InvalidProductReference` if any line item's product does not.
pub async fn create_order(
    db: &DatabaseConnection,
    kind: OrderType,
    organization_id: i64,
    orders: Vec<i64>,
    products: Vec<LineItemRequest>,
) -> Result<OrderAggregate> {
    let txn = db.begin().await?;

    let organization =
        crate::core::organization::find_active_organization(&txn, organization_id).await?;
    let referenced_orders = resolve_referenced_orders(&txn, &orders).await?;
    let line_specs = resolve_line_items(&txn, &products).await?;

    let now = chrono::Utc::now();
    let order = order::ActiveModel {
        kind: Set(kind),
        organization_id: Set(organization.id),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    insert_reference_edges(&txn, order.id, &referenced_orders).await?;
    let line_items = insert_line_items(&txn, order.id, line_specs).await?;

    txn.commit().await?;

    info!(
        order_id = order.id,
        organization_id,
        line_items = line_items.len(),
        "created order"
    );

    Ok(OrderAggregate {
        order,
        referenced_orders,
        line_items,
    })
}

/// Replaces an order's type, referenced orders, and line items wholesale.
///
/// The owning organization is never touched by an update. The previous line
/// items and reference edges are deleted before the new ones are inserted, so
/// nothing from the prior version is left dangling.
///
/// # Errors
/// Returns `Error::OrderNotFound` if `id` does not resolve to a live order,
/// `Error::SelfReference` if `orders` contains `id` itself (checked before
/// any other resolution), and the same reference errors as [`create_order`].
pub async fn update_order(
    db: &DatabaseConnection,
    id: i64,
    kind: OrderType,
    orders: Vec<i64>,
    products: Vec<LineItemRequest>,
) -> Result<OrderAggregate> {
    let txn = db.begin().await?;

    let existing = find_active_order(&txn, id).await?;

    if orders.contains(&id) {
        return Err(Error::SelfReference { id });
    }

    let referenced_orders = resolve_referenced_orders(&txn, &orders).await?;
    let line_specs = resolve_line_items(&txn, &products).await?;

    let mut active: order::ActiveModel = existing.into();
    active.kind = Set(kind);
    active.updated_at = Set(chrono::Utc::now());
    let order = active.update(&txn).await?;

    ReferencedOrder::delete_many()
        .filter(referenced_order::Column::OrderId.eq(id))
        .exec(&txn)
        .await?;
    OrderProduct::delete_many()
        .filter(order_product::Column::OrderId.eq(id))
        .exec(&txn)
        .await?;

    insert_reference_edges(&txn, id, &referenced_orders).await?;
    let line_items = insert_line_items(&txn, id, line_specs).await?;

    txn.commit().await?;

    info!(order_id = id, "updated order");

    Ok(OrderAggregate {
        order,
        referenced_orders,
        line_items,
    })
}

/// Retrieves one page of live orders, ordered by id.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_orders(
    db: &DatabaseConnection,
    page: u64,
    per_page: u64,
) -> Result<Page<order::Model>> {
    let select = Order::find()
        .filter(order::Column::DeletedAt.is_null())
        .order_by_asc(order::Column::Id);

    pagination::paginate(db, select, page, per_page).await
}

/// Fetches an order by id with its referenced orders and line items.
///
/// # Errors
/// Returns `Error::OrderNotFound` if the id does not resolve to a live
/// record.
pub async fn get_order_by_id(db: &DatabaseConnection, id: i64) -> Result<OrderAggregate> {
    let order = find_active_order(db, id).await?;
    load_aggregate(db, order).await
}

/// Soft deletes an order by stamping `deleted_at`.
///
/// Referenced orders, products, and the owning organization are untouched.
/// The order's line-item rows stay in place; they are only reachable by
/// primary key once the parent is hidden.
///
/// # Errors
/// Returns `Error::OrderNotFound` if the id does not resolve to a live
/// record.
pub async fn delete_order(db: &DatabaseConnection, id: i64) -> Result<order::Model> {
    let mut order: order::ActiveModel = find_active_order(db, id).await?.into();
    order.deleted_at = Set(Some(chrono::Utc::now()));

    let result = order.update(db).await?;
    info!(order_id = id, "soft-deleted order");
    Ok(result)
}

/// Bulk-resolves a request's `orders` list against live orders.
///
/// The resolved count must equal the requested count: an unknown id, a
/// soft-deleted order, or a duplicate id that collapses in the `IN` lookup
/// all surface as the same invalid-reference failure.
async fn resolve_referenced_orders<C>(db: &C, ids: &[i64]) -> Result<Vec<order::Model>>
where
    C: ConnectionTrait,
{
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let found = Order::find()
        .filter(order::Column::Id.is_in(ids.iter().copied()))
        .filter(order::Column::DeletedAt.is_null())
        .all(db)
        .await?;

    if found.len() != ids.len() {
        return Err(Error::InvalidOrderReference);
    }

    Ok(found)
}

/// Bulk-resolves the products behind a request's line items.
///
/// Product ids are deduplicated before the lookup, then each requested line
/// is paired with its product through a transient id map. Naming the same
/// product twice is legal and yields two independent line items.
async fn resolve_line_items<C>(
    db: &C,
    requests: &[LineItemRequest],
) -> Result<Vec<(LineItemRequest, product::Model)>>
where
    C: ConnectionTrait,
{
    let mut distinct_ids: Vec<i64> = Vec::new();
    for request in requests {
        if !distinct_ids.contains(&request.product_id) {
            distinct_ids.push(request.product_id);
        }
    }

    let found = crate::core::product::find_products_by_ids(db, &distinct_ids).await?;
    if found.len() != distinct_ids.len() {
        return Err(Error::InvalidProductReference);
    }

    let lookup: HashMap<i64, product::Model> =
        found.into_iter().map(|product| (product.id, product)).collect();

    let mut specs = Vec::with_capacity(requests.len());
    for request in requests {
        let product = lookup
            .get(&request.product_id)
            .cloned()
            .ok_or(Error::InvalidProductReference)?;
        specs.push((request.clone(), product));
    }

    Ok(specs)
}

async fn insert_reference_edges<C>(
    db: &C,
    order_id: i64,
    referenced: &[order::Model],
) -> Result<()>
where
    C: ConnectionTrait,
{
    if referenced.is_empty() {
        return Ok(());
    }

    let edges = referenced.iter().map(|target| referenced_order::ActiveModel {
        order_id: Set(order_id),
        referenced_order_id: Set(target.id),
    });
    ReferencedOrder::insert_many(edges)
        .exec_without_returning(db)
        .await?;

    Ok(())
}

async fn insert_line_items<C>(
    db: &C,
    order_id: i64,
    specs: Vec<(LineItemRequest, product::Model)>,
) -> Result<Vec<LineItem>>
where
    C: ConnectionTrait,
{
    let now = chrono::Utc::now();
    let mut line_items = Vec::with_capacity(specs.len());

    for (request, product) in specs {
        let item = order_product::ActiveModel {
            volume: Set(request.volume),
            price_per_unit: Set(request.price_per_unit),
            product_id: Set(Some(product.id)),
            order_id: Set(order_id),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await?;

        line_items.push(LineItem {
            item,
            product: Some(product),
        });
    }

    Ok(line_items)
}

async fn load_aggregate(db: &DatabaseConnection, order: order::Model) -> Result<OrderAggregate> {
    let referenced_orders = order
        .find_linked(order::ReferencedOrders)
        .filter(order::Column::DeletedAt.is_null())
        .all(db)
        .await?;

    let items = order.find_related(OrderProduct).all(db).await?;

    let product_ids: Vec<i64> = items.iter().filter_map(|item| item.product_id).collect();
    let products = crate::core::product::find_products_by_ids(db, &product_ids).await?;
    let lookup: HashMap<i64, product::Model> =
        products.into_iter().map(|product| (product.id, product)).collect();

    let line_items = items
        .into_iter()
        .map(|item| {
            let product = item.product_id.and_then(|pid| lookup.get(&pid).cloned());
            LineItem { item, product }
        })
        .collect();

    Ok(OrderAggregate {
        order,
        referenced_orders,
        line_items,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::OrganizationType;
    use crate::test_utils::*;

    fn line(product_id: i64, volume: &str, price: &str) -> LineItemRequest {
        LineItemRequest {
            product_id,
            volume: volume.to_string(),
            price_per_unit: price.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_order_builds_full_aggregate() -> Result<()> {
        let (db, organization, product) = setup_with_product().await?;

        let aggregate = create_order(
            &db,
            OrderType::Buy,
            organization.id,
            vec![],
            vec![
                line(product.id, "100KG", "1.5USD/1KG"),
                line(product.id, "50KG", "1.4USD/1KG"),
            ],
        )
        .await?;

        assert_eq!(aggregate.order.kind, OrderType::Buy);
        assert_eq!(aggregate.order.organization_id, organization.id);
        assert!(aggregate.referenced_orders.is_empty());

        // One line item per requested line, even for the same product
        assert_eq!(aggregate.line_items.len(), 2);
        for item in &aggregate.line_items {
            assert_eq!(item.item.product_id, Some(product.id));
            assert_eq!(item.product.as_ref().unwrap().id, product.id);
        }
        assert_eq!(aggregate.line_items[0].item.volume, "100KG");
        assert_eq!(aggregate.line_items[1].item.price_per_unit, "1.4USD/1KG");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_with_references() -> Result<()> {
        let (db, organization, product) = setup_with_product().await?;
        let first = create_test_order(&db, organization.id, product.id).await?;

        let second = create_order(
            &db,
            OrderType::Sell,
            organization.id,
            vec![first.order.id],
            vec![line(product.id, "30KG", "2USD/1KG")],
        )
        .await?;

        assert_eq!(second.referenced_orders.len(), 1);
        assert_eq!(second.referenced_orders[0].id, first.order.id);

        // The inverse direction is not populated automatically
        let first_again = get_order_by_id(&db, first.order.id).await?;
        assert!(first_again.referenced_orders.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_unknown_organization() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_order(&db, OrderType::Buy, 999, vec![], vec![]).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::OrganizationNotFound { id: 999 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_invalid_order_reference_persists_nothing() -> Result<()> {
        let (db, organization, product) = setup_with_product().await?;

        let result = create_order(
            &db,
            OrderType::Buy,
            organization.id,
            vec![12345],
            vec![line(product.id, "100KG", "1.5USD/1KG")],
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::InvalidOrderReference));

        // The failed create left no aggregate rows behind
        assert_eq!(Order::find().all(&db).await?.len(), 0);
        assert_eq!(OrderProduct::find().all(&db).await?.len(), 0);
        assert_eq!(ReferencedOrder::find().all(&db).await?.len(), 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_invalid_product_reference_persists_nothing() -> Result<()> {
        let (db, organization, product) = setup_with_product().await?;

        let result = create_order(
            &db,
            OrderType::Buy,
            organization.id,
            vec![],
            vec![
                line(product.id, "100KG", "1.5USD/1KG"),
                line(8888, "1KG", "1USD/1KG"),
            ],
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::InvalidProductReference));

        assert_eq!(Order::find().all(&db).await?.len(), 0);
        assert_eq!(OrderProduct::find().all(&db).await?.len(), 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_rejects_soft_deleted_reference() -> Result<()> {
        let (db, organization, product) = setup_with_product().await?;
        let doomed = create_test_order(&db, organization.id, product.id).await?;
        delete_order(&db, doomed.order.id).await?;

        let result = create_order(
            &db,
            OrderType::Buy,
            organization.id,
            vec![doomed.order.id],
            vec![line(product.id, "100KG", "1.5USD/1KG")],
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::InvalidOrderReference));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_rejects_duplicate_order_ids() -> Result<()> {
        let (db, organization, product) = setup_with_product().await?;
        let first = create_test_order(&db, organization.id, product.id).await?;

        // Duplicates collapse in the lookup, so the counts cannot match
        let result = create_order(
            &db,
            OrderType::Buy,
            organization.id,
            vec![first.order.id, first.order.id],
            vec![line(product.id, "100KG", "1.5USD/1KG")],
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::InvalidOrderReference));

        Ok(())
    }

    #[tokio::test]
    async fn test_round_trip_create_then_fetch() -> Result<()> {
        let (db, organization, product) = setup_with_product().await?;

        let created = create_order(
            &db,
            OrderType::Buy,
            organization.id,
            vec![],
            vec![line(product.id, "100KG", "1.5USD/1KG")],
        )
        .await?;

        let fetched = get_order_by_id(&db, created.order.id).await?;
        assert_eq!(fetched.order.organization_id, organization.id);
        assert_eq!(fetched.line_items.len(), 1);
        assert_eq!(fetched.line_items[0].item.volume, "100KG");
        assert_eq!(fetched.line_items[0].item.price_per_unit, "1.5USD/1KG");
        assert_eq!(fetched.line_items[0].product.as_ref().unwrap().id, product.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_order_rejects_self_reference() -> Result<()> {
        let (db, organization, product) = setup_with_product().await?;
        let aggregate = create_test_order(&db, organization.id, product.id).await?;
        let id = aggregate.order.id;

        // Self-reference fails no matter what else the payload contains
        let result = update_order(
            &db,
            id,
            OrderType::Buy,
            vec![id],
            vec![line(product.id, "100KG", "1.5USD/1KG")],
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::SelfReference { id: got } if got == id));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_order_replaces_collections() -> Result<()> {
        let (db, organization, product) = setup_with_product().await?;
        let other_product = create_test_product(&db, organization.id).await?;
        let referenced = create_test_order(&db, organization.id, product.id).await?;
        let aggregate = create_test_order(&db, organization.id, product.id).await?;

        let updated = update_order(
            &db,
            aggregate.order.id,
            OrderType::Sell,
            vec![referenced.order.id],
            vec![
                line(other_product.id, "10KG", "3USD/1KG"),
                line(other_product.id, "20KG", "3USD/1KG"),
            ],
        )
        .await?;

        assert_eq!(updated.order.kind, OrderType::Sell);
        assert_eq!(updated.order.organization_id, organization.id);
        assert_eq!(updated.referenced_orders.len(), 1);
        assert_eq!(updated.line_items.len(), 2);

        // No orphaned line items from the previous version
        let rows = OrderProduct::find()
            .filter(order_product::Column::OrderId.eq(aggregate.order.id))
            .all(&db)
            .await?;
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.product_id == Some(other_product.id)));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_order_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = update_order(&db, 404, OrderType::Buy, vec![], vec![]).await;
        assert!(matches!(result.unwrap_err(), Error::OrderNotFound { id: 404 }));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_soft_deleted_order_fails() -> Result<()> {
        let (db, organization, product) = setup_with_product().await?;
        let aggregate = create_test_order(&db, organization.id, product.id).await?;
        delete_order(&db, aggregate.order.id).await?;

        let result = update_order(&db, aggregate.order.id, OrderType::Buy, vec![], vec![]).await;
        assert!(matches!(result.unwrap_err(), Error::OrderNotFound { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_order_is_soft_and_keeps_line_items() -> Result<()> {
        let (db, organization, product) = setup_with_product().await?;
        let aggregate = create_test_order(&db, organization.id, product.id).await?;

        let deleted = delete_order(&db, aggregate.order.id).await?;
        assert!(deleted.deleted_at.is_some());

        let result = get_order_by_id(&db, aggregate.order.id).await;
        assert!(matches!(result.unwrap_err(), Error::OrderNotFound { .. }));

        let page = list_orders(&db, 1, 10).await?;
        assert!(page.items.is_empty());

        // Order row and its line items survive physically
        let row = Order::find_by_id(aggregate.order.id).one(&db).await?.unwrap();
        assert!(row.deleted_at.is_some());
        let items = OrderProduct::find()
            .filter(order_product::Column::OrderId.eq(aggregate.order.id))
            .all(&db)
            .await?;
        assert_eq!(items.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_deleting_product_detaches_it_from_aggregate_reads() -> Result<()> {
        let (db, organization, product) = setup_with_product().await?;
        let aggregate = create_test_order(&db, organization.id, product.id).await?;

        crate::core::product::delete_product(&db, product.id).await?;

        // The line item survives; its product reference resolves to nothing
        let fetched = get_order_by_id(&db, aggregate.order.id).await?;
        assert_eq!(fetched.line_items.len(), 1);
        assert!(fetched.line_items[0].product.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_list_orders_excludes_deleted() -> Result<()> {
        let (db, organization, product) = setup_with_product().await?;
        let keep = create_test_order(&db, organization.id, product.id).await?;
        let removed = create_test_order(&db, organization.id, product.id).await?;
        delete_order(&db, removed.order.id).await?;

        let page = list_orders(&db, 1, 10).await?;
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, keep.order.id);
        assert_eq!(page.meta.total_items, 1);

        Ok(())
    }

    // The end-to-end scenario from the API contract: organization, product,
    // order, then an update that tries to reference the order itself.
    #[tokio::test]
    async fn test_full_workflow_organization_product_order() -> Result<()> {
        let db = setup_test_db().await?;

        let organization = crate::core::organization::create_organization(
            &db,
            "test-org".to_string(),
            Some(OrganizationType::Buyer),
        )
        .await?;
        assert_eq!(organization.name, "test-org");

        let product = crate::core::product::create_product(
            &db,
            "Apples".to_string(),
            "Golden".to_string(),
            "18KG Boxes".to_string(),
            organization.id,
        )
        .await?;

        let order = create_order(
            &db,
            OrderType::Buy,
            organization.id,
            vec![],
            vec![line(product.id, "100KG", "1.5USD/1KG")],
        )
        .await?;
        assert_eq!(order.order.kind, OrderType::Buy);

        let result = update_order(
            &db,
            order.order.id,
            OrderType::Buy,
            vec![order.order.id],
            vec![line(product.id, "100KG", "1.5USD/1KG")],
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::SelfReference { .. }));

        Ok(())
    }
}

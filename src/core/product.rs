//! Product business logic - Handles all product-related operations.
//!
//! Products always belong to an organization, resolved through the
//! organization service at creation time and immutable afterwards. The bulk
//! id lookup used by the order aggregate pipeline lives here as well, so the
//! "does this product exist and is it live" rule has a single home.

use crate::{
    core::pagination::{self, Page},
    entities::{Product, product},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Creates a new product owned by an existing organization.
///
/// # Errors
/// Returns `Error::Validation` if any of the three fields is empty or shorter
/// than three characters, or `Error::OrganizationNotFound` if
/// `organization_id` does not resolve to a live organization.
pub async fn create_product(
    db: &DatabaseConnection,
    category: String,
    variety: String,
    packaging: String,
    organization_id: i64,
) -> Result<product::Model> {
    let category = crate::core::validate_text("category", &category)?;
    let variety = crate::core::validate_text("variety", &variety)?;
    let packaging = crate::core::validate_text("packaging", &packaging)?;

    let organization =
        crate::core::organization::find_active_organization(db, organization_id).await?;

    let now = chrono::Utc::now();
    let product = product::ActiveModel {
        category: Set(category),
        variety: Set(variety),
        packaging: Set(packaging),
        organization_id: Set(organization.id),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
        ..Default::default()
    };

    let result = product.insert(db).await?;
    info!(
        product_id = result.id,
        organization_id, "created product"
    );
    Ok(result)
}

/// Retrieves one page of live products, ordered by id.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_products(
    db: &DatabaseConnection,
    page: u64,
    per_page: u64,
) -> Result<Page<product::Model>> {
    let select = Product::find()
        .filter(product::Column::DeletedAt.is_null())
        .order_by_asc(product::Column::Id);

    pagination::paginate(db, select, page, per_page).await
}

/// Fetches a product by id.
///
/// # Errors
/// Returns `Error::ProductNotFound` if the id does not resolve to a live
/// record.
pub async fn get_product_by_id(db: &DatabaseConnection, id: i64) -> Result<product::Model> {
    find_active_product(db, id).await
}

/// Bulk lookup of live products by id, used when resolving order line items.
///
/// Duplicate ids collapse in the `IN` clause; callers compare the result
/// count against their distinct request count.
pub(crate) async fn find_products_by_ids<C>(db: &C, ids: &[i64]) -> Result<Vec<product::Model>>
where
    C: ConnectionTrait,
{
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    Product::find()
        .filter(product::Column::Id.is_in(ids.iter().copied()))
        .filter(product::Column::DeletedAt.is_null())
        .all(db)
        .await
        .map_err(Into::into)
}

/// Replaces a product's category, variety, and packaging. The owning
/// organization cannot be changed after creation.
///
/// # Errors
/// Returns `Error::Validation` for bad fields or `Error::ProductNotFound` if
/// the id does not resolve.
pub async fn update_product(
    db: &DatabaseConnection,
    id: i64,
    category: String,
    variety: String,
    packaging: String,
) -> Result<product::Model> {
    let category = crate::core::validate_text("category", &category)?;
    let variety = crate::core::validate_text("variety", &variety)?;
    let packaging = crate::core::validate_text("packaging", &packaging)?;

    let mut product: product::ActiveModel = find_active_product(db, id).await?.into();
    product.category = Set(category);
    product.variety = Set(variety);
    product.packaging = Set(packaging);
    product.updated_at = Set(chrono::Utc::now());

    product.update(db).await.map_err(Into::into)
}

/// Soft deletes a product by stamping `deleted_at`.
///
/// Line items that reference the product keep their rows; the reference only
/// goes away if the product row is physically removed.
///
/// # Errors
/// Returns `Error::ProductNotFound` if the id does not resolve to a live
/// record.
pub async fn delete_product(db: &DatabaseConnection, id: i64) -> Result<product::Model> {
    let mut product: product::ActiveModel = find_active_product(db, id).await?.into();
    product.deleted_at = Set(Some(chrono::Utc::now()));

    let result = product.update(db).await?;
    info!(product_id = id, "soft-deleted product");
    Ok(result)
}

async fn find_active_product(db: &DatabaseConnection, id: i64) -> Result<product::Model> {
    Product::find_by_id(id)
        .filter(product::Column::DeletedAt.is_null())
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id })
}

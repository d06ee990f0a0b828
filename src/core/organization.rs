//! Organization business logic - Handles all organization-related operations.
//!
//! Organizations are the leaf dependency of the system: products and orders
//! both resolve their owning organization here before persisting anything.
//! All functions are async and return Result types for error handling.

use crate::{
    core::pagination::{self, Page},
    entities::{Order, Organization, OrganizationType, Product, order, organization, product},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Serialize;
use tracing::info;

/// An organization together with its live products and orders, as returned
/// by [`get_organization_by_id`].
#[derive(Debug, Serialize)]
pub struct OrganizationDetail {
    /// The organization record
    #[serde(flatten)]
    pub organization: organization::Model,
    /// Products owned by the organization, excluding soft-deleted ones
    pub products: Vec<product::Model>,
    /// Orders placed by the organization, excluding soft-deleted ones
    pub orders: Vec<order::Model>,
}

/// Resolves an organization id to a live (non-deleted) record.
///
/// Shared by everything that validates an `organization_id` reference:
/// product creation and order creation go through here too.
pub(crate) async fn find_active_organization<C>(db: &C, id: i64) -> Result<organization::Model>
where
    C: ConnectionTrait,
{
    Organization::find_by_id(id)
        .filter(organization::Column::DeletedAt.is_null())
        .one(db)
        .await?
        .ok_or(Error::OrganizationNotFound { id })
}

/// Creates a new organization, validating the name first.
///
/// # Errors
/// Returns `Error::Validation` if the name is empty or shorter than three
/// characters, or an error if the insert fails.
pub async fn create_organization(
    db: &DatabaseConnection,
    name: String,
    kind: Option<OrganizationType>,
) -> Result<organization::Model> {
    let name = crate::core::validate_text("name", &name)?;

    let now = chrono::Utc::now();
    let organization = organization::ActiveModel {
        name: Set(name),
        kind: Set(kind),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
        ..Default::default()
    };

    let result = organization.insert(db).await?;
    info!(organization_id = result.id, "created organization");
    Ok(result)
}

/// Retrieves one page of live organizations, ordered by id.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_organizations(
    db: &DatabaseConnection,
    page: u64,
    per_page: u64,
) -> Result<Page<organization::Model>> {
    let select = Organization::find()
        .filter(organization::Column::DeletedAt.is_null())
        .order_by_asc(organization::Column::Id);

    pagination::paginate(db, select, page, per_page).await
}

/// Fetches an organization by id together with its live products and orders.
///
/// # Errors
/// Returns `Error::OrganizationNotFound` if the id does not resolve to a
/// live record.
pub async fn get_organization_by_id(
    db: &DatabaseConnection,
    id: i64,
) -> Result<OrganizationDetail> {
    let organization = find_active_organization(db, id).await?;

    let products = organization
        .find_related(Product)
        .filter(product::Column::DeletedAt.is_null())
        .all(db)
        .await?;
    let orders = organization
        .find_related(Order)
        .filter(order::Column::DeletedAt.is_null())
        .all(db)
        .await?;

    Ok(OrganizationDetail {
        organization,
        products,
        orders,
    })
}

/// Replaces an organization's name and type wholesale.
///
/// # Errors
/// Returns `Error::Validation` for a bad name, `Error::OrganizationNotFound`
/// if the id does not resolve, or an error if the update fails.
pub async fn update_organization(
    db: &DatabaseConnection,
    id: i64,
    name: String,
    kind: Option<OrganizationType>,
) -> Result<organization::Model> {
    let name = crate::core::validate_text("name", &name)?;

    let mut organization: organization::ActiveModel =
        find_active_organization(db, id).await?.into();
    organization.name = Set(name);
    organization.kind = Set(kind);
    organization.updated_at = Set(chrono::Utc::now());

    organization.update(db).await.map_err(Into::into)
}

/// Soft deletes an organization by stamping `deleted_at`.
///
/// Owned products and orders are not touched; they simply become unreachable
/// through the organization.
///
/// # Errors
/// Returns `Error::OrganizationNotFound` if the id does not resolve to a
/// live record.
pub async fn delete_organization(db: &DatabaseConnection, id: i64) -> Result<organization::Model> {
    let mut organization: organization::ActiveModel =
        find_active_organization(db, id).await?.into();
    organization.deleted_at = Set(Some(chrono::Utc::now()));

    let result = organization.update(db).await?;
    info!(organization_id = id, "soft-deleted organization");
    Ok(result)
}

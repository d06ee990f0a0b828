//! Generic pagination over any SeaORM select.
//!
//! Every listing in the system goes through [`paginate`], which wraps
//! `SeaORM`'s paginator and shapes the result as `{items, meta}`. Pages are
//! 1-based at this boundary; `totalPages` is the ceiling of
//! `totalItems / itemsPerPage` as computed by the paginator.

use crate::errors::Result;
use sea_orm::{ConnectionTrait, EntityTrait, FromQueryResult, PaginatorTrait, Select};
use serde::Serialize;

/// Page number used when a request does not specify one.
pub const DEFAULT_PAGE: u64 = 1;

/// Page size used when a request does not specify one.
pub const DEFAULT_PER_PAGE: u64 = 20;

/// Pagination metadata returned alongside every listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Number of items on this page
    pub item_count: u64,
    /// Total number of matching items across all pages
    pub total_items: u64,
    /// Requested page size
    pub items_per_page: u64,
    /// Total number of pages
    pub total_pages: u64,
    /// The 1-based page this response holds
    pub current_page: u64,
}

/// One page of a listing
#[derive(Debug, Serialize)]
pub struct Page<T> {
    /// The items on this page
    pub items: Vec<T>,
    /// Pagination metadata
    pub meta: PageMeta,
}

/// Fetches one 1-based page of `select`. Page and size values below 1 are
/// clamped to 1 rather than rejected.
///
/// # Errors
/// Returns an error if either the count query or the page fetch fails.
pub async fn paginate<C, E>(
    db: &C,
    select: Select<E>,
    page: u64,
    per_page: u64,
) -> Result<Page<E::Model>>
where
    C: ConnectionTrait,
    E: EntityTrait,
    E::Model: FromQueryResult + Send + Sync,
{
    let page = page.max(1);
    let per_page = per_page.max(1);

    let paginator = select.paginate(db, per_page);
    let totals = paginator.num_items_and_pages().await?;
    let items = paginator.fetch_page(page - 1).await?;

    let meta = PageMeta {
        item_count: items.len() as u64,
        total_items: totals.number_of_items,
        items_per_page: per_page,
        total_pages: totals.number_of_pages,
        current_page: page,
    };

    Ok(Page { items, meta })
}

//! Pagination envelope shared by every listing endpoint.
//!
//! Listings are offset-based: clients send `skip` and `limit` and receive the
//! page of rows together with [`PaginationMeta`]:
//!
//! ```json
//! {
//!   "data": [...],
//!   "meta": { "total": 120, "limit": 50, "skip": 50, "has_more": true }
//! }
//! ```
//!
//! Bounds for `limit` differ per resource and are enforced by the query DTOs,
//! not here.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Metadata about a paginated response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    /// Total number of rows matching the filters
    pub total: i64,
    /// Maximum rows in this page (the limit that was applied)
    pub limit: i64,
    /// Number of rows skipped before this page
    pub skip: i64,
    /// Whether more rows follow this page
    pub has_more: bool,
}

impl PaginationMeta {
    #[must_use]
    pub fn new(total: i64, limit: i64, skip: i64) -> Self {
        Self {
            total,
            limit,
            skip,
            has_more: skip.saturating_add(limit) < total,
        }
    }
}

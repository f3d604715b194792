//! Pool query wire types.

use leadpool_core::{Lead, Page};
use serde::{Deserialize, Serialize};

/// Query parameters for the fresh pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct FreshPoolQuery {
    /// Zero-based page index.
    #[serde(default)]
    pub page: usize,
    /// Requested page size; clamped to the configured maximum.
    pub page_size: Option<usize>,
    /// Case-insensitive substring match on lead name/company.
    pub search: Option<String>,
}

/// Query parameters for the transferred pool. The channel restriction is not
/// a parameter: it is derived server-side from the operator's eligibility
/// scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct TransferredPoolQuery {
    /// Zero-based page index.
    #[serde(default)]
    pub page: usize,
    /// Requested page size; clamped to the configured maximum.
    pub page_size: Option<usize>,
}

/// Pagination metadata echoed with every pool page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PaginationMeta {
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

/// One page of pooled leads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PoolResponse {
    pub data: Vec<Lead>,
    pub pagination: PaginationMeta,
}

impl From<Page<Lead>> for PoolResponse {
    fn from(page: Page<Lead>) -> Self {
        Self {
            pagination: PaginationMeta {
                total: page.total,
                page: page.page,
                page_size: page.page_size,
            },
            data: page.items,
        }
    }
}

//! Pool REST API Routes
//!
//! Read-side of the allocation pool: paginated views of unassigned leads,
//! split by source. Both views reflect the authoritative store at the moment
//! of the query only; a lead shown here may already be assigned by the time
//! the operator acts on it. Conflict detection happens at assignment time,
//! never here.

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use leadpool_core::eligibility;
use leadpool_storage::LeadStore;

use crate::{
    config::ApiConfig,
    error::ApiResult,
    middleware::OperatorExtractor,
    types::{FreshPoolQuery, PoolResponse, TransferredPoolQuery},
};

// ============================================================================
// SHARED STATE
// ============================================================================

/// Shared application state for pool routes.
#[derive(Clone)]
pub struct PoolState {
    pub store: Arc<dyn LeadStore>,
    pub config: ApiConfig,
}

impl PoolState {
    pub fn new(store: Arc<dyn LeadStore>, config: ApiConfig) -> Self {
        Self { store, config }
    }
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// GET /api/v1/pool/fresh - List pooled fresh-inbound leads
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/v1/pool/fresh",
    tag = "Pool",
    params(FreshPoolQuery),
    responses(
        (status = 200, description = "One page of pooled fresh leads", body = PoolResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ApiError),
    ),
))]
pub async fn list_fresh(
    State(state): State<Arc<PoolState>>,
    OperatorExtractor(_operator): OperatorExtractor,
    Query(query): Query<FreshPoolQuery>,
) -> ApiResult<impl IntoResponse> {
    let page_size = state.config.clamp_page_size(query.page_size);
    let search = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty());

    let page = state
        .store
        .pool_fresh(query.page, page_size, search)
        .await?;

    Ok(Json(PoolResponse::from(page)))
}

/// GET /api/v1/pool/transferred - List pooled transferred leads
///
/// The channel restriction comes from the operator's eligibility scope, not
/// from a query parameter: a HEAD_OFFLINE operator sees offline transfers
/// only, a HEAD_ONLINE operator online transfers only, everyone else both.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/v1/pool/transferred",
    tag = "Pool",
    params(TransferredPoolQuery),
    responses(
        (status = 200, description = "One page of pooled transferred leads", body = PoolResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ApiError),
    ),
))]
pub async fn list_transferred(
    State(state): State<Arc<PoolState>>,
    OperatorExtractor(operator): OperatorExtractor,
    Query(query): Query<TransferredPoolQuery>,
) -> ApiResult<impl IntoResponse> {
    let page_size = state.config.clamp_page_size(query.page_size);
    let scope = eligibility::resolve_for(&operator);

    let page = state
        .store
        .pool_transferred(query.page, page_size, scope.transferred_channel)
        .await?;

    Ok(Json(PoolResponse::from(page)))
}

// ============================================================================
// ROUTER SETUP
// ============================================================================

/// Create the pool routes router.
pub fn create_router(store: Arc<dyn LeadStore>, config: ApiConfig) -> axum::Router {
    let state = Arc::new(PoolState::new(store, config));

    axum::Router::new()
        .route("/fresh", axum::routing::get(list_fresh))
        .route("/transferred", axum::routing::get(list_transferred))
        .with_state(state)
}

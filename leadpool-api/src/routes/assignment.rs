//! Assignment REST API Routes
//!
//! One endpoint, two successful shapes: `200 {"status":"success"}` when the
//! whole batch applied, `409 {"status":"conflict"}` when any lead in the
//! batch was taken by another operator first. The 409 body carries a record
//! per diverged lead so the client can show who holds what before offering
//! the force override.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use leadpool_core::AssignmentRequest;
use leadpool_storage::LeadStore;

use crate::{
    config::ApiConfig,
    error::{ApiError, ApiResult},
    middleware::OperatorExtractor,
    services::assignment_service,
    types::{AssignRequestBody, AssignResponse},
};

// ============================================================================
// SHARED STATE
// ============================================================================

/// Shared application state for assignment routes.
#[derive(Clone)]
pub struct AssignmentState {
    pub store: Arc<dyn LeadStore>,
    pub config: ApiConfig,
}

impl AssignmentState {
    pub fn new(store: Arc<dyn LeadStore>, config: ApiConfig) -> Self {
        Self { store, config }
    }
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// POST /api/v1/assignments - Assign a batch of pooled leads to one agent
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/api/v1/assignments",
    tag = "Assignments",
    request_body = AssignRequestBody,
    responses(
        (status = 200, description = "Entire batch assigned", body = AssignResponse),
        (status = 409, description = "Batch rejected whole; conflict records attached", body = AssignResponse),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 403, description = "Target agent outside the operator's eligible set", body = ApiError),
        (status = 404, description = "Target agent not found", body = ApiError),
        (status = 401, description = "Unauthorized", body = ApiError),
    ),
))]
pub async fn create_assignment(
    State(state): State<Arc<AssignmentState>>,
    OperatorExtractor(operator): OperatorExtractor,
    Json(body): Json<AssignRequestBody>,
) -> ApiResult<impl IntoResponse> {
    let request = AssignmentRequest::from(body);

    let outcome = assignment_service::execute_assignment(
        state.store.as_ref(),
        &operator,
        request,
        state.config.max_batch_size,
    )
    .await?;

    let response = AssignResponse::from(outcome);
    let status = match &response {
        AssignResponse::Success { .. } => StatusCode::OK,
        AssignResponse::Conflict { .. } => StatusCode::CONFLICT,
    };

    Ok((status, Json(response)))
}

// ============================================================================
// ROUTER SETUP
// ============================================================================

/// Create the assignment routes router.
pub fn create_router(store: Arc<dyn LeadStore>, config: ApiConfig) -> axum::Router {
    let state = Arc::new(AssignmentState::new(store, config));

    axum::Router::new()
        .route("/", axum::routing::post(create_assignment))
        .with_state(state)
}

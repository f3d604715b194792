//! Agent REST API Routes
//!
//! Serves the candidate list for the assignment target picker. The listing is
//! already filtered to the operator's eligible set, so a client rendering it
//! verbatim cannot offer an unauthorized target. The assignment service
//! re-checks eligibility regardless; this endpoint is a convenience, not the
//! enforcement point.

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use leadpool_core::{eligibility, SubRole};
use leadpool_storage::LeadStore;

use crate::{
    error::{ApiError, ApiResult},
    middleware::OperatorExtractor,
    types::{EligibleAgentsQuery, EligibleAgentsResponse},
};

// ============================================================================
// SHARED STATE
// ============================================================================

/// Shared application state for agent routes.
#[derive(Clone)]
pub struct AgentState {
    pub store: Arc<dyn LeadStore>,
}

impl AgentState {
    pub fn new(store: Arc<dyn LeadStore>) -> Self {
        Self { store }
    }
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// GET /api/v1/agents/eligible - List agents the operator may assign to
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/v1/agents/eligible",
    tag = "Agents",
    params(EligibleAgentsQuery),
    responses(
        (status = 200, description = "Agents in the operator's eligible set", body = EligibleAgentsResponse),
        (status = 400, description = "Unrecognized sub-role code", body = ApiError),
        (status = 401, description = "Unauthorized", body = ApiError),
    ),
))]
pub async fn list_eligible(
    State(state): State<Arc<AgentState>>,
    OperatorExtractor(operator): OperatorExtractor,
    Query(query): Query<EligibleAgentsQuery>,
) -> ApiResult<impl IntoResponse> {
    let scope = eligibility::resolve_for(&operator);

    // An explicit sub_roles filter can narrow the eligible set, never widen it.
    let sub_roles: Vec<SubRole> = match query.sub_roles.as_deref() {
        None => scope.eligible_sub_roles.clone(),
        Some(raw) => {
            let requested = parse_sub_role_codes(raw)?;
            scope
                .eligible_sub_roles
                .iter()
                .copied()
                .filter(|sr| requested.contains(sr))
                .collect()
        }
    };

    let agents = state.store.agents_by_sub_roles(&sub_roles).await?;

    Ok(Json(EligibleAgentsResponse { data: agents }))
}

fn parse_sub_role_codes(raw: &str) -> ApiResult<Vec<SubRole>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|code| {
            SubRole::from_db_str(code)
                .map_err(|e| ApiError::invalid_input(format!("Unknown sub-role code: {}", e)))
        })
        .collect()
}

// ============================================================================
// ROUTER SETUP
// ============================================================================

/// Create the agent routes router.
pub fn create_router(store: Arc<dyn LeadStore>) -> axum::Router {
    let state = Arc::new(AgentState::new(store));

    axum::Router::new()
        .route("/eligible", axum::routing::get(list_eligible))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codes() {
        let parsed = parse_sub_role_codes("SALES_ONLINE, SALES_OFFLINE").unwrap();
        assert_eq!(parsed, vec![SubRole::SalesOnline, SubRole::SalesOffline]);
    }

    #[test]
    fn test_unknown_code_rejected() {
        let err = parse_sub_role_codes("SALES_ONLINE,SALES_MARS").unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::InvalidInput);
    }

    #[test]
    fn test_empty_segments_skipped() {
        let parsed = parse_sub_role_codes("SALES_ONLINE,,").unwrap();
        assert_eq!(parsed, vec![SubRole::SalesOnline]);
    }
}

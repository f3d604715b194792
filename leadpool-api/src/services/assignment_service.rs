//! Assignment Service
//!
//! Executes a batch assignment attempt on behalf of an operator: request
//! validation, the authoritative eligibility check, and the store write.
//! The UI's eligibility filtering is advisory only; this is where the check
//! actually binds.

use leadpool_core::{eligibility, AssignmentRequest, BatchAssignment, Operator};
use leadpool_storage::LeadStore;

use crate::error::{ApiError, ApiResult};

/// Run one batch assignment attempt against the authoritative store.
///
/// # Errors
/// - `MissingField` / `ValidationFailed` for an empty or duplicated batch
/// - `InvalidRange` when the batch exceeds `max_batch_size`
/// - `AgentNotFound` when the target does not exist
/// - `Forbidden` when the target agent's sub-role is outside the operator's
///   eligible set (distinct from conflict by design)
///
/// A detected conflict is NOT an error: it comes back as
/// `BatchAssignment::Conflict` for the caller to surface.
pub async fn execute_assignment(
    store: &dyn LeadStore,
    operator: &Operator,
    request: AssignmentRequest,
    max_batch_size: usize,
) -> ApiResult<BatchAssignment> {
    request.validate().map_err(leadpool_core::LeadpoolError::from)?;

    if request.lead_ids.len() > max_batch_size {
        return Err(ApiError::invalid_range("lead_ids", 1, max_batch_size));
    }

    let target = store
        .agent_get(request.agent_id)
        .await?
        .ok_or_else(|| ApiError::agent_not_found(request.agent_id))?;

    let scope = eligibility::resolve_for(operator);
    if !scope.permits(target.sub_role) {
        return Err(ApiError::forbidden(format!(
            "Agent {} ({}) is not in the operator's eligible set",
            target.agent_id, target.sub_role
        )));
    }

    tracing::info!(
        operator_id = %operator.operator_id,
        agent_id = %request.agent_id,
        batch = request.lead_ids.len(),
        force = request.force,
        "evaluating batch assignment"
    );

    let outcome = store.assign_batch(&request, operator).await?;

    if let BatchAssignment::Conflict { conflicts } = &outcome {
        tracing::warn!(
            operator_id = %operator.operator_id,
            conflicts = conflicts.len(),
            "batch rejected, operator view diverged from authoritative state"
        );
    }

    Ok(outcome)
}

// =============================================================================
// TESTS
// =============================================================================

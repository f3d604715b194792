//! Assignment wire types.
//!
//! The response is a tagged type with a `status` discriminant; clients branch
//! on the tag, never on the HTTP status line alone. A 409 carries the full
//! conflict payload so the operator sees who actually holds each lead.

use leadpool_core::{AgentId, AssignmentRequest, BatchAssignment, ConflictRecord, LeadId};
use serde::{Deserialize, Serialize};

/// Request body of `POST /api/v1/assignments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AssignRequestBody {
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<String>))]
    pub lead_ids: Vec<LeadId>,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub agent_id: AgentId,
    /// Destructive override; send only after the conflict records of a prior
    /// non-force attempt have been confirmed by the operator.
    #[serde(default)]
    pub force: bool,
}

impl From<AssignRequestBody> for AssignmentRequest {
    fn from(body: AssignRequestBody) -> Self {
        AssignmentRequest {
            lead_ids: body.lead_ids,
            agent_id: body.agent_id,
            force: body.force,
        }
    }
}

/// Tagged assignment outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AssignResponse {
    /// Every lead in the batch is now assigned to the requested agent.
    Success { count: usize },
    /// The batch was rejected whole; one record per diverged lead.
    Conflict { conflicts: Vec<ConflictRecord> },
}

impl From<BatchAssignment> for AssignResponse {
    fn from(batch: BatchAssignment) -> Self {
        match batch {
            BatchAssignment::Assigned { count } => AssignResponse::Success { count },
            BatchAssignment::Conflict { conflicts } => AssignResponse::Conflict { conflicts },
        }
    }
}

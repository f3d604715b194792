//! Assignment request and outcome types.
//!
//! The success/conflict/failure duality is a tagged type, exhaustively
//! matched by callers, so the conflict branch can never be silently folded
//! into a generic error path.

use crate::error::ValidationError;
use crate::identity::{AgentId, LeadId};
use serde::{Deserialize, Serialize};

// ============================================================================
// REQUEST
// ============================================================================

/// A batch assignment attempt: a set of leads, one target agent, and the
/// force-override flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AssignmentRequest {
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<String>))]
    pub lead_ids: Vec<LeadId>,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub agent_id: AgentId,
    /// Overwrite any current holder. Only reachable through the
    /// conflict-confirmation path; see [`crate::selection`].
    pub force: bool,
}

impl AssignmentRequest {
    /// Check request-level preconditions (non-empty, no duplicate leads).
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.lead_ids.is_empty() {
            return Err(ValidationError::RequiredFieldMissing {
                field: "lead_ids".to_string(),
            });
        }
        let mut seen = std::collections::BTreeSet::new();
        for lead_id in &self.lead_ids {
            if !seen.insert(lead_id) {
                return Err(ValidationError::InvalidValue {
                    field: "lead_ids".to_string(),
                    reason: format!("duplicate lead id {}", lead_id),
                });
            }
        }
        Ok(())
    }
}

// ============================================================================
// CONFLICT RECORD
// ============================================================================

/// One lead whose authoritative state diverged from the operator's view by
/// the time the write was evaluated: it names the agent actually holding the
/// lead so the operator can make an informed override decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ConflictRecord {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub lead_id: LeadId,
    pub lead_name: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub allocated_to: AgentId,
    pub allocated_to_name: String,
}

// ============================================================================
// OUTCOMES
// ============================================================================

/// Outcome of a batch assignment as evaluated by the authoritative store.
///
/// Failures (missing lead, unknown agent, transport) travel as errors; this
/// type only models the two states the store itself decides between.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchAssignment {
    /// Every lead in the batch was assigned to the target agent.
    Assigned { count: usize },
    /// At least one lead was no longer in the pool; nothing was applied.
    Conflict { conflicts: Vec<ConflictRecord> },
}

/// Outcome as seen by the selection state machine, with transport and server
/// failures folded in as a third, equally explicit branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentOutcome {
    Assigned { count: usize },
    Conflict { conflicts: Vec<ConflictRecord> },
    Failure { reason: String },
}

impl From<BatchAssignment> for AssignmentOutcome {
    fn from(batch: BatchAssignment) -> Self {
        match batch {
            BatchAssignment::Assigned { count } => AssignmentOutcome::Assigned { count },
            BatchAssignment::Conflict { conflicts } => AssignmentOutcome::Conflict { conflicts },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::new_entity_id;

    #[test]
    fn test_empty_batch_rejected() {
        let req = AssignmentRequest {
            lead_ids: vec![],
            agent_id: new_entity_id(),
            force: false,
        };
        assert!(matches!(
            req.validate(),
            Err(ValidationError::RequiredFieldMissing { .. })
        ));
    }

    #[test]
    fn test_duplicate_leads_rejected() {
        let lead_id = new_entity_id();
        let req = AssignmentRequest {
            lead_ids: vec![lead_id, lead_id],
            agent_id: new_entity_id(),
            force: false,
        };
        assert!(matches!(
            req.validate(),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_batch_maps_into_outcome() {
        let outcome: AssignmentOutcome = BatchAssignment::Assigned { count: 3 }.into();
        assert_eq!(outcome, AssignmentOutcome::Assigned { count: 3 });
    }
}

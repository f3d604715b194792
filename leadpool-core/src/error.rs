//! Error types for the leadpool domain.
//!
//! Conflict is deliberately NOT an error: a detected allocation conflict is a
//! first-class outcome (`BatchAssignment::Conflict`) that callers must match
//! on. The variants here cover genuine failures.

use crate::identity::{AgentId, LeadId};
use thiserror::Error;

/// Storage layer errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Lead not found: {lead_id}")]
    LeadNotFound { lead_id: LeadId },

    #[error("Agent not found: {agent_id}")]
    AgentNotFound { agent_id: AgentId },

    #[error("Insert failed: {reason}")]
    InsertFailed { reason: String },

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// Validation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Constraint violation on {constraint}: {reason}")]
    ConstraintViolation { constraint: String, reason: String },
}

/// Authorization errors from the eligibility rules.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EligibilityError {
    #[error("Agent {agent_id} ({sub_role}) is not in the operator's eligible set")]
    AgentNotEligible { agent_id: AgentId, sub_role: String },
}

/// Invalid transitions of the selection state machine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Cannot submit: selection is empty")]
    EmptySelection,

    #[error("Cannot submit: no target agent chosen")]
    NoTargetAgent,

    #[error("An assignment is already in flight")]
    AlreadyAssigning,

    #[error("Transition {transition} is not valid from phase {phase}")]
    InvalidPhase {
        transition: &'static str,
        phase: &'static str,
    },
}

/// Master error type for all leadpool errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LeadpoolError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Eligibility error: {0}")]
    Eligibility(#[from] EligibilityError),

    #[error("Transition error: {0}")]
    Transition(#[from] TransitionError),
}

/// Result type alias for leadpool operations.
pub type LeadpoolResult<T> = Result<T, LeadpoolError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::new_entity_id;

    #[test]
    fn test_master_error_from_storage() {
        let lead_id = new_entity_id();
        let err: LeadpoolError = StorageError::LeadNotFound { lead_id }.into();
        assert!(matches!(
            err,
            LeadpoolError::Storage(StorageError::LeadNotFound { .. })
        ));
        assert!(err.to_string().contains(&lead_id.to_string()));
    }

    #[test]
    fn test_transition_error_display() {
        let err = TransitionError::InvalidPhase {
            transition: "confirm_force",
            phase: "Idle",
        };
        assert!(err.to_string().contains("confirm_force"));
        assert!(err.to_string().contains("Idle"));
    }
}

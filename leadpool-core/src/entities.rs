//! Core entity structs.
//!
//! Pure data with invariant checks; all allocation behavior lives in the
//! store and the selection state machine.

use crate::enums::{AllocationStatus, Channel, LeadSource, Role, SubRole};
use crate::error::ValidationError;
use crate::identity::{AgentId, LeadId, OperatorId, Timestamp};
use serde::{Deserialize, Serialize};

// ============================================================================
// LEAD
// ============================================================================

/// A customer record ownable by exactly one sales agent at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Lead {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub lead_id: LeadId,
    /// Display name shown to operators (and echoed in conflict records).
    pub name: String,
    pub company: Option<String>,
    pub source: LeadSource,
    pub channel: Channel,
    pub allocation_status: AllocationStatus,
    /// Owning agent. Non-null iff `allocation_status == Assigned`.
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, format = "uuid"))]
    pub assigned_agent: Option<AgentId>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, format = "date-time"))]
    pub allocated_at: Option<Timestamp>,
    /// Operator who performed the allocation.
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, format = "uuid"))]
    pub allocated_by: Option<OperatorId>,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub created_at: Timestamp,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub updated_at: Timestamp,
    /// Opaque contact/company attributes carried through unmodified.
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    pub metadata: Option<serde_json::Value>,
}

impl Lead {
    /// Whether this lead is still in the pool.
    pub fn is_pooled(&self) -> bool {
        self.allocation_status == AllocationStatus::Pool
    }

    /// Check the ownership invariant: `assigned_agent` is non-null iff the
    /// lead is `Assigned`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match (self.allocation_status, self.assigned_agent) {
            (AllocationStatus::Assigned, None) => Err(ValidationError::ConstraintViolation {
                constraint: "lead_ownership".to_string(),
                reason: format!("lead {} is Assigned but has no assigned_agent", self.lead_id),
            }),
            (AllocationStatus::Pool, Some(agent_id)) => Err(ValidationError::ConstraintViolation {
                constraint: "lead_ownership".to_string(),
                reason: format!(
                    "lead {} is in Pool but still references agent {}",
                    self.lead_id, agent_id
                ),
            }),
            _ => Ok(()),
        }
    }
}

// ============================================================================
// AGENT
// ============================================================================

/// A sales agent able to receive lead assignments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Agent {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub agent_id: AgentId,
    pub display_name: String,
    pub role: Role,
    pub sub_role: SubRole,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub created_at: Timestamp,
}

// ============================================================================
// OPERATOR
// ============================================================================

/// The back-office user performing allocations.
///
/// Identity is supplied by the authentication collaborator per request and
/// threaded explicitly; nothing in this crate reads it from ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Operator {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub operator_id: OperatorId,
    pub role: Role,
    pub sub_role: SubRole,
}

// ============================================================================
// PAGINATION
// ============================================================================

/// One page of a pool query. Pages are zero-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total matching records across all pages.
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

impl<T> Page<T> {
    /// An empty page with the given cursor position.
    pub fn empty(page: usize, page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page,
            page_size,
        }
    }
}

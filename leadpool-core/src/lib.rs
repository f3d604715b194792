//! Leadpool Core - Domain Types and Allocation Logic
//!
//! Pure domain layer for the lead allocation service: identities, enums,
//! entities, the eligibility resolver, the assignment outcome model, and the
//! selection/conflict state machine. No I/O, no async; the storage and API
//! crates depend on this.

pub mod assignment;
pub mod eligibility;
pub mod entities;
pub mod enums;
pub mod error;
pub mod identity;
pub mod selection;

// Re-export the full domain surface at the crate root.
pub use assignment::{AssignmentOutcome, AssignmentRequest, BatchAssignment, ConflictRecord};
pub use eligibility::{resolve, resolve_for, EligibilityScope};
pub use entities::{Agent, Lead, Operator, Page};
pub use enums::{AllocationStatus, Channel, EnumParseError, LeadSource, Role, SubRole};
pub use error::{
    EligibilityError, LeadpoolError, LeadpoolResult, StorageError, TransitionError,
    ValidationError,
};
pub use identity::{new_entity_id, AgentId, EntityId, LeadId, OperatorId, Timestamp};
pub use selection::{DialogPhase, Effect, PoolTab, SelectionState};

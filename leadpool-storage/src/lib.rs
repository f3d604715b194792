//! Leadpool Storage - Store Trait and In-Memory Implementation
//!
//! Defines the authoritative-store abstraction the API layer writes through.
//! The in-memory implementation is the reference store; a database-backed
//! implementation would sit behind the same trait.
//!
//! The store is where the optimistic-concurrency protocol lives: no lock is
//! held on a lead while an operator is deciding, and `assign_batch` evaluates
//! the whole batch atomically against whatever state exists at that instant.

pub mod memory;

pub use memory::InMemoryLeadStore;

use ::async_trait::async_trait;
use leadpool_core::{
    Agent, AgentId, AssignmentRequest, BatchAssignment, Channel, Lead, LeadId, LeadpoolResult,
    Operator, Page, SubRole,
};

/// Async store trait for leads and agents.
///
/// Pool reads never mutate `allocation_status`; the only `pool → assigned`
/// transition in the system is `assign_batch`.
#[async_trait]
pub trait LeadStore: Send + Sync {
    // ========================================================================
    // LEAD OPERATIONS
    // ========================================================================

    /// Insert a new lead. The lead must satisfy the ownership invariant.
    async fn lead_insert(&self, lead: &Lead) -> LeadpoolResult<()>;

    /// Get a lead by ID.
    async fn lead_get(&self, id: LeadId) -> LeadpoolResult<Option<Lead>>;

    // ========================================================================
    // AGENT OPERATIONS
    // ========================================================================

    /// Insert a new agent.
    async fn agent_insert(&self, agent: &Agent) -> LeadpoolResult<()>;

    /// Get an agent by ID.
    async fn agent_get(&self, id: AgentId) -> LeadpoolResult<Option<Agent>>;

    /// List agents whose sub-role is in the given set, ordered by ID.
    async fn agents_by_sub_roles(&self, sub_roles: &[SubRole]) -> LeadpoolResult<Vec<Agent>>;

    // ========================================================================
    // POOL QUERIES (read-only, paginated)
    // ========================================================================

    /// Page of unassigned freshly-sourced leads, optionally filtered by a
    /// case-insensitive substring match on name/company.
    async fn pool_fresh(
        &self,
        page: usize,
        page_size: usize,
        search: Option<&str>,
    ) -> LeadpoolResult<Page<Lead>>;

    /// Page of unassigned transferred-in leads, optionally restricted to one
    /// channel (the caller derives the restriction from the operator's
    /// eligibility scope).
    async fn pool_transferred(
        &self,
        page: usize,
        page_size: usize,
        channel: Option<Channel>,
    ) -> LeadpoolResult<Page<Lead>>;

    // ========================================================================
    // ASSIGNMENT (the only write path for allocation state)
    // ========================================================================

    /// Execute a batch assignment attempt with optimistic-concurrency checks.
    ///
    /// With `force = false`, the batch succeeds only if every lead is still
    /// in the pool at evaluation time; any already-assigned lead rejects the
    /// entire batch with no partial application, reporting one conflict
    /// record per diverged lead. With `force = true`, every lead is assigned
    /// unconditionally, overwriting any current holder.
    ///
    /// Missing leads and unknown agents are errors, not conflicts.
    async fn assign_batch(
        &self,
        request: &AssignmentRequest,
        operator: &Operator,
    ) -> LeadpoolResult<BatchAssignment>;
}

//! Leadpool Test Utilities
//!
//! Centralized test infrastructure for the leadpool workspace:
//! - Fixtures for leads, agents, and operators
//! - A seeded in-memory store builder
//! - Proptest generators for domain enums and batches

// Re-export the store and core types for convenience in test code.
pub use leadpool_core::{
    Agent, AgentId, AllocationStatus, AssignmentRequest, BatchAssignment, Channel, ConflictRecord,
    Lead, LeadId, LeadSource, Operator, OperatorId, Role, SubRole, new_entity_id,
};
pub use leadpool_storage::{InMemoryLeadStore, LeadStore};

use chrono::Utc;
use proptest::prelude::*;

// ============================================================================
// FIXTURES
// ============================================================================

/// A pooled lead with the given display name.
pub fn pooled_lead(name: &str, source: LeadSource, channel: Channel) -> Lead {
    let now = Utc::now();
    Lead {
        lead_id: new_entity_id(),
        name: name.to_string(),
        company: None,
        source,
        channel,
        allocation_status: AllocationStatus::Pool,
        assigned_agent: None,
        allocated_at: None,
        allocated_by: None,
        created_at: now,
        updated_at: now,
        metadata: None,
    }
}

/// A sales agent with the given sub-role.
pub fn sales_agent(name: &str, sub_role: SubRole) -> Agent {
    Agent {
        agent_id: new_entity_id(),
        display_name: name.to_string(),
        role: Role::Sales,
        sub_role,
        created_at: Utc::now(),
    }
}

/// An operator identity with the given role pair.
pub fn operator(role: Role, sub_role: SubRole) -> Operator {
    Operator {
        operator_id: new_entity_id(),
        role,
        sub_role,
    }
}

/// Build an in-memory store seeded with the given leads and agents.
pub async fn seeded_store(leads: &[Lead], agents: &[Agent]) -> InMemoryLeadStore {
    let store = InMemoryLeadStore::new();
    for lead in leads {
        store.lead_insert(lead).await.expect("insert lead fixture");
    }
    for agent in agents {
        store
            .agent_insert(agent)
            .await
            .expect("insert agent fixture");
    }
    store
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

/// Strategy over all operator roles.
pub fn arb_role() -> impl Strategy<Value = Role> {
    prop_oneof![
        Just(Role::Admin),
        Just(Role::Manager),
        Just(Role::Head),
        Just(Role::Sales),
        Just(Role::Telesales),
        Just(Role::Other),
    ]
}

/// Strategy over all sub-roles.
pub fn arb_sub_role() -> impl Strategy<Value = SubRole> {
    prop_oneof![
        Just(SubRole::HeadOnline),
        Just(SubRole::HeadOffline),
        Just(SubRole::SalesOnline),
        Just(SubRole::SalesOffline),
        Just(SubRole::None),
    ]
}

/// Strategy over lead sources.
pub fn arb_source() -> impl Strategy<Value = LeadSource> {
    prop_oneof![Just(LeadSource::FreshInbound), Just(LeadSource::Transferred)]
}

/// Strategy over channels.
pub fn arb_channel() -> impl Strategy<Value = Channel> {
    prop_oneof![Just(Channel::Online), Just(Channel::Offline)]
}

/// Strategy producing a pooled lead with arbitrary source/channel.
pub fn arb_pooled_lead() -> impl Strategy<Value = Lead> {
    ("[A-Z][a-z]{2,12}", arb_source(), arb_channel())
        .prop_map(|(name, source, channel)| pooled_lead(&name, source, channel))
}

//! In-memory authoritative lead store.
//!
//! Backs the API in development and tests. Point reads go through a shared
//! `RwLock`; `assign_batch` takes the write guard for the whole evaluation,
//! which is what makes the optimistic check atomic per batch: concurrent
//! requests are evaluated strictly one after another against the state left
//! by the previous one.

use crate::LeadStore;
use ::async_trait::async_trait;
use chrono::Utc;
use leadpool_core::{
    Agent, AgentId, AllocationStatus, AssignmentRequest, BatchAssignment, Channel, ConflictRecord,
    Lead, LeadId, LeadSource, LeadpoolResult, Operator, Page, StorageError, SubRole,
};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-memory lead store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLeadStore {
    leads: Arc<RwLock<HashMap<LeadId, Lead>>>,
    agents: Arc<RwLock<HashMap<AgentId, Agent>>>,
}

impl InMemoryLeadStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored leads (all statuses).
    pub fn lead_count(&self) -> usize {
        self.leads.read().map(|map| map.len()).unwrap_or(0)
    }

    fn read_leads(&self) -> LeadpoolResult<RwLockReadGuard<'_, HashMap<LeadId, Lead>>> {
        self.leads
            .read()
            .map_err(|_| StorageError::LockPoisoned.into())
    }

    fn write_leads(&self) -> LeadpoolResult<RwLockWriteGuard<'_, HashMap<LeadId, Lead>>> {
        self.leads
            .write()
            .map_err(|_| StorageError::LockPoisoned.into())
    }

    fn read_agents(&self) -> LeadpoolResult<RwLockReadGuard<'_, HashMap<AgentId, Agent>>> {
        self.agents
            .read()
            .map_err(|_| StorageError::LockPoisoned.into())
    }

    /// Filter, order, and slice one pool partition. Ordering is by lead ID,
    /// which for UUIDv7 is creation order.
    fn pool_page<F>(&self, page: usize, page_size: usize, filter: F) -> LeadpoolResult<Page<Lead>>
    where
        F: Fn(&Lead) -> bool,
    {
        let leads = self.read_leads()?;
        let mut items: Vec<Lead> = leads
            .values()
            .filter(|lead| lead.is_pooled() && filter(lead))
            .cloned()
            .collect();
        items.sort_by_key(|lead| lead.lead_id);

        let total = items.len();
        let items = if page_size == 0 {
            Vec::new()
        } else {
            items
                .into_iter()
                .skip(page.saturating_mul(page_size))
                .take(page_size)
                .collect()
        };

        Ok(Page {
            items,
            total,
            page,
            page_size,
        })
    }
}

fn matches_search(lead: &Lead, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    if needle.is_empty() {
        return true;
    }
    lead.name.to_lowercase().contains(&needle)
        || lead
            .company
            .as_deref()
            .is_some_and(|company| company.to_lowercase().contains(&needle))
}

#[async_trait]
impl LeadStore for InMemoryLeadStore {
    async fn lead_insert(&self, lead: &Lead) -> LeadpoolResult<()> {
        lead.validate()?;
        self.write_leads()?.insert(lead.lead_id, lead.clone());
        Ok(())
    }

    async fn lead_get(&self, id: LeadId) -> LeadpoolResult<Option<Lead>> {
        Ok(self.read_leads()?.get(&id).cloned())
    }

    async fn agent_insert(&self, agent: &Agent) -> LeadpoolResult<()> {
        self.agents
            .write()
            .map_err(|_| StorageError::LockPoisoned)?
            .insert(agent.agent_id, agent.clone());
        Ok(())
    }

    async fn agent_get(&self, id: AgentId) -> LeadpoolResult<Option<Agent>> {
        Ok(self.read_agents()?.get(&id).cloned())
    }

    async fn agents_by_sub_roles(&self, sub_roles: &[SubRole]) -> LeadpoolResult<Vec<Agent>> {
        let agents = self.read_agents()?;
        let mut matched: Vec<Agent> = agents
            .values()
            .filter(|agent| sub_roles.contains(&agent.sub_role))
            .cloned()
            .collect();
        matched.sort_by_key(|agent| agent.agent_id);
        Ok(matched)
    }

    async fn pool_fresh(
        &self,
        page: usize,
        page_size: usize,
        search: Option<&str>,
    ) -> LeadpoolResult<Page<Lead>> {
        self.pool_page(page, page_size, |lead| {
            lead.source == LeadSource::FreshInbound
                && search.is_none_or(|needle| matches_search(lead, needle))
        })
    }

    async fn pool_transferred(
        &self,
        page: usize,
        page_size: usize,
        channel: Option<Channel>,
    ) -> LeadpoolResult<Page<Lead>> {
        self.pool_page(page, page_size, |lead| {
            lead.source == LeadSource::Transferred
                && channel.is_none_or(|wanted| lead.channel == wanted)
        })
    }

    async fn assign_batch(
        &self,
        request: &AssignmentRequest,
        operator: &Operator,
    ) -> LeadpoolResult<BatchAssignment> {
        request.validate()?;

        let agents = self.read_agents()?;
        if !agents.contains_key(&request.agent_id) {
            return Err(StorageError::AgentNotFound {
                agent_id: request.agent_id,
            }
            .into());
        }

        // Whole-batch evaluation under one write guard: the staleness check
        // and the application are a single step against current state.
        let mut leads = self.write_leads()?;

        let mut conflicts = Vec::new();
        for lead_id in &request.lead_ids {
            let lead = leads
                .get(lead_id)
                .ok_or(StorageError::LeadNotFound { lead_id: *lead_id })?;

            if !request.force && lead.allocation_status == AllocationStatus::Assigned {
                // Conflict requires a lead no longer in the pool; who holds it
                // (even the requested target) does not matter.
                let holder = lead.assigned_agent.unwrap_or(request.agent_id);
                let holder_name = agents
                    .get(&holder)
                    .map(|agent| agent.display_name.clone())
                    .unwrap_or_else(|| holder.to_string());
                conflicts.push(ConflictRecord {
                    lead_id: lead.lead_id,
                    lead_name: lead.name.clone(),
                    allocated_to: holder,
                    allocated_to_name: holder_name,
                });
            }
        }

        if !conflicts.is_empty() {
            // No partial application: the batch is rejected as a whole.
            return Ok(BatchAssignment::Conflict { conflicts });
        }

        let now = Utc::now();
        for lead_id in &request.lead_ids {
            // Existence was checked above while the guard was already held.
            if let Some(lead) = leads.get_mut(lead_id) {
                lead.allocation_status = AllocationStatus::Assigned;
                lead.assigned_agent = Some(request.agent_id);
                lead.allocated_at = Some(now);
                lead.allocated_by = Some(operator.operator_id);
                lead.updated_at = now;
            }
        }

        Ok(BatchAssignment::Assigned {
            count: request.lead_ids.len(),
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

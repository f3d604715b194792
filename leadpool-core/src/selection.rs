//! Selection State Machine and Conflict Resolver.
//!
//! An explicit finite state machine, independent of any UI toolkit; the UI is
//! a thin adapter over it. It owns the operator's multi-selection, the active
//! pool tab, the per-tab pagination cursor, and the dialog lifecycle.
//!
//! # State Transition Diagram
//!
//! ```text
//! Idle ── begin_assign() ──→ Assigning ──┬── Assigned ──→ Idle (selection cleared, refresh)
//!  ↑                                     ├── Failure ───→ Idle (selection retained)
//!  │                                     └── Conflict ──→ Conflict
//!  ├────────── cancel_conflict() ────────────────────────────┘
//!  └── Conflict ── confirm_force() ──→ Assigning(force) ──→ {Assigned | Failure}
//! ```
//!
//! The normal assignment surface and the conflict surface are a single
//! `DialogPhase` value, so they can never be interactive at the same time,
//! and `confirm_force` is only reachable from the `Conflict` phase after the
//! operator has seen the specific conflicting records.

use crate::assignment::{AssignmentOutcome, AssignmentRequest, ConflictRecord};
use crate::error::TransitionError;
use crate::identity::{AgentId, LeadId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ============================================================================
// POOL TAB
// ============================================================================

/// Which pool view the operator is working in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoolTab {
    Fresh,
    Transferred,
}

// ============================================================================
// DIALOG PHASE
// ============================================================================

/// Lifecycle of the assignment dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogPhase {
    /// No dialog active; selection is editable.
    Idle,
    /// An assign() call is in flight; the trigger is disabled.
    Assigning { force: bool },
    /// The batch was rejected; the operator must cancel or force.
    Conflict { conflicts: Vec<ConflictRecord> },
}

impl DialogPhase {
    fn name(&self) -> &'static str {
        match self {
            DialogPhase::Idle => "Idle",
            DialogPhase::Assigning { .. } => "Assigning",
            DialogPhase::Conflict { .. } => "Conflict",
        }
    }
}

/// Side effect the UI adapter must carry out after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Re-query the active pool so newly assigned leads disappear.
    RefreshPool,
}

// ============================================================================
// SELECTION STATE MACHINE
// ============================================================================

/// State owned by one operator's allocation session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    tab: PoolTab,
    fresh_page: usize,
    transferred_page: usize,
    selected: BTreeSet<LeadId>,
    target_agent: Option<AgentId>,
    phase: DialogPhase,
    /// Batch of the in-flight or conflicted attempt; force reissues exactly this.
    pending: Option<AssignmentRequest>,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionState {
    pub fn new() -> Self {
        Self {
            tab: PoolTab::Fresh,
            fresh_page: 0,
            transferred_page: 0,
            selected: BTreeSet::new(),
            target_agent: None,
            phase: DialogPhase::Idle,
            pending: None,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn tab(&self) -> PoolTab {
        self.tab
    }

    /// Pagination cursor of the active tab (zero-based).
    pub fn page(&self) -> usize {
        match self.tab {
            PoolTab::Fresh => self.fresh_page,
            PoolTab::Transferred => self.transferred_page,
        }
    }

    pub fn selected(&self) -> &BTreeSet<LeadId> {
        &self.selected
    }

    pub fn target_agent(&self) -> Option<AgentId> {
        self.target_agent
    }

    pub fn phase(&self) -> &DialogPhase {
        &self.phase
    }

    /// The assignment trigger is enabled only from Idle with a non-empty
    /// selection and a chosen target.
    pub fn can_submit(&self) -> bool {
        self.phase == DialogPhase::Idle
            && !self.selected.is_empty()
            && self.target_agent.is_some()
    }

    // ========================================================================
    // SELECTION EDITS (Idle only)
    // ========================================================================

    /// Switch pool tab. Always clears the selection and resets the cursor of
    /// the tab being entered to the first page, regardless of prior state.
    pub fn switch_tab(&mut self, tab: PoolTab) -> Result<(), TransitionError> {
        self.require_idle("switch_tab")?;
        self.tab = tab;
        self.selected.clear();
        match tab {
            PoolTab::Fresh => self.fresh_page = 0,
            PoolTab::Transferred => self.transferred_page = 0,
        }
        Ok(())
    }

    /// Move the active tab's cursor. Selection is scoped to one pool view,
    /// not one page, so paging does not clear it.
    pub fn goto_page(&mut self, page: usize) -> Result<(), TransitionError> {
        self.require_idle("goto_page")?;
        match self.tab {
            PoolTab::Fresh => self.fresh_page = page,
            PoolTab::Transferred => self.transferred_page = page,
        }
        Ok(())
    }

    /// Toggle a lead in or out of the selection.
    pub fn toggle_select(&mut self, lead_id: LeadId) -> Result<(), TransitionError> {
        self.require_idle("toggle_select")?;
        if !self.selected.remove(&lead_id) {
            self.selected.insert(lead_id);
        }
        Ok(())
    }

    /// Choose (or clear) the target agent. The caller restricts the choice to
    /// the eligible set; the authoritative check happens server-side.
    pub fn set_target_agent(&mut self, agent_id: Option<AgentId>) -> Result<(), TransitionError> {
        self.require_idle("set_target_agent")?;
        self.target_agent = agent_id;
        Ok(())
    }

    // ========================================================================
    // ASSIGNMENT LIFECYCLE
    // ========================================================================

    /// Submit the current selection. Transitions Idle → Assigning and yields
    /// the request the caller must send; while Assigning, re-submission is
    /// rejected.
    pub fn begin_assign(&mut self) -> Result<AssignmentRequest, TransitionError> {
        match &self.phase {
            DialogPhase::Idle => {}
            DialogPhase::Assigning { .. } => return Err(TransitionError::AlreadyAssigning),
            other => {
                return Err(TransitionError::InvalidPhase {
                    transition: "begin_assign",
                    phase: other.name(),
                })
            }
        }
        if self.selected.is_empty() {
            return Err(TransitionError::EmptySelection);
        }
        let agent_id = self.target_agent.ok_or(TransitionError::NoTargetAgent)?;

        let request = AssignmentRequest {
            lead_ids: self.selected.iter().copied().collect(),
            agent_id,
            force: false,
        };
        self.pending = Some(request.clone());
        self.phase = DialogPhase::Assigning { force: false };
        Ok(request)
    }

    /// Feed the outcome of the in-flight call back into the machine.
    ///
    /// - `Assigned`: terminal success; selection and dialogs are cleared and
    ///   the caller must refresh the pool view.
    /// - `Conflict`: opens the conflict surface; only `cancel_conflict` or
    ///   `confirm_force` leave it.
    /// - `Failure`: back to Idle with the selection retained, so the
    ///   operator's work is not lost and the identical call can be retried.
    pub fn on_outcome(&mut self, outcome: AssignmentOutcome) -> Result<Effect, TransitionError> {
        if !matches!(self.phase, DialogPhase::Assigning { .. }) {
            return Err(TransitionError::InvalidPhase {
                transition: "on_outcome",
                phase: self.phase.name(),
            });
        }
        match outcome {
            AssignmentOutcome::Assigned { .. } => {
                self.selected.clear();
                self.target_agent = None;
                self.pending = None;
                self.phase = DialogPhase::Idle;
                Ok(Effect::RefreshPool)
            }
            AssignmentOutcome::Conflict { conflicts } => {
                self.phase = DialogPhase::Conflict { conflicts };
                Ok(Effect::None)
            }
            AssignmentOutcome::Failure { .. } => {
                self.phase = DialogPhase::Idle;
                Ok(Effect::None)
            }
        }
    }

    /// Abandon the conflict: back to Idle, selection retained, no lead state
    /// changed anywhere.
    pub fn cancel_conflict(&mut self) -> Result<(), TransitionError> {
        if !matches!(self.phase, DialogPhase::Conflict { .. }) {
            return Err(TransitionError::InvalidPhase {
                transition: "cancel_conflict",
                phase: self.phase.name(),
            });
        }
        self.pending = None;
        self.phase = DialogPhase::Idle;
        Ok(())
    }

    /// Reissue the identical batch with the destructive force flag. Legal
    /// only from the Conflict phase, which is only entered after the
    /// conflicting records were surfaced to the operator.
    pub fn confirm_force(&mut self) -> Result<AssignmentRequest, TransitionError> {
        if !matches!(self.phase, DialogPhase::Conflict { .. }) {
            return Err(TransitionError::InvalidPhase {
                transition: "confirm_force",
                phase: self.phase.name(),
            });
        }
        // pending is always set when we are in Conflict; begin_assign stored it.
        let mut request = self
            .pending
            .clone()
            .ok_or(TransitionError::InvalidPhase {
                transition: "confirm_force",
                phase: "Conflict",
            })?;
        request.force = true;
        self.phase = DialogPhase::Assigning { force: true };
        Ok(request)
    }

    fn require_idle(&self, transition: &'static str) -> Result<(), TransitionError> {
        if self.phase == DialogPhase::Idle {
            Ok(())
        } else {
            Err(TransitionError::InvalidPhase {
                transition,
                phase: self.phase.name(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::new_entity_id;

    fn conflict_record() -> ConflictRecord {
        ConflictRecord {
            lead_id: new_entity_id(),
            lead_name: "Acme".to_string(),
            allocated_to: new_entity_id(),
            allocated_to_name: "Other Agent".to_string(),
        }
    }

    fn machine_with_selection(n: usize) -> SelectionState {
        let mut state = SelectionState::new();
        for _ in 0..n {
            state.toggle_select(new_entity_id()).unwrap();
        }
        state.set_target_agent(Some(new_entity_id())).unwrap();
        state
    }

    #[test]
    fn test_switch_tab_clears_selection_and_resets_page() {
        let mut state = machine_with_selection(3);
        state.goto_page(4).unwrap();
        assert_eq!(state.page(), 4);

        state.switch_tab(PoolTab::Transferred).unwrap();
        assert!(state.selected().is_empty());
        assert_eq!(state.page(), 0);

        // Switching back also lands on page 0, not the old cursor.
        state.switch_tab(PoolTab::Fresh).unwrap();
        assert_eq!(state.page(), 0);
    }

    #[test]
    fn test_paging_retains_selection() {
        let mut state = machine_with_selection(2);
        state.goto_page(3).unwrap();
        assert_eq!(state.selected().len(), 2);
    }

    #[test]
    fn test_cannot_submit_without_selection_or_target() {
        let mut state = SelectionState::new();
        assert!(!state.can_submit());
        assert_eq!(state.begin_assign(), Err(TransitionError::EmptySelection));

        state.toggle_select(new_entity_id()).unwrap();
        assert!(!state.can_submit());
        assert_eq!(state.begin_assign(), Err(TransitionError::NoTargetAgent));

        state.set_target_agent(Some(new_entity_id())).unwrap();
        assert!(state.can_submit());
    }

    #[test]
    fn test_no_duplicate_submission_while_in_flight() {
        let mut state = machine_with_selection(1);
        state.begin_assign().unwrap();
        assert_eq!(state.begin_assign(), Err(TransitionError::AlreadyAssigning));
        assert!(!state.can_submit());
    }

    #[test]
    fn test_selection_frozen_while_assigning() {
        let mut state = machine_with_selection(1);
        state.begin_assign().unwrap();
        assert!(state.toggle_select(new_entity_id()).is_err());
        assert!(state.switch_tab(PoolTab::Transferred).is_err());
        assert!(state.set_target_agent(None).is_err());
    }

    #[test]
    fn test_success_clears_selection_and_requests_refresh() {
        let mut state = machine_with_selection(2);
        state.begin_assign().unwrap();
        let effect = state
            .on_outcome(AssignmentOutcome::Assigned { count: 2 })
            .unwrap();
        assert_eq!(effect, Effect::RefreshPool);
        assert!(state.selected().is_empty());
        assert_eq!(state.target_agent(), None);
        assert_eq!(*state.phase(), DialogPhase::Idle);
    }

    #[test]
    fn test_failure_retains_selection_for_retry() {
        let mut state = machine_with_selection(2);
        state.begin_assign().unwrap();
        let effect = state
            .on_outcome(AssignmentOutcome::Failure {
                reason: "gateway timeout".to_string(),
            })
            .unwrap();
        assert_eq!(effect, Effect::None);
        assert_eq!(state.selected().len(), 2);
        assert!(state.can_submit());
    }

    #[test]
    fn test_conflict_opens_conflict_surface() {
        let mut state = machine_with_selection(1);
        state.begin_assign().unwrap();
        state
            .on_outcome(AssignmentOutcome::Conflict {
                conflicts: vec![conflict_record()],
            })
            .unwrap();
        assert!(matches!(state.phase(), DialogPhase::Conflict { .. }));
        // Conflict and normal surfaces are mutually exclusive.
        assert!(!state.can_submit());
        assert_eq!(state.begin_assign().unwrap_err(), TransitionError::InvalidPhase {
            transition: "begin_assign",
            phase: "Conflict",
        });
    }

    #[test]
    fn test_cancel_conflict_retains_selection() {
        let mut state = machine_with_selection(2);
        state.begin_assign().unwrap();
        state
            .on_outcome(AssignmentOutcome::Conflict {
                conflicts: vec![conflict_record()],
            })
            .unwrap();
        state.cancel_conflict().unwrap();
        assert_eq!(*state.phase(), DialogPhase::Idle);
        assert_eq!(state.selected().len(), 2);
    }

    #[test]
    fn test_confirm_force_reissues_identical_batch() {
        let mut state = machine_with_selection(3);
        let original = state.begin_assign().unwrap();
        state
            .on_outcome(AssignmentOutcome::Conflict {
                conflicts: vec![conflict_record()],
            })
            .unwrap();
        let forced = state.confirm_force().unwrap();
        assert_eq!(forced.lead_ids, original.lead_ids);
        assert_eq!(forced.agent_id, original.agent_id);
        assert!(forced.force);
        assert_eq!(*state.phase(), DialogPhase::Assigning { force: true });

        // Forced success terminates normally.
        let effect = state
            .on_outcome(AssignmentOutcome::Assigned { count: 3 })
            .unwrap();
        assert_eq!(effect, Effect::RefreshPool);
    }

    #[test]
    fn test_force_unreachable_outside_conflict() {
        let mut state = machine_with_selection(1);
        assert!(state.confirm_force().is_err());
        state.begin_assign().unwrap();
        assert!(state.confirm_force().is_err());
    }
}

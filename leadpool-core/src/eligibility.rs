//! Eligibility Resolver.
//!
//! Pure function of the operator's (role, sub_role): which agent sub-roles
//! may legally receive an assignment, and which transferred-pool records the
//! operator may see. No side effects, no I/O.

use crate::entities::Operator;
use crate::enums::{Channel, Role, SubRole};
use serde::{Deserialize, Serialize};

/// The eligibility scope computed for an operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EligibilityScope {
    /// Agent sub-roles this operator may assign leads to.
    pub eligible_sub_roles: Vec<SubRole>,
    /// Channel restriction on the transferred pool; `None` means no filter.
    pub transferred_channel: Option<Channel>,
}

impl EligibilityScope {
    /// Whether an agent with the given sub-role may receive an assignment
    /// from this operator.
    pub fn permits(&self, sub_role: SubRole) -> bool {
        self.eligible_sub_roles.contains(&sub_role)
    }
}

/// Resolve the eligibility scope for an operator.
///
/// Channel-scoped heads are restricted to their own channel's sales agents
/// and transferred records. Every other (role, sub_role) combination,
/// including unrecognized ones, gets the full union with no channel filter.
/// The fail-open default is deliberate observed behavior ("admin sees
/// everything"); see DESIGN.md for the open-question resolution.
pub fn resolve(role: Role, sub_role: SubRole) -> EligibilityScope {
    let _ = role; // scoping keys on the sub-role tag; role is carried for audit
    match sub_role {
        SubRole::HeadOnline => EligibilityScope {
            eligible_sub_roles: vec![SubRole::SalesOnline],
            transferred_channel: Some(Channel::Online),
        },
        SubRole::HeadOffline => EligibilityScope {
            eligible_sub_roles: vec![SubRole::SalesOffline],
            transferred_channel: Some(Channel::Offline),
        },
        _ => EligibilityScope {
            eligible_sub_roles: vec![SubRole::SalesOnline, SubRole::SalesOffline],
            transferred_channel: None,
        },
    }
}

/// Convenience wrapper taking the operator identity.
pub fn resolve_for(operator: &Operator) -> EligibilityScope {
    resolve(operator.role, operator.sub_role)
}

//! Agent wire types.

use leadpool_core::Agent;
use serde::{Deserialize, Serialize};

/// Query parameters for the eligible-agents listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct EligibleAgentsQuery {
    /// Optional comma-joined sub-role codes (e.g. `SALES_ONLINE,SALES_OFFLINE`).
    /// The result is always intersected with the operator's eligible set;
    /// requesting codes outside it narrows nothing and widens nothing.
    pub sub_roles: Option<String>,
}

/// Agents the operator may assign leads to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EligibleAgentsResponse {
    pub data: Vec<Agent>,
}

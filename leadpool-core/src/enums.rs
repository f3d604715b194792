//! Domain enums with their wire/database string representations.
//!
//! Every enum carries `as_db_str`/`from_db_str` so that the string form used
//! on the wire and in the store is defined in exactly one place.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// LEAD SOURCE
// ============================================================================

/// Which pool a lead belongs to while unassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum LeadSource {
    /// Freshly sourced inbound lead.
    FreshInbound,
    /// Lead transferred in from another team.
    Transferred,
}

impl LeadSource {
    /// Convert to database string representation.
    pub fn as_db_str(&self) -> &'static str {
        match self {
            LeadSource::FreshInbound => "FreshInbound",
            LeadSource::Transferred => "Transferred",
        }
    }

    /// Parse from database string representation.
    pub fn from_db_str(s: &str) -> Result<Self, EnumParseError> {
        match s.to_lowercase().replace('_', "").as_str() {
            "freshinbound" | "fresh" => Ok(LeadSource::FreshInbound),
            "transferred" | "transfer" => Ok(LeadSource::Transferred),
            _ => Err(EnumParseError::new("lead source", s)),
        }
    }
}

impl fmt::Display for LeadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_db_str())
    }
}

impl FromStr for LeadSource {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_db_str(s)
    }
}

// ============================================================================
// ALLOCATION STATUS
// ============================================================================

/// Whether a lead is still in the pool or owned by an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum AllocationStatus {
    /// Unassigned, visible in the pool views.
    Pool,
    /// Owned by exactly one agent.
    Assigned,
}

impl AllocationStatus {
    /// Convert to database string representation.
    pub fn as_db_str(&self) -> &'static str {
        match self {
            AllocationStatus::Pool => "Pool",
            AllocationStatus::Assigned => "Assigned",
        }
    }

    /// Parse from database string representation.
    pub fn from_db_str(s: &str) -> Result<Self, EnumParseError> {
        match s.to_lowercase().as_str() {
            "pool" => Ok(AllocationStatus::Pool),
            "assigned" => Ok(AllocationStatus::Assigned),
            _ => Err(EnumParseError::new("allocation status", s)),
        }
    }
}

impl fmt::Display for AllocationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_db_str())
    }
}

impl FromStr for AllocationStatus {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_db_str(s)
    }
}

// ============================================================================
// SALES CHANNEL
// ============================================================================

/// Sales channel a lead (or agent team) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Channel {
    Online,
    Offline,
}

impl Channel {
    /// Convert to database string representation.
    pub fn as_db_str(&self) -> &'static str {
        match self {
            Channel::Online => "Online",
            Channel::Offline => "Offline",
        }
    }

    /// Parse from database string representation.
    pub fn from_db_str(s: &str) -> Result<Self, EnumParseError> {
        match s.to_lowercase().as_str() {
            "online" => Ok(Channel::Online),
            "offline" | "sales" => Ok(Channel::Offline),
            _ => Err(EnumParseError::new("channel", s)),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_db_str())
    }
}

impl FromStr for Channel {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_db_str(s)
    }
}

// ============================================================================
// OPERATOR / AGENT ROLE
// ============================================================================

/// Coarse role of an operator or agent.
///
/// Unknown role strings deliberately do NOT fail parsing at the eligibility
/// boundary; callers that need the fail-open default should use
/// [`Role::from_db_str_lenient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Role {
    Admin,
    Manager,
    Head,
    Sales,
    Telesales,
    /// Anything the eligibility rules do not recognize.
    Other,
}

impl Role {
    /// Convert to database string representation.
    pub fn as_db_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Head => "head",
            Role::Sales => "sales",
            Role::Telesales => "telesales",
            Role::Other => "other",
        }
    }

    /// Parse from database string representation.
    pub fn from_db_str(s: &str) -> Result<Self, EnumParseError> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "head" => Ok(Role::Head),
            "sales" => Ok(Role::Sales),
            "telesales" => Ok(Role::Telesales),
            "other" => Ok(Role::Other),
            _ => Err(EnumParseError::new("role", s)),
        }
    }

    /// Parse a role string, folding anything unrecognized into [`Role::Other`].
    pub fn from_db_str_lenient(s: &str) -> Self {
        Self::from_db_str(s).unwrap_or(Role::Other)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_db_str())
    }
}

impl FromStr for Role {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_db_str(s)
    }
}

// ============================================================================
// SUB-ROLE
// ============================================================================

/// Finer-grained role tag scoping which agents a team head may assign to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum SubRole {
    HeadOnline,
    HeadOffline,
    SalesOnline,
    SalesOffline,
    #[default]
    None,
}

impl SubRole {
    /// Convert to database string representation.
    pub fn as_db_str(&self) -> &'static str {
        match self {
            SubRole::HeadOnline => "HEAD_ONLINE",
            SubRole::HeadOffline => "HEAD_OFFLINE",
            SubRole::SalesOnline => "SALES_ONLINE",
            SubRole::SalesOffline => "SALES_OFFLINE",
            SubRole::None => "NONE",
        }
    }

    /// Parse from database string representation.
    pub fn from_db_str(s: &str) -> Result<Self, EnumParseError> {
        match s.to_uppercase().as_str() {
            "HEAD_ONLINE" => Ok(SubRole::HeadOnline),
            "HEAD_OFFLINE" => Ok(SubRole::HeadOffline),
            "SALES_ONLINE" => Ok(SubRole::SalesOnline),
            "SALES_OFFLINE" => Ok(SubRole::SalesOffline),
            "NONE" | "" => Ok(SubRole::None),
            _ => Err(EnumParseError::new("sub-role", s)),
        }
    }

    /// Parse a sub-role string, folding anything unrecognized into [`SubRole::None`].
    pub fn from_db_str_lenient(s: &str) -> Self {
        Self::from_db_str(s).unwrap_or(SubRole::None)
    }

    /// Channel this sub-role operates on, if it is channel-scoped.
    pub fn channel(&self) -> Option<Channel> {
        match self {
            SubRole::HeadOnline | SubRole::SalesOnline => Some(Channel::Online),
            SubRole::HeadOffline | SubRole::SalesOffline => Some(Channel::Offline),
            SubRole::None => None,
        }
    }
}

impl fmt::Display for SubRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_db_str())
    }
}

impl FromStr for SubRole {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_db_str(s)
    }
}

// ============================================================================
// PARSE ERROR
// ============================================================================

/// Error when parsing an invalid enum string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumParseError {
    pub kind: &'static str,
    pub value: String,
}

impl EnumParseError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for EnumParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid {}: {}", self.kind, self.value)
    }
}

impl std::error::Error for EnumParseError {}

//! OpenAPI Specification for the Lead Pool API
//!
//! This module defines the OpenAPI document for the lead pool REST API.
//! It uses utoipa to generate the specification from Rust types and route
//! annotations.

use utoipa::OpenApi;

use crate::error::{ApiError, ErrorCode};
use crate::routes::{agent, assignment, health, pool};
use crate::types::{
    AssignRequestBody, AssignResponse, EligibleAgentsResponse, PaginationMeta, PoolResponse,
};

use leadpool_core::{
    Agent, AllocationStatus, Channel, ConflictRecord, Lead, LeadSource, Role, SubRole,
};

/// OpenAPI document for the lead pool API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lead Pool API",
        version = "0.3.0",
        description = "Lead allocation service with optimistic batch assignment and conflict surfacing",
    ),
    servers(
        (url = "http://localhost:8080", description = "Local Development")
    ),
    tags(
        (name = "Pool", description = "Paginated views of unassigned leads, by source"),
        (name = "Agents", description = "Eligible assignment targets for the current operator"),
        (name = "Assignments", description = "Batch assignment with conflict detection and force override"),
        (name = "Health", description = "Liveness and readiness probes")
    ),
    paths(
        pool::list_fresh,
        pool::list_transferred,
        agent::list_eligible,
        assignment::create_assignment,
        health::ping,
        health::liveness,
        health::readiness,
    ),
    components(schemas(
        // Domain types
        Lead,
        Agent,
        LeadSource,
        AllocationStatus,
        Channel,
        Role,
        SubRole,
        ConflictRecord,
        // Wire types
        PoolResponse,
        PaginationMeta,
        EligibleAgentsResponse,
        AssignRequestBody,
        AssignResponse,
        // Errors
        ApiError,
        ErrorCode,
        // Health
        health::HealthStatus,
        health::LivenessResponse,
        health::ReadinessResponse,
        health::StoreHealth,
    ))
)]
pub struct ApiDoc;

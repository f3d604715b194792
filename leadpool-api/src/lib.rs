//! Lead Pool API - REST API Layer
//!
//! This crate provides the HTTP layer of the lead pool service. It exposes
//! Axum REST endpoints for pool queries, eligible-agent listing, and batch
//! assignment with optimistic conflict detection.
//!
//! Operator identity arrives in request headers from the fronting auth
//! collaborator; every write path threads it through the eligibility
//! resolver before touching the store.

pub mod config;
pub mod error;
pub mod middleware;
#[cfg(feature = "openapi")]
pub mod openapi;
pub mod routes;
pub mod services;
pub mod telemetry;
pub mod types;

// Re-export commonly used types
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, ErrorCode};
pub use middleware::{
    OperatorExtractor, OPERATOR_ID_HEADER, OPERATOR_ROLE_HEADER, OPERATOR_SUB_ROLE_HEADER,
};
#[cfg(feature = "openapi")]
pub use openapi::ApiDoc;
pub use routes::create_api_router;
pub use types::*;

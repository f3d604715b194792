//! REST API Routes Module
//!
//! This module contains all REST API route handlers organized by resource.
//!
//! Includes:
//! - Pool query routes (fresh and transferred views)
//! - Eligible-agent listing for the assignment target picker
//! - Batch assignment with optimistic conflict detection
//! - Health check endpoints (Kubernetes-compatible)
//! - CORS support for the browser client

pub mod agent;
pub mod assignment;
pub mod health;
pub mod pool;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, header::HeaderName, HeaderValue, Method},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use leadpool_storage::LeadStore;

use crate::config::ApiConfig;
use crate::middleware::{OPERATOR_ID_HEADER, OPERATOR_ROLE_HEADER, OPERATOR_SUB_ROLE_HEADER};

// Re-export route creation functions for convenience
pub use agent::create_router as agent_router;
pub use assignment::create_router as assignment_router;
pub use health::create_router as health_router;
pub use pool::create_router as pool_router;

// ============================================================================
// OPENAPI ENDPOINT
// ============================================================================

/// Handler for /openapi.json endpoint.
#[cfg(feature = "openapi")]
async fn openapi_json() -> axum::Json<utoipa::openapi::OpenApi> {
    use utoipa::OpenApi;
    axum::Json(crate::openapi::ApiDoc::openapi())
}

// ============================================================================
// CORS LAYER
// ============================================================================

/// Build the CORS layer from ApiConfig.
///
/// In development mode (empty origins), allows all origins.
/// In production mode, only allows configured origins.
fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(OPERATOR_ID_HEADER),
            HeaderName::from_static(OPERATOR_ROLE_HEADER),
            HeaderName::from_static(OPERATOR_SUB_ROLE_HEADER),
        ])
        .max_age(Duration::from_secs(3600));

    if config.cors_origins.is_empty() {
        tracing::info!("CORS: Development mode - allowing all origins");
        cors.allow_origin(Any).allow_headers(Any)
    } else {
        tracing::info!(
            "CORS: Production mode - allowing origins: {:?}",
            config.cors_origins
        );
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

// ============================================================================
// APP ROUTER
// ============================================================================

/// Create the complete API router.
///
/// - Pool queries under /api/v1/pool/*
/// - Eligible agents under /api/v1/agents/eligible
/// - Batch assignment at /api/v1/assignments
/// - Health checks at /health/* (public)
/// - OpenAPI spec at /openapi.json
pub fn create_api_router(store: Arc<dyn LeadStore>, config: &ApiConfig) -> Router {
    let api_routes = Router::new()
        .nest("/pool", pool::create_router(store.clone(), config.clone()))
        .nest("/agents", agent::create_router(store.clone()))
        .nest(
            "/assignments",
            assignment::create_router(store.clone(), config.clone()),
        );

    let cors = build_cors_layer(config);

    let mut router = Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health::create_router(store));

    #[cfg(feature = "openapi")]
    {
        router = router.route("/openapi.json", axum::routing::get(openapi_json));
    }

    router.layer(TraceLayer::new_for_http()).layer(cors)
}

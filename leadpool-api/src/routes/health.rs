//! Health Probes
//!
//! Two probes with different questions: `/health` asks whether the process
//! is up at all, `/health/ready` asks whether the store answers a real query.
//! Readiness runs a minimal pool read so it exercises the same lock path the
//! pool endpoints use; a poisoned store lock flips it to 503. `/health/ping`
//! exists for load balancers that want a bare string.
//!
//! None of these require an operator identity.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use leadpool_storage::LeadStore;

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Answer to "is the process up".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LivenessResponse {
    pub status: HealthStatus,
    pub uptime_seconds: u64,
}

/// Answer to "can the service do work right now".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ReadinessResponse {
    pub status: HealthStatus,
    pub store: StoreHealth,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Result of one store probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StoreHealth {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// STATE
// ============================================================================

#[derive(Clone)]
pub struct HealthState {
    pub store: Arc<dyn LeadStore>,
    pub started: Instant,
}

// ============================================================================
// HANDLERS
// ============================================================================

/// GET /health/ping - bare-string probe
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health/ping",
    tag = "Health",
    responses(
        (status = 200, description = "Service is responding", body = String),
    ),
))]
pub async fn ping() -> impl IntoResponse {
    (StatusCode::OK, "pong")
}

/// GET /health - process liveness with uptime
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Process is alive", body = LivenessResponse),
    ),
))]
pub async fn liveness(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    Json(LivenessResponse {
        status: HealthStatus::Healthy,
        uptime_seconds: state.started.elapsed().as_secs(),
    })
}

/// GET /health/ready - store round-trip probe
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Store answered the probe query", body = ReadinessResponse),
        (status = 503, description = "Store probe failed", body = ReadinessResponse),
    ),
))]
pub async fn readiness(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    let probe_start = Instant::now();
    let store = match state.store.pool_fresh(0, 1, None).await {
        Ok(_) => StoreHealth {
            status: HealthStatus::Healthy,
            latency_ms: Some(probe_start.elapsed().as_millis() as u64),
            error: None,
        },
        Err(e) => StoreHealth {
            status: HealthStatus::Unhealthy,
            latency_ms: None,
            error: Some(e.to_string()),
        },
    };

    let status = store.status;
    let http_status = match status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    let body = ReadinessResponse {
        status,
        store,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started.elapsed().as_secs(),
    };

    (http_status, Json(body))
}

// ============================================================================
// ROUTER
// ============================================================================

/// Create the health probe router (no identity required).
pub fn create_router(store: Arc<dyn LeadStore>) -> Router {
    let state = Arc::new(HealthState {
        store,
        started: Instant::now(),
    });

    Router::new()
        .route("/", get(liveness))
        .route("/ping", get(ping))
        .route("/ready", get(readiness))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_liveness_payload_shape() {
        let json = serde_json::to_value(LivenessResponse {
            status: HealthStatus::Healthy,
            uptime_seconds: 42,
        })
        .unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["uptime_seconds"], 42);
    }

    #[test]
    fn test_failed_probe_carries_error_not_latency() {
        let json = serde_json::to_value(StoreHealth {
            status: HealthStatus::Unhealthy,
            latency_ms: None,
            error: Some("lock poisoned".to_string()),
        })
        .unwrap();
        assert_eq!(json["status"], "unhealthy");
        assert!(json.get("latency_ms").is_none());
        assert_eq!(json["error"], "lock poisoned");
    }
}

//! Lead Pool API Server Entry Point
//!
//! Bootstraps telemetry and configuration, seeds the in-memory store, and
//! starts the Axum HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use leadpool_api::{create_api_router, ApiConfig, ApiError, ApiResult};
use leadpool_storage::{InMemoryLeadStore, LeadStore};

#[tokio::main]
async fn main() -> ApiResult<()> {
    leadpool_api::telemetry::init();

    let config = ApiConfig::from_env();
    config.validate()?;

    let store: Arc<dyn LeadStore> = Arc::new(InMemoryLeadStore::new());

    let app: Router = create_api_router(store, &config);

    let addr = resolve_bind_addr(&config)?;
    tracing::info!(%addr, "Starting lead pool API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

fn resolve_bind_addr(config: &ApiConfig) -> ApiResult<SocketAddr> {
    config.bind_addr.parse::<SocketAddr>().map_err(|e| {
        ApiError::invalid_input(format!("Invalid bind address {}: {}", config.bind_addr, e))
    })
}

//! API Configuration Module
//!
//! Configuration is loaded from environment variables with sensible defaults
//! for development, then validated once at startup.

use crate::error::{ApiError, ApiResult};

// ============================================================================
// API CONFIGURATION
// ============================================================================

/// API configuration for binding, pagination limits, and CORS.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Socket address the server binds to.
    pub bind_addr: String,

    /// Page size used when the client does not ask for one.
    pub default_page_size: usize,

    /// Hard cap on a single pool-query page.
    pub max_page_size: usize,

    /// Hard cap on one assignment batch.
    pub max_batch_size: usize,

    /// Allowed CORS origins (comma-separated in env var).
    /// Empty means allow all origins (dev mode).
    pub cors_origins: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            default_page_size: 20,
            max_page_size: 100,
            max_batch_size: 200,
            cors_origins: Vec::new(), // Empty = allow all
        }
    }
}

impl ApiConfig {
    /// Create ApiConfig from environment variables.
    ///
    /// Environment variables:
    /// - `LEADPOOL_BIND`: Socket address (default: 0.0.0.0:8080)
    /// - `LEADPOOL_DEFAULT_PAGE_SIZE`: Default pool page size (default: 20)
    /// - `LEADPOOL_MAX_PAGE_SIZE`: Maximum pool page size (default: 100)
    /// - `LEADPOOL_MAX_BATCH_SIZE`: Maximum assignment batch (default: 200)
    /// - `LEADPOOL_CORS_ORIGINS`: Comma-separated origins (empty = allow all)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let bind_addr =
            std::env::var("LEADPOOL_BIND").unwrap_or(defaults.bind_addr);

        let default_page_size = std::env::var("LEADPOOL_DEFAULT_PAGE_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.default_page_size);

        let max_page_size = std::env::var("LEADPOOL_MAX_PAGE_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_page_size);

        let max_batch_size = std::env::var("LEADPOOL_MAX_BATCH_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_batch_size);

        let cors_origins = std::env::var("LEADPOOL_CORS_ORIGINS")
            .ok()
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            bind_addr,
            default_page_size,
            max_page_size,
            max_batch_size,
            cors_origins,
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ApiResult<()> {
        if self.default_page_size == 0 {
            return Err(ApiError::invalid_range("default_page_size", 1, self.max_page_size));
        }
        if self.max_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err(ApiError::invalid_range(
                "max_page_size",
                self.default_page_size,
                usize::MAX,
            ));
        }
        if self.max_batch_size == 0 {
            return Err(ApiError::invalid_range("max_batch_size", 1, usize::MAX));
        }
        Ok(())
    }

    /// Clamp a requested page size to the configured bounds.
    pub fn clamp_page_size(&self, requested: Option<usize>) -> usize {
        match requested {
            Some(0) | None => self.default_page_size,
            Some(size) => size.min(self.max_page_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ApiConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_page_sizes_rejected() {
        let mut config = ApiConfig::default();
        config.default_page_size = 0;
        assert!(config.validate().is_err());

        let mut config = ApiConfig::default();
        config.default_page_size = 500;
        config.max_page_size = 100;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_clamp_page_size() {
        let config = ApiConfig::default();
        assert_eq!(config.clamp_page_size(None), 20);
        assert_eq!(config.clamp_page_size(Some(0)), 20);
        assert_eq!(config.clamp_page_size(Some(50)), 50);
        assert_eq!(config.clamp_page_size(Some(10_000)), 100);
    }
}

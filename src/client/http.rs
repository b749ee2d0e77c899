//! HTTP client abstraction for chain API requests.

use reqwest::Client;
use std::time::Duration;

use crate::domain::SearchError;

// ============================================================================
// Constants
// ============================================================================

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default timeout for health check requests in seconds
pub const HEALTH_CHECK_TIMEOUT_SECS: u64 = 2;

// ============================================================================
// Configuration
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Maximum idle pooled connections per host
    pub pool_max_idle_per_host: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            pool_max_idle_per_host: 4,
        }
    }
}

impl HttpConfig {
    /// Create config with custom timeout
    #[must_use]
    #[allow(dead_code)] // Public API
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }
}

// ============================================================================
// HTTP Client
// ============================================================================

/// Build the shared pooled HTTP client.
///
/// The same client instance is cloned into the RPC and GraphQL clients so
/// both reuse one connection pool.
///
/// # Errors
///
/// Returns `SearchError::Parse` if the client fails to initialize (e.g.
/// TLS backend unavailable).
pub fn build_http_client(config: &HttpConfig) -> Result<Client, SearchError> {
    Client::builder()
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        .pool_idle_timeout(Duration::from_secs(30))
        .timeout(config.timeout)
        .build()
        .map_err(|e| SearchError::parse(format!("failed to initialize HTTP client: {e}")))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.pool_max_idle_per_host, 4);
    }

    #[test]
    fn test_with_timeout() {
        let config = HttpConfig::with_timeout(Duration::from_secs(3));
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(&HttpConfig::default()).is_ok());
    }
}

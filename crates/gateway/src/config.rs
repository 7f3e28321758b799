//! Gateway configuration.

use std::env;

use common::{CacheConfig, GrpcClientConfig, RateLimitConfig};

const DEFAULT_SESSION_URL: &str = "http://localhost:50051";
const DEFAULT_BACKOFFICE_URL: &str = "http://localhost:50052";

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Session service gRPC endpoint
    pub session_service: GrpcClientConfig,
    /// Back-office service gRPC endpoint (agents and todos)
    pub backoffice_service: GrpcClientConfig,
    /// Redis backing the rate limiter
    pub cache: CacheConfig,
    pub host: String,
    pub port: u16,
    /// Limit applied to authenticated routes
    pub rate_limit: RateLimitConfig,
    /// Stricter limit applied to login and registration
    pub auth_rate_limit: RateLimitConfig,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            session_service: GrpcClientConfig::new(
                env::var("SESSION_SERVICE_URL").unwrap_or_else(|_| DEFAULT_SESSION_URL.to_string()),
            ),
            backoffice_service: GrpcClientConfig::new(
                env::var("BACKOFFICE_SERVICE_URL")
                    .unwrap_or_else(|_| DEFAULT_BACKOFFICE_URL.to_string()),
            ),
            cache: CacheConfig {
                url: env::var("GATEWAY_REDIS_URL")
                    .or_else(|_| env::var("REDIS_URL"))
                    .unwrap_or(defaults.cache.url),
            },
            host: env::var("GATEWAY_HOST").unwrap_or(defaults.host),
            port: env_or("GATEWAY_PORT", defaults.port),
            rate_limit: RateLimitConfig {
                max_requests: env_or("RATE_LIMIT_REQUESTS", defaults.rate_limit.max_requests),
                window_seconds: env_or(
                    "RATE_LIMIT_WINDOW_SECONDS",
                    defaults.rate_limit.window_seconds,
                ),
            },
            auth_rate_limit: RateLimitConfig {
                max_requests: env_or(
                    "RATE_LIMIT_AUTH_REQUESTS",
                    defaults.auth_rate_limit.max_requests,
                ),
                window_seconds: env_or(
                    "RATE_LIMIT_AUTH_WINDOW_SECONDS",
                    defaults.auth_rate_limit.window_seconds,
                ),
            },
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            session_service: GrpcClientConfig::new(DEFAULT_SESSION_URL),
            backoffice_service: GrpcClientConfig::new(DEFAULT_BACKOFFICE_URL),
            cache: CacheConfig::default(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            rate_limit: RateLimitConfig::default(),
            auth_rate_limit: RateLimitConfig {
                max_requests: 10,
                window_seconds: 60,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_local_services() {
        let config = GatewayConfig::default();
        assert_eq!(config.session_service.endpoint, "http://localhost:50051");
        assert_eq!(config.backoffice_service.endpoint, "http://localhost:50052");
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_auth_routes_are_limited_harder() {
        let config = GatewayConfig::default();
        assert!(config.auth_rate_limit.max_requests < config.rate_limit.max_requests);
    }
}

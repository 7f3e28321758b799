//! Back-office service configuration.

use std::env;

/// Back-office service configuration.
#[derive(Debug, Clone)]
pub struct BackofficeServiceConfig {
    /// Load the demo agents and todos at start-up
    pub seed_demo_data: bool,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
}

impl BackofficeServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            seed_demo_data: env::var("BACKOFFICE_SEED_DEMO_DATA")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            host: env::var("BACKOFFICE_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("BACKOFFICE_SERVICE_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(50052),
        }
    }
}

impl Default for BackofficeServiceConfig {
    fn default() -> Self {
        Self {
            seed_demo_data: false,
            host: "0.0.0.0".to_string(),
            port: 50052,
        }
    }
}

//! Session service configuration.

use std::env;

use common::{AppError, AppResult, JwtConfig};
use domain::{DEFAULT_JWT_EXPIRATION_HOURS, MIN_JWT_SECRET_LENGTH};

/// Session service configuration.
#[derive(Debug, Clone)]
pub struct SessionServiceConfig {
    pub jwt: JwtConfig,
    /// Password given to the seeded demo accounts; no seeding when unset
    pub seed_password: Option<String>,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
}

impl SessionServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// `JWT_SECRET` is required and must be at least 32 characters.
    pub fn from_env() -> AppResult<Self> {
        let secret = env::var("JWT_SECRET")
            .or_else(|_| env::var("SESSION_SERVICE_JWT_SECRET"))
            .map_err(|_| AppError::internal("JWT_SECRET must be set"))?;
        if secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::internal(format!(
                "JWT_SECRET must be at least {} characters",
                MIN_JWT_SECRET_LENGTH
            )));
        }

        Ok(Self {
            jwt: JwtConfig {
                secret,
                expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                    .ok()
                    .and_then(|h| h.parse().ok())
                    .unwrap_or(DEFAULT_JWT_EXPIRATION_HOURS),
            },
            seed_password: env::var("SESSION_SEED_PASSWORD")
                .ok()
                .filter(|p| !p.is_empty()),
            host: env::var("SESSION_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("SESSION_SERVICE_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(50051),
        })
    }
}

impl Default for SessionServiceConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            seed_password: None,
            host: "0.0.0.0".to_string(),
            port: 50051,
        }
    }
}

//! Redis-backed counters for rate limiting.

use redis::{aio::ConnectionManager, AsyncCommands, RedisError};
use tracing::{debug, warn};

use common::{AppError, AppResult, CacheConfig};

/// Key prefix for rate limit counters
const CACHE_PREFIX_RATE_LIMIT: &str = "rate_limit:";

/// Redis connection wrapper.
pub struct Cache {
    conn: ConnectionManager,
}

impl Cache {
    pub async fn connect(config: &CacheConfig) -> Result<Self, RedisError> {
        debug!("Connecting to Redis at {}", config.url);
        let client = redis::Client::open(config.url.as_str())?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }

    /// Round-trip to Redis, for health checks.
    pub async fn ping(&self) -> AppResult<()> {
        let mut conn = self.conn.clone();
        conn.exists::<_, bool>("health_check")
            .await
            .map(|_| ())
            .map_err(|e| {
                warn!("Redis health check failed: {}", e);
                AppError::from(e)
            })
    }

    /// Increment the counter for `identifier` within the current window.
    /// Returns (current_count, allowed).
    pub async fn check_rate_limit(
        &self,
        identifier: &str,
        max_requests: u64,
        window_seconds: u64,
    ) -> AppResult<(u64, bool)> {
        let key = format!("{}{}", CACHE_PREFIX_RATE_LIMIT, identifier);
        let mut conn = self.conn.clone();

        let count: u64 = conn.incr(&key, 1).await?;

        // First hit opens the window
        if count == 1 {
            let _: () = conn.expire(&key, window_seconds as i64).await?;
        }

        Ok((count, count <= max_requests))
    }

    /// Seconds left in the window for `identifier`, if one is open.
    pub async fn rate_limit_ttl(&self, identifier: &str) -> AppResult<Option<u64>> {
        let key = format!("{}{}", CACHE_PREFIX_RATE_LIMIT, identifier);
        let mut conn = self.conn.clone();
        let ttl: i64 = conn.ttl(&key).await?;
        Ok(u64::try_from(ttl).ok())
    }
}

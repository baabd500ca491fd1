pub mod memory_store;
pub mod rate_limiter;
pub mod redis_store;

use std::sync::Arc;

use chrono::TimeDelta;

use crate::{errors::RateLimitError, settings::AppConfig};

use memory_store::MemoryRateLimitStore;
use rate_limiter::{FixedWindow, RateLimitStore, RateLimiter};
use redis_store::RedisRateLimitStore;

/// Redis-backed when `redis_url` is set, in-memory otherwise.
pub fn build_rate_limiter(config: &AppConfig) -> Result<RateLimiter, RateLimitError> {
    let window = i64::try_from(config.rate_limit_window_secs)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .ok_or(RateLimitError::InvalidWindow(config.rate_limit_window_secs))?;
    let policy = FixedWindow::new(config.rate_limit_max_requests, window);

    let store: Arc<dyn RateLimitStore> = match config.redis_url.as_deref() {
        Some(url) => Arc::new(RedisRateLimitStore::from_url(url)?),
        None => Arc::new(MemoryRateLimitStore::new()),
    };

    Ok(RateLimiter::new(store, policy))
}

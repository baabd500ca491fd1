use async_trait::async_trait;
use chrono::Utc;
use deadpool_redis::{Config as RedisConfig, Pool, Runtime};
use redis::AsyncCommands;

use crate::errors::RateLimitError;

use super::rate_limiter::{RateLimitRecord, RateLimitStore, WindowDecision};

const KEY_PREFIX: &str = "rl:contact";
const MAX_ATTEMPTS: usize = 5;

/// Shared store for deployments running more than one instance. Records live
/// as JSON strings that expire with their window.
#[derive(Clone)]
pub struct RedisRateLimitStore {
    pool: Pool,
}

impl RedisRateLimitStore {
    pub fn new(pool: Pool) -> Self {
        RedisRateLimitStore { pool }
    }

    pub fn from_url(url: &str) -> Result<Self, RateLimitError> {
        let pool = RedisConfig::from_url(url)
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| RateLimitError::Pool(e.to_string()))?;
        Ok(Self::new(pool))
    }

    // URL-encode so arbitrary header values make safe keys
    pub fn key_for(client_id: &str) -> String {
        format!("{}:{}", KEY_PREFIX, urlencoding::encode(client_id))
    }
}

#[async_trait]
impl RateLimitStore for RedisRateLimitStore {
    async fn apply(
        &self,
        key: &str,
        decide: &(dyn Fn(Option<RateLimitRecord>) -> WindowDecision + Send + Sync),
    ) -> Result<bool, RateLimitError> {
        let redis_key = Self::key_for(key);
        let mut conn = self.pool.get().await?;

        for attempt in 1..=MAX_ATTEMPTS {
            let _: () = redis::cmd("WATCH").arg(&redis_key).query_async(&mut conn).await?;

            let raw: Option<String> = conn.get(&redis_key).await?;
            let current = raw
                .as_deref()
                .map(serde_json::from_str::<RateLimitRecord>)
                .transpose()?;

            let decision = decide(current);
            let Some(record) = decision.record else {
                let _: () = redis::cmd("UNWATCH").query_async(&mut conn).await?;
                return Ok(decision.admitted);
            };

            let ttl_ms = (record.reset_time - Utc::now()).num_milliseconds().max(0) + 1;
            let committed: Option<redis::Value> = redis::pipe()
                .atomic()
                .cmd("SET")
                .arg(&redis_key)
                .arg(serde_json::to_string(&record)?)
                .arg("PX")
                .arg(ttl_ms)
                .query_async(&mut conn)
                .await?;

            if committed.is_some() {
                return Ok(decision.admitted);
            }
            tracing::debug!(key = %redis_key, attempt, "Rate limit record changed during update, retrying");
        }

        Err(RateLimitError::Contention(key.to_string()))
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}

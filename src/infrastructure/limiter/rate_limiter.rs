use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    constants::{DEFAULT_RATE_LIMIT_MAX_REQUESTS, DEFAULT_RATE_LIMIT_WINDOW_SECS},
    errors::RateLimitError,
};

/// Per-client counter for the current window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitRecord {
    pub count: u32,
    pub reset_time: DateTime<Utc>,
}

impl RateLimitRecord {
    /// A record past its reset time counts as absent.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.reset_time
    }
}

/// What to do with a request, and which record (if any) to write back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowDecision {
    pub admitted: bool,
    pub record: Option<RateLimitRecord>,
}

impl WindowDecision {
    fn admit(record: RateLimitRecord) -> Self {
        WindowDecision { admitted: true, record: Some(record) }
    }

    fn reject() -> Self {
        WindowDecision { admitted: false, record: None }
    }
}

/// Fixed-window policy: `max_requests` per `window`, counted from the first
/// request of the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedWindow {
    pub max_requests: u32,
    pub window: TimeDelta,
}

impl Default for FixedWindow {
    fn default() -> Self {
        FixedWindow {
            max_requests: DEFAULT_RATE_LIMIT_MAX_REQUESTS,
            window: TimeDelta::seconds(DEFAULT_RATE_LIMIT_WINDOW_SECS as i64),
        }
    }
}

impl FixedWindow {
    pub fn new(max_requests: u32, window: TimeDelta) -> Self {
        FixedWindow { max_requests, window }
    }

    pub fn decide(&self, current: Option<&RateLimitRecord>, now: DateTime<Utc>) -> WindowDecision {
        match current {
            Some(record) if !record.is_expired(now) => {
                if record.count >= self.max_requests {
                    WindowDecision::reject()
                } else {
                    WindowDecision::admit(RateLimitRecord {
                        count: record.count + 1,
                        reset_time: record.reset_time,
                    })
                }
            }
            _ => WindowDecision::admit(RateLimitRecord {
                count: 1,
                reset_time: now + self.window,
            }),
        }
    }
}

/// Storage for rate-limit records.
///
/// Implementations must run `decide` and persist its record as one atomic
/// step per key, otherwise two concurrent requests from the same client can
/// both read the same count and undercount. `decide` receives a copy of the
/// stored record, never a borrow into the store.
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    async fn apply(
        &self,
        key: &str,
        decide: &(dyn Fn(Option<RateLimitRecord>) -> WindowDecision + Send + Sync),
    ) -> Result<bool, RateLimitError>;

    /// Drops records whose window has elapsed. Returns how many were removed.
    async fn prune_expired(&self, _now: DateTime<Utc>) -> Result<usize, RateLimitError> {
        Ok(0)
    }

    fn backend(&self) -> &'static str;
}

#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn RateLimitStore>,
    policy: FixedWindow,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn RateLimitStore>, policy: FixedWindow) -> Self {
        RateLimiter { store, policy }
    }

    pub async fn admit(&self, client_id: &str) -> Result<bool, RateLimitError> {
        self.admit_at(client_id, Utc::now()).await
    }

    pub async fn admit_at(&self, client_id: &str, now: DateTime<Utc>) -> Result<bool, RateLimitError> {
        let policy = self.policy;
        let admitted = self
            .store
            .apply(client_id, &move |current: Option<RateLimitRecord>| {
                policy.decide(current.as_ref(), now)
            })
            .await?;

        if !admitted {
            tracing::warn!(client_id, "Rate limit exceeded");
        }
        Ok(admitted)
    }

    pub fn store(&self) -> Arc<dyn RateLimitStore> {
        self.store.clone()
    }

    pub fn policy(&self) -> FixedWindow {
        self.policy
    }
}

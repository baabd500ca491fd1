use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::{mapref::entry::Entry, DashMap};

use crate::errors::RateLimitError;

use super::rate_limiter::{RateLimitRecord, RateLimitStore, WindowDecision};

/// Process-local store. State is lost on restart and not shared between
/// instances.
#[derive(Clone, Default)]
pub struct MemoryRateLimitStore {
    map: Arc<DashMap<String, RateLimitRecord>>,
}

impl MemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<RateLimitRecord> {
        self.map.get(key).map(|entry| *entry.value())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[async_trait]
impl RateLimitStore for MemoryRateLimitStore {
    async fn apply(
        &self,
        key: &str,
        decide: &(dyn Fn(Option<RateLimitRecord>) -> WindowDecision + Send + Sync),
    ) -> Result<bool, RateLimitError> {
        // The entry guard holds the shard lock for the whole read-modify-write.
        let decision = match self.map.entry(key.to_string()) {
            Entry::Occupied(mut entry) => {
                let decision = decide(Some(*entry.get()));
                if let Some(record) = decision.record {
                    *entry.get_mut() = record;
                }
                decision
            }
            Entry::Vacant(entry) => {
                let decision = decide(None);
                if let Some(record) = decision.record {
                    entry.insert(record);
                }
                decision
            }
        };
        Ok(decision.admitted)
    }

    async fn prune_expired(&self, now: DateTime<Utc>) -> Result<usize, RateLimitError> {
        let mut removed = 0;
        self.map.retain(|_, record| {
            let keep = !record.is_expired(now);
            if !keep {
                removed += 1;
            }
            keep
        });
        Ok(removed)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

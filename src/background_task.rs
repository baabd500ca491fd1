use std::sync::Arc;

use chrono::Utc;
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::limiter::rate_limiter::RateLimitStore;

/// Periodically drops rate-limit records whose window has elapsed so the
/// in-memory table does not grow with every client ever seen.
pub async fn start_prune_task(store: Arc<dyn RateLimitStore>, every: Duration) {
    let mut interval = interval(every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        match store.prune_expired(Utc::now()).await {
            Ok(0) => {}
            Ok(count) => tracing::info!("Pruned {} expired rate limit records", count),
            Err(e) => tracing::error!("Rate limit prune failed: {}", e),
        }
    }
}

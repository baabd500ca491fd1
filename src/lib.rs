use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod background_task;
pub mod telemetry;

pub use domain::{entities, sanitize, use_cases, validation};
pub use interfaces::{handlers, routes};
pub use infrastructure::{limiter, notifier, utils};

use limiter::{build_rate_limiter, rate_limiter::RateLimiter};
use notifier::{build_notifier, Notifier};
use use_cases::contact::ContactHandler;

pub struct AppState {
    pub contact_handler: AppContactHandler,
    pub rate_limiter: RateLimiter,
    pub name: String,
    pub max_body_bytes: usize,
}

pub type AppContactHandler = ContactHandler<Arc<dyn Notifier>>;

impl AppState {
    pub fn new(config: &settings::AppConfig) -> anyhow::Result<Self> {
        let notifier = build_notifier(config)
            .map_err(|e| anyhow::anyhow!("failed to build notifier: {}", e))?;
        let rate_limiter = build_rate_limiter(config)
            .map_err(|e| anyhow::anyhow!("failed to build rate limiter: {}", e))?;

        Ok(Self::from_parts(config, notifier, rate_limiter))
    }

    pub fn from_parts(
        config: &settings::AppConfig,
        notifier: Arc<dyn Notifier>,
        rate_limiter: RateLimiter,
    ) -> Self {
        AppState {
            contact_handler: ContactHandler::new(notifier),
            rate_limiter,
            name: config.name.clone(),
            max_body_bytes: config.max_body_bytes,
        }
    }
}

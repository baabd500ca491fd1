pub mod console;
pub mod email;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    entities::contact::ContactFormData,
    errors::DeliveryError,
    settings::{AppConfig, DeliveryMode},
};

use console::ConsoleNotifier;
use email::EmailNotifier;

/// Sink for validated submissions. One attempt per call, no retries.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, data: &ContactFormData) -> Result<(), DeliveryError>;

    fn mode(&self) -> &'static str;
}

#[async_trait]
impl<T> Notifier for Arc<T>
where
    T: Notifier + ?Sized,
{
    async fn deliver(&self, data: &ContactFormData) -> Result<(), DeliveryError> {
        (**self).deliver(data).await
    }

    fn mode(&self) -> &'static str {
        (**self).mode()
    }
}

pub fn build_notifier(config: &AppConfig) -> Result<Arc<dyn Notifier>, DeliveryError> {
    match config.email_service {
        DeliveryMode::Console => Ok(Arc::new(ConsoleNotifier)),
        DeliveryMode::Email => Ok(Arc::new(EmailNotifier::from_config(config)?)),
    }
}

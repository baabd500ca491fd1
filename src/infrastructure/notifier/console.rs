use async_trait::async_trait;

use crate::{entities::contact::ContactFormData, errors::DeliveryError};

use super::Notifier;

/// Development sink: writes the submission to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

pub fn format_console_record(data: &ContactFormData) -> String {
    format!(
        "📧 New contact form submission:\n\
         Name: {}\n\
         Email: {}\n\
         Project Type: {}\n\
         Selected Package: {}\n\
         Message: {}\n\
         ---",
        data.name(),
        data.email(),
        data.project_type(),
        data.selected_package().unwrap_or("None"),
        data.message(),
    )
}

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn deliver(&self, data: &ContactFormData) -> Result<(), DeliveryError> {
        tracing::info!("{}", format_console_record(data));
        Ok(())
    }

    fn mode(&self) -> &'static str {
        "console"
    }
}

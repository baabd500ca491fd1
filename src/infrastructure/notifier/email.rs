use std::time::Duration;

use ammonia::clean_text;
use async_trait::async_trait;
use serde::Serialize;
use zeroize::Zeroizing;

use crate::{entities::contact::ContactFormData, errors::DeliveryError, settings::AppConfig};

use super::Notifier;

/// Body of a transactional-email call (Resend-compatible `POST /emails`).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmailRequest {
    pub from: String,
    pub to: Vec<String>,
    pub reply_to: String,
    pub subject: String,
    pub html: String,
}

impl EmailRequest {
    pub fn for_submission(data: &ContactFormData, from: &str, to: &str) -> Self {
        EmailRequest {
            from: from.to_string(),
            to: vec![to.to_string()],
            reply_to: data.email().to_string(),
            subject: format!("פנייה חדשה מ-{} - {}", data.name(), data.project_type()),
            html: render_html(data),
        }
    }
}

/// Field values are escaped: sanitization only strips angle brackets.
fn render_html(data: &ContactFormData) -> String {
    let row = |label: &str, value: &str| {
        format!("<p><strong>{}:</strong> {}</p>", label, clean_text(value))
    };

    let mut html = String::from(
        r#"<div dir="rtl" style="font-family: Arial, sans-serif; text-align: right;">"#,
    );
    html.push_str("<h2>פנייה חדשה מהאתר</h2>");
    html.push_str(&row("שם", data.name()));
    html.push_str(&row("אימייל", data.email()));
    html.push_str(&row("סוג פרויקט", data.project_type()));
    html.push_str(&row("חבילה נבחרת", data.selected_package().unwrap_or("לא נבחרה")));
    html.push_str(&format!(
        r#"<p><strong>הודעה:</strong></p><p style="white-space: pre-wrap;">{}</p>"#,
        clean_text(data.message())
    ));
    html.push_str("</div>");
    html
}

pub struct EmailNotifier {
    client: reqwest::Client,
    endpoint: String,
    api_key: Zeroizing<String>,
    from: String,
    to: String,
}

impl EmailNotifier {
    pub fn new(
        api_url: &str,
        api_key: &str,
        from: &str,
        to: &str,
        timeout: Duration,
    ) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(EmailNotifier {
            client,
            endpoint: format!("{}/emails", api_url.trim_end_matches('/')),
            api_key: Zeroizing::new(api_key.to_string()),
            from: from.to_string(),
            to: to.to_string(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, DeliveryError> {
        if config.email_api_key.trim().is_empty() {
            return Err(DeliveryError::NotConfigured("EMAIL_API_KEY is missing".into()));
        }

        Self::new(
            &config.email_api_url,
            &config.email_api_key,
            &config.email_from,
            &config.email_to,
            Duration::from_secs(config.email_timeout_secs),
        )
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn deliver(&self, data: &ContactFormData) -> Result<(), DeliveryError> {
        let request = EmailRequest::for_submission(data, &self.from, &self.to);

        let response = self.client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.as_str())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(status = status.as_u16(), "Email provider accepted the message");
        Ok(())
    }

    fn mode(&self) -> &'static str {
        "email"
    }
}

use crate::{
    constants::SUCCESS_MESSAGE,
    entities::contact::{ContactFormData, ContactResponse, SubmissionInput},
    errors::AppError,
    notifier::Notifier,
};

pub struct ContactHandler<N>
where
    N: Notifier,
{
    pub notifier: N,
}

impl<N> ContactHandler<N>
where
    N: Notifier,
{
    pub fn new(notifier: N) -> Self {
        ContactHandler { notifier }
    }

    /// Validates, sanitizes and delivers a submission
    pub async fn submit(&self, input: SubmissionInput) -> Result<ContactResponse, AppError> {
        let data = ContactFormData::parse(&input)
            .map_err(|validation| AppError::ValidationError(validation.into_errors()))?;

        self.notifier.deliver(&data).await?;

        tracing::info!(
            mode = self.notifier.mode(),
            project_type = data.project_type(),
            "Contact submission delivered"
        );

        Ok(ContactResponse {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
        })
    }
}

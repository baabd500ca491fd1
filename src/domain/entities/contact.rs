use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{
    sanitize::{coerce_to_string, sanitize_input},
    validation::validate_contact_form,
};

/// Raw submission body as received from the client. Nothing about its shape is
/// trusted until it has been through validation.
pub type SubmissionInput = Value;

/// Outcome of [`validate_contact_form`]. Only the validator creates one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    is_valid: bool,
    errors: Vec<String>,
}

impl ValidationResult {
    pub(crate) fn from_errors(errors: Vec<String>) -> Self {
        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
}

/// A validated and sanitized contact-form submission.
///
/// Fields are private and the only way to obtain a value is
/// [`ContactFormData::parse`], which runs the validator itself, so anything
/// handed to a notifier has already been checked and cleaned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFormData {
    name: String,
    email: String,
    project_type: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    selected_package: Option<String>,
}

impl ContactFormData {
    /// Validates `input` and builds the sanitized record from it. A failed
    /// validation is returned as the error.
    pub fn parse(input: &SubmissionInput) -> Result<Self, ValidationResult> {
        let validation = validate_contact_form(input);
        let fields = match input.as_object() {
            Some(fields) if validation.is_valid => fields,
            _ => return Err(validation),
        };

        let field = |key: &str| {
            fields
                .get(key)
                .map(|value| sanitize_input(&coerce_to_string(value)))
                .unwrap_or_default()
        };

        let selected_package = fields
            .get("selectedPackage")
            .filter(|value| !is_blank_package(value))
            .map(|value| sanitize_input(&coerce_to_string(value)));

        Ok(ContactFormData {
            name: field("name"),
            email: field("email"),
            project_type: field("projectType"),
            message: field("message"),
            selected_package,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn project_type(&self) -> &str {
        &self.project_type
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn selected_package(&self) -> Option<&str> {
        self.selected_package.as_deref()
    }
}

fn is_blank_package(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}

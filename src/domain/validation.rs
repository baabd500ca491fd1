use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::entities::contact::{SubmissionInput, ValidationResult};

pub const INVALID_FORMAT_ERROR: &str = "פורמט הנתונים אינו תקין";
pub const NAME_ERROR: &str = "שם חייב להכיל לפחות 2 תווים";
pub const EMAIL_ERROR: &str = "כתובת אימייל לא תקינה";
pub const PROJECT_TYPE_ERROR: &str = "יש לבחור סוג פרויקט";
pub const MESSAGE_ERROR: &str = "ההודעה חייבת להכיל לפחות 10 תווים";

const MIN_NAME_CHARS: usize = 2;
const MIN_MESSAGE_CHARS: usize = 10;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Checks a raw submission. Every rule runs, so the result lists all failing
/// fields in the order name, email, projectType, message.
pub fn validate_contact_form(input: &SubmissionInput) -> ValidationResult {
    let Some(fields) = input.as_object() else {
        return ValidationResult::from_errors(vec![INVALID_FORMAT_ERROR.to_string()]);
    };

    let mut errors = Vec::new();

    if !min_trimmed_chars(fields, "name", MIN_NAME_CHARS) {
        errors.push(NAME_ERROR.to_string());
    }

    let email_ok = string_field(fields, "email").is_some_and(|email| EMAIL_PATTERN.is_match(email));
    if !email_ok {
        errors.push(EMAIL_ERROR.to_string());
    }

    // Present and non-empty; whitespace-only passes.
    if string_field(fields, "projectType").is_none_or(str::is_empty) {
        errors.push(PROJECT_TYPE_ERROR.to_string());
    }

    if !min_trimmed_chars(fields, "message", MIN_MESSAGE_CHARS) {
        errors.push(MESSAGE_ERROR.to_string());
    }

    ValidationResult::from_errors(errors)
}

fn string_field<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields.get(key).and_then(Value::as_str)
}

fn min_trimmed_chars(fields: &Map<String, Value>, key: &str, min: usize) -> bool {
    string_field(fields, key).is_some_and(|value| value.trim().chars().count() >= min)
}
